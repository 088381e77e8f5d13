//! Watch daemon entry point: loads a watch config, then polls recreation.gov
//! until killed, emailing the configured recipients whenever availability
//! changes within the watched window.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notification_services::{EmailService, MockEmailService, SesEmailService};
use rec_gov::RecClient;
use site_watch::{AvailabilitySnapshot, run_once};

use crate::config::load_config;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  campsite-watch <config.json>   run the watch loop");
    eprintln!("  campsite-watch search <query>  look up campground ids by name");
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [command, query @ ..] if command == "search" && !query.is_empty() => {
            search(&query.join(" ")).await
        }
        [config_path] => watch(PathBuf::from(config_path)).await,
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

async fn watch(config_path: PathBuf) {
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Failed to load config from {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };

    log::info!(
        "🏕️ Watching {} campground(s) from {} to {}, polling every {}s",
        config.campgrounds.len(),
        config.start_date,
        config.end_date,
        config.poll_interval_secs
    );

    let client = match RecClient::new() {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to create recreation.gov client: {}", e);
            std::process::exit(1);
        }
    };

    let email: Arc<dyn EmailService> = match SesEmailService::from_env() {
        Ok(service) => {
            log::info!("📧 Notification service initialized successfully");
            Arc::new(service)
        }
        Err(e) => {
            log::warn!("🔧 {}; falling back to mock email delivery", e);
            Arc::new(MockEmailService)
        }
    };

    let mut snapshot = AvailabilitySnapshot::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        ticker.tick().await;
        log::info!("Getting sites...");
        snapshot = run_once(&config, &snapshot, &client, email.as_ref()).await;
    }
}

async fn search(query: &str) {
    let client = match RecClient::new() {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to create recreation.gov client: {}", e);
            std::process::exit(1);
        }
    };

    match client.search_campgrounds(query).await {
        Ok(results) if results.is_empty() => println!("No results found"),
        Ok(results) => {
            for result in results {
                println!("{}  {}", result.entity_id, result.name);
                if let Some(description) = result.description {
                    println!("    {}", description);
                }
            }
        }
        Err(e) => {
            log::error!("❌ Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
