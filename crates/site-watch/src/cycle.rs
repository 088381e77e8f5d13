use async_trait::async_trait;
use chrono::{Datelike, Months, NaiveDate};
use notification_services::EmailService;
use rec_gov::{CampsiteMonth, RecClient};
use tracing::{debug, error, info};

use crate::availability::AvailabilitySnapshot;
use crate::composer::compose;
use crate::diff::compare;
use crate::normalize::normalize;
use crate::watch_types::{FetchError, WatchConfig};

/// Source of raw month-availability data for one campground
#[async_trait]
pub trait AvailabilityFetcher: Send + Sync {
    /// Fetch the month containing `month_start` for a campground
    async fn fetch_month(
        &self,
        campground_id: &str,
        month_start: NaiveDate,
    ) -> Result<Vec<CampsiteMonth>, FetchError>;
}

#[async_trait]
impl AvailabilityFetcher for RecClient {
    async fn fetch_month(
        &self,
        campground_id: &str,
        month_start: NaiveDate,
    ) -> Result<Vec<CampsiteMonth>, FetchError> {
        Ok(self.get_month_availability(campground_id, month_start).await?)
    }
}

/// Run one poll: fetch, normalize, diff against the previous poll, and
/// notify when the diff calls for it.
///
/// Returns the snapshot the caller passes back as `previous` next time. A
/// campground whose fetch fails is omitted from the returned snapshot rather
/// than reported as having no sites. A failed send is logged and
/// the snapshot still advances, so a later poll never re-diffs state this
/// one already saw.
pub async fn run_once(
    config: &WatchConfig,
    previous: &AvailabilitySnapshot,
    fetcher: &dyn AvailabilityFetcher,
    email: &dyn EmailService,
) -> AvailabilitySnapshot {
    let mut current = AvailabilitySnapshot::new();

    for campground in &config.campgrounds {
        match fetch_window(fetcher, &campground.id, config.start_date, config.end_date).await {
            Ok(rows) => {
                let sites = normalize(&rows, &campground.id, config.start_date, config.end_date);
                debug!(
                    "{} ({}): {} site(s) available in window",
                    campground.name,
                    campground.id,
                    sites.len()
                );
                current.insert(campground.id.clone(), sites);
            }
            Err(err) => {
                error!(
                    "Failed to fetch availability for {} ({}), skipping this cycle: {}",
                    campground.name, campground.id, err
                );
            }
        }
    }

    let diff = compare(previous, &current);

    if diff.should_notify {
        info!("Found open sites! Alerting...");
        let notification = compose(config, &diff);
        match email
            .send_email(
                &config.from_email,
                &config.dest_emails,
                &notification.subject,
                &notification.body,
            )
            .await
        {
            Ok(()) => info!("Notification sent to {} recipient(s)", config.dest_emails.len()),
            Err(err) => error!("Could not send notification: {}", err),
        }
    }

    current
}

/// Fetch every month overlapping `[window_start, window_end)` for one
/// campground and concatenate the rows.
async fn fetch_window(
    fetcher: &dyn AvailabilityFetcher,
    campground_id: &str,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<Vec<CampsiteMonth>, FetchError> {
    let mut rows = Vec::new();
    for month_start in month_starts(window_start, window_end) {
        rows.extend(fetcher.fetch_month(campground_id, month_start).await?);
    }
    Ok(rows)
}

/// First-of-month dates for every month the half-open window touches.
///
/// The end date itself is excluded, so a window ending on the 1st does not
/// drag in that whole month.
fn month_starts(window_start: NaiveDate, window_end: NaiveDate) -> Vec<NaiveDate> {
    let last_night = window_end.pred_opt().unwrap_or(window_start);
    let last_month = first_of_month(last_night.max(window_start));

    let mut starts = Vec::new();
    let mut month = first_of_month(window_start);
    while month <= last_month {
        starts.push(month);
        month = match month.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    starts
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}
