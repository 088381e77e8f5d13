use chrono::NaiveDate;
use rec_gov::RecGovError;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail};

/// One campground on the watch list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchedCampground {
    /// Campground entity id on recreation.gov
    pub id: String,

    /// Display name used in notifications
    pub name: String,
}

/// Validated, static configuration for one watch run
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_date_window"))]
pub struct WatchConfig {
    /// Campgrounds to watch, in notification order
    #[validate(
        length(min = 1, message = "At least one campground is required"),
        custom(function = "validate_campgrounds")
    )]
    pub campgrounds: Vec<WatchedCampground>,

    /// First night to watch (inclusive)
    pub start_date: NaiveDate,

    /// End of the watch window (exclusive; the last watched night is the day
    /// before)
    pub end_date: NaiveDate,

    /// Sender address for notifications
    #[validate(email(message = "Sender address must be a valid email"))]
    pub from_email: String,

    /// Destination addresses for notifications
    #[validate(
        length(min = 1, message = "At least one destination email is required"),
        custom(function = "validate_email_list")
    )]
    pub dest_emails: Vec<String>,

    /// Seconds to sleep between polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    60
}

/// Schema-level check that the watch window holds at least one night
fn validate_date_window(config: &WatchConfig) -> Result<(), validator::ValidationError> {
    if config.end_date <= config.start_date {
        return Err(validator::ValidationError::new("invalid_date_window"));
    }
    Ok(())
}

/// Every watched campground needs both an id and a display name
fn validate_campgrounds(
    campgrounds: &[WatchedCampground],
) -> Result<(), validator::ValidationError> {
    if campgrounds
        .iter()
        .any(|c| c.id.trim().is_empty() || c.name.trim().is_empty())
    {
        return Err(validator::ValidationError::new("campground_id_and_name_required"));
    }
    Ok(())
}

/// Every destination must look like an email address
fn validate_email_list(emails: &[String]) -> Result<(), validator::ValidationError> {
    if emails.iter().any(|e| !e.validate_email()) {
        return Err(validator::ValidationError::new("invalid_destination_email"));
    }
    Ok(())
}

/// Errors surfaced by an availability fetcher.
///
/// All of these are transient from the watch loop's point of view: the
/// campground is skipped for the cycle and retried on the next poll.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Rate limited by the reservation service
    #[error("Rate limited by the reservation service")]
    RateLimited,

    /// The campground id is unknown to the reservation service
    #[error("Campground not found")]
    NotFound,

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// The response arrived but could not be understood
    #[error("Malformed availability data: {0}")]
    Malformed(String),

    /// The reservation service rejected the request
    #[error("API error: {0}")]
    Api(String),
}

impl From<RecGovError> for FetchError {
    fn from(err: RecGovError) -> Self {
        match err {
            RecGovError::RateLimited => FetchError::RateLimited,
            RecGovError::NotFound => FetchError::NotFound,
            RecGovError::Http(msg) => FetchError::Network(msg),
            RecGovError::Parse(msg) => FetchError::Malformed(msg),
            RecGovError::AuthenticationFailed => {
                FetchError::Api("Authentication failed with recreation.gov".to_string())
            }
            RecGovError::Api(msg) => FetchError::Api(msg),
        }
    }
}
