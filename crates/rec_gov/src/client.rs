use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Format of the per-day keys in a month-availability response.
///
/// Shared with the normalization layer so both sides agree on how the keys
/// are parsed.
pub const AVAILABILITY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Client for the recreation.gov public API
pub struct RecClient {
    client: Client,
    api_base: String,
}

/// Response envelope from the month-availability endpoint
#[derive(Debug, Deserialize)]
pub struct MonthAvailabilityResponse {
    /// Map from campsite id to that site's slice of the month
    pub campsites: HashMap<String, CampsiteMonth>,
}

/// One campsite's slice of a month-availability response
#[derive(Debug, Clone, Deserialize)]
pub struct CampsiteMonth {
    /// Stable campsite identifier
    pub campsite_id: String,

    /// Human-facing site number, e.g. "A012"
    #[serde(default)]
    pub site: Option<String>,

    /// Loop the site belongs to
    #[serde(default, rename = "loop")]
    pub site_loop: Option<String>,

    /// Site type label, e.g. "STANDARD NONELECTRIC"
    #[serde(default)]
    pub campsite_type: Option<String>,

    /// Map from date key (see [`AVAILABILITY_DATE_FORMAT`]) to status string
    #[serde(default)]
    pub availabilities: HashMap<String, String>,
}

/// One campground hit from the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CampgroundSearchResult {
    /// Campground entity id, usable as a campground id elsewhere
    #[serde(default)]
    pub entity_id: String,

    /// Campground display name
    #[serde(default)]
    pub name: String,

    /// Short description, when the API provides one
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CampgroundSearchResult>,
}

/// Errors from the recreation.gov API
#[derive(Debug, thiserror::Error)]
pub enum RecGovError {
    /// Request construction or transport failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Rate limited by recreation.gov
    #[error("Rate limited by recreation.gov")]
    RateLimited,

    /// Request was rejected as unauthenticated
    #[error("Authentication failed with recreation.gov")]
    AuthenticationFailed,

    /// Unknown campground or endpoint
    #[error("Campground not found")]
    NotFound,

    /// Any other non-success response
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl RecClient {
    /// Create a new recreation.gov API client
    pub fn new() -> Result<Self, RecGovError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:99.0) Gecko/20100101 Firefox/99.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RecGovError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: "https://www.recreation.gov/api".to_string(),
        })
    }

    /// Fetch a month of per-site availability for a campground.
    ///
    /// The endpoint only accepts the first of a month, so `month_start` is
    /// clamped down to day one before the request is built.
    pub async fn get_month_availability(
        &self,
        campground_id: &str,
        month_start: NaiveDate,
    ) -> Result<Vec<CampsiteMonth>, RecGovError> {
        let url = format!(
            "{}/camps/availability/campground/{}/month",
            self.api_base, campground_id
        );
        let start_date_param = format_month_start(month_start);

        debug!("Fetching availability: {}?start_date={}", url, start_date_param);

        let response = self
            .client
            .get(&url)
            .query(&[("start_date", start_date_param.as_str())])
            .send()
            .await
            .map_err(|e| RecGovError::Http(format!("HTTP request failed: {}", e)))?;
        let response = check_status(response)?;

        let month: MonthAvailabilityResponse = response
            .json()
            .await
            .map_err(|e| RecGovError::Parse(e.to_string()))?;

        Ok(month.campsites.into_values().collect())
    }

    /// Search campgrounds by name.
    pub async fn search_campgrounds(
        &self,
        query: &str,
    ) -> Result<Vec<CampgroundSearchResult>, RecGovError> {
        debug!("Searching campgrounds: {}", query);

        let url = format!(
            "{}/search?q={}&entity_type=recarea&exact=false&size=20&start=0&fq={}",
            self.api_base,
            urlencoding::encode(query),
            urlencoding::encode("-entity_type:(tour OR timedentry_tour)")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RecGovError::Http(format!("Search request failed: {}", e)))?;
        let response = check_status(response)?;

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| RecGovError::Parse(e.to_string()))?;

        Ok(search.results)
    }
}

/// Map a non-success HTTP status to the matching error
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RecGovError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    match status.as_u16() {
        429 => Err(RecGovError::RateLimited),
        401 | 403 => Err(RecGovError::AuthenticationFailed),
        404 => Err(RecGovError::NotFound),
        _ => Err(RecGovError::Api(format!("HTTP {}", status))),
    }
}

/// Render the `start_date` query parameter for a month request
fn format_month_start(month_start: NaiveDate) -> String {
    let first = NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), 1)
        .unwrap_or(month_start);
    format!("{}T00:00:00.000Z", first.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month_start_clamps_to_first() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 17).unwrap();
        assert_eq!(format_month_start(date), "2022-05-01T00:00:00.000Z");

        let first = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
        assert_eq!(format_month_start(first), "2022-05-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_month_availability_response() {
        let payload = serde_json::json!({
            "campsites": {
                "64081": {
                    "campsite_id": "64081",
                    "site": "A012",
                    "loop": "LOOP A",
                    "campsite_type": "STANDARD NONELECTRIC",
                    "campsite_reserve_type": "Site-Specific",
                    "max_num_people": 6,
                    "availabilities": {
                        "2022-05-01T00:00:00Z": "Available",
                        "2022-05-02T00:00:00Z": "Reserved"
                    }
                }
            }
        });

        let month: MonthAvailabilityResponse = serde_json::from_value(payload).unwrap();
        let site = &month.campsites["64081"];
        assert_eq!(site.campsite_id, "64081");
        assert_eq!(site.site.as_deref(), Some("A012"));
        assert_eq!(site.site_loop.as_deref(), Some("LOOP A"));
        assert_eq!(site.campsite_type.as_deref(), Some("STANDARD NONELECTRIC"));
        assert_eq!(site.availabilities["2022-05-01T00:00:00Z"], "Available");
    }

    #[test]
    fn test_parse_month_availability_tolerates_missing_labels() {
        let payload = serde_json::json!({
            "campsites": {
                "64082": {
                    "campsite_id": "64082",
                    "availabilities": {}
                }
            }
        });

        let month: MonthAvailabilityResponse = serde_json::from_value(payload).unwrap();
        let site = &month.campsites["64082"];
        assert!(site.site.is_none());
        assert!(site.site_loop.is_none());
        assert!(site.availabilities.is_empty());
    }

    #[test]
    fn test_parse_search_response() {
        let payload = serde_json::json!({
            "results": [
                {
                    "entity_id": "232447",
                    "entity_type": "campground",
                    "name": "Upper Pines Campground",
                    "description": "In Yosemite Valley"
                },
                {
                    "entity_id": "232450",
                    "name": "Lower Pines Campground"
                }
            ]
        });

        let search: SearchResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(search.results.len(), 2);
        assert_eq!(search.results[0].entity_id, "232447");
        assert_eq!(search.results[1].description, None);
    }

    #[test]
    fn test_availability_date_format_round_trip() {
        let parsed =
            chrono::NaiveDateTime::parse_from_str("2022-05-01T00:00:00Z", AVAILABILITY_DATE_FORMAT)
                .unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2022, 5, 1).unwrap());
    }
}
