use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rec_gov::{AVAILABILITY_DATE_FORMAT, CampsiteMonth};
use tracing::warn;

use crate::availability::SiteAvailability;

/// Status string the reservation service uses for a bookable night
pub const STATUS_AVAILABLE: &str = "Available";

/// Reduce raw month rows to the set of sites bookable within the window.
///
/// The window is half-open: `window_start` counts, `window_end` does not.
/// The end date is checkout morning, not a watched night. A site lands in
/// the result at most once no matter how many of its nights match. A date
/// key that fails to parse is skipped and logged; one bad entry never costs
/// the rest of the row.
pub fn normalize(
    rows: &[CampsiteMonth],
    campground_id: &str,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> HashSet<SiteAvailability> {
    let mut sites = HashSet::new();

    for row in rows {
        for (date_key, status) in &row.availabilities {
            if status != STATUS_AVAILABLE {
                continue;
            }

            let date = match NaiveDateTime::parse_from_str(date_key, AVAILABILITY_DATE_FORMAT) {
                Ok(parsed) => parsed.date(),
                Err(err) => {
                    warn!(
                        "Skipping unparseable availability date {:?} for campsite {}: {}",
                        date_key, row.campsite_id, err
                    );
                    continue;
                }
            };

            if date < window_start || date >= window_end {
                continue;
            }

            sites.insert(SiteAvailability {
                campground_id: campground_id.to_string(),
                site_id: row.campsite_id.clone(),
                site: row.site.clone().unwrap_or_else(|| row.campsite_id.clone()),
                site_loop: row.site_loop.clone().unwrap_or_default(),
                site_type: row.campsite_type.clone().unwrap_or_default(),
            });
        }
    }

    sites
}
