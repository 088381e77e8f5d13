use std::collections::{HashMap, HashSet};

use crate::availability::{AvailabilitySnapshot, SiteAvailability};

/// Comparison outcome for one campground
#[derive(Debug, Clone)]
pub struct CampgroundDiff {
    /// Sites available this poll
    pub available: HashSet<SiteAvailability>,

    /// Sites that were available last poll but are gone now
    pub newly_unavailable: HashSet<SiteAvailability>,

    /// Whether the available set differs from last poll
    pub changed: bool,
}

/// Comparison outcome across all campgrounds observed this poll
#[derive(Debug, Clone)]
pub struct DiffResult {
    /// Per-campground outcome, keyed by campground id
    pub campgrounds: HashMap<String, CampgroundDiff>,

    /// Whether this poll warrants a notification
    pub should_notify: bool,
}

/// Compare two polls.
///
/// Pure function of its two arguments: snapshot retention belongs to the
/// caller, which passes the previous poll back in explicitly, so repeated
/// calls with the same inputs always yield the same result.
///
/// A campground missing from `previous` (first poll, or no data last cycle)
/// is compared against the empty set: anything currently available counts
/// as a change, and nothing is reported as newly unavailable.
pub fn compare(previous: &AvailabilitySnapshot, current: &AvailabilitySnapshot) -> DiffResult {
    let empty = HashSet::new();
    let mut campgrounds = HashMap::new();
    let mut should_notify = false;

    for (campground_id, available) in current.iter() {
        let previously_available = previous.sites(campground_id).unwrap_or(&empty);

        let newly_unavailable: HashSet<SiteAvailability> = previously_available
            .difference(available)
            .cloned()
            .collect();

        // Set inequality, not count inequality: equal-sized sets with
        // different members still count as a change.
        let changed = available != previously_available;

        if (changed && !available.is_empty()) || !newly_unavailable.is_empty() {
            should_notify = true;
        }

        campgrounds.insert(
            campground_id.clone(),
            CampgroundDiff {
                available: available.clone(),
                newly_unavailable,
                changed,
            },
        );
    }

    DiffResult {
        campgrounds,
        should_notify,
    }
}
