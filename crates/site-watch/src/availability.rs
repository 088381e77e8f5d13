use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One bookable campsite with availability on at least one watched night.
///
/// Identity is the campsite id alone: `site`, `site_loop`, and `site_type`
/// are display payload and never participate in equality or hashing, so set
/// arithmetic over records stays stable even when the service relabels a
/// site between polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAvailability {
    /// Campground the site belongs to
    pub campground_id: String,

    /// Stable campsite identifier
    pub site_id: String,

    /// Human-facing site number
    pub site: String,

    /// Loop label, may be empty
    pub site_loop: String,

    /// Site type label, may be empty
    pub site_type: String,
}

impl PartialEq for SiteAvailability {
    fn eq(&self, other: &Self) -> bool {
        self.site_id == other.site_id
    }
}

impl Eq for SiteAvailability {}

impl Hash for SiteAvailability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.site_id.hash(state);
    }
}

/// Everything available across all watched campgrounds at one poll instant.
///
/// Built fresh each poll; the loop keeps the snapshot it gets back from a
/// cycle and passes it in as `previous` on the next one. Nothing else holds
/// availability state.
#[derive(Debug, Clone, Default)]
pub struct AvailabilitySnapshot {
    campgrounds: HashMap<String, HashSet<SiteAvailability>>,
}

impl AvailabilitySnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the available-site set observed for a campground this poll
    pub fn insert(&mut self, campground_id: String, sites: HashSet<SiteAvailability>) {
        self.campgrounds.insert(campground_id, sites);
    }

    /// The available-site set for a campground, if it was observed this poll
    pub fn sites(&self, campground_id: &str) -> Option<&HashSet<SiteAvailability>> {
        self.campgrounds.get(campground_id)
    }

    /// Iterate observed campgrounds and their available-site sets
    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashSet<SiteAvailability>)> {
        self.campgrounds.iter()
    }

    /// Number of campgrounds observed this poll
    pub fn len(&self) -> usize {
        self.campgrounds.len()
    }

    /// True when no campground was observed this poll
    pub fn is_empty(&self) -> bool {
        self.campgrounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn site(site_id: &str, site_loop: &str) -> SiteAvailability {
        SiteAvailability {
            campground_id: "232447".to_string(),
            site_id: site_id.to_string(),
            site: site_id.to_string(),
            site_loop: site_loop.to_string(),
            site_type: "STANDARD NONELECTRIC".to_string(),
        }
    }

    #[test]
    fn test_equality_ignores_payload() {
        let a = site("64081", "LOOP A");
        let b = site("64081", "LOOP B");
        let c = site("64082", "LOOP A");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut sites = HashSet::new();
        sites.insert(site("64081", "LOOP A"));
        sites.insert(site("64081", "LOOP B"));
        sites.insert(site("64082", "LOOP A"));

        // Payload-only differences collapse into one record.
        assert_eq!(sites.len(), 2);
        assert!(sites.contains(&site("64081", "anything")));
    }

    #[test]
    fn test_snapshot_replaces_campground_entry() {
        let mut snapshot = AvailabilitySnapshot::new();
        snapshot.insert("232447".to_string(), HashSet::from([site("64081", "LOOP A")]));
        snapshot.insert("232447".to_string(), HashSet::from([site("64082", "LOOP A")]));

        assert_eq!(snapshot.len(), 1);
        let sites = snapshot.sites("232447").unwrap();
        assert!(sites.contains(&site("64082", "")));
        assert!(!sites.contains(&site("64081", "")));
    }
}
