use std::collections::HashSet;

use crate::availability::SiteAvailability;
use crate::diff::DiffResult;
use crate::watch_types::WatchConfig;

/// Base URL for campground booking pages
const CAMPGROUND_URL_BASE: &str = "https://www.recreation.gov/camping/campgrounds/";

/// Subject line used for every availability notification
pub const NOTIFICATION_SUBJECT: &str = "Rec.gov Open sites Found";

/// A rendered notification, ready to hand to an email service
#[derive(Debug, Clone)]
pub struct Notification {
    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub body: String,
}

/// Render the notification for a poll's diff.
///
/// Output is deterministic: campgrounds appear in watch-list order and sites
/// within a section are sorted by site id, so the same diff always renders
/// to the same text. Campgrounds with no data this poll are left out rather
/// than reported as empty.
pub fn compose(config: &WatchConfig, diff: &DiffResult) -> Notification {
    let mut available_sections = Vec::new();
    let mut unavailable_sections = Vec::new();

    for campground in &config.campgrounds {
        let Some(campground_diff) = diff.campgrounds.get(&campground.id) else {
            continue;
        };

        let header = format!(
            "{}\n{}{}\n\n",
            campground.name, CAMPGROUND_URL_BASE, campground.id
        );

        let mut available_body = header.clone();
        if campground_diff.available.is_empty() {
            available_body.push_str("(None Available)\n");
        } else {
            for site in sorted_by_site_id(&campground_diff.available) {
                push_site(&mut available_body, site);
            }
        }
        available_sections.push(available_body);

        let mut unavailable_body = header;
        if campground_diff.newly_unavailable.is_empty() {
            unavailable_body.push_str("(None no longer available)\n");
        } else {
            for site in sorted_by_site_id(&campground_diff.newly_unavailable) {
                push_site(&mut unavailable_body, site);
            }
        }
        unavailable_sections.push(unavailable_body);
    }

    let body = format!(
        "Hello,\nWe found the following sites for you:\n\n{}\n\nThe following sites are no longer available:\n\n{}\n\nThanks!\n",
        available_sections.join("\n"),
        unavailable_sections.join("\n"),
    );

    Notification {
        subject: NOTIFICATION_SUBJECT.to_string(),
        body,
    }
}

fn sorted_by_site_id(sites: &HashSet<SiteAvailability>) -> Vec<&SiteAvailability> {
    let mut sorted: Vec<&SiteAvailability> = sites.iter().collect();
    sorted.sort_by(|a, b| a.site_id.cmp(&b.site_id));
    sorted
}

fn push_site(body: &mut String, site: &SiteAvailability) {
    body.push_str(&format!(
        "site num: {}\nsite loop: {}\nsite type: {}\n",
        site.site, site.site_loop, site.site_type
    ));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::diff::CampgroundDiff;
    use crate::watch_types::WatchedCampground;

    fn config(campgrounds: &[(&str, &str)]) -> WatchConfig {
        WatchConfig {
            campgrounds: campgrounds
                .iter()
                .map(|(id, name)| WatchedCampground {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 5, 4).unwrap(),
            from_email: "watcher@example.com".to_string(),
            dest_emails: vec!["camper@example.com".to_string()],
            poll_interval_secs: 60,
        }
    }

    fn site(site_id: &str, site_num: &str) -> SiteAvailability {
        SiteAvailability {
            campground_id: "232447".to_string(),
            site_id: site_id.to_string(),
            site: site_num.to_string(),
            site_loop: "LOOP A".to_string(),
            site_type: "STANDARD NONELECTRIC".to_string(),
        }
    }

    fn diff_result(entries: Vec<(&str, CampgroundDiff)>) -> DiffResult {
        let should_notify = entries
            .iter()
            .any(|(_, d)| (d.changed && !d.available.is_empty()) || !d.newly_unavailable.is_empty());
        DiffResult {
            campgrounds: entries
                .into_iter()
                .map(|(id, d)| (id.to_string(), d))
                .collect::<HashMap<_, _>>(),
            should_notify,
        }
    }

    #[test]
    fn test_empty_sets_render_both_markers() {
        let config = config(&[("232447", "Upper Pines")]);
        let diff = diff_result(vec![(
            "232447",
            CampgroundDiff {
                available: HashSet::new(),
                newly_unavailable: HashSet::new(),
                changed: false,
            },
        )]);

        let notification = compose(&config, &diff);

        assert_eq!(notification.subject, "Rec.gov Open sites Found");
        assert!(notification.body.contains("(None Available)"));
        assert!(notification.body.contains("(None no longer available)"));
        assert!(
            notification
                .body
                .contains("https://www.recreation.gov/camping/campgrounds/232447")
        );
    }

    #[test]
    fn test_sites_render_sorted_by_site_id() {
        let config = config(&[("232447", "Upper Pines")]);
        let diff = diff_result(vec![(
            "232447",
            CampgroundDiff {
                available: HashSet::from([site("2", "A002"), site("1", "A001"), site("3", "A003")]),
                newly_unavailable: HashSet::new(),
                changed: true,
            },
        )]);

        let notification = compose(&config, &diff);

        let first = notification.body.find("A001").unwrap();
        let second = notification.body.find("A002").unwrap();
        let third = notification.body.find("A003").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_campgrounds_render_in_watch_list_order() {
        let config = config(&[("2", "Beta Grounds"), ("1", "Alpha Grounds")]);
        let empty = CampgroundDiff {
            available: HashSet::new(),
            newly_unavailable: HashSet::new(),
            changed: false,
        };
        let diff = diff_result(vec![("1", empty.clone()), ("2", empty)]);

        let notification = compose(&config, &diff);

        let beta = notification.body.find("Beta Grounds").unwrap();
        let alpha = notification.body.find("Alpha Grounds").unwrap();
        assert!(beta < alpha);
    }

    #[test]
    fn test_campground_without_data_is_skipped() {
        let config = config(&[("232447", "Upper Pines"), ("232450", "Lower Pines")]);
        let diff = diff_result(vec![(
            "232447",
            CampgroundDiff {
                available: HashSet::from([site("1", "A001")]),
                newly_unavailable: HashSet::new(),
                changed: true,
            },
        )]);

        let notification = compose(&config, &diff);

        assert!(notification.body.contains("Upper Pines"));
        assert!(!notification.body.contains("Lower Pines"));
    }

    #[test]
    fn test_newly_unavailable_section_lists_lost_sites() {
        let config = config(&[("232447", "Upper Pines")]);
        let diff = diff_result(vec![(
            "232447",
            CampgroundDiff {
                available: HashSet::new(),
                newly_unavailable: HashSet::from([site("9", "B009")]),
                changed: true,
            },
        )]);

        let notification = compose(&config, &diff);

        assert!(notification.body.contains("(None Available)"));
        assert!(notification.body.contains("site num: B009"));
        assert!(!notification.body.contains("(None no longer available)"));
    }

    #[test]
    fn test_same_diff_renders_identically() {
        let config = config(&[("232447", "Upper Pines")]);
        let diff = diff_result(vec![(
            "232447",
            CampgroundDiff {
                available: HashSet::from([site("2", "A002"), site("1", "A001")]),
                newly_unavailable: HashSet::from([site("3", "A003")]),
                changed: true,
            },
        )]);

        let first = compose(&config, &diff);
        let second = compose(&config, &diff);
        assert_eq!(first.body, second.body);
    }
}
