//! # Site Watch
//!
//! This crate implements the availability-watch engine: normalizing raw
//! recreation.gov month data into per-campground record sets, diffing
//! consecutive polls against each other, and composing the notification a
//! watcher sends when availability changes.

/// Watch configuration and fetch error types
mod watch_types;
pub use watch_types::*;

/// Availability records and per-poll snapshots
mod availability;
pub use availability::*;

/// Normalization of raw month rows into record sets
mod normalize;
pub use normalize::*;

/// Snapshot comparison across polls
mod diff;
pub use diff::*;

/// Notification text rendering
mod composer;
pub use composer::*;

/// One fetch, normalize, diff, notify iteration
mod cycle;
pub use cycle::*;
