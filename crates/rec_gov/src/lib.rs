//! # RecGov
//!
//! This crate provides a client for the Rec.gov API, which is used to search
//! for campgrounds and to pull a month of campsite availability at a time.

/// HTTP client for the Rec.gov search and availability endpoints
mod client;
pub use client::*;
