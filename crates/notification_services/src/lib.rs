//! # Notification Services
//!
//! This crate provides email delivery for availability notifications.
//! It defines the [`EmailService`] trait together with an AWS SES backed
//! implementation and a mock used in development and tests.

/// Email service trait and implementations
pub mod service;
/// Error types for notification delivery
pub mod types;

pub use service::{EmailService, MockEmailService, SesEmailService};
pub use types::NotificationError;
