/// Errors from notification delivery
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Simple email service (SES) errors
    #[error("AWS SES error: {0}")]
    Ses(String),

    /// The service is missing required environment configuration
    #[error("Email service is not configured: {0}")]
    Config(String),
}
