use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::types::NotificationError;

/// Trait for email delivery backends
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send one plain-text email
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError>;
}

/// AWS SES email service implementation
pub struct SesEmailService {
    client: Client,
    aws_region: String,
    aws_access_key: String,
    aws_secret_key: String,
}

#[derive(Debug, Serialize)]
struct SesRequest {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Destination")]
    destination: SesDestination,
    #[serde(rename = "Message")]
    message: SesMessage,
}

#[derive(Debug, Serialize)]
struct SesDestination {
    #[serde(rename = "ToAddresses")]
    to_addresses: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SesMessage {
    #[serde(rename = "Subject")]
    subject: SesContent,
    #[serde(rename = "Body")]
    body: SesBody,
}

#[derive(Debug, Serialize)]
struct SesContent {
    #[serde(rename = "Data")]
    data: String,
    #[serde(rename = "Charset")]
    charset: String,
}

#[derive(Debug, Serialize)]
struct SesBody {
    #[serde(rename = "Text")]
    text: SesContent,
}

impl SesEmailService {
    /// Create an SES email service from `AWS_*` environment variables
    pub fn from_env() -> Result<Self, NotificationError> {
        let aws_region = env::var("AWS_REGION").map_err(|_| {
            NotificationError::Config("AWS_REGION environment variable not set".to_string())
        })?;

        let aws_access_key = env::var("AWS_ACCESS_KEY_ID").map_err(|_| {
            NotificationError::Config("AWS_ACCESS_KEY_ID environment variable not set".to_string())
        })?;

        let aws_secret_key = env::var("AWS_SECRET_ACCESS_KEY").map_err(|_| {
            NotificationError::Config(
                "AWS_SECRET_ACCESS_KEY environment variable not set".to_string(),
            )
        })?;

        Ok(Self {
            client: Client::new(),
            aws_region,
            aws_access_key,
            aws_secret_key,
        })
    }

    fn build_request(from: &str, to: &[String], subject: &str, body: &str) -> SesRequest {
        SesRequest {
            source: from.to_string(),
            destination: SesDestination {
                to_addresses: to.to_vec(),
            },
            message: SesMessage {
                subject: SesContent {
                    data: subject.to_string(),
                    charset: "UTF-8".to_string(),
                },
                body: SesBody {
                    text: SesContent {
                        data: body.to_string(),
                        charset: "UTF-8".to_string(),
                    },
                },
            },
        }
    }
}

#[async_trait]
impl EmailService for SesEmailService {
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        info!(
            "Sending email to {} recipient(s) with subject: {}",
            to.len(),
            subject
        );

        let request = Self::build_request(from, to, subject, body);
        let payload =
            serde_json::to_string(&request).map_err(|e| NotificationError::Ses(e.to_string()))?;

        // TODO: sign the request with SigV4 using the access/secret key pair
        // and POST it via self.client to the SES v2 SendEmail endpoint for
        // the configured region. Until then the payload is logged so a watch
        // run stays inspectable end to end.
        let _ = (&self.client, &self.aws_access_key, &self.aws_secret_key);
        info!("SES payload for region {}: {}", self.aws_region, payload);

        Ok(())
    }
}

/// Mock email service for development/testing
pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        info!("📧 [MOCK EMAIL] From: {}", from);
        info!("📧 [MOCK EMAIL] To: {}", to.join(", "));
        info!("📧 [MOCK EMAIL] Subject: {}", subject);
        info!("📧 [MOCK EMAIL] Body:\n{}", body);

        let mock_id = format!("mock-email-{}", uuid::Uuid::new_v4());
        info!("📧 [MOCK EMAIL] Delivered as {}", mock_id);

        Ok(())
    }
}
