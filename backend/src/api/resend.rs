use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EmailConfig;
use crate::error::ConfigError;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Message body in the shape the Resend `/emails` endpoint expects.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("provider rejected the api key")]
    Unauthorized,
    #[error("provider refused the sender or recipients")]
    Forbidden,
    #[error("provider rejected the message as invalid")]
    InvalidMessage,
    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("provider request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

impl DeliveryError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::UNPROCESSABLE_ENTITY => Self::InvalidMessage,
            _ => Self::Rejected {
                status: status.as_u16(),
                body,
            },
        }
    }

    pub fn user_message(&self, dev_mode: bool) -> &'static str {
        match self {
            Self::Unauthorized => "Email service authentication failed. Please contact support.",
            // in dev mode a 403 means the recipient is not the account owner
            Self::Forbidden if dev_mode => "Email service configuration issue. Please contact support.",
            Self::Forbidden => "Domain verification required. Please verify your domain in Resend or enable DEV_MODE for testing.",
            Self::InvalidMessage => "Invalid email address. Please check and try again.",
            Self::Rejected { .. } => {
                "Failed to send email. Please try again later or contact us directly."
            }
            Self::Timeout => "Request timed out. Please try again.",
            Self::Network(_) => "Network error. Please check your connection and try again.",
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Outbound mail transport. Returns the provider's message id.
#[async_trait]
pub trait EmailRelay: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<String, DeliveryError>;
}

pub struct ResendClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl ResendClient {
    pub fn new(api_key: String, api_url: String) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }

    /// `None` when no api key is configured.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>, ConfigError> {
        match &config.resend_api_key {
            Some(key) => Ok(Some(Self::new(key.clone(), config.resend_api_url.clone())?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EmailRelay for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<String, DeliveryError> {
        tracing::info!("Sending email via Resend: {} to {} recipient(s)", email.subject, email.to.len());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Resend API response status: {}", status);

        if status.is_success() {
            let id = match response.json::<SendResponse>().await {
                Ok(body) => body.id.unwrap_or_else(|| "unknown".to_string()),
                Err(e) => {
                    tracing::warn!("Could not parse Resend response body: {}", e);
                    "unknown".to_string()
                }
            };
            tracing::info!("Email sent successfully: {}", id);
            Ok(id)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Resend API error: {} - {}", status, body);
            Err(DeliveryError::from_status(status, body))
        }
    }
}
