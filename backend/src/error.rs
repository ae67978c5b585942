use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::resend::DeliveryError;
use crate::handlers::contact_dtos::ContactResponse;
use crate::utils::csrf::CsrfError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Every way a contact submission can fail. Each variant maps to one status
/// code and one user-facing message, the details stay in the logs.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("too many requests")]
    RateLimited,

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("csrf token missing")]
    MissingToken,

    #[error("csrf validation failed: {0}")]
    InvalidToken(#[from] CsrfError),

    #[error("name and email are required")]
    MissingFields,

    #[error("invalid email address format")]
    InvalidEmail,

    #[error("disposable email domain: {0}")]
    DisposableEmail(String),

    #[error("email service not configured")]
    EmailNotConfigured,

    #[error("email delivery failed: {source}")]
    Delivery {
        #[source]
        source: DeliveryError,
        dev_mode: bool,
    },
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MalformedBody(_)
            | Self::MissingFields
            | Self::InvalidEmail
            | Self::DisposableEmail(_) => StatusCode::BAD_REQUEST,
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::FORBIDDEN,
            Self::EmailNotConfigured | Self::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => "Too many requests. Please try again later.".to_string(),
            Self::PayloadTooLarge => {
                "Request too large. Please reduce the size of your message.".to_string()
            }
            Self::MalformedBody(_) => "Invalid request. Please try again.".to_string(),
            Self::MissingToken | Self::InvalidToken(_) => {
                "Security validation failed. Please refresh the page and try again.".to_string()
            }
            Self::MissingFields => "Name and email are required".to_string(),
            Self::InvalidEmail => "Invalid email address format.".to_string(),
            Self::DisposableEmail(_) => "Please use a valid business email address.".to_string(),
            Self::EmailNotConfigured => {
                "Email service not configured. Please contact support.".to_string()
            }
            Self::Delivery { source, dev_mode } => source.user_message(*dev_mode).to_string(),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Contact form error: {}", self);
        } else {
            tracing::warn!("Contact form rejected: {}", self);
        }
        (status, Json(ContactResponse::failure(self.user_message()))).into_response()
    }
}
