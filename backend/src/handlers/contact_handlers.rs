use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::error::ContactError;
use crate::handlers::contact_dtos::{
    ContactRequest, ContactResponse, CsrfTokenResponse, DebugConfigResponse,
};
use crate::handlers::security_middleware::ClientIp;
use crate::utils::email_utils::Inquiry;
use crate::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn csrf_token(State(state): State<Arc<AppState>>) -> Json<CsrfTokenResponse> {
    Json(CsrfTokenResponse {
        csrf_token: state.csrf.issue(),
    })
}

pub async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

/// Only answers in debug mode. Reports whether the api key is present, never the key.
pub async fn debug_config(State(state): State<Arc<AppState>>) -> Response {
    if !state.config.debug {
        return api_not_found().await;
    }
    let email = &state.config.email;
    Json(DebugConfigResponse {
        resend_api_key_present: email.resend_api_key.is_some(),
        resend_api_key_length: email.resend_api_key.as_ref().map(|k| k.len()).unwrap_or(0),
        dev_mode: email.dev_mode,
        sender_email: email.sender_email.clone(),
        sender_name: email.sender_name.clone(),
        test_email: email.test_email.clone(),
        recipient_emails: email.recipient_emails.clone(),
        will_send_to: email.recipients(),
    })
    .into_response()
}

pub async fn contact(
    State(state): State<Arc<AppState>>,
    Extension(ClientIp(ip)): Extension<ClientIp>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ContactError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ContactError::PayloadTooLarge
        } else {
            ContactError::MalformedBody(rejection.body_text())
        }
    })?;

    let token = request
        .csrf_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ContactError::MissingToken)?;
    // Held until the email is out; dropping it early releases the token.
    let claim = state.csrf.claim(token)?;

    // Bots fill every field. Answer as if it worked so the trap stays hidden.
    let honeypot = request.website.as_deref().map(str::trim).unwrap_or_default();
    if !honeypot.is_empty() {
        warn!("Honeypot triggered from IP {}", ip);
        claim.commit();
        return Ok(Json(ContactResponse::sent("Message sent successfully!")));
    }

    let inquiry = Inquiry::from_request(&request)?;

    let relay = state.relay.as_ref().ok_or(ContactError::EmailNotConfigured)?;
    let email = inquiry.to_email(&state.config.email, Utc::now().timestamp());
    info!(
        "Contact form submission from {} ({}), dev_mode={}, recipients={}",
        inquiry.email,
        ip,
        state.config.email.dev_mode,
        email.to.len()
    );

    relay
        .send(&email)
        .await
        .map_err(|source| ContactError::Delivery {
            source,
            dev_mode: state.config.email.dev_mode,
        })?;

    claim.commit();
    Ok(Json(ContactResponse::sent(
        "Message sent successfully! We'll be in touch soon.",
    )))
}
