use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use estada_backend::api::resend::{DeliveryError, EmailRelay, OutboundEmail};
use estada_backend::config::Config;
use estada_backend::{build_router, AppState};

#[derive(Default)]
struct RecordingRelay {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_status: Option<StatusCode>,
}

impl RecordingRelay {
    fn failing(status: StatusCode) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_status: Some(status),
        }
    }

    fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailRelay for RecordingRelay {
    async fn send(&self, email: &OutboundEmail) -> Result<String, DeliveryError> {
        if let Some(status) = self.fail_status {
            return Err(DeliveryError::from_status(status, "provider said no".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok("test-message-id".to_string())
    }
}

fn config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: Vec<(String, String)> = vec![
        ("SECRET_KEY".to_string(), "integration-test-secret".to_string()),
        ("STATIC_DIR".to_string(), "/nonexistent/estada-static".to_string()),
        ("TEST_EMAIL".to_string(), "owner@estada.dev".to_string()),
    ];
    vars.extend(overrides.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_lookup(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

fn app_with(config: Config, relay: Option<Arc<RecordingRelay>>) -> Router {
    let relay = relay.map(|r| r as Arc<dyn EmailRelay>);
    build_router(Arc::new(AppState::new(config, relay)))
}

fn with_peer(mut request: Request<Body>) -> Request<Body> {
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([203, 0, 113, 9], 40000))));
    request
}

fn get(path: &str) -> Request<Body> {
    with_peer(Request::builder().uri(path).body(Body::empty()).unwrap())
}

fn post_json(path: &str, body: String) -> Request<Body> {
    with_peer(
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

async fn fetch_token(app: &Router) -> String {
    let (status, _, body) = call(app, get("/api/csrf-token")).await;
    assert_eq!(status, StatusCode::OK);
    body["csrf_token"].as_str().unwrap().to_string()
}

fn submission(token: &str) -> Value {
    json!({
        "name": "Ana Petrovska",
        "email": "Ana@Client.mk",
        "service": "Logistics",
        "message": "We need a quote for weekly freight to Skopje.",
        "website": "",
        "csrf_token": token,
    })
}

#[tokio::test]
async fn token_endpoint_sets_security_headers() {
    let app = app_with(config(&[]), None);
    let (status, headers, body) = call(&app, get("/api/csrf-token")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["csrf_token"].as_str().unwrap().is_empty());
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(
        headers["strict-transport-security"],
        "max-age=31536000; includeSubDomains"
    );
}

#[tokio::test]
async fn valid_submission_is_relayed() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));
    let token = fetch_token(&app).await;

    let (status, _, body) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let sent = relay.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["owner@estada.dev".to_string()]);
    assert_eq!(sent[0].reply_to.as_deref(), Some("ana@client.mk"));
    assert!(sent[0].text.contains("Service: Logistics"));
}

#[tokio::test]
async fn spent_token_is_rejected() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));
    let token = fetch_token(&app).await;

    let (first, _, _) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;
    let (second, _, body) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(relay.sent().len(), 1);
}

#[tokio::test]
async fn missing_or_forged_token_is_forbidden() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));

    let mut body = submission("");
    body.as_object_mut().unwrap().remove("csrf_token");
    let (status, _, reply) = call(&app, post_json("/api/contact", body.to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        reply["message"],
        "Security validation failed. Please refresh the page and try again."
    );

    let (status, _, _) = call(&app, post_json("/api/contact", submission("abc.def").to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other_app = app_with(config(&[("SECRET_KEY", "a-different-secret")]), None);
    let foreign = fetch_token(&other_app).await;
    let (status, _, _) = call(&app, post_json("/api/contact", submission(&foreign).to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert!(relay.sent().is_empty());
}

#[tokio::test]
async fn honeypot_pretends_success_without_sending() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));
    let token = fetch_token(&app).await;

    let mut body = submission(&token);
    body["website"] = json!("http://spam.example");
    let (status, _, reply) = call(&app, post_json("/api/contact", body.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["success"], true);
    assert!(relay.sent().is_empty());

    // The trapped token is spent, even for an otherwise clean retry.
    let (status, _, _) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(relay.sent().is_empty());
}

#[tokio::test]
async fn invalid_fields_are_bad_requests() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));
    let token = fetch_token(&app).await;

    let cases = [
        ("name", json!(""), "Name and email are required"),
        ("email", json!("a@@b.com"), "Invalid email address format."),
        ("email", json!("bot@tempmail.com"), "Please use a valid business email address."),
    ];
    for (field, value, expected) in cases {
        let mut body = submission(&token);
        body[field] = value;
        let (status, _, reply) = call(&app, post_json("/api/contact", body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", field);
        assert_eq!(reply["message"], expected);
    }

    // the token was never spent by the rejected attempts
    let (status, _, _) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app_with(config(&[]), None);
    let (status, _, reply) = call(&app, post_json("/api/contact", "{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["success"], false);
}

#[tokio::test]
async fn delivery_failure_keeps_token_usable() {
    let relay = Arc::new(RecordingRelay::failing(StatusCode::UNPROCESSABLE_ENTITY));
    let app = app_with(config(&[]), Some(relay));
    let token = fetch_token(&app).await;

    for _ in 0..2 {
        let (status, _, reply) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply["message"], "Invalid email address. Please check and try again.");
    }
}

#[tokio::test]
async fn unconfigured_provider_reports_server_error() {
    let app = app_with(config(&[]), None);
    let token = fetch_token(&app).await;

    let (status, _, reply) = call(&app, post_json("/api/contact", submission(&token).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        reply["message"],
        "Email service not configured. Please contact support."
    );
}

#[tokio::test]
async fn contact_is_rate_limited_per_client() {
    let app = app_with(config(&[("RATE_LIMIT_REQUESTS", "2")]), None);

    for _ in 0..2 {
        let (status, _, _) = call(&app, post_json("/api/contact", "{}".to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
    let (status, _, reply) = call(&app, post_json("/api/contact", "{}".to_string())).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(reply["message"], "Too many requests. Please try again later.");

    // the token endpoint is not limited
    let (status, _, _) = call(&app, get("/api/csrf-token")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_can_be_disabled() {
    let app = app_with(
        config(&[("RATE_LIMIT_REQUESTS", "1"), ("RATE_LIMIT_ENABLED", "false")]),
        None,
    );
    for _ in 0..3 {
        let (status, _, _) = call(&app, post_json("/api/contact", "{}".to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let relay = Arc::new(RecordingRelay::default());
    let app = app_with(config(&[]), Some(relay.clone()));
    let token = fetch_token(&app).await;

    let mut body = submission(&token);
    body["message"] = json!("x".repeat(20 * 1024));
    let (status, _, reply) = call(&app, post_json("/api/contact", body.to_string())).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        reply["message"],
        "Request too large. Please reduce the size of your message."
    );
    assert!(relay.sent().is_empty());
}

#[tokio::test]
async fn debug_config_is_hidden_outside_debug() {
    let app = app_with(config(&[("RESEND_API_KEY", "re_secret_value")]), None);
    let (status, _, body) = call(&app, get("/api/debug/config")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn debug_config_reports_presence_not_secret() {
    let app = app_with(
        config(&[("APP_DEBUG", "true"), ("RESEND_API_KEY", "re_secret_value")]),
        None,
    );
    let (status, headers, body) = call(&app, get("/api/debug/config")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["RESEND_API_KEY_present"], true);
    assert_eq!(body["RESEND_API_KEY_length"], 15);
    assert_eq!(body["will_send_to"], json!(["owner@estada.dev"]));
    assert!(!body.to_string().contains("re_secret_value"));
    assert!(headers.get("strict-transport-security").is_none());
}

#[tokio::test]
async fn unknown_api_paths_are_json_404s() {
    let app = app_with(config(&[]), None);
    let (status, _, body) = call(&app, get("/api/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");

    let (health, _, _) = call(&app, get("/api/health")).await;
    assert_eq!(health, StatusCode::OK);
}
