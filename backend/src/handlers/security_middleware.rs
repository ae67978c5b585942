use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
    Router,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::error::ContactError;
use crate::AppState;

pub type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Remote address of the caller, attached to the request by [`rate_limit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientIp(pub String);

/// At most `requests` in any span of `window`. The burst refills one slot
/// per `window`, so a spent burst cannot be topped up within the same window.
pub fn build_limiter(config: &RateLimitConfig) -> Option<KeyedLimiter> {
    if !config.enabled {
        return None;
    }
    let burst = NonZeroU32::new(config.requests)?;
    let quota = Quota::with_period(config.window)?.allow_burst(burst);
    Some(RateLimiter::keyed(quota))
}

fn client_ip(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ContactError> {
    let ip = client_ip(&request);

    if let Some(limiter) = &state.contact_limiter {
        if limiter.check_key(&ip).is_err() {
            warn!("Rate limit exceeded for {}", ip);
            return Err(ContactError::RateLimited);
        }
        debug!("Rate limit check passed for {}", ip);
    }

    request.extensions_mut().insert(ClientIp(ip));
    Ok(next.run(request).await)
}

pub fn with_security_headers<S>(router: Router<S>, debug: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("1; mode=block"),
        ));

    if debug {
        router
    } else {
        router.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        ))
    }
}
