use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod handlers {
    pub mod contact_dtos;
    pub mod contact_handlers;
    pub mod security_middleware;
}
pub mod utils {
    pub mod csrf;
    pub mod email_utils;
}
pub mod api {
    pub mod resend;
}
pub mod config;
pub mod error;

use api::resend::EmailRelay;
use config::Config;
use handlers::{contact_handlers, security_middleware};
use utils::csrf::CsrfProtector;

pub struct AppState {
    pub config: Config,
    pub csrf: CsrfProtector,
    pub contact_limiter: Option<security_middleware::KeyedLimiter>,
    /// `None` when no provider key is configured; submissions then fail with a 500.
    pub relay: Option<Arc<dyn EmailRelay>>,
}

impl AppState {
    pub fn new(config: Config, relay: Option<Arc<dyn EmailRelay>>) -> Self {
        let csrf = CsrfProtector::new(&config.secret_key, config.csrf_time_limit);
        let contact_limiter = security_middleware::build_limiter(&config.rate_limit);
        Self {
            config,
            csrf,
            contact_limiter,
            relay,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let config = &state.config;

    let contact_routes = Router::new()
        .route("/api/contact", post(contact_handlers::contact))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            security_middleware::rate_limit,
        ))
        .layer(DefaultBodyLimit::max(config.max_content_length));

    let api_routes = Router::new()
        .route("/api/health", get(contact_handlers::health_check))
        .route("/api/csrf-token", get(contact_handlers::csrf_token))
        .route("/api/debug/config", get(contact_handlers::debug_config))
        .route("/api/{*rest}", any(contact_handlers::api_not_found))
        .merge(contact_routes);

    // Client-side routes (/about, /technologies) all resolve to the app shell.
    let static_files = ServeDir::new(&config.static_dir)
        .fallback(ServeFile::new(config.static_dir.join("index.html")));

    let app = Router::new()
        .merge(api_routes)
        .fallback_service(static_files);

    let mut app = security_middleware::with_security_headers(app, config.debug).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    // Only needed when the frontend runs on its own dev server.
    if let Some(origin) = &config.frontend_url {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => {
                app = app.layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_origin(AllowOrigin::exact(origin))
                        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                        .allow_credentials(true),
                );
            }
            Err(e) => tracing::warn!("Ignoring invalid FRONTEND_URL {}: {}", origin, e),
        }
    }

    app.with_state(state)
}

/// Periodically drops limiter entries for clients that have gone quiet.
pub fn spawn_limiter_sweep(state: Arc<AppState>) {
    if state.contact_limiter.is_none() {
        return;
    }
    let period = state.config.rate_limit.window.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Some(limiter) = &state.contact_limiter {
                limiter.retain_recent();
            }
        }
    });
}
