use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use estada_backend::api::resend::{EmailRelay, ResendClient};
use estada_backend::config::Config;
use estada_backend::{build_router, spawn_limiter_sweep, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,estada_backend=debug,tower_http=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env()?;

    let _sentry_guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let relay = ResendClient::from_config(&config.email)?
        .map(|client| Arc::new(client) as Arc<dyn EmailRelay>);
    if relay.is_none() {
        tracing::error!("RESEND_API_KEY not configured, contact form submissions will fail");
    }
    tracing::info!(
        "Email config: dev_mode={}, sender={}, recipients={:?}",
        config.email.dev_mode,
        config.email.from_header(),
        config.email.recipients()
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config, relay));
    spawn_limiter_sweep(state.clone());
    let app = build_router(state);

    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
