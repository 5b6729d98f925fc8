use anyhow::Context;
use medassist::api::{self, app_state::AppState};
use medassist::config::loader::ConfigLoader;
use medassist::observability::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging);
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    if config.completion.any_enabled() {
        info!(
            "Completion service at {} (chat: {}, report: {})",
            config.completion.base_url,
            config.completion.chat_enabled,
            config.completion.report_enabled
        );
    } else {
        info!("Completion service disabled, using rule engine only");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::from_config(config)
        .await
        .context("failed to build application state")?;
    info!("Application state created");

    let router = api::create_router(app_state);
    info!("API router created with observability endpoints");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
