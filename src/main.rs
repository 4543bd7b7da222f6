mod api_models;
mod app;
mod handler;
mod routes;
mod services;
mod utils;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    utils::logging::init_logging()?;

    let cfg = utils::config::AppConfig::from_env()?;
    if cfg.polygon.api_key.is_none() {
        tracing::warn!("POLYGON_API_KEY is not set; every lookup will fail until it is configured");
    }

    let state = app::AppState::from_config(&cfg).context("failed to build polygon http client")?;
    let app = app::build_app(state, &cfg.server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(cfg.server.addr)
        .await
        .with_context(|| format!("bind {} failed", cfg.server.addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
