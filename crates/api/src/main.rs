use anyhow::Context;
use meetsight_api::{build_router, state::AppState};
use meetsight_config::Settings;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("Failed to load settings")?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = AppState::new(&settings);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "MeetSight API listening");

    axum::serve(listener, router).await?;
    Ok(())
}
