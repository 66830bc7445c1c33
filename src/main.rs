use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use folio::{app_state::AppState, books::handlers, config::Config, health};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config).context("invalid subject_url in configuration")?;

    let app = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/books", get(handlers::list_books))
        .route("/api/validate_selection", post(handlers::validate_selection))
        .route("/api/generate_pdf", post(handlers::generate_pdf))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "folio listening");
    axum::serve(listener, app).await?;
    Ok(())
}
