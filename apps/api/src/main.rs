mod config;
mod errors;
mod llm_client;
mod outreach;
mod routes;
mod sources;
mod state;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::outreach::pipeline::Pipeline;
use crate::outreach::presenter::Presenter;
use crate::routes::build_router;
use crate::sources::cookies::CookieJar;
use crate::sources::document_reader::FileDocumentReader;
use crate::sources::page_fetcher::HttpPageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_provider,
        config.llm_api_key.clone(),
        config.llm_model.clone(),
    )
    .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (provider: {:?}, model: {}, json mode: {})",
        llm.provider(),
        llm.model(),
        llm.provider().supports_json_mode()
    );

    // Initialize page fetcher with optional session cookies
    let cookies = match &config.cookies_path {
        Some(path) => {
            let jar = CookieJar::load(path)?;
            if jar.is_empty() {
                warn!("Cookie file {} holds no cookies", path.display());
            } else {
                info!("Loaded {} session cookies from {}", jar.len(), path.display());
            }
            jar
        }
        None => CookieJar::default(),
    };
    let fetcher = HttpPageFetcher::new(Duration::from_secs(config.fetch_timeout_secs), cookies)
        .context("Failed to build page fetcher HTTP client")?;

    if !config.resume_path.exists() {
        warn!(
            "Default resume {} not found; requests must upload a resume",
            config.resume_path.display()
        );
    }

    let pipeline = Pipeline::new(
        Arc::new(fetcher),
        Arc::new(FileDocumentReader),
        Arc::new(llm),
    );

    // Build app state
    let state = AppState {
        pipeline,
        presenter: Presenter,
        default_resume: config.resume_path.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
