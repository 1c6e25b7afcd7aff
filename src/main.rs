use anyhow::{Context, Result};
use comprehend_analyzer::comprehend::ComprehendService;
use comprehend_analyzer::config::Config;
use comprehend_analyzer::dispatcher::Dispatcher;
use comprehend_analyzer::language::TagalogSwahiliCorrection;
use comprehend_analyzer::live::LiveAnalyzer;
use comprehend_analyzer::web;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("comprehend_analyzer=info".parse()?),
        )
        .init();

    info!("Starting Comprehend NLP Analyzer");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Using AWS region {}", config.aws_region);

    let service = Arc::new(ComprehendService::from_config(&config).await);
    let correction = TagalogSwahiliCorrection::from_config(&config);
    info!(
        "Swahili correction: keywords [{}], confidence cap {}",
        correction.keywords().join(", "),
        correction.confidence_cap()
    );
    let live = LiveAnalyzer::new(service, correction);
    let dispatcher = Arc::new(Dispatcher::new(live));

    let app = web::router(dispatcher);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
