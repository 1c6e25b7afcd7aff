//! Analyze binary - runs one analysis from the command line and prints the JSON outcome
//!
//! Usage:
//!   cargo run --bin analyze -- "Hola mundo, me gusta la playa"
//!   echo "Jambo rafiki" | cargo run --bin analyze
//!   cargo run --bin analyze -- --offline "Hello world"   # Skip the probe, use the mock
//!
//! Optional environment variables:
//! - AWS_REGION (defaults to us-east-1)
//! - COMPREHEND_ENDPOINT_URL
//! - SWAHILI_KEYWORDS, SWAHILI_CONFIDENCE_CAP

use anyhow::{Context, Result};
use comprehend_analyzer::analysis::AnalysisRequest;
use comprehend_analyzer::comprehend::ComprehendService;
use comprehend_analyzer::config::Config;
use comprehend_analyzer::dispatcher::{AnalysisOutcome, Dispatcher, Route};
use comprehend_analyzer::language::TagalogSwahiliCorrection;
use comprehend_analyzer::live::LiveAnalyzer;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("comprehend_analyzer=info".parse()?),
        )
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let offline = args.iter().any(|a| a == "--offline");
    args.retain(|a| a != "--offline");

    let text = if args.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read text from stdin")?;
        buffer
    } else {
        args.join(" ")
    };

    let config = Config::from_env()?;
    let service = Arc::new(ComprehendService::from_config(&config).await);
    let live = LiveAnalyzer::new(service, TagalogSwahiliCorrection::from_config(&config));
    let dispatcher = Dispatcher::new(live);

    let request = AnalysisRequest::new(text);
    let outcome = if offline && !request.is_blank() {
        info!("Offline mode, skipping credential probe");
        let route = Route::Mock {
            advisory: "Offline mode: using mock analyzer.".to_string(),
        };
        AnalysisOutcome::Completed(dispatcher.run(route, &request).await)
    } else {
        dispatcher.analyze(&request).await
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
