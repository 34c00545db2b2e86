//! Fraud Screening Service - Main Entry Point
//!
//! Loads the classifier once at startup and serves the submission form.

use anyhow::Result;
use fraud_screening::{
    config::AppConfig,
    metrics::{MetricsReporter, ScreeningMetrics},
    models::inference::InferenceEngine,
    screening::ScreeningService,
    web::{create_router, AppState},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraud_screening=info".parse()?),
        )
        .init();

    info!("Starting Fraud Screening Service");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");
    info!(model_path = %config.model.path, "Using classifier artifact");

    // Initialize metrics
    let metrics = Arc::new(ScreeningMetrics::new());

    // Load the classifier. Fatal if the artifact is missing or corrupt:
    // the process must not accept submissions without a usable model.
    let engine = Arc::new(InferenceEngine::new(&config)?);
    info!(
        features = engine.expected_features(),
        "Inference engine initialized"
    );

    let service = Arc::new(ScreeningService::new(engine, metrics.clone()));

    // Start metrics reporter (prints summary every 30 seconds)
    let metrics_clone = metrics.clone();
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics_clone, 30);
        reporter.start().await;
    });

    let state = AppState::new(service, metrics);
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Serving submission form");

    axum::serve(listener, router).await?;

    Ok(())
}
