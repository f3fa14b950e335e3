/// Server setup and initialization
///
/// Wires together all components: source adapters, aggregator, trigger
/// scheduler, and HTTP routes. Provides the application factory used by both
/// the binary and the integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use reqwest::Client;
use tokio::net::TcpListener;

use crate::api::{create_api_routes, AppState};
use crate::config::Config;
use crate::runtime::{ExecutionAggregator, TriggerScheduler};
use crate::sources::{ExecutionSource, LangflowSource, N8nSource};

/// Create the main Axum application with all routes
///
/// Builds one adapter per configured engine (adapters with incomplete
/// settings still register and serve their fallback dataset), the aggregator
/// over them, and the trigger scheduler. Returns the router together with the
/// scheduler handle so the caller owns the scheduler's lifecycle.
pub async fn create_app(config: Config) -> Result<(Router, Arc<TriggerScheduler>)> {
    // One shared HTTP client for every adapter
    let client = Client::new();

    tracing::info!("🔌 Registering source adapters");
    let sources: Vec<Arc<dyn ExecutionSource>> = vec![
        Arc::new(N8nSource::new(config.engines.n8n.clone(), client.clone())),
        Arc::new(LangflowSource::new(
            config.engines.langflow.clone(),
            client,
        )),
    ];
    for source in &sources {
        tracing::info!("  • {} adapter registered", source.engine());
    }

    tracing::info!("🔀 Initializing execution aggregator");
    let aggregator = ExecutionAggregator::new(sources.clone());

    tracing::info!("⏰ Initializing trigger scheduler");
    let scheduler = Arc::new(TriggerScheduler::new(&sources).await?);

    let state = AppState {
        aggregator,
        scheduler: Arc::clone(&scheduler),
        sources: sources
            .iter()
            .map(|source| (source.engine(), Arc::clone(source)))
            .collect::<HashMap<_, _>>(),
    };

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = Router::new()
        .route("/healthz", get(health_check))
        .merge(create_api_routes().with_state(state));

    tracing::info!("✅ Application initialized successfully");
    Ok((app, scheduler))
}

/// Start the HTTP server with the given configuration
///
/// Creates the application, starts the scheduler in the background, and
/// serves until ctrl-c, after which the scheduler is shut down explicitly.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Flowlens server...");

    let (app, scheduler) = create_app(config.clone()).await?;

    tracing::info!("🚀 Starting trigger scheduler");
    scheduler.start().await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Explicit teardown: the scheduler's lifecycle ends with the server's.
    scheduler.stop().await?;
    tracing::info!("👋 Server stopped");

    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", error);
    }
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
