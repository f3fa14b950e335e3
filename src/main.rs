/// Flowlens: unified execution feed over heterogeneous workflow engines
///
/// Main entry point. Loads configuration from the environment and starts the
/// HTTP server.

use flowlens::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Aggregated execution feed at /api/executions
/// - One-shot workflow triggering at /api/trigger
/// - Cron schedule management at /api/schedules
/// - Run log streaming at /api/runs/{run_id}/logs
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Engine credentials come from N8N_*/LANGFLOW_* environment variables;
    // an engine left unconfigured is served from its fallback dataset.
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
