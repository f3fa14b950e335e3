/// HTTP API Layer
///
/// This module provides the REST endpoints of the service:
/// - Aggregated execution feed (always a success response)
/// - One-shot workflow triggering
/// - Cron schedule registration and cancellation
/// - Server-sent log streaming for a single run

// Aggregated execution feed endpoint
pub mod executions;

// Server-sent run log stream
pub mod logs;

// Cron schedule management endpoints
pub mod schedules;

// One-shot workflow trigger endpoint
pub mod trigger;

use std::collections::HashMap;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::execution::EngineKind;
use crate::runtime::{ExecutionAggregator, TriggerScheduler};
use crate::sources::ExecutionSource;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Concurrent feed aggregator over every registered source
    pub aggregator: ExecutionAggregator,
    /// Cron trigger scheduler
    pub scheduler: Arc<TriggerScheduler>,
    /// Source adapters by engine, for the trigger endpoint
    pub sources: HashMap<EngineKind, Arc<dyn ExecutionSource>>,
}

/// Create the API routes
pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/executions", get(executions::list_executions))
        .route("/api/trigger", post(trigger::trigger_workflow))
        .route("/api/schedules", post(schedules::register_schedule))
        .route(
            "/api/schedules/{workflow_id}",
            delete(schedules::cancel_schedule),
        )
        .route("/api/runs/{run_id}/logs", get(logs::stream_run_logs))
}
