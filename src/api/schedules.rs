/// Cron schedule management endpoints
///
/// POST /api/schedules registers (or replaces) a periodic re-invocation of a
/// workflow trigger; DELETE /api/schedules/{workflow_id} cancels it.
/// Registering the same workflow id twice keeps only the newest schedule.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::execution::EngineKind;

/// Request body for schedule registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub workflow_id: String,
    pub engine: EngineKind,
    /// Cron expression understood by tokio-cron-scheduler (seconds field included)
    pub schedule: String,
}

/// Register or replace a workflow's cron re-invocation
pub async fn register_schedule(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state
        .scheduler
        .register(&payload.workflow_id, payload.engine, &payload.schedule)
        .await
    {
        Ok(_) => Ok(Json(json!({
            "message": format!("Schedule registered for workflow '{}'", payload.workflow_id),
        }))),
        Err(error) => {
            tracing::error!(
                "❌ Failed to register schedule for workflow {}: {}",
                payload.workflow_id,
                error
            );
            Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": error.to_string() })),
            ))
        }
    }
}

/// Cancel a workflow's cron re-invocation
pub async fn cancel_schedule(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if state.scheduler.cancel(&workflow_id).await {
        Ok(Json(json!({
            "message": format!("Schedule cancelled for workflow '{}'", workflow_id),
        })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
