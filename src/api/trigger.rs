/// One-shot workflow trigger endpoint
///
/// POST /api/trigger
/// Body: { "workflowId": "...", "engine": "n8n" | "langflow" }
///
/// Invokes the named engine's run-workflow operation exactly once - no retry,
/// and no relation to the feed's fallback logic. Unlike the feed endpoint,
/// failures here are surfaced to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::execution::EngineKind;

/// Request body for workflow triggering
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub workflow_id: String,
    pub engine: EngineKind,
}

/// Trigger one workflow run on the requested engine
pub async fn trigger_workflow(
    State(state): State<AppState>,
    Json(payload): Json<TriggerRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(source) = state.sources.get(&payload.engine) else {
        tracing::warn!("❌ Trigger requested for unknown engine: {}", payload.engine);
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": format!("no source registered for engine '{}'", payload.engine),
            })),
        );
    };

    match source.trigger_workflow(&payload.workflow_id).await {
        Ok(result) => {
            tracing::info!(
                "🎉 Triggered workflow {} on {}",
                payload.workflow_id,
                payload.engine
            );
            (
                StatusCode::OK,
                Json(json!({ "success": true, "result": result })),
            )
        }
        Err(error) => {
            tracing::error!(
                "❌ Failed to trigger workflow {} on {}: {}",
                payload.workflow_id,
                payload.engine,
                error
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "success": false, "error": error.to_string() })),
            )
        }
    }
}
