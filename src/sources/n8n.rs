/// n8n source adapter
///
/// Fetches executions from an n8n-style automation engine at
/// `GET {base}/rest/executions` and maps the native shape into the normalized
/// record model. Any failure along the way - missing settings, timeout,
/// transport error, non-success status, malformed body - is logged and
/// absorbed into the static n8n fallback dataset.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::EngineSettings;
use crate::error::SourceFetchError;
use crate::execution::fallback::n8n_fallback_executions;
use crate::execution::{EngineKind, ExecutionRecord, ExecutionStatus, TriggerType};
use crate::sources::{ExecutionSource, SourceBatch};
use crate::transport::{self, DEFAULT_DEADLINE};

/// Adapter for the n8n-style automation engine
#[derive(Debug, Clone)]
pub struct N8nSource {
    settings: EngineSettings,
    client: Client,
    deadline: std::time::Duration,
}

impl N8nSource {
    pub fn new(settings: EngineSettings, client: Client) -> Self {
        Self {
            settings,
            client,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the per-call deadline; tests use this with stalled upstreams
    #[cfg(test)]
    fn with_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// The live retrieval pipeline; every error here means fallback
    async fn fetch_live(&self) -> Result<Vec<ExecutionRecord>, SourceFetchError> {
        let (base_url, api_key) = self.settings.require()?;
        let url = format!("{}/rest/executions", base_url);

        tracing::debug!("🌐 Fetching n8n executions from {}", url);
        let response =
            transport::get_with_deadline(&self.client, &url, api_key, self.deadline).await?;
        let body = transport::require_success(response).await?;

        let payload: N8nExecutionList =
            serde_json::from_str(&body).map_err(SourceFetchError::Decode)?;
        payload
            .data
            .into_iter()
            .map(normalize_execution)
            .collect::<Result<Vec<_>, _>>()
    }
}

#[async_trait]
impl ExecutionSource for N8nSource {
    fn engine(&self) -> EngineKind {
        EngineKind::N8n
    }

    fn fallback_dataset(&self) -> Vec<ExecutionRecord> {
        n8n_fallback_executions()
    }

    async fn fetch_executions(&self) -> SourceBatch {
        match self.fetch_live().await {
            Ok(records) => {
                tracing::info!("✅ n8n returned {} live executions", records.len());
                SourceBatch::live(self.engine(), records)
            }
            Err(error) => {
                tracing::warn!(
                    "⚠️ n8n fetch degraded to fallback data ({}): {}",
                    error.code(),
                    error
                );
                SourceBatch::fallback(self.engine(), self.fallback_dataset())
            }
        }
    }

    async fn trigger_workflow(&self, workflow_id: &str) -> Result<Value, SourceFetchError> {
        let (base_url, api_key) = self.settings.require()?;
        let url = format!("{}/rest/workflows/{}/run", base_url, workflow_id);

        tracing::info!("🚀 Triggering n8n workflow: {}", workflow_id);
        let response =
            transport::post_with_deadline(&self.client, &url, api_key, &json!({}), self.deadline)
                .await?;
        let body = transport::require_success(response).await?;

        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(SourceFetchError::Decode)
    }
}

/// Native list wrapper: n8n returns executions under `data`
#[derive(Debug, Deserialize)]
struct N8nExecutionList {
    data: Vec<Value>,
}

/// Typed view of the native fields the mapping rules need
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct N8nExecution {
    id: String,
    workflow_id: String,
    #[serde(default)]
    workflow_data: Option<N8nWorkflowData>,
    #[serde(default)]
    finished: bool,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    stopped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct N8nWorkflowData {
    #[serde(default)]
    name: Option<String>,
}

/// Map one native n8n execution into the normalized model
///
/// Status: running while unfinished, then success when a stop timestamp
/// exists, else error. Duration is stop minus start in seconds once finished,
/// "Running..." while in flight, "N/A" when the timestamps are incomplete.
/// The native record is retained verbatim as `execution_data`.
fn normalize_execution(raw: Value) -> Result<ExecutionRecord, SourceFetchError> {
    let native: N8nExecution =
        serde_json::from_value(raw.clone()).map_err(SourceFetchError::Decode)?;

    let status = if !native.finished {
        ExecutionStatus::Running
    } else if native.stopped_at.is_some() {
        ExecutionStatus::Success
    } else {
        ExecutionStatus::Error
    };

    let duration_label = if !native.finished {
        "Running...".to_string()
    } else {
        match (native.started_at, native.stopped_at) {
            (Some(started), Some(stopped)) => format_elapsed_seconds(stopped - started),
            _ => "N/A".to_string(),
        }
    };

    Ok(ExecutionRecord {
        id: native.id,
        workflow_id: native.workflow_id,
        workflow_name: native
            .workflow_data
            .and_then(|data| data.name)
            .unwrap_or_else(|| "Unknown Workflow".to_string()),
        source: EngineKind::N8n,
        status,
        duration_label,
        start_time: native.started_at.unwrap_or_else(Utc::now),
        trigger_type: TriggerType::Webhook,
        folder_id: "unassigned".to_string(),
        execution_data: raw,
    })
}

fn format_elapsed_seconds(elapsed: chrono::Duration) -> String {
    format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finished_execution_with_stop_time_maps_to_success() {
        let raw = json!({
            "id": "42",
            "workflowId": "wf-1",
            "workflowData": { "name": "Email Processor" },
            "finished": true,
            "startedAt": "2024-01-15T14:30:20.000Z",
            "stoppedAt": "2024-01-15T14:30:22.300Z"
        });

        let record = normalize_execution(raw.clone()).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.workflow_id, "wf-1");
        assert_eq!(record.workflow_name, "Email Processor");
        assert_eq!(record.source, EngineKind::N8n);
        assert_eq!(record.status, ExecutionStatus::Success);
        assert_eq!(record.duration_label, "2.3s");
        assert_eq!(record.trigger_type, TriggerType::Webhook);
        assert_eq!(record.folder_id, "unassigned");
        assert_eq!(record.execution_data, raw);
    }

    #[test]
    fn unfinished_execution_maps_to_running() {
        let raw = json!({
            "id": "43",
            "workflowId": "wf-6",
            "finished": false,
            "startedAt": "2024-01-15T14:35:10.000Z"
        });

        let record = normalize_execution(raw).unwrap();
        assert_eq!(record.status, ExecutionStatus::Running);
        assert_eq!(record.duration_label, "Running...");
        assert_eq!(record.workflow_name, "Unknown Workflow");
    }

    #[test]
    fn finished_execution_without_stop_time_maps_to_error() {
        let raw = json!({
            "id": "44",
            "workflowId": "wf-3",
            "finished": true,
            "startedAt": "2024-01-15T14:25:15.000Z"
        });

        let record = normalize_execution(raw).unwrap();
        assert_eq!(record.status, ExecutionStatus::Error);
        assert_eq!(record.duration_label, "N/A");
    }

    #[test]
    fn missing_start_time_substitutes_now() {
        let before = Utc::now();
        let record = normalize_execution(json!({
            "id": "45",
            "workflowId": "wf-9",
            "finished": false
        }))
        .unwrap();

        assert!(record.start_time >= before);
        assert!(record.start_time <= Utc::now());
    }

    #[test]
    fn malformed_execution_is_a_decode_error() {
        let result = normalize_execution(json!({ "workflowId": "wf-1" }));
        assert!(matches!(result, Err(SourceFetchError::Decode(_))));
    }

    #[tokio::test]
    async fn unconfigured_source_serves_fallback_without_network() {
        let source = N8nSource::new(EngineSettings::default(), Client::new());
        let batch = source.fetch_executions().await;

        assert!(batch.used_fallback);
        assert_eq!(batch.engine, EngineKind::N8n);
        assert_eq!(
            serde_json::to_vec(&batch.records).unwrap(),
            serde_json::to_vec(&n8n_fallback_executions()).unwrap()
        );
    }

    #[tokio::test]
    async fn timed_out_fetch_degrades_to_fallback() {
        // Accepts the connection but never responds, so only the deadline
        // can end the call.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        });

        let source = N8nSource::new(
            EngineSettings::new(format!("http://{}", addr), "key"),
            Client::new(),
        )
        .with_deadline(std::time::Duration::from_millis(200));

        let batch = source.fetch_executions().await;

        assert!(batch.used_fallback);
        assert_eq!(batch.engine, EngineKind::N8n);
        assert_eq!(
            serde_json::to_vec(&batch.records).unwrap(),
            serde_json::to_vec(&n8n_fallback_executions()).unwrap()
        );
    }

    #[tokio::test]
    async fn unconfigured_trigger_reports_missing_configuration() {
        let source = N8nSource::new(EngineSettings::default(), Client::new());
        let result = source.trigger_workflow("wf-1").await;
        assert!(matches!(
            result,
            Err(SourceFetchError::ConfigurationMissing)
        ));
    }
}
