/// Langflow source adapter
///
/// Fetches runs from a Langflow-style flow engine at `GET {base}/api/v1/runs`
/// and maps the native shape into the normalized record model. Mirrors the
/// n8n adapter's absorption policy: every failure is logged and converted to
/// the static Langflow fallback dataset.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::EngineSettings;
use crate::error::SourceFetchError;
use crate::execution::fallback::langflow_fallback_executions;
use crate::execution::{EngineKind, ExecutionRecord, ExecutionStatus, TriggerType};
use crate::sources::{ExecutionSource, SourceBatch};
use crate::transport::{self, DEFAULT_DEADLINE};

/// Adapter for the Langflow-style flow engine
#[derive(Debug, Clone)]
pub struct LangflowSource {
    settings: EngineSettings,
    client: Client,
    deadline: std::time::Duration,
}

impl LangflowSource {
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

    async fn fetch_live(&self) -> Result<Vec<ExecutionRecord>, SourceFetchError> {
        let (base_url, api_key) = self.settings.require()?;
        let url = format!("{}/api/v1/runs", base_url);

        tracing::debug!("🌐 Fetching Langflow runs from {}", url);
        let response =
            transport::get_with_deadline(&self.client, &url, api_key, self.deadline).await?;
        let body = transport::require_success(response).await?;

        let payload: LangflowRunList =
            serde_json::from_str(&body).map_err(SourceFetchError::Decode)?;
        payload
            .runs
            .into_iter()
            .map(normalize_run)
            .collect::<Result<Vec<_>, _>>()
    }
}

#[async_trait]
impl ExecutionSource for LangflowSource {
    fn engine(&self) -> EngineKind {
        EngineKind::Langflow
    }

    fn fallback_dataset(&self) -> Vec<ExecutionRecord> {
        langflow_fallback_executions()
    }

    async fn fetch_executions(&self) -> SourceBatch {
        match self.fetch_live().await {
            Ok(records) => {
                tracing::info!("✅ Langflow returned {} live runs", records.len());
                SourceBatch::live(self.engine(), records)
            }
            Err(error) => {
                tracing::warn!(
                    "⚠️ Langflow fetch degraded to fallback data ({}): {}",
                    error.code(),
                    error
                );
                SourceBatch::fallback(self.engine(), self.fallback_dataset())
            }
        }
    }

    async fn trigger_workflow(&self, workflow_id: &str) -> Result<Value, SourceFetchError> {
        let (base_url, api_key) = self.settings.require()?;
        let url = format!("{}/api/v1/run/{}", base_url, workflow_id);

        tracing::info!("🚀 Triggering Langflow flow: {}", workflow_id);
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

/// Native list wrapper: Langflow returns runs under `runs`
#[derive(Debug, Deserialize)]
struct LangflowRunList {
    runs: Vec<Value>,
}

/// Typed view of the native fields the mapping rules need
#[derive(Debug, Deserialize)]
struct LangflowRun {
    id: String,
    flow_id: String,
    #[serde(default)]
    flow_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    /// Elapsed seconds reported by the engine, absent while running
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    trigger_type: Option<TriggerType>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// Map one native Langflow run into the normalized model
///
/// Status comes from the native enumerated run status (`SUCCESS`/`ERROR`,
/// anything else counts as running). Duration uses the native elapsed-seconds
/// field when present, else "N/A". Trigger type and folder come from optional
/// native tag fields with manual/"unassigned" defaults. The native run is
/// retained verbatim as `execution_data`.
fn normalize_run(raw: Value) -> Result<ExecutionRecord, SourceFetchError> {
    let native: LangflowRun =
        serde_json::from_value(raw.clone()).map_err(SourceFetchError::Decode)?;

    let status = match native.status.as_deref() {
        Some("SUCCESS") => ExecutionStatus::Success,
        Some("ERROR") => ExecutionStatus::Error,
        _ => ExecutionStatus::Running,
    };

    let duration_label = match native.duration {
        Some(seconds) => format!("{:.1}s", seconds),
        None => "N/A".to_string(),
    };

    Ok(ExecutionRecord {
        id: native.id,
        workflow_id: native.flow_id,
        workflow_name: native
            .flow_name
            .unwrap_or_else(|| "Unknown Flow".to_string()),
        source: EngineKind::Langflow,
        status,
        duration_label,
        start_time: native.timestamp.unwrap_or_else(Utc::now),
        trigger_type: native.trigger_type.unwrap_or(TriggerType::Manual),
        folder_id: native
            .tags
            .and_then(|tags| tags.into_iter().next())
            .unwrap_or_else(|| "unassigned".to_string()),
        execution_data: raw,
    })
}
