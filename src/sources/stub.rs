/// Deterministic in-memory source used by runtime tests
///
/// Lets tests script a source's outcome: live records after an optional
/// delay, a forced fallback batch, or an outright panic to exercise the
/// aggregator's task-abort handling.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::error::SourceFetchError;
use crate::execution::{
    EngineKind, ExecutionRecord, ExecutionStatus, TriggerType,
};
use crate::sources::{ExecutionSource, SourceBatch};

pub(crate) struct StubSource {
    pub engine: EngineKind,
    /// Records served live; `None` scripts a degraded source
    pub live: Option<Vec<ExecutionRecord>>,
    pub fallback: Vec<ExecutionRecord>,
    pub delay: Duration,
    pub panic_on_fetch: bool,
    pub triggered: Arc<Mutex<Vec<String>>>,
}

impl StubSource {
    pub fn live(engine: EngineKind, records: Vec<ExecutionRecord>) -> Self {
        Self {
            engine,
            live: Some(records),
            fallback: Vec::new(),
            delay: Duration::ZERO,
            panic_on_fetch: false,
            triggered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn degraded(engine: EngineKind, fallback: Vec<ExecutionRecord>) -> Self {
        Self {
            engine,
            live: None,
            fallback,
            delay: Duration::ZERO,
            panic_on_fetch: false,
            triggered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_fetch = true;
        self
    }
}

#[async_trait]
impl ExecutionSource for StubSource {
    fn engine(&self) -> EngineKind {
        self.engine
    }

    fn fallback_dataset(&self) -> Vec<ExecutionRecord> {
        self.fallback.clone()
    }

    async fn fetch_executions(&self) -> SourceBatch {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.panic_on_fetch {
            panic!("stub source fetch aborted");
        }
        match &self.live {
            Some(records) => SourceBatch::live(self.engine, records.clone()),
            None => SourceBatch::fallback(self.engine, self.fallback.clone()),
        }
    }

    async fn trigger_workflow(&self, workflow_id: &str) -> Result<Value, SourceFetchError> {
        self.triggered
            .lock()
            .expect("trigger log lock")
            .push(workflow_id.to_string());
        Ok(json!({ "triggered": workflow_id }))
    }
}

/// Build a minimal normalized record at a fixed instant
pub(crate) fn record_at(engine: EngineKind, id: &str, start_time: DateTime<Utc>) -> ExecutionRecord {
    ExecutionRecord {
        id: id.to_string(),
        workflow_id: format!("wf-{}", id),
        workflow_name: format!("Workflow {}", id),
        source: engine,
        status: ExecutionStatus::Success,
        duration_label: "1.0s".to_string(),
        start_time,
        trigger_type: TriggerType::Manual,
        folder_id: "unassigned".to_string(),
        execution_data: json!({ "id": id }),
    }
}
