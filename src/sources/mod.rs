/// Source Adapter Layer
///
/// This module provides one adapter per workflow engine behind a single
/// capability trait. Each adapter knows how to build its engine's
/// list-executions request, map the native response shape into the normalized
/// record model, and substitute its static fallback dataset on any failure.
/// The fetch contract never fails outward: degradation is reported through
/// the returned batch, not through errors.

// Langflow-style flow engine adapter
pub mod langflow;

// n8n-style automation engine adapter
pub mod n8n;

// Scriptable source for runtime tests
#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SourceFetchError;
use crate::execution::{EngineKind, ExecutionRecord};

pub use langflow::LangflowSource;
pub use n8n::N8nSource;

/// What one adapter hands the aggregator
///
/// Carries the per-source degradation signal alongside the records so the
/// adapter can keep its never-fails-outward fetch contract.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    /// Engine the batch came from
    pub engine: EngineKind,
    /// Normalized records, live or substituted
    pub records: Vec<ExecutionRecord>,
    /// True when the records are the engine's fallback dataset
    pub used_fallback: bool,
}

impl SourceBatch {
    pub fn live(engine: EngineKind, records: Vec<ExecutionRecord>) -> Self {
        Self {
            engine,
            records,
            used_fallback: false,
        }
    }

    pub fn fallback(engine: EngineKind, records: Vec<ExecutionRecord>) -> Self {
        Self {
            engine,
            records,
            used_fallback: true,
        }
    }
}

/// Capability contract for one workflow engine
///
/// Adapters are a fixed set of variants behind this one interface; each owns
/// its mapping rules and fallback dataset.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    /// Engine this adapter serves
    fn engine(&self) -> EngineKind;

    /// Fixed substitute dataset for this engine, identical on every call
    fn fallback_dataset(&self) -> Vec<ExecutionRecord>;

    /// Retrieve and normalize this engine's executions
    ///
    /// Never fails outward: missing configuration, timeouts, transport
    /// errors, non-success statuses and malformed payloads are all absorbed
    /// locally into the fallback dataset.
    async fn fetch_executions(&self) -> SourceBatch;

    /// Invoke the engine's run-workflow operation once, no retry
    async fn trigger_workflow(&self, workflow_id: &str) -> Result<Value, SourceFetchError>;
}
