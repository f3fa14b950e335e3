/// Normalized execution record model
///
/// Defines the unified schema that every engine adapter maps its native
/// execution shape into. Records are constructed fresh for each feed request,
/// never mutated afterwards, and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Workflow engine a record originates from
///
/// One variant per registered source adapter. Set at record creation and
/// immutable afterwards; together with the record id it identifies a record
/// uniquely within a single feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Webhook/automation style engine (n8n API shape)
    N8n,
    /// Flow-execution style engine (Langflow API shape)
    Langflow,
}

impl EngineKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N8n => "n8n",
            Self::Langflow => "langflow",
        }
    }
}

impl Display for EngineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized run outcome, derived from source-specific state
///
/// Never a source-native string: adapters map their engine's status encoding
/// into exactly one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    Error,
    Running,
}

/// What started a run, with a source-specific default when unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Webhook,
    Schedule,
    Manual,
}

/// One workflow run, normalized across engines
///
/// Serialized camelCase on the wire. `start_time` is the sole sort key for
/// the feed and is always a valid UTC instant - adapters substitute the
/// current time when a source omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    /// Opaque run identifier, unique within its source
    pub id: String,
    /// Identifier of the workflow definition that was run
    pub workflow_id: String,
    /// Human-readable workflow label ("Unknown Workflow"/"Unknown Flow" when omitted)
    pub workflow_name: String,
    /// Engine the record came from
    pub source: EngineKind,
    /// Normalized run status
    pub status: ExecutionStatus,
    /// Formatted elapsed time ("2.3s"), "Running..." while unfinished, "N/A" when indeterminate
    #[serde(rename = "duration")]
    pub duration_label: String,
    /// Run start instant, normalized to UTC. Sole sort key for the feed.
    pub start_time: DateTime<Utc>,
    /// What started the run
    pub trigger_type: TriggerType,
    /// Grouping/tag, "unassigned" when the source provides none
    pub folder_id: String,
    /// Source-shaped payload retained verbatim for downstream inspection
    pub execution_data: Value,
}

/// Aggregated feed returned by the executions endpoint
///
/// Always well-formed: degradation is communicated through the
/// `usingMockData` flag and advisory message, never through an error status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionFeed {
    /// Normalized records, newest `startTime` first, at most 50
    pub executions: Vec<ExecutionRecord>,
    /// True when any source's fallback dataset contributed to the feed
    #[serde(rename = "usingMockData")]
    pub using_fallback_data: bool,
    /// Fixed advisory string reflecting the fallback flag
    pub message: String,
}
