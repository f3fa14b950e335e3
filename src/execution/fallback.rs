/// Static fallback datasets, one per engine
///
/// Substitute record sets returned whenever an adapter cannot reach or parse
/// its source - missing configuration, network failure, non-success status and
/// malformed payloads are all served identically from here. The datasets are
/// fixed: every call yields byte-identical content, and each covers all three
/// normalized statuses at least once.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::execution::types::{EngineKind, ExecutionRecord, ExecutionStatus, TriggerType};

/// Parse a compile-time-known RFC3339 timestamp
fn fixed_instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("fallback timestamps are valid RFC3339")
        .with_timezone(&Utc)
}

/// Fallback dataset for the n8n-style automation engine
pub fn n8n_fallback_executions() -> Vec<ExecutionRecord> {
    vec![
        ExecutionRecord {
            id: "n8n-exec-1".to_string(),
            workflow_id: "wf-1".to_string(),
            workflow_name: "Email Processor".to_string(),
            source: EngineKind::N8n,
            status: ExecutionStatus::Success,
            duration_label: "2.3s".to_string(),
            start_time: fixed_instant("2024-01-15T14:30:22Z"),
            trigger_type: TriggerType::Webhook,
            folder_id: "unassigned".to_string(),
            execution_data: json!({
                "data": {
                    "resultData": {
                        "runData": {
                            "Webhook": [
                                { "data": { "body": { "email": "test@example.com" } }, "executionTime": 120 }
                            ],
                            "Process Email": [
                                { "data": { "output": "Email processed" }, "executionTime": 350 }
                            ]
                        }
                    }
                }
            }),
        },
        ExecutionRecord {
            id: "n8n-exec-2".to_string(),
            workflow_id: "wf-3".to_string(),
            workflow_name: "Lead Scoring".to_string(),
            source: EngineKind::N8n,
            status: ExecutionStatus::Error,
            duration_label: "1.1s".to_string(),
            start_time: fixed_instant("2024-01-15T14:25:15Z"),
            trigger_type: TriggerType::Webhook,
            folder_id: "marketing".to_string(),
            execution_data: json!({
                "data": {
                    "resultData": {
                        "error": { "message": "Failed to process lead data" }
                    }
                }
            }),
        },
        ExecutionRecord {
            id: "n8n-exec-3".to_string(),
            workflow_id: "wf-6".to_string(),
            workflow_name: "Report Generator".to_string(),
            source: EngineKind::N8n,
            status: ExecutionStatus::Running,
            duration_label: "Running...".to_string(),
            start_time: fixed_instant("2024-01-15T14:35:10Z"),
            trigger_type: TriggerType::Schedule,
            folder_id: "data-processing".to_string(),
            execution_data: json!({
                "data": {
                    "resultData": {
                        "runData": {
                            "Data Fetch": [
                                { "data": { "records": 500 }, "executionTime": 1200 }
                            ]
                        }
                    }
                }
            }),
        },
    ]
}

/// Fallback dataset for the Langflow-style flow engine
pub fn langflow_fallback_executions() -> Vec<ExecutionRecord> {
    vec![
        ExecutionRecord {
            id: "langflow-exec-1".to_string(),
            workflow_id: "wf-5".to_string(),
            workflow_name: "ETL Pipeline".to_string(),
            source: EngineKind::Langflow,
            status: ExecutionStatus::Success,
            duration_label: "45.2s".to_string(),
            start_time: fixed_instant("2024-01-15T14:20:08Z"),
            trigger_type: TriggerType::Schedule,
            folder_id: "data-processing".to_string(),
            execution_data: json!({
                "outputs": {
                    "Data Source": { "status": "success", "data": { "records": 1250 } },
                    "Transform": { "status": "success", "data": { "transformations": ["join", "filter"] } }
                }
            }),
        },
        ExecutionRecord {
            id: "langflow-exec-2".to_string(),
            workflow_id: "wf-2".to_string(),
            workflow_name: "Data Sync".to_string(),
            source: EngineKind::Langflow,
            status: ExecutionStatus::Success,
            duration_label: "12.7s".to_string(),
            start_time: fixed_instant("2024-01-15T14:15:33Z"),
            trigger_type: TriggerType::Manual,
            folder_id: "unassigned".to_string(),
            execution_data: json!({
                "outputs": {
                    "Sync": { "status": "success", "data": { "synced": true } }
                }
            }),
        },
        ExecutionRecord {
            id: "langflow-exec-3".to_string(),
            workflow_id: "wf-4".to_string(),
            workflow_name: "Campaign Tracker".to_string(),
            source: EngineKind::Langflow,
            status: ExecutionStatus::Error,
            duration_label: "8.1s".to_string(),
            start_time: fixed_instant("2024-01-15T14:10:15Z"),
            trigger_type: TriggerType::Webhook,
            folder_id: "marketing".to_string(),
            execution_data: json!({
                "outputs": {
                    "Campaign Data": { "status": "error", "error": "API rate limit exceeded" }
                },
                "error": "API rate limit exceeded"
            }),
        },
    ]
}
