/// Execution Record Layer
///
/// This module owns the normalized record model shared by every source
/// adapter and the static fallback datasets substituted when live retrieval
/// fails. It provides:
/// - Type definitions (ExecutionRecord, ExecutionFeed, status/trigger enums)
/// - Engine-tagged fallback datasets with fixed content

// Normalized record and feed type definitions
pub mod types;

// Static per-engine fallback datasets
pub mod fallback;

// Re-export commonly used types
pub use types::{EngineKind, ExecutionFeed, ExecutionRecord, ExecutionStatus, TriggerType};
