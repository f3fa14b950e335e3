/// Flowlens: unified, fault-tolerant execution feed over workflow engines
///
/// This library aggregates execution records from multiple independently
/// operated workflow engines into one time-ordered feed, tolerating the
/// partial or total unavailability of any source through per-engine fallback
/// datasets. It also carries the thin surrounding surfaces: one-shot
/// triggering, cron re-invocation, and per-run log streaming.

// Core configuration and setup
pub mod config;

// Source retrieval error taxonomy
pub mod error;

// Normalized record model and static fallback datasets
pub mod execution;

// Timeout-bounded HTTP transport shared by every adapter
pub mod transport;

// Per-engine source adapters behind one capability trait
pub mod sources;

// Fan-out/fan-in aggregation and cron trigger scheduling
pub mod runtime;

// HTTP API layer - feed, trigger, schedules, log stream
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use error::SourceFetchError;
pub use execution::{EngineKind, ExecutionFeed, ExecutionRecord, ExecutionStatus, TriggerType};
pub use runtime::{ExecutionAggregator, TriggerScheduler};
pub use server::start_server;
