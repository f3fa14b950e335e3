/// Runtime Orchestration Layer
///
/// This module owns the concurrent machinery of the service:
/// - Fan-out/fan-in aggregation of source adapters with fallback substitution
/// - Background cron re-invocation of workflow triggers

// Concurrent execution feed aggregator
pub mod aggregator;

// Background cron trigger scheduler
pub mod scheduler;

// Re-export main types
pub use aggregator::ExecutionAggregator;
pub use scheduler::TriggerScheduler;
