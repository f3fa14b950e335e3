/// Fan-out/fan-in execution aggregator
///
/// Runs every registered source adapter concurrently, waits for all of them
/// to settle regardless of individual outcome, then merges, sorts and windows
/// the combined records into one feed. The aggregator never fails outward:
/// an adapter task that aborts is substituted with that source's fallback
/// dataset, and an abort of the merge pipeline itself is answered with the
/// full fallback feed.

use std::sync::Arc;

use crate::execution::{ExecutionFeed, ExecutionRecord};
use crate::sources::ExecutionSource;

/// Upper bound on records in one feed
pub const MAX_FEED_RECORDS: usize = 50;

/// Advisory message when every contributing batch was live
pub const LIVE_DATA_MESSAGE: &str = "Live data";

/// Advisory message when any fallback dataset contributed to the feed
pub const DEGRADED_MESSAGE: &str =
    "Using mock data due to API configuration or connection issues";

/// Advisory message for the outermost safety net
pub const FAILSAFE_MESSAGE: &str = "Falling back to mock data due to server error";

/// Concurrent aggregator over the registered source adapters
///
/// Stateless between calls: every `aggregate` re-fetches from scratch.
#[derive(Clone)]
pub struct ExecutionAggregator {
    sources: Vec<Arc<dyn ExecutionSource>>,
}

impl ExecutionAggregator {
    pub fn new(sources: Vec<Arc<dyn ExecutionSource>>) -> Self {
        Self { sources }
    }

    /// Produce one aggregated feed; this call has zero failure modes
    ///
    /// The merge pipeline runs in its own task so that even an unexpected
    /// abort inside it degrades to the full fallback feed instead of
    /// propagating to the caller.
    pub async fn aggregate(&self) -> ExecutionFeed {
        let pipeline = self.clone();
        match tokio::spawn(async move { pipeline.collect_and_merge().await }).await {
            Ok(feed) => feed,
            Err(error) => {
                tracing::error!(
                    "❌ Aggregation pipeline aborted, serving full fallback feed: {}",
                    error
                );
                self.fallback_feed()
            }
        }
    }

    /// Fan out one retrieval task per source, fan results back in
    async fn collect_and_merge(&self) -> ExecutionFeed {
        tracing::debug!(
            "🔀 Fanning out execution fetch to {} sources",
            self.sources.len()
        );

        // Spawn everything first so the wall-clock cost is bounded by the
        // slowest single source, not the sum.
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                tokio::spawn(async move { source.fetch_executions().await })
            })
            .collect();

        let mut records = Vec::new();
        let mut using_fallback_data = false;

        for (source, handle) in self.sources.iter().zip(handles) {
            match handle.await {
                Ok(batch) => {
                    tracing::debug!(
                        "📦 {} contributed {} records (fallback: {})",
                        batch.engine,
                        batch.records.len(),
                        batch.used_fallback
                    );
                    using_fallback_data |= batch.used_fallback;
                    records.extend(batch.records);
                }
                Err(error) => {
                    tracing::error!(
                        "❌ {} fetch task aborted, substituting fallback data: {}",
                        source.engine(),
                        error
                    );
                    using_fallback_data = true;
                    records.extend(source.fallback_dataset());
                }
            }
        }

        sort_newest_first(&mut records);
        records.truncate(MAX_FEED_RECORDS);

        let message = if using_fallback_data {
            DEGRADED_MESSAGE
        } else {
            LIVE_DATA_MESSAGE
        };

        tracing::info!(
            "📤 Aggregated feed ready: {} records (fallback: {})",
            records.len(),
            using_fallback_data
        );

        ExecutionFeed {
            executions: records,
            using_fallback_data,
            message: message.to_string(),
        }
    }

    /// Outermost safety net: every fallback dataset, merged and sorted
    pub fn fallback_feed(&self) -> ExecutionFeed {
        let mut records: Vec<ExecutionRecord> = self
            .sources
            .iter()
            .flat_map(|source| source.fallback_dataset())
            .collect();
        sort_newest_first(&mut records);
        records.truncate(MAX_FEED_RECORDS);

        ExecutionFeed {
            executions: records,
            using_fallback_data: true,
            message: FAILSAFE_MESSAGE.to_string(),
        }
    }
}

/// Stable sort by start time, newest first; ties keep input order
fn sort_newest_first(records: &mut [ExecutionRecord]) {
    records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}
