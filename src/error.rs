/// Source retrieval error taxonomy
///
/// Classifies every way a live fetch can fail before it is absorbed at the
/// adapter boundary. None of these variants ever reach an HTTP caller: they
/// are logged and converted into the owning source's fallback dataset.

use std::time::Duration;

use thiserror::Error;

/// Failure modes of a single source retrieval
///
/// The remaining failure class of the wider pipeline - an aggregation task
/// that aborts - surfaces as a `tokio::task::JoinError` and is handled by the
/// aggregator, not represented here.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    /// Required base URL or API credential is absent; the network is skipped entirely
    #[error("required connection settings are missing")]
    ConfigurationMissing,

    /// The per-call deadline elapsed before the upstream responded
    #[error("request deadline of {0:?} exceeded")]
    Timeout(Duration),

    /// Connection, DNS or protocol-level failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success HTTP status
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Body was readable but did not match the expected source shape
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[source] serde_json::Error),
}

impl SourceFetchError {
    /// Stable code used in structured log lines
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "source.configuration_missing",
            Self::Timeout(_) => "source.timeout",
            Self::Transport(_) => "source.transport",
            Self::UpstreamStatus { .. } => "source.upstream_status",
            Self::Decode(_) => "source.decode",
        }
    }
}
