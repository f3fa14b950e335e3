/// Timeout-bounded HTTP transport
///
/// Single place every adapter goes through for network calls. Each call races
/// the request against a deadline timer: when the timer fires first, the
/// in-flight request future is dropped, which aborts the underlying
/// connection, and the call reports a timeout. The timer is consumed on every
/// completion path, so none leak. This layer has no source-specific
/// knowledge beyond attaching the bearer credential.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::SourceFetchError;

/// Default per-call deadline applied by every adapter
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(5000);

/// Issue a GET with the credential attached, bounded by `deadline`
pub async fn get_with_deadline(
    client: &Client,
    url: &str,
    api_key: &str,
    deadline: Duration,
) -> Result<Response, SourceFetchError> {
    let request = client
        .get(url)
        .bearer_auth(api_key)
        .header(CONTENT_TYPE, "application/json");

    match tokio::time::timeout(deadline, request.send()).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(error)) => Err(SourceFetchError::Transport(error)),
        Err(_elapsed) => Err(SourceFetchError::Timeout(deadline)),
    }
}

/// Issue a POST with a JSON body and the credential attached, bounded by `deadline`
pub async fn post_with_deadline(
    client: &Client,
    url: &str,
    api_key: &str,
    body: &Value,
    deadline: Duration,
) -> Result<Response, SourceFetchError> {
    let request = client.post(url).bearer_auth(api_key).json(body);

    match tokio::time::timeout(deadline, request.send()).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(error)) => Err(SourceFetchError::Transport(error)),
        Err(_elapsed) => Err(SourceFetchError::Timeout(deadline)),
    }
}

/// Read the body of a successful response, or classify the status failure
///
/// A non-success status yields `UpstreamStatus` carrying the body text so the
/// adapter can log it before falling back.
pub async fn require_success(response: Response) -> Result<String, SourceFetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceFetchError::UpstreamStatus { status, body });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one connection with a canned HTTP response, then close it
    async fn spawn_stub_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn deadline_elapse_reports_timeout() {
        // Accepts the connection but never responds.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _held = listener.accept().await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = Client::new();
        let url = format!("http://{}", addr);
        let result =
            get_with_deadline(&client, &url, "key", Duration::from_millis(200)).await;

        assert!(matches!(result, Err(SourceFetchError::Timeout(_))));
    }

    #[tokio::test]
    async fn successful_response_passes_through() {
        let url = spawn_stub_server(
            "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok",
        )
        .await;

        let client = Client::new();
        let response = get_with_deadline(&client, &url, "key", DEFAULT_DEADLINE)
            .await
            .unwrap();
        let body = require_success(response).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn non_success_status_carries_body() {
        let url = spawn_stub_server(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 4\r\nconnection: close\r\n\r\ndown",
        )
        .await;

        let client = Client::new();
        let response = get_with_deadline(&client, &url, "key", DEFAULT_DEADLINE)
            .await
            .unwrap();
        let error = require_success(response).await.unwrap_err();

        match error {
            SourceFetchError::UpstreamStatus { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "down");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refused_connection_reports_transport_failure() {
        let client = Client::new();
        // Bind and immediately drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}", addr);
        let result = get_with_deadline(&client, &url, "key", DEFAULT_DEADLINE).await;
        assert!(matches!(result, Err(SourceFetchError::Transport(_))));
    }
}
