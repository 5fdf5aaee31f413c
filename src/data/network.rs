//! Single-shot HTTP GET with status classification.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{NetworkError, QuizError};

/// Fetches the body behind a URL.
///
/// One outbound request per call: no retries, no caching.
#[async_trait]
pub trait NetworkRouting: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, NetworkError>;
}

/// `reqwest`-backed implementation.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
}

impl NetworkClient {
    /// Create a client, optionally bounding every request by `timeout`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, QuizError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QuizError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NetworkRouting for NetworkClient {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} answered {}", url, status);
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        tracing::debug!("GET {} returned {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response` verbatim to the first connection.
    pub(crate) async fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        Url::parse(&format!("http://{}/movies", addr)).unwrap()
    }

    pub(crate) fn local_client() -> NetworkClient {
        NetworkClient::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello").await;
        let body = local_client().fetch(&url).await.unwrap();
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_classifies_bad_status() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
        let err = local_client().fetch(&url).await.unwrap_err();
        assert!(matches!(err, NetworkError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_classifies_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/movies", addr)).unwrap();
        let err = local_client().fetch(&url).await.unwrap_err();
        assert!(matches!(err, NetworkError::Transport(_)));
    }
}
