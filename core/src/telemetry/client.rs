use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::types::AllGameData;
use crate::context::AppConfig;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("telemetry request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("telemetry endpoint returned {0}")]
    BadStatus(u16),

    #[error("telemetry body was not valid JSON: {0}")]
    DeserializeFailed(#[source] serde_json::Error),
}

/// Anything that can produce the current match document.
pub trait TelemetrySource: Send + Sync {
    /// One bounded fetch. `None` means no match data right now, for any
    /// reason.
    fn fetch(&self) -> impl Future<Output = Option<AllGameData>> + Send;
}

/// Client for the game's local live-client endpoint.
#[derive(Debug, Clone)]
pub struct LiveClient {
    client: Client,
    url: String,
}

impl LiveClient {
    pub fn new(config: &AppConfig) -> Result<Self, TelemetryError> {
        Self::with_endpoint(config.telemetry_url.clone(), config.telemetry_timeout())
    }

    pub fn with_endpoint(url: String, timeout: Duration) -> Result<Self, TelemetryError> {
        // The endpoint serves a self-signed certificate on localhost
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .no_proxy()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn try_fetch(&self) -> Result<AllGameData, TelemetryError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::BadStatus(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(TelemetryError::DeserializeFailed)
    }
}

impl TelemetrySource for LiveClient {
    async fn fetch(&self) -> Option<AllGameData> {
        match self.try_fetch().await {
            Ok(data) => Some(data),
            Err(e) => {
                debug!(error = %e, "No match data");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(200);

    /// Serve one connection with a canned reply, or hold it open silently
    /// when `reply` is `None`.
    async fn serve_once(reply: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            match reply {
                Some(reply) => {
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                None => tokio::time::sleep(Duration::from_secs(30)).await,
            }
        });
        format!("http://{addr}/liveclientdata/allgamedata")
    }

    fn http_response(status: &str, body: &str) -> Option<String> {
        Some(format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ))
    }

    #[tokio::test]
    async fn success_returns_the_document() {
        let url = serve_once(http_response("200 OK", r#"{"activePlayer":{"team":"CHAOS"}}"#)).await;
        let client = LiveClient::with_endpoint(url, TIMEOUT).unwrap();

        let data = client.fetch().await.unwrap();
        assert_eq!(data.active_player.unwrap().team.as_deref(), Some("CHAOS"));
    }

    #[tokio::test]
    async fn error_status_is_no_data() {
        let url = serve_once(http_response("404 Not Found", "{}")).await;
        let client = LiveClient::with_endpoint(url, TIMEOUT).unwrap();
        assert!(matches!(
            client.try_fetch().await,
            Err(TelemetryError::BadStatus(404))
        ));

        let url = serve_once(http_response("404 Not Found", "{}")).await;
        let client = LiveClient::with_endpoint(url, TIMEOUT).unwrap();
        assert!(client.fetch().await.is_none());
    }

    #[tokio::test]
    async fn non_json_body_is_no_data() {
        let url = serve_once(http_response("200 OK", "loading...")).await;
        let client = LiveClient::with_endpoint(url, TIMEOUT).unwrap();
        assert!(client.fetch().await.is_none());
    }

    #[tokio::test]
    async fn silent_endpoint_times_out_as_no_data() {
        let url = serve_once(None).await;
        let client = LiveClient::with_endpoint(url, TIMEOUT).unwrap();

        let started = Instant::now();
        assert!(client.fetch().await.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn refused_connection_is_no_data() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = LiveClient::with_endpoint(format!("http://{addr}/"), TIMEOUT).unwrap();
        assert!(client.fetch().await.is_none());
    }

    #[test]
    fn endpoint_comes_from_config() {
        let config = AppConfig::default();
        let client = LiveClient::new(&config).unwrap();
        assert_eq!(client.url(), config.telemetry_url);
    }
}
