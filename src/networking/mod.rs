use std::time::Duration;

use futures_util::future::try_join;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://195.200.30.205/api/cftools/server";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    /// Non-2xx response; carries the status line.
    #[error("{0}")]
    Http(String),
    #[error("invalid response body: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub server_address: String,
    pub server_port: u16,
    pub is_online: bool,
    #[serde(default)]
    pub is_offline: bool,
    pub total_slots: u32,
    pub online_players: u32,
    pub queue_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default)]
    pub uptime_seconds: u64,
    #[serde(default)]
    pub uptime_minutes: u64,
    #[serde(default)]
    pub uptime_hours: u64,
    pub next_restart: String,
    #[serde(default)]
    pub game_time: String,
}

/// Anything that can produce a status/info pair for one polling tick.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<ServerStatus, ApiError>> + Send;

    fn fetch_snapshot(
        &self,
    ) -> impl Future<Output = Result<(ServerStatus, ServerInfo), ApiError>> + Send;
}

#[derive(Clone)]
pub struct ServerApi {
    client: Client,
    base_url: String,
}

impl ServerApi {
    pub fn new(base_url: &str, timeout: Option<Duration>, strict_tls: bool) -> Self {
        let mut builder = Client::builder().danger_accept_invalid_certs(!strict_tls);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|err| {
            warn!("server api: falling back to default HTTP client configuration ({err})");
            Client::new()
        });
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /status`: player counts and reachability of the game server.
    pub async fn get_server_status(&self) -> Result<ServerStatus, ApiError> {
        self.get_json("status").await
    }

    /// `GET /info`: uptime and the next scheduled restart.
    pub async fn get_server_info(&self) -> Result<ServerInfo, ApiError> {
        self.get_json("info").await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("server api: GET {url}");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "text/plain")
            .send()
            .await
            .map_err(|err| {
                warn!("server api: GET {url} failed: {err}");
                ApiError::Network(err.to_string())
            })?;
        let response = ensure_success(response)?;
        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                warn!("server api: {endpoint} returned an unreadable body: {err}");
                ApiError::Malformed(err.to_string())
            } else {
                ApiError::Network(err.to_string())
            }
        })
    }
}

impl StatusSource for ServerApi {
    async fn fetch_status(&self) -> Result<ServerStatus, ApiError> {
        self.get_server_status().await
    }

    async fn fetch_snapshot(&self) -> Result<(ServerStatus, ServerInfo), ApiError> {
        try_join(self.get_server_status(), self.get_server_info()).await
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ApiError::Http(status_line(
        status.as_u16(),
        status.canonical_reason(),
    )))
}

fn status_line(code: u16, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("HTTP {code}: {reason}"),
        None => format!("HTTP {code}"),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub(crate) const STATUS_BODY: &str = r#"{"serverAddress":"203.0.113.7","serverPort":2302,"isOnline":true,"isOffline":false,"totalSlots":100,"onlinePlayers":42,"queueSize":3}"#;
    pub(crate) const INFO_BODY: &str = r#"{"uptimeSeconds":5400,"uptimeMinutes":90,"uptimeHours":1,"nextRestart":"2025-01-15T14:30:00Z","gameTime":"12:00"}"#;

    /// Serve canned responses, one per accepted connection, and return the base URL.
    pub(crate) async fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let reply = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn decodes_status_payload() {
        let base = serve(vec![("200 OK", STATUS_BODY)]).await;
        let api = ServerApi::new(&base, None, true);
        let status = api.get_server_status().await.unwrap();
        assert_eq!(status.online_players, 42);
        assert_eq!(status.queue_size, 3);
        assert_eq!(status.total_slots, 100);
        assert_eq!(status.server_port, 2302);
        assert!(status.is_online);
    }

    #[tokio::test]
    async fn decodes_info_payload() {
        let base = serve(vec![("200 OK", INFO_BODY)]).await;
        let api = ServerApi::new(&format!("{base}/"), None, true);
        let info = api.get_server_info().await.unwrap();
        assert_eq!(info.next_restart, "2025-01-15T14:30:00Z");
        assert_eq!(info.uptime_minutes, 90);
    }

    #[tokio::test]
    async fn non_success_status_uses_status_line() {
        let base = serve(vec![("503 Service Unavailable", "down")]).await;
        let api = ServerApi::new(&base, None, true);
        let err = api.get_server_status().await.unwrap_err();
        assert_eq!(err, ApiError::Http("HTTP 503: Service Unavailable".into()));
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[tokio::test]
    async fn garbage_body_is_malformed() {
        let base = serve(vec![("200 OK", "<html>nope</html>")]).await;
        let api = ServerApi::new(&base, None, true);
        let err = api.get_server_info().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = ServerApi::new(&format!("http://{addr}"), None, true);
        let err = api.get_server_status().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "{err:?}");
    }

    #[test]
    fn formats_status_lines() {
        assert_eq!(status_line(404, Some("Not Found")), "HTTP 404: Not Found");
        assert_eq!(status_line(599, None), "HTTP 599");
    }
}
