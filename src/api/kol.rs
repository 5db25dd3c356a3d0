use super::{FeedQuery, FeedSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the KOL market-activity API.
#[derive(Debug, Clone)]
pub struct KolApiClient {
    client: Client,
    base_url: String,
}

impl KolApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, query: &FeedQuery) -> String {
        format!("{}{}", self.base_url, query.kind.path())
    }
}

#[async_trait]
impl FeedSource for KolApiClient {
    async fn fetch(&self, query: &FeedQuery) -> Result<Value> {
        let url = self.endpoint_url(query);
        debug!("Requesting {} with {:?}", url, query.params());

        let response = self
            .client
            .get(&url)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                Error::ApiConnectionFailed(format!("Failed to reach {}: {}", url, e))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimitExceeded(format!(
                "KOL API rate limit exceeded for {}",
                query.kind
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!("KOL API {} returned error status {}: {}", url, status, body);
            return Err(Error::ApiError(format!(
                "{} request failed with status {}",
                query.kind, status
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Failed to decode {} response: {}", query.kind, e);
            Error::ApiInvalidFormat(format!("Failed to parse {} response: {}", query.kind, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FeedKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Answers a single HTTP request with `status` and `body`, handing the
    /// request line back through the receiver.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        (format!("http://{}", addr), rx)
    }

    fn client_for(base_url: String) -> KolApiClient {
        KolApiClient::new(&ApiConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://api.example.test/".to_string(),
            timeout_secs: 5,
        };
        let client = KolApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://api.example.test");

        let query = FeedQuery::new(FeedKind::HotTokens, 50).with_timeframe("1h");
        assert_eq!(
            client.endpoint_url(&query),
            "https://api.example.test/hot-tokens"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_failure() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let client = KolApiClient::new(&config).unwrap();
        let err = client
            .fetch(&FeedQuery::new(FeedKind::Trades, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiConnectionFailed(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_success_returns_json_and_sends_query() {
        let (base_url, request) =
            serve_once("200 OK", r#"{"data":[{"symbol":"BONK"}]}"#).await;
        let query = FeedQuery::new(FeedKind::HotTokens, 50).with_timeframe("1h");

        let value = client_for(base_url).fetch(&query).await.unwrap();
        assert_eq!(value["data"][0]["symbol"], "BONK");
        assert_eq!(
            request.await.unwrap(),
            "GET /hot-tokens?timeframe=1h&limit=50 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let (base_url, _request) = serve_once("429 Too Many Requests", "{}").await;
        let err = client_for(base_url)
            .fetch(&FeedQuery::new(FeedKind::Trades, 20))
            .await
            .unwrap_err();
        match err {
            Error::RateLimitExceeded(msg) => assert!(msg.contains("recent trades")),
            other => panic!("expected RateLimitExceeded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let (base_url, _request) = serve_once("500 Internal Server Error", "boom").await;
        let err = client_for(base_url)
            .fetch(&FeedQuery::new(FeedKind::Trades, 20))
            .await
            .unwrap_err();
        match err {
            Error::ApiError(msg) => assert!(msg.contains("500"), "{}", msg),
            other => panic!("expected ApiError, got {:?}", other),
        }
        assert!(Error::ApiError(String::new()).is_transport());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_invalid_format() {
        let (base_url, _request) = serve_once("200 OK", "not json").await;
        let err = client_for(base_url)
            .fetch(&FeedQuery::new(FeedKind::Leaderboard, 10).with_timeframe("daily"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiInvalidFormat(_)), "{:?}", err);
        assert!(err.is_transport());
    }
}
