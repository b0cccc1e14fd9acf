//! HTTP transport seam for the generation client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{HttpReply, HttpRequest, LlmError};

/// Sends one JSON POST and hands back status + body
///
/// Non-success statuses are returned as replies, not errors; only failures to
/// get any reply at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, request: &HttpRequest) -> Result<HttpReply, LlmError>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, LlmError> {
        debug!("ReqwestTransport::new: called");
        let http = Client::builder().build().map_err(LlmError::Network)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, request: &HttpRequest) -> Result<HttpReply, LlmError> {
        debug!(?request, "ReqwestTransport::post_json: called");
        let response = self
            .http
            .post(&request.url)
            .query(&request.query)
            .header("content-type", "application/json")
            .timeout(request.timeout)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!("ReqwestTransport::post_json: timed out");
                    LlmError::Timeout(request.timeout)
                } else {
                    let e = e.without_url();
                    debug!(error = %e, "ReqwestTransport::post_json: network error");
                    LlmError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        // Errors never carry the URL: its query holds the key
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Network(e.without_url()))?;
        debug!(status, body_len = body.len(), "ReqwestTransport::post_json: reply received");
        Ok(HttpReply { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_network_error_omits_key() {
        let transport = ReqwestTransport::new().unwrap();
        let request = HttpRequest {
            url: "http://127.0.0.1:1/v1beta/models/m:generateContent".to_string(),
            query: vec![("key".to_string(), "SUPER-SECRET-KEY".to_string())],
            body: serde_json::json!({}),
            timeout: Duration::from_secs(5),
        };

        let err = transport.post_json(&request).await.unwrap_err();

        assert!(matches!(err, LlmError::Network(_)));
        let shown = format!("{err} {err:?}");
        assert!(!shown.contains("SUPER-SECRET-KEY"), "key leaked: {shown}");
    }
}
