//! Gemini structured-output client
//!
//! Implements [`StructuredGenerator`] against the `generateContent` endpoint,
//! asking for `application/json` output constrained by a response schema.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    GenerationRequest, HttpRequest, LlmError, ReqwestTransport, RetryPolicy, Sleeper, StructuredGenerator,
    TokioSleeper, Transport,
};
use crate::config::LlmConfig;

/// Gemini API client
pub struct GeminiClient {
    model: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
}

impl GeminiClient {
    /// Create a client with the real HTTP transport and clock
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(config, Arc::new(transport), Arc::new(TokioSleeper)))
    }

    /// Create a client over explicit transport and clock
    pub fn new(config: &LlmConfig, transport: Arc<dyn Transport>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            retry: config.retry.clone(),
            transport,
            sleeper,
        }
    }

    /// Endpoint URL without the key parameter
    pub fn endpoint_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the generateContent API
    pub fn build_request_body(&self, request: &GenerationRequest) -> Value {
        debug!(%self.model, prompt_len = request.prompt.len(), "build_request_body: called");
        serde_json::json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema,
            },
        })
    }

    /// Run the request under the retry policy, reporting why it failed
    pub async fn try_generate_value(&self, request: &GenerationRequest, credential: &str) -> Result<Value, LlmError> {
        debug!(%self.model, "try_generate_value: called");
        if credential.trim().is_empty() {
            debug!("try_generate_value: empty credential, skipping call");
            return Err(LlmError::MissingCredential);
        }

        let http_request = HttpRequest {
            url: self.endpoint_url(),
            query: vec![("key".to_string(), credential.to_string())],
            body: self.build_request_body(request),
            timeout: self.timeout,
        };

        let attempts = self.retry.attempts();
        let mut attempt = 1;
        loop {
            match self.attempt(&http_request).await {
                Ok(value) => {
                    debug!(attempt, "try_generate_value: success");
                    return Ok(value);
                }
                Err(e) if self.retry.should_retry(attempt, &e) => {
                    let delay = self.retry.delay_before(attempt);
                    warn!(attempt, attempts, ?delay, error = %e, "try_generate_value: retrying after failure");
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "try_generate_value: giving up");
                    return Err(e);
                }
            }
        }
    }

    /// One HTTP round trip; parse problems are terminal, transport/status problems are not
    async fn attempt(&self, request: &HttpRequest) -> Result<Value, LlmError> {
        let reply = self.transport.post_json(request).await?;
        if !reply.is_success() {
            debug!(status = reply.status, "attempt: API error");
            return Err(LlmError::ApiError {
                status: reply.status,
                message: reply.body,
            });
        }
        parse_reply_body(&reply.body)
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_value(&self, request: &GenerationRequest, credential: &str) -> Option<Value> {
        match self.try_generate_value(request, credential).await {
            Ok(value) => Some(value),
            Err(e) => {
                info!(error = %e, "generate_value: no result");
                None
            }
        }
    }
}

/// Pull the generated JSON out of a successful reply body
pub fn parse_reply_body(body: &str) -> Result<Value, LlmError> {
    let envelope: Value = serde_json::from_str(body)?;
    let text = extract_text(&envelope)
        .ok_or_else(|| LlmError::InvalidResponse("missing candidates[0].content.parts[0].text".to_string()))?;
    let cleaned = strip_code_fence(text);
    let value: Value = serde_json::from_str(cleaned)?;
    Ok(value)
}

/// Text payload of the first part of the first candidate
pub fn extract_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// Remove a leading ```` ```json ```` or ```` ``` ```` fence and a trailing ```` ``` ````
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::retry::mock::RecordingSleeper;
    use crate::llm::transport::mock::{MockTransport, Scripted, envelope};
    use crate::llm::{HttpReply, decode};
    use serde::Deserialize;

    fn test_config() -> LlmConfig {
        LlmConfig {
            model: "gemini-test".to_string(),
            base_url: "https://example.test/".to_string(),
            ..LlmConfig::default()
        }
    }

    fn client_with(transport: Arc<MockTransport>, sleeper: Arc<RecordingSleeper>) -> GeminiClient {
        GeminiClient::new(&test_config(), transport, sleeper)
    }

    fn objective_request() -> GenerationRequest {
        GenerationRequest::new(
            "Write an objective",
            serde_json::json!({"type": "OBJECT", "properties": {"objective": {"type": "STRING"}}}),
            "You are a solution architect.",
        )
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_missing_parts() {
        assert!(extract_text(&serde_json::json!({"candidates": []})).is_none());
        assert!(extract_text(&serde_json::json!({"candidates": [{"content": {"parts": []}}]})).is_none());
        assert_eq!(
            extract_text(&serde_json::json!({"candidates": [{"content": {"parts": [{"text": "hi"}]}}]})),
            Some("hi")
        );
    }

    #[test]
    fn test_build_request_body_shape() {
        let client = client_with(Arc::new(MockTransport::new(vec![])), Arc::new(RecordingSleeper::new()));
        let body = client.build_request_body(&objective_request());

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Write an objective");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a solution architect.");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = client_with(Arc::new(MockTransport::new(vec![])), Arc::new(RecordingSleeper::new()));
        assert_eq!(
            client.endpoint_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_empty_credential_makes_no_calls() {
        let transport = Arc::new(MockTransport::always(200, &envelope("{}"), 3));
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = client_with(transport.clone(), sleeper.clone());

        assert!(client.generate_value(&objective_request(), "").await.is_none());
        assert_eq!(transport.call_count(), 0);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_three_server_errors_give_up_after_two_delays() {
        let transport = Arc::new(MockTransport::always(500, "boom", 5));
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = client_with(transport.clone(), sleeper.clone());

        let result = client.generate_value(&objective_request(), "key-123").await;

        assert!(result.is_none());
        assert_eq!(transport.call_count(), 3);
        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(1), Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let transport = Arc::new(MockTransport::new(vec![
            Scripted::Timeout,
            Scripted::Reply(HttpReply::new(429, "slow down")),
            Scripted::Reply(HttpReply::new(200, envelope(r#"{"objective": "Automate triage"}"#))),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = client_with(transport.clone(), sleeper.clone());

        let value = client.generate_value(&objective_request(), "key-123").await;

        assert_eq!(value, Some(serde_json::json!({"objective": "Automate triage"})));
        assert_eq!(transport.call_count(), 3);
        assert_eq!(sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_fenced_payload_round_trips() {
        let payload = "```json\n{\"objective\": \"Reduce stockouts by 20%\"}\n```";
        let transport = Arc::new(MockTransport::always(200, &envelope(payload), 1));
        let client = client_with(transport, Arc::new(RecordingSleeper::new()));

        #[derive(Debug, Deserialize, PartialEq)]
        struct Objective {
            objective: String,
        }

        let value = client.generate_value(&objective_request(), "key-123").await;
        let typed: Option<Objective> = value.and_then(decode);
        assert_eq!(
            typed,
            Some(Objective {
                objective: "Reduce stockouts by 20%".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_not_retried() {
        let transport = Arc::new(MockTransport::always(200, &envelope("{not json"), 3));
        let sleeper = Arc::new(RecordingSleeper::new());
        let client = client_with(transport.clone(), sleeper.clone());

        let err = client.try_generate_value(&objective_request(), "key-123").await.unwrap_err();

        assert!(matches!(err, LlmError::Json(_)));
        assert_eq!(transport.call_count(), 1);
        assert!(sleeper.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_unexpected_envelope_is_absence() {
        let transport = Arc::new(MockTransport::always(200, r#"{"candidates": []}"#, 3));
        let client = client_with(transport.clone(), Arc::new(RecordingSleeper::new()));

        assert!(client.generate_value(&objective_request(), "key-123").await.is_none());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_key_and_timeout() {
        let transport = Arc::new(MockTransport::always(200, &envelope("{}"), 1));
        let client = client_with(transport.clone(), Arc::new(RecordingSleeper::new()));

        client.generate_value(&objective_request(), "key-123").await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("key"), Some("key-123"));
        assert_eq!(requests[0].timeout, Duration::from_secs(30));
        assert!(requests[0].url.ends_with("gemini-test:generateContent"));
    }
}
