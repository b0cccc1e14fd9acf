//! Request and reply types shared by the generation client and its transports

use std::fmt;
use std::time::Duration;

use serde_json::Value;

/// One structured-generation call
///
/// The schema uses the endpoint's own vocabulary (`OBJECT`, `STRING`, `ARRAY`,
/// `NUMBER`), not JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Value,
    pub system_instruction: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, schema: Value, system_instruction: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
            system_instruction: system_instruction.into(),
        }
    }
}

/// A single HTTP POST handed to a [`Transport`](super::Transport)
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a query parameter by name
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

// Query values can carry the API key, so they never reach the logs.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self.query.iter().map(|(k, _)| (k.as_str(), "<redacted>")).collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("query", &query)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Status and raw body of an HTTP reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
