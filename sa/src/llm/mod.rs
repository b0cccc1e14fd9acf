//! Structured generation client
//!
//! Sends schema-constrained prompts to the Gemini `generateContent` endpoint
//! and hands back parsed JSON, or nothing. Transport and clock sit behind
//! traits so the retry behaviour can be exercised without a network.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod credential;
mod error;
mod gemini;
pub mod retry;
pub mod transport;
mod types;

pub use client::{StructuredGenerator, decode};
pub use credential::{resolve_credential, resolve_credential_with};
pub use error::LlmError;
pub use gemini::{GeminiClient, extract_text, parse_reply_body, strip_code_fence};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{ReqwestTransport, Transport};
pub use types::{GenerationRequest, HttpReply, HttpRequest};

use crate::config::LlmConfig;

/// Create the generation client described by the config
pub fn create_generator(config: &LlmConfig) -> Result<Arc<dyn StructuredGenerator>, LlmError> {
    debug!(model = %config.model, "create_generator: called");
    Ok(Arc::new(GeminiClient::from_config(config)?))
}
