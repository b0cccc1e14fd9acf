//! StructuredGenerator trait definition

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::GenerationRequest;

/// Schema-constrained generation - each call is independent
///
/// Implementations never surface errors: a call either yields a parsed JSON
/// object or nothing. Callers treat nothing as "keep what you already have".
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Run one request; an empty credential yields `None` without any network traffic
    async fn generate_value(&self, request: &GenerationRequest, credential: &str) -> Option<Value>;
}

/// Convert a generated value into a typed shape, collapsing mismatches to `None`
pub fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            debug!(error = %e, "decode: value does not match expected shape");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Shape {
        objective: String,
    }

    #[test]
    fn test_decode_matching_shape() {
        let shape: Option<Shape> = decode(serde_json::json!({"objective": "Cut handling time"}));
        assert_eq!(
            shape,
            Some(Shape {
                objective: "Cut handling time".to_string()
            })
        );
    }

    #[test]
    fn test_decode_missing_key_is_none() {
        let shape: Option<Shape> = decode(serde_json::json!({"goal": "x"}));
        assert!(shape.is_none());
    }

    #[test]
    fn test_decode_wrong_type_is_none() {
        let shape: Option<Shape> = decode(serde_json::json!(["objective"]));
        assert!(shape.is_none());
    }
}
