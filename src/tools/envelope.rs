//! Tool result envelope
//!
//! Every tool call produces exactly one text block. Failures are data inside
//! the envelope, never a protocol-level error.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::LangfuseError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Result payload of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Serialized JSON success payload
    pub fn from_value(value: &Value) -> Self {
        Self::text(value.to_string())
    }

    /// `{"error": "<message>"}`
    pub fn from_error(err: &LangfuseError) -> Self {
        Self::text(json!({ "error": err.to_string() }).to_string())
    }

    /// Text of the single content block
    pub fn text_content(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ContentBlock::Text { text } => text.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let result = CallToolResult::from_value(&json!({"data": [{"date": "2024-01-01"}]}));
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.text_content(), Some(r#"{"data":[{"date":"2024-01-01"}]}"#));
    }

    #[test]
    fn test_error_envelope() {
        let err = LangfuseError::Dispatch("Unknown tool: nonexistent_tool".to_string());
        let result = CallToolResult::from_error(&err);
        assert_eq!(
            result.text_content(),
            Some(r#"{"error":"Unknown tool: nonexistent_tool"}"#)
        );
    }

    #[test]
    fn test_error_envelope_escapes_message() {
        let err = LangfuseError::Remote {
            status: 400,
            body: r#"{"message":"bad "quote""}"#.to_string(),
        };
        let result = CallToolResult::from_error(&err);
        let parsed: Value = serde_json::from_str(result.text_content().unwrap()).unwrap();
        assert_eq!(parsed["error"], err.to_string());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let result = CallToolResult::text("hello");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"content": [{"type": "text", "text": "hello"}]})
        );
    }
}
