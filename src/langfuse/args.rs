//! Typed tool arguments
//!
//! Each tool's loosely-typed argument bag is decoded into one of these records
//! before anything touches the network. Unknown keys are ignored; keys with
//! the wrong JSON type are rejected.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{LangfuseError, Result};

/// Arguments for `query_llm_metrics`
///
/// The timestamps are declared required but decoded as optional so that a
/// missing bound surfaces as the same format error as a malformed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLlmMetricsArgs {
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub limit: Option<u64>,
    pub trace_name: Option<String>,
    pub user_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub environment: Option<Vec<String>>,
}

/// Arguments for `get_trace_by_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTraceArgs {
    pub trace_id: Option<String>,
}

/// Arguments for `list_traces`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTracesArgs {
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub limit: Option<u64>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub session_id: Option<String>,
    pub from_timestamp: Option<String>,
    pub to_timestamp: Option<String>,
    pub tags: Option<Vec<String>>,
    pub environment: Option<Vec<String>>,
}

/// Arguments for `list_annotation_queues`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnnotationQueuesArgs {
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub limit: Option<u64>,
}

/// Arguments for `list_scores`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScoresArgs {
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub limit: Option<u64>,
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub environment: Option<Vec<String>>,
}

/// Arguments for `get_session`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSessionArgs {
    pub session_id: Option<String>,
}

/// Page and limit are declared as JSON numbers, so `2.0` is as good as `2`
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative whole number, got {}", number)))
}

/// Decode an argument bag into the record for `tool`
pub fn decode_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| LangfuseError::Validation(format!("Invalid arguments for {}: {}", tool, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_metrics_args() {
        let args: QueryLlmMetricsArgs = decode_args(
            "query_llm_metrics",
            json!({
                "fromTimestamp": "2024-01-01T00:00:00Z",
                "toTimestamp": "2024-01-31T23:59:59Z",
                "page": 2,
                "traceName": "chat",
                "tags": ["prod", "beta"]
            }),
        )
        .unwrap();

        assert_eq!(args.from_timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(args.to_timestamp.as_deref(), Some("2024-01-31T23:59:59Z"));
        assert_eq!(args.page, Some(2));
        assert_eq!(args.limit, None);
        assert_eq!(args.trace_name.as_deref(), Some("chat"));
        assert_eq!(args.tags, Some(vec!["prod".to_string(), "beta".to_string()]));
        assert!(args.environment.is_none());
    }

    #[test]
    fn test_decode_missing_required_id_is_not_a_decode_error() {
        let args: GetTraceArgs = decode_args("get_trace_by_id", json!({})).unwrap();
        assert!(args.trace_id.is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let args: ListAnnotationQueuesArgs =
            decode_args("list_annotation_queues", json!({"page": 1, "cursor": "abc"})).unwrap();
        assert_eq!(args.page, Some(1));
    }

    #[test]
    fn test_decode_null_is_absent() {
        let args: ListScoresArgs =
            decode_args("list_scores", json!({"name": null, "environment": null})).unwrap();
        assert_eq!(args, ListScoresArgs::default());
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let err = decode_args::<ListTracesArgs>("list_traces", json!({"page": "two"})).unwrap_err();
        assert!(matches!(err, LangfuseError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid arguments for list_traces"));

        let err = decode_args::<ListTracesArgs>("list_traces", json!({"tags": "prod"})).unwrap_err();
        assert!(matches!(err, LangfuseError::Validation(_)));

        let err = decode_args::<GetSessionArgs>("get_session", json!({"sessionId": 42})).unwrap_err();
        assert!(matches!(err, LangfuseError::Validation(_)));
    }

    #[test]
    fn test_decode_rejects_negative_page() {
        let err = decode_args::<ListScoresArgs>("list_scores", json!({"page": -1})).unwrap_err();
        assert!(matches!(err, LangfuseError::Validation(_)));
    }

    #[test]
    fn test_decode_accepts_whole_floats() {
        let args: ListTracesArgs =
            decode_args("list_traces", json!({"page": 2.0, "limit": 50})).unwrap();
        assert_eq!(args.page, Some(2));
        assert_eq!(args.limit, Some(50));

        let err = decode_args::<ListTracesArgs>("list_traces", json!({"limit": 2.5})).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_decode_rejects_non_object_bag() {
        let err = decode_args::<ListScoresArgs>("list_scores", json!("page=1")).unwrap_err();
        assert!(matches!(err, LangfuseError::Validation(_)));
    }
}
