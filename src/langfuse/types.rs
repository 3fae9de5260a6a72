//! Response shapes
//!
//! Only the daily metrics endpoint has a schema we rely on. Everything else
//! is passed through as an opaque `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET /api/public/metrics/daily`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// One record per day
    pub data: Vec<DailyMetric>,
    /// Pagination metadata and anything else the API adds
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single day's aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metrics_response_keeps_unknown_fields() {
        let body = json!({
            "data": [
                {"date": "2024-01-01", "countTraces": 12, "totalCost": 0.5, "usage": []},
                {"date": "2024-01-02", "countTraces": 3}
            ],
            "meta": {"page": 1, "limit": 100, "totalItems": 2, "totalPages": 1}
        });

        let parsed: MetricsResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].date, "2024-01-01");
        assert_eq!(parsed.data[0].fields["countTraces"], 12);
        assert_eq!(parsed.extra["meta"]["totalItems"], 2);

        assert_eq!(serde_json::to_value(&parsed).unwrap(), body);
    }

    #[test]
    fn test_metrics_response_requires_data() {
        let result = serde_json::from_value::<MetricsResponse>(json!({"meta": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_daily_metric_requires_date() {
        let result = serde_json::from_value::<MetricsResponse>(json!({"data": [{"countTraces": 1}]}));
        assert!(result.is_err());
    }
}
