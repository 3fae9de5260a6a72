//! ISO 8601 timestamp shape check used by the metrics query

use std::sync::LazyLock;

use regex::Regex;

/// `YYYY-MM-DDTHH:mm:ss[.fraction]Z`, UTC only
static ISO_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?Z$")
        .expect("timestamp regex must compile")
});

/// Message returned when either bound of a time range is malformed
pub const INVALID_TIMESTAMP_MESSAGE: &str =
    "Invalid timestamp format. Expected ISO 8601 format (YYYY-MM-DDTHH:mm:ssZ)";

/// Check the string has the exact UTC timestamp shape.
///
/// Only the shape is checked; `2024-13-45T99:00:00Z` passes.
pub fn is_valid_timestamp(value: &str) -> bool {
    ISO_TIMESTAMP.is_match(value)
}
