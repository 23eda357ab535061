//! Tolerant decoding helpers for backend rows
//!
//! Rows coming back from the backend may miss fields or carry the wrong JSON
//! type. The mappers must never fail on them, so every row field goes through
//! `lenient`, which turns a type mismatch into `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, yielding `None` instead of an error on mismatch
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode a whole row, falling back to the all-defaults row
pub fn decode_row<T>(raw: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(raw.clone()).unwrap_or_default()
}

/// Parse the timestamp formats the backend and legacy seed data use
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%b %d, %Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn parses_backend_and_legacy_formats() {
        assert!(parse_timestamp("2024-12-01T10:00:00.123456+00:00").is_some());
        assert!(parse_timestamp("2024-12-01T10:00:00").is_some());
        assert_eq!(parse_timestamp("Oct 24, 2023").unwrap().year(), 2023);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[derive(Debug, Default, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient")]
        count: Option<u64>,
    }

    #[test]
    fn mismatched_fields_become_none() {
        let row: Row = decode_row(&serde_json::json!({ "count": "many" }));
        assert_eq!(row.count, None);
        let row: Row = decode_row(&serde_json::json!("not an object"));
        assert_eq!(row.count, None);
    }
}
