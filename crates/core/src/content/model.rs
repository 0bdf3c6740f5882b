use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content record of one location.
/// Maps to the `location_content` PostgreSQL table, one row per location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocationContent {
    pub location_id: String,
    pub template_type: Option<String>,
    pub canonical_slug: Option<String>,
    /// Page payload. Older rows hold a JSON-encoded string instead of an
    /// object; see [`decode_content_json`].
    pub content_json: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LocationContent {
    /// The decoded payload, or `None` when nothing usable is stored.
    pub fn payload(&self) -> Option<Value> {
        self.content_json.as_ref().and_then(decode_content_json)
    }
}

/// Unwrap a stored payload.
///
/// Strings are parsed as JSON (repeatedly, for doubly-encoded rows) and
/// accepted when they decode to an object. `null` and strings that are not
/// JSON objects yield `None`; any other value is returned as is.
pub fn decode_content_json(value: &Value) -> Option<Value> {
    let mut current = value.clone();
    // legacy rows were at most double-encoded
    for _ in 0..3 {
        let text = match current {
            Value::Null => return None,
            Value::String(text) => text,
            other => return Some(other),
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(decoded @ (Value::Object(_) | Value::String(_))) => current = decoded,
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_pass_through() {
        let value = json!({"title": "Bath"});
        assert_eq!(decode_content_json(&value), Some(value));
    }

    #[test]
    fn stringified_json_is_decoded() {
        let inner = json!({"title": "Bath", "hero": {"heading": "Foster Agencies in Bath"}});
        let once = Value::String(inner.to_string());
        let twice = Value::String(once.to_string());
        assert_eq!(decode_content_json(&once), Some(inner.clone()));
        assert_eq!(decode_content_json(&twice), Some(inner));
    }

    #[test]
    fn unusable_payloads_are_none() {
        assert_eq!(decode_content_json(&Value::Null), None);
        assert_eq!(decode_content_json(&json!("not json")), None);
        assert_eq!(decode_content_json(&json!("42")), None);
    }

    #[test]
    fn payload_of_empty_row() {
        let row = LocationContent {
            location_id: "c1".into(),
            template_type: None,
            canonical_slug: None,
            content_json: None,
            updated_at: None,
        };
        assert_eq!(row.payload(), None);
    }
}
