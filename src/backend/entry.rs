//! Raw log entries as returned by the Cloud Logging `entries.list` API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Log severity levels as reported by the backend.
///
/// The REST API omits the field for `DEFAULT`; anything unrecognised is
/// folded into `DEFAULT` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
    #[default]
    #[serde(other)]
    Default,
}

/// One entry from the backend, with the fields this service reads.
///
/// Everything else (`labels`, `logName`, `httpRequest`, `trace`, ...) is
/// ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: Severity,
    pub resource: Value,
    pub insert_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proto_payload: Option<Value>,
}

impl BackendEntry {
    /// The entry payload, whichever variant the backend populated.
    pub fn data(&self) -> Value {
        if let Some(json) = &self.json_payload {
            json.clone()
        } else if let Some(text) = &self.text_payload {
            Value::String(text.clone())
        } else if let Some(proto) = &self.proto_payload {
            proto.clone()
        } else {
            Value::Null
        }
    }
}

/// Response body of `entries.list`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEntriesResponse {
    pub entries: Vec<BackendEntry>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_text_entry() {
        let entry: BackendEntry = serde_json::from_value(json!({
            "insertId": "abc123",
            "timestamp": "2024-05-01T12:00:00.123456Z",
            "severity": "ERROR",
            "textPayload": "boom",
            "resource": {"type": "cloud_run_revision", "labels": {"service_name": "backend"}},
            "logName": "projects/p/logs/run.googleapis.com%2Fstderr",
            "receiveTimestamp": "2024-05-01T12:00:00.200Z"
        }))
        .unwrap();

        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.insert_id, "abc123");
        assert_eq!(entry.data(), json!("boom"));
        assert_eq!(entry.resource["labels"]["service_name"], "backend");
        assert!(entry.timestamp.is_some());
    }

    #[test]
    fn json_payload_wins_and_missing_severity_is_default() {
        let entry: BackendEntry = serde_json::from_value(json!({
            "insertId": "x",
            "jsonPayload": {"message": "hi", "user": 7}
        }))
        .unwrap();

        assert_eq!(entry.severity, Severity::Default);
        assert_eq!(entry.data(), json!({"message": "hi", "user": 7}));
    }

    #[test]
    fn unknown_severity_folds_to_default() {
        let entry: BackendEntry =
            serde_json::from_value(json!({"severity": "VERBOSE"})).unwrap();
        assert_eq!(entry.severity, Severity::Default);
        assert_eq!(entry.data(), Value::Null);
    }

    #[test]
    fn severity_serializes_upper_case() {
        assert_eq!(serde_json::to_value(Severity::Warning).unwrap(), json!("WARNING"));
        assert_eq!(serde_json::to_value(Severity::Default).unwrap(), json!("DEFAULT"));
    }

    #[test]
    fn empty_list_response_has_no_entries() {
        let resp: ListEntriesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.entries.is_empty());
        assert!(resp.next_page_token.is_none());
    }
}
