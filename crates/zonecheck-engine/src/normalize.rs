use serde::Deserialize;
use serde_json::Value;
use zonecheck_common::types::NewFinding;

pub const DEFAULT_LEVEL: &str = "INFO";
pub const DEFAULT_MODULE: &str = "UNKNOWN";
pub const DEFAULT_TAG: &str = "UNKNOWN";

/// The four fields we read from an engine entry; anything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct RawFinding {
    #[serde(default)]
    level: Option<Value>,
    #[serde(default)]
    module: Option<Value>,
    #[serde(default)]
    tag: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// Text form of a field. `null` counts as missing; numbers, booleans and
/// nested values are rendered as JSON.
fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Maps one raw engine entry onto a finding, filling defaults.
///
/// A missing message becomes the JSON rendering of the whole entry, so no
/// information is lost. Entries that are not objects get every default.
pub fn normalize_finding(raw: &Value) -> NewFinding {
    let parsed = match raw {
        Value::Object(_) => RawFinding::deserialize(raw).unwrap_or_default(),
        _ => RawFinding::default(),
    };

    NewFinding {
        level: field_text(parsed.level).unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        module: field_text(parsed.module).unwrap_or_else(|| DEFAULT_MODULE.to_string()),
        tag: field_text(parsed.tag).unwrap_or_else(|| DEFAULT_TAG.to_string()),
        message: field_text(parsed.message).unwrap_or_else(|| raw.to_string()),
    }
}

/// Normalizes every entry, keeping input order. Never fails.
pub fn normalize_findings(raw: &[Value]) -> Vec<NewFinding> {
    raw.iter().map(normalize_finding).collect()
}
