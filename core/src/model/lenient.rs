//! Per-field fallbacks for host outcomes.
//!
//! Third-party modules do not always respect ansible's conventions (`"changed": "yes"`,
//! `"skip_reason": null`, ...). A badly typed field must not sink the whole document,
//! so these helpers coerce whatever arrived into the typed field's best guess.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn bool_field<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    })
}

pub fn string_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
