use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::RawNode;

/// Custom deserializer for epoch-second timestamps (integer or float).
///
/// Never fails: anything that is not a finite, in-range number becomes `None`.
pub fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                n.as_f64().and_then(epoch_seconds_from_f64)
            }
        }
        _ => None,
    })
}

/// Split float seconds into whole seconds + nanoseconds
pub(crate) fn epoch_seconds_from_f64(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Accept a string; treat any other JSON type (including null) as absent
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept any value that deserializes as `T`; a mistyped value becomes `None`
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Node mapping: `null` means empty; node values that are not objects become empty nodes.
pub fn deserialize_mapping<'de, D>(deserializer: D) -> Result<HashMap<String, RawNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(HashMap::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(id, node)| {
                let node = serde_json::from_value::<RawNode>(node).unwrap_or_default();
                (id, node)
            })
            .collect()),
        other => Err(Error::custom(format!("mapping must be an object, found {}", json_type(&other)))),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
