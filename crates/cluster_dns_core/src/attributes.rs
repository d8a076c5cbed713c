//! `[{"name": ..., "value": ...}]` detail lists and their flattened form.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::RoutingError;

pub type AttributeMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AttributeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl AttributeRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    /// Reads a record out of an arbitrary JSON value. Anything that is not an
    /// object yields a record with neither field set.
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            name: field("name"),
            value: field("value"),
        }
    }
}

/// Non-string values decode as absent instead of failing the whole list.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Flattens detail records into a map, last occurrence winning on duplicate names.
///
/// Records missing either `name` or `value` are skipped rather than failing the
/// list. Use [`try_flatten_attributes`] when a malformed record should be an error.
pub fn flatten_attributes(records: &[AttributeRecord]) -> AttributeMap {
    let mut flattened = AttributeMap::new();
    for record in records {
        if let (Some(name), Some(value)) = (&record.name, &record.value) {
            flattened.insert(name.clone(), value.clone());
        }
    }
    flattened
}

/// Strict alternative to [`flatten_attributes`]: the first incomplete record is an error.
pub fn try_flatten_attributes(records: &[AttributeRecord]) -> Result<AttributeMap, RoutingError> {
    let mut flattened = AttributeMap::new();
    for (index, record) in records.iter().enumerate() {
        let context = || format!("attribute record {index}");
        let name = record
            .name
            .as_ref()
            .ok_or_else(|| RoutingError::field_missing("name", context()))?;
        let value = record
            .value
            .as_ref()
            .ok_or_else(|| RoutingError::field_missing("value", context()))?;
        flattened.insert(name.clone(), value.clone());
    }
    Ok(flattened)
}

/// Inverse of flattening, one complete record per map entry in key order.
pub fn attribute_records(attributes: &AttributeMap) -> Vec<AttributeRecord> {
    attributes
        .iter()
        .map(|(name, value)| AttributeRecord::new(name.clone(), value.clone()))
        .collect()
}
