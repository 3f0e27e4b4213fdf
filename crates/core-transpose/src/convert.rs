use crate::errors::{self as errors, ConvertError};
use crate::table::Row;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Serializes a value to JSON text.
pub fn to_json<T: Serialize>(value: &T) -> ConvertResult<String> {
    serde_json::to_string(value).context(errors::SerializeSnafu)
}

/// Parses JSON text into a typed value. Never yields a partial value.
pub fn from_json<T: DeserializeOwned>(json: &str) -> ConvertResult<T> {
    serde_json::from_str(json).context(errors::DeserializeSnafu)
}

/// Converts a value into a string-keyed row; nested objects stay nested.
pub fn to_map<T: Serialize>(value: &T) -> ConvertResult<Row> {
    let value = serde_json::to_value(value).context(errors::SerializeSnafu)?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => errors::NotAnObjectSnafu {
            kind: value_kind(&other),
        }
        .fail(),
    }
}

/// Inverse of [`to_map`].
pub fn from_map<T: DeserializeOwned>(map: Row) -> ConvertResult<T> {
    let value = Value::Object(map.into_iter().collect());
    serde_json::from_value(value).context(errors::DeserializeSnafu)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
