use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime layouts used by the service. Each model picks one per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeFormat {
    /// `YYYY-MM-DDTHH:MM:SSZ`
    IsoUtc,
    /// `YYYY-MM-DD HH:MM:SS.ffffff`
    Fractional,
}

impl DateTimeFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            Self::IsoUtc => "%Y-%m-%dT%H:%M:%SZ",
            Self::Fractional => "%Y-%m-%d %H:%M:%S%.f",
        }
    }
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|err| Error::format(field, value, DATE_FORMAT, err))
}

pub fn parse_datetime(
    field: &str,
    value: &str,
    format: DateTimeFormat,
) -> Result<NaiveDateTime, Error> {
    let pattern = format.pattern();
    NaiveDateTime::parse_from_str(value.trim(), pattern)
        .map_err(|err| Error::format(field, value, pattern, err))
}

/// Flatten a field that arrives either as a string or as a list of strings.
///
/// An empty list is treated as absent; lists yield their first element.
pub fn list_or_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first().and_then(list_or_scalar),
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Turn the exact tokens `"True"` and `"False"` into booleans.
///
/// Anything else is returned unchanged.
pub fn coerce_bool(value: Value) -> Value {
    match value {
        Value::String(ref s) if s == "True" => Value::Bool(true),
        Value::String(ref s) if s == "False" => Value::Bool(false),
        other => other,
    }
}
