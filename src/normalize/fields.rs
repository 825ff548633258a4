use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::{
    CaseFolding, DateTimeFormat, KnownValue, RawResponse, coerce_bool, coerce_enum,
    list_or_scalar, parse_date, parse_datetime,
};
use crate::error::Error;

/// Typed view over a [`RawResponse`] used by the model constructors.
#[derive(Clone, Copy)]
pub(crate) struct Fields<'a> {
    raw: &'a RawResponse,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(raw: &'a RawResponse) -> Self {
        Self { raw }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key).filter(|value| !value.is_null())
    }

    /// Optional string field; numbers and booleans are rendered as text.
    pub(crate) fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    pub(crate) fn required_text(&self, key: &'static str) -> Result<String, Error> {
        self.text(key).ok_or(Error::MissingField { field: key })
    }

    pub(crate) fn first_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(list_or_scalar)
    }

    /// Counter field; absent or unreadable counters are zero.
    pub(crate) fn count(&self, key: &str) -> u64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Boolean field. Native booleans, the `"True"`/`"False"` tokens and
    /// the lowercase `"true"`/`"false"` spelling are accepted.
    pub(crate) fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key).cloned().map(coerce_bool)? {
            Value::Bool(value) => Some(value),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    pub(crate) fn date(&self, key: &str) -> Result<Option<NaiveDate>, Error> {
        self.text(key)
            .map(|value| parse_date(key, &value))
            .transpose()
    }

    pub(crate) fn datetime(
        &self,
        key: &str,
        format: DateTimeFormat,
    ) -> Result<Option<NaiveDateTime>, Error> {
        self.text(key)
            .map(|value| parse_datetime(key, &value, format))
            .transpose()
    }

    pub(crate) fn known<E: KnownValue>(&self, key: &str, folding: CaseFolding) -> Option<E> {
        coerce_enum(self.raw.get(key), key, folding)
    }

    /// Nested objects of a list field. Missing lists are empty.
    pub(crate) fn records(self, key: &str) -> impl Iterator<Item = &'a RawResponse> + use<'a> {
        self.get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    /// Error text the service embeds under `message` or `Message`.
    pub(crate) fn embedded_message(&self) -> Option<String> {
        self.first_text("message")
            .or_else(|| self.first_text("Message"))
    }
}
