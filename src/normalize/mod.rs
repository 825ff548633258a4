//! Normalization of loosely-typed service payloads.
//!
//! Every response model is built from a [`RawResponse`] through the helpers
//! in this module: [`coerce_enum`] for closed vocabularies, [`parse_date`] and
//! [`parse_datetime`] for timestamps, [`list_or_scalar`] for fields the
//! service returns either as a string or as a one-element list, and
//! [`coerce_bool`] for `"True"`/`"False"` tokens.

mod coerce;
mod fields;
mod primitives;

pub use coerce::{CaseFolding, DIAGNOSTICS_TARGET, KnownValue, coerce_enum};
pub use primitives::{
    DATE_FORMAT, DateTimeFormat, coerce_bool, list_or_scalar, parse_date, parse_datetime,
};

pub(crate) use fields::Fields;

/// Untyped JSON object produced by the transport for one response.
pub type RawResponse = serde_json::Map<String, serde_json::Value>;
