use std::borrow::Cow;

use serde_json::Value;
use tracing::warn;

/// Tracing target for non-fatal warnings about the service payloads.
pub const DIAGNOSTICS_TARGET: &str = "zerobounce::diagnostics";

/// A closed vocabulary the service sends as plain strings.
pub trait KnownValue: Copy + 'static {
    /// Human name of the vocabulary, used in diagnostics.
    const KIND: &'static str;

    /// Exact lookup of a wire value. Models go through [`coerce_enum`].
    fn lookup(wire: &str) -> Option<Self>;

    /// Wire spelling of the member.
    fn as_str(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFolding {
    Exact,
    Lowercase,
}

/// Map a raw payload value onto `E`.
///
/// Absent, `null` and blank values yield `None`. Values outside the known set
/// also yield `None` and emit a warning under [`DIAGNOSTICS_TARGET`].
pub fn coerce_enum<E: KnownValue>(
    raw: Option<&Value>,
    field: &str,
    folding: CaseFolding,
) -> Option<E> {
    let text: Cow<'_, str> = match raw? {
        Value::Null => return None,
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    };
    if text.trim().is_empty() {
        return None;
    }
    let folded = match folding {
        CaseFolding::Exact => Cow::Borrowed(&*text),
        CaseFolding::Lowercase => Cow::Owned(text.to_lowercase()),
    };

    match E::lookup(&folded) {
        Some(member) => Some(member),
        None => {
            warn!(
                target: DIAGNOSTICS_TARGET,
                field,
                value = %text,
                kind = E::KIND,
                "unknown {} value received from the API; the library may be out of date, falling back to none",
                E::KIND
            );
            None
        }
    }
}
