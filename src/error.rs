use std::path::{Path, PathBuf};

use thiserror::Error;

/// Precondition failures detected before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Empty parameter: {name}")]
    EmptyParameter { name: &'static str },
    #[error("only one of {first} or {second} may be provided")]
    ConflictingParameters {
        first: &'static str,
        second: &'static str,
    },
    #[error("one of {first} or {second} must be provided")]
    MissingParameter {
        first: &'static str,
        second: &'static str,
    },
    #[error("column {name} must be a 1-based index, got {value}")]
    InvalidColumn { name: &'static str, value: u32 },
}

/// Errors raised by the ZeroBounce client.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("{message}")]
    Api { message: String },
    #[error("field {field} value {value:?} does not match format {format}")]
    Format {
        field: String,
        value: String,
        format: &'static str,
        #[source]
        source: chrono::ParseError,
    },
    #[error("response is missing required field {field}")]
    MissingField { field: &'static str },
    #[error("response body (HTTP {status}) is not valid JSON: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("response body is not a JSON object")]
    NotAnObject,
    #[cfg(feature = "with-http")]
    #[error("HTTP request failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub(crate) fn format(
        field: impl Into<String>,
        value: impl Into<String>,
        format: &'static str,
        source: chrono::ParseError,
    ) -> Self {
        Self::Format {
            field: field.into(),
            value: value.into(),
            format,
            source,
        }
    }

    pub(crate) fn decode(status: u16, source: serde_json::Error) -> Self {
        Self::Decode { status, source }
    }

    #[cfg(feature = "with-http")]
    pub(crate) fn http(source: reqwest::Error) -> Self {
        Self::Http { source }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// `true` when the caller supplied invalid input and nothing was sent.
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// The service-provided message when the remote side signaled failure.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message.as_str()),
            _ => None,
        }
    }
}
