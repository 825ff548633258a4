//! Typed response models, one per endpoint.
//!
//! Models are built once from a [`RawResponse`] through [`FromRaw`] and never
//! mutated afterwards.

mod account;
mod enums;
mod files;
mod formats;
mod validate;

pub use account::{ActivityResponse, ApiUsageResponse, CreditsResponse};
pub use enums::{Confidence, ValidateStatus, ValidateSubStatus};
pub use files::{DeleteFileResponse, FileStatusResponse, GetFileResponse, SendFileResponse};
pub use formats::{DomainFormat, FindDomainResponse, FindEmailFormatResponse, GuessFormatResponse};
pub use validate::{BatchElement, BatchError, ValidateBatchResponse, ValidateResponse};

use crate::error::Error;
use crate::normalize::{Fields, RawResponse};

/// Construction of a typed model from a raw service payload.
pub trait FromRaw: Sized {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error>;
}

/// Fail with [`Error::Api`] when the service wrapped an error in a
/// `message`/`Message` key instead of returning the model fields.
pub(crate) fn reject_embedded_message(fields: Fields<'_>) -> Result<(), Error> {
    match fields.embedded_message() {
        Some(message) => Err(Error::api(message)),
        None => Ok(()),
    }
}
