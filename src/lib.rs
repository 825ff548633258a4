#![forbid(unsafe_code)]
//! zerobounce_lib: typed client for the ZeroBounce email validation API
//!
//! The service answers with loosely-typed JSON; [`normalize`] turns it into
//! the strongly-typed models of [`models`] without ever failing on vocabulary
//! the library does not know yet.

mod client;
mod config;
mod error;
pub mod models;
pub mod normalize;

pub use client::{
    Params, PersonName, ScoringSendFileOptions, SendFileOptions, Transport, TransportResponse,
    Upload, ZeroBounce,
};
#[cfg(feature = "with-http")]
pub use client::HttpTransport;
pub use config::{ApiUrlRegion, ClientConfig, DEFAULT_BULK_URL, DEFAULT_SCORING_URL};
pub use error::{ClientError, Error};
pub use models::{
    ActivityResponse, ApiUsageResponse, BatchElement, BatchError, Confidence, CreditsResponse,
    DeleteFileResponse, DomainFormat, FileStatusResponse, FindDomainResponse,
    FindEmailFormatResponse, FromRaw, GetFileResponse, GuessFormatResponse, SendFileResponse,
    ValidateBatchResponse, ValidateResponse, ValidateStatus, ValidateSubStatus,
};
pub use normalize::{CaseFolding, KnownValue, RawResponse, coerce_enum};
