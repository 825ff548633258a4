use chrono::NaiveDateTime;
use serde::Serialize;

use super::{FromRaw, ValidateStatus, ValidateSubStatus, reject_embedded_message};
use crate::error::{ClientError, Error};
use crate::normalize::{CaseFolding, DateTimeFormat, Fields, RawResponse};

/// Result of validating a single address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateResponse {
    pub address: Option<String>,
    pub status: Option<ValidateStatus>,
    pub sub_status: Option<ValidateSubStatus>,
    /// Portion of the address before the `@`.
    pub account: Option<String>,
    /// Portion of the address after the `@`.
    pub domain: Option<String>,
    pub did_you_mean: Option<String>,
    pub domain_age_days: Option<String>,
    pub free_email: bool,
    pub mx_found: bool,
    pub mx_record: Option<String>,
    pub smtp_provider: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
    /// UTC time the address was validated.
    pub processed_at: Option<NaiveDateTime>,
}

impl ValidateResponse {
    fn from_fields(f: Fields<'_>) -> Result<Self, Error> {
        Ok(Self {
            address: f.text("address"),
            status: f.known("status", CaseFolding::Exact),
            sub_status: f.known("sub_status", CaseFolding::Exact),
            account: f.text("account"),
            domain: f.text("domain"),
            did_you_mean: f.text("did_you_mean"),
            domain_age_days: f.text("domain_age_days"),
            free_email: f.flag("free_email").unwrap_or(false),
            mx_found: f.flag("mx_found").unwrap_or(false),
            mx_record: f.text("mx_record"),
            smtp_provider: f.text("smtp_provider"),
            firstname: f.text("firstname"),
            lastname: f.text("lastname"),
            gender: f.text("gender"),
            city: f.text("city"),
            region: f.text("region"),
            zipcode: f.text("zipcode"),
            country: f.text("country"),
            processed_at: f.datetime("processed_at", DateTimeFormat::Fractional)?,
        })
    }
}

impl FromRaw for ValidateResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        reject_embedded_message(fields)?;
        Self::from_fields(fields)
    }
}

/// One address submitted to the batch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchElement {
    email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
}

impl BatchElement {
    pub fn new(email_address: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_ip(email_address, None::<String>)
    }

    pub fn with_ip(
        email_address: impl Into<String>,
        ip_address: Option<impl Into<String>>,
    ) -> Result<Self, ClientError> {
        let email_address = email_address.into();
        if email_address.trim().is_empty() {
            return Err(ClientError::EmptyParameter {
                name: "email_address",
            });
        }
        Ok(Self {
            email_address,
            ip_address: ip_address.map(Into::into),
        })
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }
}

/// Per-address failure reported by the batch endpoint.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchError {
    pub error: Option<String>,
    pub email_address: Option<String>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateBatchResponse {
    pub email_batch: Vec<ValidateResponse>,
    pub errors: Vec<BatchError>,
}

impl FromRaw for ValidateBatchResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        reject_embedded_message(fields)?;

        let email_batch = fields
            .records("email_batch")
            .map(|entry| ValidateResponse::from_fields(Fields::new(entry)))
            .collect::<Result<Vec<_>, _>>()?;
        let errors = fields
            .records("errors")
            .map(|entry| {
                let entry = Fields::new(entry);
                BatchError {
                    error: entry.text("error"),
                    email_address: entry.text("email_address"),
                }
            })
            .collect();

        Ok(Self {
            email_batch,
            errors,
        })
    }
}
