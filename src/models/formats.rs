use super::{Confidence, FromRaw, ValidateStatus, ValidateSubStatus, reject_embedded_message};
use crate::error::Error;
use crate::normalize::{CaseFolding, Fields, RawResponse};

/// One way a domain may shape its addresses, e.g. `first.last`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFormat {
    pub format: Option<String>,
    pub confidence: Option<Confidence>,
}

impl DomainFormat {
    fn from_fields(fields: Fields<'_>) -> Self {
        Self {
            format: fields.text("format"),
            confidence: fields.known("confidence", CaseFolding::Lowercase),
        }
    }
}

fn other_domain_formats(fields: Fields<'_>) -> Vec<DomainFormat> {
    fields
        .records("other_domain_formats")
        .map(|entry| DomainFormat::from_fields(Fields::new(entry)))
        .collect()
}

/// Response of the legacy `guessformat` call.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessFormatResponse {
    pub email: Option<String>,
    pub domain: Option<String>,
    pub format: Option<String>,
    pub status: Option<ValidateStatus>,
    pub sub_status: Option<ValidateSubStatus>,
    pub confidence: Option<Confidence>,
    pub did_you_mean: Option<String>,
    pub failure_reason: Option<String>,
    pub other_domain_formats: Vec<DomainFormat>,
}

impl FromRaw for GuessFormatResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let f = Fields::new(raw);
        reject_embedded_message(f)?;
        Ok(Self {
            email: f.text("email"),
            domain: f.text("domain"),
            format: f.text("format"),
            status: f.known("status", CaseFolding::Lowercase),
            sub_status: f.known("sub_status", CaseFolding::Lowercase),
            confidence: f.known("confidence", CaseFolding::Lowercase),
            did_you_mean: f.text("did_you_mean"),
            failure_reason: f.text("failure_reason"),
            other_domain_formats: other_domain_formats(f),
        })
    }
}

/// Most likely address of a person at a domain or company.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindEmailFormatResponse {
    pub email: Option<String>,
    pub email_confidence: Option<Confidence>,
    pub domain: Option<String>,
    /// Echoed back verbatim, possibly as an empty string.
    pub company_name: Option<String>,
    pub did_you_mean: Option<String>,
    pub failure_reason: Option<String>,
}

impl FromRaw for FindEmailFormatResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let f = Fields::new(raw);
        reject_embedded_message(f)?;
        Ok(Self {
            email: f.text("email"),
            email_confidence: f.known("email_confidence", CaseFolding::Lowercase),
            domain: f.text("domain"),
            company_name: f.text("company_name"),
            did_you_mean: f.text("did_you_mean"),
            failure_reason: f.text("failure_reason"),
        })
    }
}

/// Domain of a company together with its guessed address formats.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindDomainResponse {
    pub domain: Option<String>,
    pub company_name: Option<String>,
    pub format: Option<String>,
    pub confidence: Option<Confidence>,
    pub did_you_mean: Option<String>,
    pub failure_reason: Option<String>,
    pub other_domain_formats: Vec<DomainFormat>,
}

impl FromRaw for FindDomainResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let f = Fields::new(raw);
        reject_embedded_message(f)?;
        Ok(Self {
            domain: f.text("domain"),
            company_name: f.text("company_name"),
            format: f.text("format"),
            confidence: f.known("confidence", CaseFolding::Lowercase),
            did_you_mean: f.text("did_you_mean"),
            failure_reason: f.text("failure_reason"),
            other_domain_formats: other_domain_formats(f),
        })
    }
}
