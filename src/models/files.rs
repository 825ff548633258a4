use std::path::PathBuf;

use chrono::NaiveDateTime;

use super::FromRaw;
use crate::error::Error;
use crate::normalize::{DateTimeFormat, Fields, RawResponse};

// File endpoints report failures in-band: `success` may be a "True"/"False"
// token and `message` may be a list whose first entry is the reason.
fn outcome(fields: Fields<'_>, default_success: bool) -> (bool, Option<String>) {
    let success = fields.flag("success").unwrap_or(default_success);
    let message = fields.first_text("message");
    (success, message)
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendFileResponse {
    pub success: bool,
    pub message: Option<String>,
    pub file_name: Option<String>,
    pub file_id: Option<String>,
}

impl FromRaw for SendFileResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        let (success, message) = outcome(fields, false);
        Ok(Self {
            success,
            message,
            file_name: fields.text("file_name"),
            file_id: fields.text("file_id"),
        })
    }
}

/// Processing state of a submitted file.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStatusResponse {
    pub success: bool,
    pub message: Option<String>,
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub upload_date: Option<NaiveDateTime>,
    pub file_status: Option<String>,
    pub complete_percentage: Option<String>,
    pub error_reason: Option<String>,
    pub return_url: Option<String>,
}

impl FromRaw for FileStatusResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        let (success, message) = outcome(fields, false);
        Ok(Self {
            success,
            message,
            file_id: fields.text("file_id"),
            file_name: fields.text("file_name"),
            upload_date: fields.datetime("upload_date", DateTimeFormat::IsoUtc)?,
            file_status: fields.text("file_status"),
            complete_percentage: fields.text("complete_percentage"),
            error_reason: fields.text("error_reason"),
            return_url: fields.text("return_url"),
        })
    }
}

/// Outcome of a results download.
///
/// A JSON reply from the service means nothing was downloaded and carries
/// the reason in `message`. Binary replies are written locally and the
/// response only records the destination.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFileResponse {
    pub success: bool,
    pub message: Option<String>,
    pub local_file_path: Option<PathBuf>,
}

impl GetFileResponse {
    pub(crate) fn downloaded(local_file_path: PathBuf) -> Self {
        Self {
            success: true,
            message: None,
            local_file_path: Some(local_file_path),
        }
    }
}

impl FromRaw for GetFileResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        let (success, message) = outcome(fields, true);
        Ok(Self {
            success,
            message,
            local_file_path: fields.text("local_file_path").map(PathBuf::from),
        })
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: Option<String>,
    pub file_name: Option<String>,
    pub file_id: Option<String>,
}

impl FromRaw for DeleteFileResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        let (success, message) = outcome(fields, false);
        Ok(Self {
            success,
            message,
            file_name: fields.text("file_name"),
            file_id: fields.text("file_id"),
        })
    }
}
