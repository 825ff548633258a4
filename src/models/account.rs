use chrono::NaiveDate;

use super::{FromRaw, reject_embedded_message};
use crate::error::Error;
use crate::normalize::{Fields, RawResponse};

/// Remaining credits. The service sends the count as text and it is kept as-is.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditsResponse {
    pub credits: String,
}

impl FromRaw for CreditsResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        reject_embedded_message(fields)?;
        Ok(Self {
            credits: fields.required_text("Credits")?,
        })
    }
}

/// API usage counters between two dates.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiUsageResponse {
    pub total: u64,
    pub status_valid: u64,
    pub status_invalid: u64,
    pub status_catch_all: u64,
    pub status_do_not_mail: u64,
    pub status_spamtrap: u64,
    pub status_unknown: u64,
    pub sub_status_toxic: u64,
    pub sub_status_disposable: u64,
    pub sub_status_role_based: u64,
    pub sub_status_possible_trap: u64,
    pub sub_status_global_suppression: u64,
    pub sub_status_timeout_exceeded: u64,
    pub sub_status_mail_server_temporary_error: u64,
    pub sub_status_mail_server_did_not_respond: u64,
    pub sub_status_greylisted: u64,
    pub sub_status_antispam_system: u64,
    pub sub_status_does_not_accept_mail: u64,
    pub sub_status_exception_occurred: u64,
    pub sub_status_failed_syntax_check: u64,
    pub sub_status_mailbox_not_found: u64,
    pub sub_status_unroutable_ip_address: u64,
    pub sub_status_possible_typo: u64,
    pub sub_status_no_dns_entries: u64,
    pub sub_status_role_based_catch_all: u64,
    pub sub_status_mailbox_quota_exceeded: u64,
    pub sub_status_forcible_disconnect: u64,
    pub sub_status_failed_smtp_connection: u64,
    pub sub_status_mx_forward: u64,
    pub sub_status_alternate: u64,
    pub sub_status_allowed: u64,
    pub sub_status_blocked: u64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FromRaw for ApiUsageResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let f = Fields::new(raw);
        reject_embedded_message(f)?;
        Ok(Self {
            total: f.count("total"),
            status_valid: f.count("status_valid"),
            status_invalid: f.count("status_invalid"),
            status_catch_all: f.count("status_catch_all"),
            status_do_not_mail: f.count("status_do_not_mail"),
            status_spamtrap: f.count("status_spamtrap"),
            status_unknown: f.count("status_unknown"),
            sub_status_toxic: f.count("sub_status_toxic"),
            sub_status_disposable: f.count("sub_status_disposable"),
            sub_status_role_based: f.count("sub_status_role_based"),
            sub_status_possible_trap: f.count("sub_status_possible_trap"),
            sub_status_global_suppression: f.count("sub_status_global_suppression"),
            sub_status_timeout_exceeded: f.count("sub_status_timeout_exceeded"),
            sub_status_mail_server_temporary_error: f
                .count("sub_status_mail_server_temporary_error"),
            sub_status_mail_server_did_not_respond: f
                .count("sub_status_mail_server_did_not_respond"),
            sub_status_greylisted: f.count("sub_status_greylisted"),
            sub_status_antispam_system: f.count("sub_status_antispam_system"),
            sub_status_does_not_accept_mail: f.count("sub_status_does_not_accept_mail"),
            sub_status_exception_occurred: f.count("sub_status_exception_occurred"),
            sub_status_failed_syntax_check: f.count("sub_status_failed_syntax_check"),
            sub_status_mailbox_not_found: f.count("sub_status_mailbox_not_found"),
            sub_status_unroutable_ip_address: f.count("sub_status_unroutable_ip_address"),
            sub_status_possible_typo: f.count("sub_status_possible_typo"),
            sub_status_no_dns_entries: f.count("sub_status_no_dns_entries"),
            sub_status_role_based_catch_all: f.count("sub_status_role_based_catch_all"),
            sub_status_mailbox_quota_exceeded: f.count("sub_status_mailbox_quota_exceeded"),
            sub_status_forcible_disconnect: f.count("sub_status_forcible_disconnect"),
            sub_status_failed_smtp_connection: f.count("sub_status_failed_smtp_connection"),
            sub_status_mx_forward: f.count("sub_status_mx_forward"),
            sub_status_alternate: f.count("sub_status_alternate"),
            sub_status_allowed: f.count("sub_status_allowed"),
            sub_status_blocked: f.count("sub_status_blocked"),
            start_date: f.date("start_date")?,
            end_date: f.date("end_date")?,
        })
    }
}

/// Engagement data for one address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityResponse {
    pub found: bool,
    pub active_in_days: Option<String>,
}

impl FromRaw for ActivityResponse {
    fn from_raw(raw: &RawResponse) -> Result<Self, Error> {
        let fields = Fields::new(raw);
        reject_embedded_message(fields)?;
        Ok(Self {
            found: fields.flag("found").unwrap_or(false),
            active_in_days: fields.text("active_in_days"),
        })
    }
}
