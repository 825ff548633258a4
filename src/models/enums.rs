use std::fmt;

use phf::phf_map;

use crate::normalize::KnownValue;

/// Overall verdict of an email validation.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidateStatus {
    Valid,
    Invalid,
    #[cfg_attr(feature = "with-serde", serde(rename = "catch-all"))]
    CatchAll,
    Unknown,
    Spamtrap,
    Abuse,
    DoNotMail,
}

static VALIDATE_STATUS: phf::Map<&'static str, ValidateStatus> = phf_map! {
    "valid" => ValidateStatus::Valid,
    "invalid" => ValidateStatus::Invalid,
    "catch-all" => ValidateStatus::CatchAll,
    "unknown" => ValidateStatus::Unknown,
    "spamtrap" => ValidateStatus::Spamtrap,
    "abuse" => ValidateStatus::Abuse,
    "do_not_mail" => ValidateStatus::DoNotMail,
};

impl KnownValue for ValidateStatus {
    const KIND: &'static str = "status";

    fn lookup(wire: &str) -> Option<Self> {
        VALIDATE_STATUS.get(wire).copied()
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::CatchAll => "catch-all",
            Self::Unknown => "unknown",
            Self::Spamtrap => "spamtrap",
            Self::Abuse => "abuse",
            Self::DoNotMail => "do_not_mail",
        }
    }
}

/// Detail explaining a [`ValidateStatus`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidateSubStatus {
    AntispamSystem,
    Greylisted,
    MailServerTemporaryError,
    ForcibleDisconnect,
    MailServerDidNotRespond,
    TimeoutExceeded,
    FailedSmtpConnection,
    MailboxQuotaExceeded,
    ExceptionOccurred,
    PossibleTrap,
    RoleBased,
    GlobalSuppression,
    MailboxNotFound,
    NoDnsEntries,
    FailedSyntaxCheck,
    PossibleTypo,
    UnroutableIpAddress,
    LeadingPeriodRemoved,
    DoesNotAcceptMail,
    AliasAddress,
    RoleBasedCatchAll,
    Disposable,
    Toxic,
    Alternate,
    MxForward,
    Blocked,
    Allowed,
}

static VALIDATE_SUB_STATUS: phf::Map<&'static str, ValidateSubStatus> = phf_map! {
    "antispam_system" => ValidateSubStatus::AntispamSystem,
    "greylisted" => ValidateSubStatus::Greylisted,
    "mail_server_temporary_error" => ValidateSubStatus::MailServerTemporaryError,
    "forcible_disconnect" => ValidateSubStatus::ForcibleDisconnect,
    "mail_server_did_not_respond" => ValidateSubStatus::MailServerDidNotRespond,
    "timeout_exceeded" => ValidateSubStatus::TimeoutExceeded,
    "failed_smtp_connection" => ValidateSubStatus::FailedSmtpConnection,
    "mailbox_quota_exceeded" => ValidateSubStatus::MailboxQuotaExceeded,
    "exception_occurred" => ValidateSubStatus::ExceptionOccurred,
    "possible_trap" => ValidateSubStatus::PossibleTrap,
    "role_based" => ValidateSubStatus::RoleBased,
    "global_suppression" => ValidateSubStatus::GlobalSuppression,
    "mailbox_not_found" => ValidateSubStatus::MailboxNotFound,
    "no_dns_entries" => ValidateSubStatus::NoDnsEntries,
    "failed_syntax_check" => ValidateSubStatus::FailedSyntaxCheck,
    "possible_typo" => ValidateSubStatus::PossibleTypo,
    "unroutable_ip_address" => ValidateSubStatus::UnroutableIpAddress,
    "leading_period_removed" => ValidateSubStatus::LeadingPeriodRemoved,
    "does_not_accept_mail" => ValidateSubStatus::DoesNotAcceptMail,
    "alias_address" => ValidateSubStatus::AliasAddress,
    "role_based_catch_all" => ValidateSubStatus::RoleBasedCatchAll,
    "disposable" => ValidateSubStatus::Disposable,
    "toxic" => ValidateSubStatus::Toxic,
    "alternate" => ValidateSubStatus::Alternate,
    "mx_forward" => ValidateSubStatus::MxForward,
    "blocked" => ValidateSubStatus::Blocked,
    "allowed" => ValidateSubStatus::Allowed,
};

impl KnownValue for ValidateSubStatus {
    const KIND: &'static str = "sub_status";

    fn lookup(wire: &str) -> Option<Self> {
        VALIDATE_SUB_STATUS.get(wire).copied()
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::AntispamSystem => "antispam_system",
            Self::Greylisted => "greylisted",
            Self::MailServerTemporaryError => "mail_server_temporary_error",
            Self::ForcibleDisconnect => "forcible_disconnect",
            Self::MailServerDidNotRespond => "mail_server_did_not_respond",
            Self::TimeoutExceeded => "timeout_exceeded",
            Self::FailedSmtpConnection => "failed_smtp_connection",
            Self::MailboxQuotaExceeded => "mailbox_quota_exceeded",
            Self::ExceptionOccurred => "exception_occurred",
            Self::PossibleTrap => "possible_trap",
            Self::RoleBased => "role_based",
            Self::GlobalSuppression => "global_suppression",
            Self::MailboxNotFound => "mailbox_not_found",
            Self::NoDnsEntries => "no_dns_entries",
            Self::FailedSyntaxCheck => "failed_syntax_check",
            Self::PossibleTypo => "possible_typo",
            Self::UnroutableIpAddress => "unroutable_ip_address",
            Self::LeadingPeriodRemoved => "leading_period_removed",
            Self::DoesNotAcceptMail => "does_not_accept_mail",
            Self::AliasAddress => "alias_address",
            Self::RoleBasedCatchAll => "role_based_catch_all",
            Self::Disposable => "disposable",
            Self::Toxic => "toxic",
            Self::Alternate => "alternate",
            Self::MxForward => "mx_forward",
            Self::Blocked => "blocked",
            Self::Allowed => "allowed",
        }
    }
}

/// Confidence attached to a guessed email format.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    High,
    Medium,
    Low,
    Unknown,
    Undetermined,
}

static CONFIDENCE: phf::Map<&'static str, Confidence> = phf_map! {
    "high" => Confidence::High,
    "medium" => Confidence::Medium,
    "low" => Confidence::Low,
    "unknown" => Confidence::Unknown,
    "undetermined" => Confidence::Undetermined,
};

impl KnownValue for Confidence {
    const KIND: &'static str = "confidence";

    fn lookup(wire: &str) -> Option<Self> {
        CONFIDENCE.get(wire).copied()
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
            Self::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for ValidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ValidateSubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
