// src/status/mod.rs
//! Application lifecycle statuses as reported by the BNPL backend, plus the
//! registry that turns them into labels, colors, ordering and buckets.

pub mod classify;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use classify::{classify, StatusBucket, StatusClassification};
pub use registry::{
    color_classes_of, label_of, order_of, sort_by_order, ColorClasses, ColorName, StatusDisplay,
};

/// Lifecycle state of a financing application. The string forms are fixed by
/// the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Created,
    InProgress,
    StatementUploaded,
    StatementSentToBank,
    StatementVerifiedOk,
    StatementVerifiedFail,
    AgreementOtpSent,
    AgreementSigned,
    ApplicationSentToBank,
    BankApproved,
    BankRejected,
    BankOtherResponse,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 12] = [
        ApplicationStatus::Created,
        ApplicationStatus::InProgress,
        ApplicationStatus::StatementUploaded,
        ApplicationStatus::StatementSentToBank,
        ApplicationStatus::StatementVerifiedOk,
        ApplicationStatus::StatementVerifiedFail,
        ApplicationStatus::AgreementOtpSent,
        ApplicationStatus::AgreementSigned,
        ApplicationStatus::ApplicationSentToBank,
        ApplicationStatus::BankApproved,
        ApplicationStatus::BankRejected,
        ApplicationStatus::BankOtherResponse,
    ];

    /// The successful path an application walks from creation to approval.
    pub const HAPPY_PATH: [ApplicationStatus; 9] = [
        ApplicationStatus::Created,
        ApplicationStatus::InProgress,
        ApplicationStatus::StatementUploaded,
        ApplicationStatus::StatementSentToBank,
        ApplicationStatus::StatementVerifiedOk,
        ApplicationStatus::AgreementOtpSent,
        ApplicationStatus::AgreementSigned,
        ApplicationStatus::ApplicationSentToBank,
        ApplicationStatus::BankApproved,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ApplicationStatus::Created => "CREATED",
            ApplicationStatus::InProgress => "IN_PROGRESS",
            ApplicationStatus::StatementUploaded => "STATEMENT_UPLOADED",
            ApplicationStatus::StatementSentToBank => "STATEMENT_SENT_TO_BANK",
            ApplicationStatus::StatementVerifiedOk => "STATEMENT_VERIFIED_OK",
            ApplicationStatus::StatementVerifiedFail => "STATEMENT_VERIFIED_FAIL",
            ApplicationStatus::AgreementOtpSent => "AGREEMENT_OTP_SENT",
            ApplicationStatus::AgreementSigned => "AGREEMENT_SIGNED",
            ApplicationStatus::ApplicationSentToBank => "APPLICATION_SENT_TO_BANK",
            ApplicationStatus::BankApproved => "BANK_APPROVED",
            ApplicationStatus::BankRejected => "BANK_REJECTED",
            ApplicationStatus::BankOtherResponse => "BANK_OTHER_RESPONSE",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ApplicationStatus {
    type Err = StatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.code() == raw)
            .ok_or_else(|| StatusError::Unknown(raw.to_string()))
    }
}

/// A status exactly as it arrived over the wire. Codes outside the contract
/// are kept verbatim so they can be logged and rendered as "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportedStatus {
    Known(ApplicationStatus),
    Unknown(String),
}

impl ReportedStatus {
    pub fn known(&self) -> Option<ApplicationStatus> {
        match self {
            ReportedStatus::Known(status) => Some(*status),
            ReportedStatus::Unknown(_) => None,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            ReportedStatus::Known(status) => status.code(),
            ReportedStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ReportedStatus {
    fn from(raw: String) -> Self {
        match raw.parse::<ApplicationStatus>() {
            Ok(status) => ReportedStatus::Known(status),
            Err(_) => ReportedStatus::Unknown(raw),
        }
    }
}

impl From<ReportedStatus> for String {
    fn from(status: ReportedStatus) -> Self {
        match status {
            ReportedStatus::Known(status) => status.code().to_string(),
            ReportedStatus::Unknown(raw) => raw,
        }
    }
}

impl From<ApplicationStatus> for ReportedStatus {
    fn from(status: ApplicationStatus) -> Self {
        ReportedStatus::Known(status)
    }
}

/// Contract violations detected while interpreting a status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("unknown application status '{0}'")]
    Unknown(String),
    #[error("status {0} is not assigned to any bucket")]
    Unclassified(ApplicationStatus),
    #[error("status {0} is assigned to more than one bucket")]
    Ambiguous(ApplicationStatus),
}
