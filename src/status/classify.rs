// src/status/classify.rs
use super::{ApplicationStatus, StatusError};
use serde::{Deserialize, Serialize};

/// Coarse grouping the dashboard uses for tabs, counters and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Initial,
    Processing,
    AwaitingUserAction,
    Completed,
    Rejected,
}

impl StatusBucket {
    pub const ALL: [StatusBucket; 5] = [
        StatusBucket::Initial,
        StatusBucket::Processing,
        StatusBucket::AwaitingUserAction,
        StatusBucket::Completed,
        StatusBucket::Rejected,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            StatusBucket::Initial => "initial",
            StatusBucket::Processing => "processing",
            StatusBucket::AwaitingUserAction => "awaiting",
            StatusBucket::Completed => "completed",
            StatusBucket::Rejected => "rejected",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            StatusBucket::Initial => "Новые",
            StatusBucket::Processing => "В обработке",
            StatusBucket::AwaitingUserAction => "Ожидают клиента",
            StatusBucket::Completed => "Одобренные",
            StatusBucket::Rejected => "Отклонённые",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        StatusBucket::ALL.into_iter().find(|bucket| bucket.key() == key)
    }
}

use ApplicationStatus as S;

/// Bucket membership. Every status must appear in exactly one row.
const BUCKETS: [(StatusBucket, &[ApplicationStatus]); 5] = [
    (StatusBucket::Initial, &[S::Created]),
    (
        StatusBucket::Processing,
        &[
            S::InProgress,
            S::StatementUploaded,
            S::StatementSentToBank,
            S::StatementVerifiedOk,
            S::AgreementSigned,
            S::ApplicationSentToBank,
        ],
    ),
    (
        StatusBucket::AwaitingUserAction,
        &[S::AgreementOtpSent, S::BankOtherResponse],
    ),
    (StatusBucket::Completed, &[S::BankApproved]),
    (
        StatusBucket::Rejected,
        &[S::StatementVerifiedFail, S::BankRejected],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusClassification {
    pub is_initial: bool,
    pub is_processing: bool,
    pub is_completed: bool,
    pub is_rejected: bool,
    pub is_awaiting_user_action: bool,
}

impl StatusClassification {
    fn from_bucket(bucket: StatusBucket) -> Self {
        let mut flags = Self::default();
        match bucket {
            StatusBucket::Initial => flags.is_initial = true,
            StatusBucket::Processing => flags.is_processing = true,
            StatusBucket::AwaitingUserAction => flags.is_awaiting_user_action = true,
            StatusBucket::Completed => flags.is_completed = true,
            StatusBucket::Rejected => flags.is_rejected = true,
        }
        flags
    }

    /// The single bucket whose flag is set; `None` when zero or several are.
    pub fn bucket(&self) -> Option<StatusBucket> {
        if self.set_flags() != 1 {
            return None;
        }
        if self.is_initial {
            Some(StatusBucket::Initial)
        } else if self.is_processing {
            Some(StatusBucket::Processing)
        } else if self.is_awaiting_user_action {
            Some(StatusBucket::AwaitingUserAction)
        } else if self.is_completed {
            Some(StatusBucket::Completed)
        } else {
            Some(StatusBucket::Rejected)
        }
    }

    pub fn set_flags(&self) -> usize {
        [
            self.is_initial,
            self.is_processing,
            self.is_completed,
            self.is_rejected,
            self.is_awaiting_user_action,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

pub fn classify(status: ApplicationStatus) -> Result<StatusClassification, StatusError> {
    classify_in(&BUCKETS, status)
}

fn classify_in(
    table: &[(StatusBucket, &[ApplicationStatus])],
    status: ApplicationStatus,
) -> Result<StatusClassification, StatusError> {
    let mut found = table
        .iter()
        .filter(|(_, members)| members.contains(&status))
        .map(|(bucket, _)| *bucket);

    match (found.next(), found.next()) {
        (Some(bucket), None) => Ok(StatusClassification::from_bucket(bucket)),
        (None, _) => Err(StatusError::Unclassified(status)),
        (Some(_), Some(_)) => Err(StatusError::Ambiguous(status)),
    }
}
