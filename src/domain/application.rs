// src/domain/application.rs

use crate::domain::{matches_search, SortDirection};
use crate::status::{classify, order_of, ReportedStatus, StatusBucket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A financing application as listed by `GET /merchant/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Requested amount in tenge.
    pub amount: i64,
    #[serde(default)]
    pub term_months: Option<u8>,
    #[serde(default)]
    pub bank_type: Option<String>,
    #[serde(default)]
    pub outlet_name: Option<String>,
    pub status: ReportedStatus,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Bucket of the record's status; `None` for codes outside the contract.
    pub fn bucket(&self) -> Option<StatusBucket> {
        let status = self.status.known()?;
        classify(status).ok().and_then(|flags| flags.bucket())
    }

    fn status_order(&self) -> Option<u8> {
        self.status.known().map(order_of)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationSortKey {
    #[default]
    CreatedAt,
    Amount,
    Status,
}

impl ApplicationSortKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "createdAt" => Some(ApplicationSortKey::CreatedAt),
            "amount" => Some(ApplicationSortKey::Amount),
            "status" => Some(ApplicationSortKey::Status),
            _ => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            ApplicationSortKey::CreatedAt => "createdAt",
            ApplicationSortKey::Amount => "amount",
            ApplicationSortKey::Status => "status",
        }
    }
}

/// Filter and sort state of the applications table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationQuery {
    pub bucket: Option<StatusBucket>,
    pub search: String,
    pub sort: ApplicationSortKey,
    pub direction: SortDirection,
}

impl ApplicationQuery {
    /// Read `?bucket=&q=&sort=&dir=`; unrecognized values fall back to defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            bucket: params
                .get("bucket")
                .and_then(|key| StatusBucket::from_key(key)),
            search: params.get("q").cloned().unwrap_or_default(),
            sort: params
                .get("sort")
                .and_then(|key| ApplicationSortKey::from_key(key))
                .unwrap_or_default(),
            direction: params
                .get("dir")
                .and_then(|key| SortDirection::from_key(key))
                .unwrap_or_default(),
        }
    }

    pub fn apply(&self, records: &[ApplicationRecord]) -> Vec<ApplicationRecord> {
        let mut rows: Vec<ApplicationRecord> = records
            .iter()
            .filter(|record| match self.bucket {
                Some(bucket) => record.bucket() == Some(bucket),
                None => true,
            })
            .filter(|record| {
                matches_search(
                    &self.search,
                    &[
                        record.id.as_str(),
                        record.customer_name.as_str(),
                        record.customer_phone.as_deref().unwrap_or_default(),
                    ],
                )
            })
            .cloned()
            .collect();

        // sort_by is stable: ties keep the backend's order
        let direction = self.direction;
        match self.sort {
            ApplicationSortKey::CreatedAt => {
                rows.sort_by(|a, b| direction.apply(a.created_at.cmp(&b.created_at)))
            }
            ApplicationSortKey::Amount => {
                rows.sort_by(|a, b| direction.apply(a.amount.cmp(&b.amount)))
            }
            ApplicationSortKey::Status => {
                // unknown statuses stay last whatever the direction
                rows.sort_by(|a, b| match (a.status_order(), b.status_order()) {
                    (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
            }
        }

        rows
    }
}

/// Number of records per bucket, in tab order. Unknown statuses count nowhere.
pub fn bucket_counts(records: &[ApplicationRecord]) -> Vec<(StatusBucket, usize)> {
    StatusBucket::ALL
        .into_iter()
        .map(|bucket| {
            let count = records
                .iter()
                .filter(|record| record.bucket() == Some(bucket))
                .count();
            (bucket, count)
        })
        .collect()
}
