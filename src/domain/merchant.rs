// src/domain/merchant.rs

use crate::domain::{matches_search, SortDirection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantStatus {
    Active,
    Pending,
    Inactive,
    Blocked,
}

impl MerchantStatus {
    pub const ALL: [MerchantStatus; 4] = [
        MerchantStatus::Active,
        MerchantStatus::Pending,
        MerchantStatus::Inactive,
        MerchantStatus::Blocked,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            MerchantStatus::Active => "active",
            MerchantStatus::Pending => "pending",
            MerchantStatus::Inactive => "inactive",
            MerchantStatus::Blocked => "blocked",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MerchantStatus::Active => "Активен",
            MerchantStatus::Pending => "На проверке",
            MerchantStatus::Inactive => "Неактивен",
            MerchantStatus::Blocked => "Заблокирован",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        MerchantStatus::ALL.into_iter().find(|status| status.key() == key)
    }
}

/// Merchant row of the back-office table (`GET /admin/merchants`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub bin: String,
    pub city: String,
    pub status: MerchantStatus,
    pub total_applications: u32,
    pub approved_applications: u32,
    pub registered_at: NaiveDate,
}

impl MerchantRecord {
    /// Approved share in percent, 0 when there are no applications yet.
    pub fn approval_rate(&self) -> u32 {
        if self.total_applications == 0 {
            return 0;
        }
        let rate = u64::from(self.approved_applications) * 100 / u64::from(self.total_applications);
        u32::try_from(rate).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MerchantFilter {
    pub status: Option<MerchantStatus>,
    pub city: Option<String>,
    pub search: String,
}

impl MerchantFilter {
    pub fn matches(&self, merchant: &MerchantRecord) -> bool {
        if let Some(status) = self.status {
            if merchant.status != status {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if merchant.city.to_lowercase() != city.trim().to_lowercase() {
                return false;
            }
        }
        matches_search(
            &self.search,
            &[
                merchant.name.as_str(),
                merchant.bin.as_str(),
                merchant.slug.as_str(),
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MerchantSortKey {
    #[default]
    TotalApplications,
    ApprovalRate,
    Name,
    RegisteredAt,
}

impl MerchantSortKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "totalApplications" => Some(MerchantSortKey::TotalApplications),
            "approvalRate" => Some(MerchantSortKey::ApprovalRate),
            "name" => Some(MerchantSortKey::Name),
            "registeredAt" => Some(MerchantSortKey::RegisteredAt),
            _ => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            MerchantSortKey::TotalApplications => "totalApplications",
            MerchantSortKey::ApprovalRate => "approvalRate",
            MerchantSortKey::Name => "name",
            MerchantSortKey::RegisteredAt => "registeredAt",
        }
    }
}

/// Filter + sort state of the merchants table. Defaults to busiest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MerchantQuery {
    pub filter: MerchantFilter,
    pub sort: MerchantSortKey,
    pub direction: SortDirection,
}

impl MerchantQuery {
    /// Read `?status=&city=&q=&sort=&dir=`. Empty values mean "any".
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            params
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        Self {
            filter: MerchantFilter {
                status: non_empty("status").and_then(MerchantStatus::from_key),
                city: non_empty("city").map(str::to_string),
                search: non_empty("q").unwrap_or_default().to_string(),
            },
            sort: non_empty("sort")
                .and_then(MerchantSortKey::from_key)
                .unwrap_or_default(),
            direction: non_empty("dir")
                .and_then(SortDirection::from_key)
                .unwrap_or_default(),
        }
    }

    pub fn apply(&self, merchants: &[MerchantRecord]) -> Vec<MerchantRecord> {
        let mut rows: Vec<MerchantRecord> = merchants
            .iter()
            .filter(|merchant| self.filter.matches(merchant))
            .cloned()
            .collect();

        let direction = self.direction;
        match self.sort {
            MerchantSortKey::TotalApplications => rows.sort_by(|a, b| {
                direction.apply(a.total_applications.cmp(&b.total_applications))
            }),
            MerchantSortKey::ApprovalRate => {
                rows.sort_by(|a, b| direction.apply(a.approval_rate().cmp(&b.approval_rate())))
            }
            MerchantSortKey::Name => rows.sort_by(|a, b| {
                direction.apply(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
            MerchantSortKey::RegisteredAt => {
                rows.sort_by(|a, b| direction.apply(a.registered_at.cmp(&b.registered_at)))
            }
        }

        rows
    }
}

/// Distinct cities for the filter dropdown, alphabetically.
pub fn cities(merchants: &[MerchantRecord]) -> Vec<String> {
    merchants
        .iter()
        .map(|merchant| merchant.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
