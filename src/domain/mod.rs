pub mod application;
pub mod bank;
pub mod merchant;
pub mod outlet;

pub use application::{ApplicationQuery, ApplicationRecord, ApplicationSortKey};
pub use bank::{ApplicationLink, BankConnection, BankType, NewBankConnection, PublicBankOffer};
pub use merchant::{MerchantFilter, MerchantQuery, MerchantRecord, MerchantSortKey, MerchantStatus};
pub use outlet::{application_link, Outlet, OutletLink};

/// Direction of a table sort, as carried in `?dir=` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply the direction to an ascending comparison.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Case-insensitive substring match used by table search boxes.
pub(crate) fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
}
