// src/domain/bank.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Partner banks a merchant can connect. String forms follow the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankType {
    Halyk,
    Freedom,
    HomeCredit,
    Eurasian,
    Bcc,
    Forte,
    Jusan,
}

impl BankType {
    pub const ALL: [BankType; 7] = [
        BankType::Halyk,
        BankType::Freedom,
        BankType::HomeCredit,
        BankType::Eurasian,
        BankType::Bcc,
        BankType::Forte,
        BankType::Jusan,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            BankType::Halyk => "HALYK",
            BankType::Freedom => "FREEDOM",
            BankType::HomeCredit => "HOME_CREDIT",
            BankType::Eurasian => "EURASIAN",
            BankType::Bcc => "BCC",
            BankType::Forte => "FORTE",
            BankType::Jusan => "JUSAN",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            BankType::Halyk => "Halyk Bank",
            BankType::Freedom => "Freedom Bank",
            BankType::HomeCredit => "Home Credit Bank",
            BankType::Eurasian => "Евразийский банк",
            BankType::Bcc => "Банк ЦентрКредит",
            BankType::Forte => "ForteBank",
            BankType::Jusan => "Jusan Bank",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        BankType::ALL.into_iter().find(|bank| bank.code() == code)
    }
}

/// Merchant-to-bank integration (`GET /merchant/banks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankConnection {
    pub id: i64,
    pub bank_type: BankType,
    pub redirect_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /merchant/banks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankConnection {
    pub bank_type: BankType,
    pub redirect_url: String,
}

/// Financing offer shown to end customers on a merchant's public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBankOffer {
    pub bank_type: BankType,
    #[serde(default)]
    pub title: Option<String>,
    pub min_amount: i64,
    pub max_amount: i64,
    #[serde(default)]
    pub terms_months: Vec<u8>,
}

impl PublicBankOffer {
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or_else(|| self.bank_type.display_name())
    }
}

/// Response of the application-link call; the customer is bounced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLink {
    pub redirect_url: String,
}
