// src/forms/bank_connection.rs

use crate::domain::{BankType, NewBankConnection};
use crate::forms::{field, FieldErrors};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankConnectionForm {
    pub bank_type: String,
    pub redirect_url: String,
}

impl BankConnectionForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            bank_type: field(params, "bankType"),
            redirect_url: field(params, "redirectUrl"),
        }
    }

    pub fn validate(&self) -> Result<NewBankConnection, FieldErrors> {
        let mut errors = FieldErrors::new();

        let bank_type = BankType::from_code(&self.bank_type);
        if bank_type.is_none() {
            errors.add("bankType", "Выберите банк");
        }

        match Url::parse(&self.redirect_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
            _ => errors.add("redirectUrl", "Укажите полный адрес, начиная с https://"),
        }

        match bank_type {
            Some(bank_type) if errors.is_empty() => Ok(NewBankConnection {
                bank_type,
                redirect_url: self.redirect_url.clone(),
            }),
            _ => Err(errors),
        }
    }
}
