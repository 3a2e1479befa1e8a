// src/forms/mod.rs
//! Form parsing and the validation that runs before any backend call.

pub mod bank_connection;
pub mod login;
pub mod registration;

use std::collections::{BTreeMap, HashMap};

pub use bank_connection::BankConnectionForm;
pub use login::LoginForm;
pub use registration::{RegistrationForm, RegistrationRequest};

/// Per-field validation messages, rendered next to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message per field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` body or query string.
/// Repeated keys keep the last value.
pub fn parse_urlencoded(input: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(input).into_owned().collect()
}

/// Trimmed value of a field, empty when missing.
pub(crate) fn field(params: &HashMap<String, String>, name: &str) -> String {
    params
        .get(name)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Minimal shape check; the backend does the authoritative one.
pub(crate) fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
