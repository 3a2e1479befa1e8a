// src/forms/registration.rs

use crate::forms::{field, looks_like_email, FieldErrors};
use serde::Serialize;
use std::collections::HashMap;

pub const BIN_LENGTH: usize = 12;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw merchant registration input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub company_name: String,
    pub bin: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub password: String,
    pub password_confirm: String,
}

/// Validated body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub company_name: String,
    pub bin: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            company_name: field(params, "companyName"),
            bin: field(params, "bin"),
            email: field(params, "email"),
            phone: field(params, "phone"),
            city: field(params, "city"),
            // passwords are taken verbatim
            password: params.get("password").cloned().unwrap_or_default(),
            password_confirm: params.get("passwordConfirm").cloned().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<RegistrationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.company_name.trim().is_empty() {
            errors.add("companyName", "Укажите название компании");
        }

        let bin = self.bin.trim();
        if bin.is_empty() {
            errors.add("bin", "Укажите БИН");
        } else if !bin.chars().all(|c| c.is_ascii_digit()) {
            errors.add("bin", "БИН должен состоять только из цифр");
        } else if bin.len() != BIN_LENGTH {
            errors.add("bin", format!("БИН должен содержать {BIN_LENGTH} цифр"));
        }

        let email = self.email.trim().to_lowercase();
        if !looks_like_email(&email) {
            errors.add("email", "Некорректный email");
        }

        let phone = normalize_phone(&self.phone);
        if phone.is_none() {
            errors.add("phone", "Телефон в формате +7 XXX XXX XX XX");
        }

        if self.city.trim().is_empty() {
            errors.add("city", "Укажите город");
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("Пароль должен быть не короче {MIN_PASSWORD_LENGTH} символов"),
            );
        }
        if self.password != self.password_confirm {
            errors.add("passwordConfirm", "Пароли не совпадают");
        }

        errors.into_result(RegistrationRequest {
            company_name: self.company_name.trim().to_string(),
            bin: bin.to_string(),
            email,
            phone: phone.unwrap_or_default(),
            city: self.city.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Normalize a Kazakhstan mobile number to `+7XXXXXXXXXX`.
/// Accepts `+7`, `7` or `8` prefixes and ignores spaces, dashes and brackets.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) || digits.len() != 11 {
        return None;
    }

    match digits.as_bytes()[0] {
        b'7' | b'8' => Some(format!("+7{}", &digits[1..])),
        _ => None,
    }
}
