// src/forms/login.rs

use crate::forms::{field, looks_like_email, FieldErrors};
use serde::Serialize;
use std::collections::HashMap;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            email: field(params, "email").to_lowercase(),
            password: params.get("password").cloned().unwrap_or_default(),
        }
    }

    pub fn validate(self) -> Result<LoginForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !looks_like_email(&self.email) {
            errors.add("email", "Некорректный email");
        }
        if self.password.is_empty() {
            errors.add("password", "Введите пароль");
        }
        errors.into_result(self)
    }
}
