// src/templates/components/mod.rs
use crate::forms::FieldErrors;
use maud::{html, Markup};

pub mod error;
pub mod status;

pub use error::error_page;
pub use status::status_badge;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Inline message for a failed action, shown above the form or table.
pub fn alert(message: &str) -> Markup {
    html! {
        div class="alert alert-error" role="alert" { (message) }
    }
}

pub fn field_error(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="field-error" data-field=(field) { (message) }
        }
    }
}

/// Labelled input with its validation message underneath.
pub fn text_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FieldErrors,
) -> Markup {
    let invalid = errors.get(name).is_some();
    html! {
        div class="field" {
            label for=(name) { (label) }
            input
                type=(input_type)
                id=(name)
                name=(name)
                value=(value)
                class=[invalid.then_some("invalid")]
                aria-invalid=[invalid.then_some("true")];
            (field_error(errors, name))
        }
    }
}

/// `1234567` -> `1 234 567 ₸`
pub fn format_tenge(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped} ₸")
}
