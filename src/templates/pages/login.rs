// src/templates/pages/login.rs
use crate::forms::FieldErrors;
use crate::templates::components::{alert, text_field};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn login_page(email: &str, errors: &FieldErrors, failure: Option<&str>) -> Markup {
    desktop_layout(
        "Вход",
        None,
        html! {
            main class="container narrow" {
                h1 { "Вход в кабинет" }
                @if let Some(message) = failure {
                    (alert(message))
                }
                form method="post" action="/login" class="stack" novalidate {
                    (text_field("Email", "email", "email", email, errors))
                    (text_field("Пароль", "password", "password", "", errors))
                    button type="submit" class="primary" { "Войти" }
                }
                p class="microcopy" {
                    "Нет аккаунта? " a href="/register" { "Зарегистрировать компанию" }
                }
            }
        },
    )
}
