// src/templates/pages/register.rs
use crate::forms::{FieldErrors, RegistrationForm};
use crate::templates::components::{alert, text_field};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn register_page(form: &RegistrationForm, errors: &FieldErrors, failure: Option<&str>) -> Markup {
    desktop_layout(
        "Регистрация",
        None,
        html! {
            main class="container narrow" {
                h1 { "Регистрация мерчанта" }
                @if let Some(message) = failure {
                    (alert(message))
                }
                form method="post" action="/register" class="stack" novalidate {
                    (text_field("Название компании", "companyName", "text", &form.company_name, errors))
                    (text_field("БИН", "bin", "text", &form.bin, errors))
                    (text_field("Email", "email", "email", &form.email, errors))
                    (text_field("Телефон", "phone", "tel", &form.phone, errors))
                    (text_field("Город", "city", "text", &form.city, errors))
                    (text_field("Пароль", "password", "password", "", errors))
                    (text_field("Повторите пароль", "passwordConfirm", "password", "", errors))
                    button type="submit" class="primary" { "Зарегистрироваться" }
                }
            }
        },
    )
}

pub fn register_done_page(email: &str) -> Markup {
    desktop_layout(
        "Заявка принята",
        None,
        html! {
            main class="container narrow" {
                h1 { "Заявка на регистрацию принята" }
                p { "Мы проверим данные компании и отправим письмо на " strong { (email) } "." }
                p { a href="/login" { "Перейти ко входу" } }
            }
        },
    )
}
