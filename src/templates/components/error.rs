// src/templates/components/error.rs
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Ошибка {status}"),
        None,
        html! {
            main class="container narrow" {
                h1 { "Ошибка " (status) }
                p { (message) }
                p { a href="/" { "← На главную" } }
            }
        },
    )
}
