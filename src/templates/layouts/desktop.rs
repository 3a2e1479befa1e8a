// src/templates/layouts/desktop.rs
use crate::auth::{Role, Session};
use maud::{html, Markup, DOCTYPE};

fn nav_links(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Merchant => &[
            ("/applications", "Заявки"),
            ("/banks", "Банки"),
            ("/outlets", "Точки продаж"),
        ],
        Role::Bank => &[("/applications", "Заявки")],
        Role::Admin => &[("/applications", "Заявки"), ("/admin/merchants", "Мерчанты")],
    }
}

pub fn desktop_layout(title: &str, session: Option<&Session>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · BNPL" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" { "BNPL" }
                    @if let Some(session) = session {
                        nav {
                            ul {
                                @for (href, label) in nav_links(session.role) {
                                    li { a href=(href) { (label) } }
                                }
                            }
                        }
                        div class="account" {
                            span class="account-email" { (session.email) }
                            " · "
                            span class="account-role" { (session.role.label()) }
                            form method="post" action="/logout" class="inline" {
                                button type="submit" class="link" { "Выйти" }
                            }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium" { "Войти" }
                    }
                }
                (content)
            }
        }
    }
}
