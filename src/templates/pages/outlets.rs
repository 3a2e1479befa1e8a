// src/templates/pages/outlets.rs
use crate::auth::Session;
use crate::domain::OutletLink;
use crate::templates::components::alert;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn outlets_page(session: &Session, links: &[OutletLink], failure: Option<&str>) -> Markup {
    desktop_layout(
        "Точки продаж",
        Some(session),
        html! {
            main class="container" {
                h1 { "Точки продаж" }
                p class="lead" {
                    "Ссылка каждой точки ведёт покупателя на оформление рассрочки. "
                    "Её же кодирует QR-код на кассе."
                }

                @if let Some(message) = failure {
                    (alert(message))
                }

                @if links.is_empty() && failure.is_none() {
                    p class="empty" { "Точки продаж не найдены" }
                }

                ul class="outlet-links" {
                    @for link in links {
                        li data-outlet=(link.outlet.index) {
                            strong { (link.outlet.name) }
                            @if let Some(address) = &link.outlet.address {
                                " · " span class="address" { (address) }
                            }
                            br;
                            a href=(link.url.as_str()) class="outlet-url" { (link.url.as_str()) }
                        }
                    }
                }
            }
        },
    )
}
