// src/templates/pages/public.rs
//! Pages seen by end customers, without a dashboard session.

use crate::domain::PublicBankOffer;
use crate::templates::components::{alert, format_tenge};
use crate::templates::desktop_layout;
use maud::{html, Markup};
use url::Url;

/// `apply_url` is the outlet's application link the button submits to.
pub fn public_offers_page(offers: &[PublicBankOffer], apply_url: &Url) -> Markup {
    desktop_layout(
        "Рассрочка",
        None,
        html! {
            main class="container narrow" {
                h1 { "Покупка в рассрочку" }

                @if offers.is_empty() {
                    p class="empty" { "У магазина пока нет доступных предложений" }
                } @else {
                    ul class="offers" {
                        @for offer in offers {
                            li class="offer" data-bank=(offer.bank_type.code()) {
                                h3 { (offer.title()) }
                                p {
                                    "От " (format_tenge(offer.min_amount))
                                    " до " (format_tenge(offer.max_amount))
                                }
                                @if !offer.terms_months.is_empty() {
                                    p class="terms" {
                                        "Сроки: "
                                        @for (i, months) in offer.terms_months.iter().enumerate() {
                                            @if i > 0 { ", " }
                                            (months)
                                        }
                                        " мес."
                                    }
                                }
                            }
                        }
                    }
                    form method="get" action=(apply_url.as_str()) {
                        button type="submit" class="primary" { "Оформить заявку" }
                    }
                }
            }
        },
    )
}

pub fn merchant_not_found_page(merchant_slug: &str) -> Markup {
    desktop_layout(
        "Магазин не найден",
        None,
        html! {
            main class="container narrow" id="merchant-not-found" {
                h1 { "Магазин не найден" }
                p { "Ссылка " code { (merchant_slug) } " не принадлежит ни одному магазину. Проверьте QR-код или адрес." }
            }
        },
    )
}

pub fn offers_unavailable_page(message: &str) -> Markup {
    desktop_layout(
        "Рассрочка",
        None,
        html! {
            main class="container narrow" id="offers-unavailable" {
                h1 { "Предложения банков недоступны" }
                (alert(message))
            }
        },
    )
}

/// Shown once automatic attempts are used up; the link retries by hand.
pub fn apply_failed_page(retry_url: &Url, message: &str) -> Markup {
    desktop_layout(
        "Не удалось оформить заявку",
        None,
        html! {
            main class="container narrow" {
                h1 { "Не удалось оформить заявку" }
                (alert(message))
                a href=(retry_url.as_str()) class="button primary" id="retry" {
                    "Повторить попытку"
                }
            }
        },
    )
}
