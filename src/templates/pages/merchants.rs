// src/templates/pages/merchants.rs
use crate::auth::Session;
use crate::domain::{MerchantQuery, MerchantRecord, MerchantSortKey, MerchantStatus, SortDirection};
use crate::templates::components::alert;
use crate::templates::desktop_layout;
use crate::templates::pages::query_string;
use maud::{html, Markup};

pub struct MerchantsVm {
    pub query: MerchantQuery,
    pub rows: Vec<MerchantRecord>,
    pub cities: Vec<String>,
    pub failure: Option<String>,
}

fn sort_href(query: &MerchantQuery, key: MerchantSortKey) -> String {
    let direction = if query.sort == key {
        query.direction.flipped()
    } else {
        SortDirection::Desc
    };
    format!(
        "/admin/merchants{}",
        query_string(&[
            ("status", query.filter.status.map(MerchantStatus::key).unwrap_or_default()),
            ("city", query.filter.city.as_deref().unwrap_or_default()),
            ("q", query.filter.search.as_str()),
            ("sort", key.key()),
            ("dir", direction.key()),
        ])
    )
}

fn sort_header(query: &MerchantQuery, key: MerchantSortKey, label: &str) -> Markup {
    let marker = match (query.sort == key, query.direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ↑",
        (true, SortDirection::Desc) => " ↓",
    };
    html! {
        th data-sort=(key.key()) {
            a href=(sort_href(query, key)) { (label) (marker) }
        }
    }
}

pub fn merchants_page(session: &Session, vm: &MerchantsVm) -> Markup {
    let query = &vm.query;
    let selected_city = query.filter.city.as_deref().unwrap_or_default();

    desktop_layout(
        "Мерчанты",
        Some(session),
        html! {
            main class="container" {
                h1 { "Мерчанты" }

                form method="get" action="/admin/merchants" class="filters" {
                    select name="status" aria-label="Статус" {
                        option value="" selected[query.filter.status.is_none()] { "Все статусы" }
                        @for status in MerchantStatus::ALL {
                            option value=(status.key()) selected[query.filter.status == Some(status)] {
                                (status.label())
                            }
                        }
                    }
                    select name="city" aria-label="Город" {
                        option value="" selected[selected_city.is_empty()] { "Все города" }
                        @for city in &vm.cities {
                            option value=(city) selected[city.to_lowercase() == selected_city.to_lowercase()] {
                                (city)
                            }
                        }
                    }
                    input type="search" name="q" value=(query.filter.search) placeholder="Название, БИН или slug";
                    input type="hidden" name="sort" value=(query.sort.key());
                    input type="hidden" name="dir" value=(query.direction.key());
                    button type="submit" { "Применить" }
                    a href="/admin/merchants" class="reset" { "Сбросить" }
                }

                @if let Some(message) = &vm.failure {
                    (alert(message))
                }

                p class="summary" { "Найдено: " span id="merchant-count" { (vm.rows.len()) } }

                table class="table" id="merchants" {
                    thead {
                        tr {
                            (sort_header(query, MerchantSortKey::Name, "Название"))
                            th { "БИН" }
                            th { "Город" }
                            th { "Статус" }
                            (sort_header(query, MerchantSortKey::TotalApplications, "Заявок"))
                            (sort_header(query, MerchantSortKey::ApprovalRate, "Одобрено"))
                            (sort_header(query, MerchantSortKey::RegisteredAt, "Регистрация"))
                        }
                    }
                    tbody {
                        @for row in &vm.rows {
                            tr data-id=(row.id) {
                                td class="name" { (row.name) }
                                td { (row.bin) }
                                td class="city" { (row.city) }
                                td class="status" data-status=(row.status.key()) { (row.status.label()) }
                                td class="num total" { (row.total_applications) }
                                td class="num" { (row.approval_rate()) "%" }
                                td { (row.registered_at.format("%d.%m.%Y").to_string()) }
                            }
                        }
                    }
                }
            }
        },
    )
}
