// src/templates/pages/applications.rs
use crate::auth::Session;
use crate::domain::{ApplicationQuery, ApplicationRecord, ApplicationSortKey, SortDirection};
use crate::status::StatusBucket;
use crate::templates::components::{alert, format_tenge, status_badge};
use crate::templates::desktop_layout;
use crate::templates::pages::query_string;
use maud::{html, Markup};

pub struct ApplicationsVm {
    pub query: ApplicationQuery,
    pub rows: Vec<ApplicationRecord>,
    pub counts: Vec<(StatusBucket, usize)>,
    pub total: usize,
    pub failure: Option<String>,
}

fn tab_href(query: &ApplicationQuery, bucket: Option<StatusBucket>) -> String {
    format!(
        "/applications{}",
        query_string(&[
            ("bucket", bucket.map(StatusBucket::key).unwrap_or_default()),
            ("q", query.search.as_str()),
            ("sort", query.sort.key()),
            ("dir", query.direction.key()),
        ])
    )
}

fn sort_href(query: &ApplicationQuery, key: ApplicationSortKey) -> String {
    let direction = if query.sort == key {
        query.direction.flipped()
    } else {
        SortDirection::Desc
    };
    format!(
        "/applications{}",
        query_string(&[
            ("bucket", query.bucket.map(StatusBucket::key).unwrap_or_default()),
            ("q", query.search.as_str()),
            ("sort", key.key()),
            ("dir", direction.key()),
        ])
    )
}

fn sort_header(query: &ApplicationQuery, key: ApplicationSortKey, label: &str) -> Markup {
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

pub fn applications_page(session: &Session, vm: &ApplicationsVm) -> Markup {
    let query = &vm.query;
    desktop_layout(
        "Заявки",
        Some(session),
        html! {
            main class="container" {
                h1 { "Заявки" }

                nav class="tabs" aria-label="Статусы" {
                    a href=(tab_href(query, None))
                        class=[query.bucket.is_none().then_some("active")]
                        data-bucket="all"
                    {
                        "Все " span class="count" { (vm.total) }
                    }
                    @for (bucket, count) in &vm.counts {
                        a href=(tab_href(query, Some(*bucket)))
                            class=[(query.bucket == Some(*bucket)).then_some("active")]
                            data-bucket=(bucket.key())
                        {
                            (bucket.title()) " " span class="count" { (count) }
                        }
                    }
                }

                form method="get" action="/applications" class="filters" {
                    @if let Some(bucket) = query.bucket {
                        input type="hidden" name="bucket" value=(bucket.key());
                    }
                    input type="hidden" name="sort" value=(query.sort.key());
                    input type="hidden" name="dir" value=(query.direction.key());
                    input type="search" name="q" value=(query.search) placeholder="Поиск по клиенту или номеру";
                    button type="submit" { "Найти" }
                }

                @if let Some(message) = &vm.failure {
                    (alert(message))
                }

                @if vm.rows.is_empty() && vm.failure.is_none() {
                    p class="empty" { "Заявок не найдено" }
                } @else if !vm.rows.is_empty() {
                    table class="table" id="applications" {
                        thead {
                            tr {
                                th { "№" }
                                th { "Клиент" }
                                (sort_header(query, ApplicationSortKey::Amount, "Сумма"))
                                th { "Срок" }
                                th { "Банк" }
                                th { "Точка" }
                                (sort_header(query, ApplicationSortKey::Status, "Статус"))
                                (sort_header(query, ApplicationSortKey::CreatedAt, "Создана"))
                            }
                        }
                        tbody {
                            @for row in &vm.rows {
                                tr data-id=(row.id) {
                                    td { (row.id) }
                                    td {
                                        (row.customer_name)
                                        @if let Some(phone) = &row.customer_phone {
                                            br;
                                            small { (phone) }
                                        }
                                    }
                                    td class="num" { (format_tenge(row.amount)) }
                                    td {
                                        @if let Some(months) = row.term_months {
                                            (months) " мес."
                                        } @else {
                                            "—"
                                        }
                                    }
                                    td { (row.bank_type.as_deref().unwrap_or("—")) }
                                    td { (row.outlet_name.as_deref().unwrap_or("—")) }
                                    td { (status_badge(&row.status)) }
                                    td { (row.created_at.format("%d.%m.%Y %H:%M").to_string()) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
