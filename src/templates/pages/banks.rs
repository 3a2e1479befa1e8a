// src/templates/pages/banks.rs
use crate::auth::Session;
use crate::domain::{BankConnection, BankType};
use crate::forms::{BankConnectionForm, FieldErrors};
use crate::templates::components::{alert, card, field_error, text_field};
use crate::templates::desktop_layout;
use maud::{html, Markup};

#[derive(Default)]
pub struct BanksVm {
    pub connections: Vec<BankConnection>,
    pub form: BankConnectionForm,
    pub errors: FieldErrors,
    pub failure: Option<String>,
}

pub fn banks_page(session: &Session, vm: &BanksVm) -> Markup {
    let connected: Vec<BankType> = vm.connections.iter().map(|c| c.bank_type).collect();

    desktop_layout(
        "Банки",
        Some(session),
        html! {
            main class="container" {
                h1 { "Подключённые банки" }

                @if let Some(message) = &vm.failure {
                    (alert(message))
                }

                @if vm.connections.is_empty() {
                    p class="empty" { "Пока не подключено ни одного банка" }
                } @else {
                    table class="table" id="bank-connections" {
                        thead {
                            tr {
                                th { "Банк" }
                                th { "URL возврата" }
                                th {}
                            }
                        }
                        tbody {
                            @for connection in &vm.connections {
                                tr data-bank=(connection.bank_type.code()) {
                                    td { (connection.bank_type.display_name()) }
                                    td { code { (connection.redirect_url) } }
                                    td {
                                        form method="post" action={ "/banks/" (connection.id) "/delete" } {
                                            button type="submit" class="danger" { "Отключить" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                (card("Подключить банк", html! {
                    form method="post" action="/banks" class="stack" novalidate {
                        div class="field" {
                            label for="bankType" { "Банк" }
                            select id="bankType" name="bankType" {
                                option value="" selected[vm.form.bank_type.is_empty()] { "Выберите банк" }
                                @for bank in BankType::ALL {
                                    option
                                        value=(bank.code())
                                        selected[vm.form.bank_type == bank.code()]
                                        disabled[connected.contains(&bank)]
                                    {
                                        (bank.display_name())
                                    }
                                }
                            }
                            (field_error(&vm.errors, "bankType"))
                        }
                        (text_field("URL возврата после заявки", "redirectUrl", "url", &vm.form.redirect_url, &vm.errors))
                        button type="submit" class="primary" { "Подключить" }
                    }
                }))
            }
        },
    )
}
