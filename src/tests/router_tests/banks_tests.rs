// src/tests/router_tests/banks_tests.rs
use crate::api::Method;
use crate::auth::Role;
use crate::router::handle;
use crate::tests::utils::{body_text, get, header, post_form, select_attr, select_text, sign_in, test_state};

const CONNECTIONS: &str = r#"[
    {"id": 11, "bankType": "HALYK", "redirectUrl": "https://technodom.kz/bnpl/done"},
    {"id": 12, "bankType": "FREEDOM", "redirectUrl": "https://technodom.kz/bnpl/done"}
]"#;

#[test]
fn lists_connections_and_disables_connected_banks() {
    let (state, transport) = test_state("banks_list");
    transport.respond(Method::Get, "/merchant/banks", 200, CONNECTIONS);
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(handle(get("/banks", Some(&cookie)), &state).unwrap());
    assert_eq!(
        select_attr(&html, "#bank-connections tbody tr", "data-bank"),
        vec!["HALYK", "FREEDOM"]
    );
    assert_eq!(
        select_attr(&html, "#bankType option[disabled]", "value"),
        vec!["HALYK", "FREEDOM"]
    );
}

#[test]
fn invalid_form_is_rejected_before_posting() {
    let (state, transport) = test_state("banks_invalid");
    transport.respond(Method::Get, "/merchant/banks", 200, "[]");
    let cookie = sign_in(&state, Role::Merchant);

    let resp = handle(
        post_form("/banks", "bankType=UNKNOWN&redirectUrl=not-a-url", Some(&cookie)),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 422);
    let html = body_text(resp);
    assert_eq!(select_text(&html, "p.field-error").len(), 2);
    assert!(transport.requests_to(Method::Post, "/merchant/banks").is_empty());
}

#[test]
fn create_posts_and_redirects() {
    let (state, transport) = test_state("banks_create");
    transport.respond(
        Method::Post,
        "/merchant/banks",
        201,
        r#"{"id": 13, "bankType": "JUSAN", "redirectUrl": "https://technodom.kz/ok"}"#,
    );
    let cookie = sign_in(&state, Role::Merchant);

    let resp = handle(
        post_form(
            "/banks",
            "bankType=JUSAN&redirectUrl=https%3A%2F%2Ftechnodom.kz%2Fok",
            Some(&cookie),
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/banks");

    let sent = transport.requests_to(Method::Post, "/merchant/banks");
    assert_eq!(
        sent[0].body,
        Some(serde_json::json!({"bankType": "JUSAN", "redirectUrl": "https://technodom.kz/ok"}))
    );
}

#[test]
fn delete_by_id_or_bank_type() {
    let (state, transport) = test_state("banks_delete");
    transport.respond(Method::Delete, "/merchant/banks/11", 204, "");
    transport.respond(Method::Delete, "/merchant/banks/FREEDOM", 204, "");
    let cookie = sign_in(&state, Role::Merchant);

    for uri in ["/banks/11/delete", "/banks/FREEDOM/delete"] {
        let resp = handle(post_form(uri, "", Some(&cookie)), &state).unwrap();
        assert_eq!(header(&resp, "Location"), "/banks", "{uri}");
    }
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn failed_delete_shows_message_on_page() {
    let (state, transport) = test_state("banks_delete_fail");
    transport.respond(Method::Delete, "/merchant/banks/11", 409, r#"{"message":"Есть активные заявки"}"#);
    transport.respond(Method::Get, "/merchant/banks", 200, CONNECTIONS);
    let cookie = sign_in(&state, Role::Merchant);

    let resp = handle(post_form("/banks/11/delete", "", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 422);
    assert_eq!(select_text(&body_text(resp), "div.alert"), vec!["Есть активные заявки"]);
}

#[test]
fn unknown_delete_target_is_not_found() {
    let (state, transport) = test_state("banks_delete_unknown");
    let cookie = sign_in(&state, Role::Merchant);

    assert!(handle(post_form("/banks/SOMEBANK/delete", "", Some(&cookie)), &state).is_err());
    assert!(transport.requests().is_empty());
}
