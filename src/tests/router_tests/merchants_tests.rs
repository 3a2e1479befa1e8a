// src/tests/router_tests/merchants_tests.rs
use crate::api::Method;
use crate::auth::Role;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::fixtures::{mock_merchants, to_json};
use crate::tests::utils::{body_text, get, select_text, sign_in, test_state};

#[test]
fn active_almaty_filter_end_to_end() {
    let (state, transport) = test_state("merchants_filter");
    transport.respond(Method::Get, "/admin/merchants", 200, &to_json(&mock_merchants()));
    let cookie = sign_in(&state, Role::Admin);

    let uri = "/admin/merchants?status=active&city=%D0%90%D0%BB%D0%BC%D0%B0%D1%82%D1%8B";
    let resp = handle(get(uri, Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_text(resp);
    assert_eq!(
        select_text(&html, "#merchants tbody td.name"),
        vec!["Technodom Plus", "Mechta Market"]
    );
    assert_eq!(select_text(&html, "#merchants tbody td.total"), vec!["184", "96"]);
    assert_eq!(select_text(&html, "#merchant-count"), vec!["2"]);
    assert_eq!(
        select_text(&html, r#"select[name="city"] option[selected]"#),
        vec!["Алматы"]
    );
    assert_eq!(
        transport.requests_to(Method::Get, "/admin/merchants")[0].bearer.as_deref(),
        Some("admin-token")
    );
}

#[test]
fn city_options_come_from_data() {
    let (state, transport) = test_state("merchants_cities");
    transport.respond(Method::Get, "/admin/merchants", 200, &to_json(&mock_merchants()));
    let cookie = sign_in(&state, Role::Admin);

    let html = body_text(handle(get("/admin/merchants", Some(&cookie)), &state).unwrap());
    assert_eq!(
        select_text(&html, r#"select[name="city"] option"#),
        vec!["Все города", "Алматы", "Астана", "Шымкент"]
    );
    assert_eq!(select_text(&html, "#merchants tbody td.name")[0], "Kids Land");
}

#[test]
fn merchants_page_is_admin_only() {
    let (state, transport) = test_state("merchants_forbidden");
    let cookie = sign_in(&state, Role::Merchant);

    let result = handle(get("/admin/merchants", Some(&cookie)), &state);
    assert!(matches!(result, Err(ServerError::Unauthorized(_))));
    assert!(transport.requests().is_empty());
}
