// src/tests/router_tests/applications_tests.rs
use crate::api::Method;
use crate::auth::Role;
use crate::router::handle;
use crate::tests::fixtures::{mock_applications, to_json};
use crate::tests::utils::{body_text, get, select_attr, select_text, sign_in, test_state, FakeTransport};

fn with_applications(transport: &FakeTransport) {
    transport.respond(Method::Get, "/merchant/applications", 200, &to_json(&mock_applications()));
}

#[test]
fn tabs_show_counts_per_bucket() {
    let (state, transport) = test_state("apps_tabs");
    with_applications(&transport);
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(handle(get("/applications", Some(&cookie)), &state).unwrap());

    assert_eq!(
        select_text(&html, "nav.tabs a span.count"),
        vec!["6", "1", "1", "1", "1", "1"]
    );
    assert_eq!(select_attr(&html, "nav.tabs a.active", "data-bucket"), vec!["all"]);
    assert_eq!(select_text(&html, "#applications tbody tr").len(), 6);
}

#[test]
fn bucket_tab_filters_rows() {
    let (state, transport) = test_state("apps_bucket");
    with_applications(&transport);
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(
        handle(get("/applications?bucket=rejected", Some(&cookie)), &state).unwrap(),
    );
    assert_eq!(select_attr(&html, "#applications tbody tr", "data-id"), vec!["A-1005"]);
    assert_eq!(select_text(&html, "span.badge"), vec!["Отклонено банком"]);
    assert_eq!(select_attr(&html, "nav.tabs a.active", "data-bucket"), vec!["rejected"]);
}

#[test]
fn unknown_status_renders_generic_badge() {
    let (state, transport) = test_state("apps_unknown");
    with_applications(&transport);
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(handle(get("/applications?q=A-1006", Some(&cookie)), &state).unwrap());
    assert_eq!(select_text(&html, "span.badge"), vec!["Неизвестный статус"]);
    assert_eq!(select_attr(&html, "span.badge", "data-status"), vec!["BANK_ON_HOLD"]);
}

#[test]
fn amount_sort_ascending() {
    let (state, transport) = test_state("apps_sort");
    with_applications(&transport);
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(
        handle(get("/applications?sort=amount&dir=asc", Some(&cookie)), &state).unwrap(),
    );
    assert_eq!(
        select_attr(&html, "#applications tbody tr", "data-id"),
        vec!["A-1006", "A-1003", "A-1001", "A-1002", "A-1004", "A-1005"]
    );
    // clicking the active column flips the direction
    let amount_links = select_attr(&html, r#"th[data-sort="amount"] a"#, "href");
    assert_eq!(amount_links, vec!["/applications?sort=amount&dir=desc"]);
}

#[test]
fn backend_failure_is_inline() {
    let (state, transport) = test_state("apps_fail");
    transport.respond(Method::Get, "/merchant/applications", 503, r#"{"error":"Service Unavailable"}"#);
    let cookie = sign_in(&state, Role::Bank);

    let resp = handle(get("/applications", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let html = body_text(resp);
    assert_eq!(select_text(&html, "div.alert"), vec!["Service Unavailable"]);
    assert!(select_text(&html, "#applications").is_empty());
}
