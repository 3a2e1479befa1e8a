// src/tests/router_tests/public_tests.rs
use crate::api::{ApiError, Method};
use crate::router::handle;
use crate::tests::utils::{body_text, get, header, select_attr, select_text, test_state};

const OFFERS: &str = r#"[
    {"bankType":"HALYK","minAmount":50000,"maxAmount":3000000,"termsMonths":[3,6,12]},
    {"bankType":"HOME_CREDIT","title":"Рассрочка 0-0-12","minAmount":30000,"maxAmount":1500000}
]"#;

#[test]
fn offers_page_lists_banks_without_session() {
    let (state, transport) = test_state("public_offers");
    transport.respond(Method::Get, "/public/mechta/banks", 200, OFFERS);

    let resp = handle(get("/p/mechta?outlet=2", None), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_text(resp);
    assert_eq!(
        select_text(&html, "li.offer h3"),
        vec!["Halyk Bank", "Рассрочка 0-0-12"]
    );
    assert_eq!(
        select_attr(&html, "main form", "action"),
        vec!["https://pay.bnpl.kz/p/mechta/apply/2"]
    );
    assert_eq!(transport.requests()[0].bearer, None);
}

#[test]
fn unknown_merchant_gets_not_found_page() {
    let (state, transport) = test_state("public_missing");
    transport.respond(Method::Get, "/public/ghost/banks", 404, "");

    let resp = handle(get("/p/ghost", None), &state).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(select_text(&body_text(resp), "h1"), vec!["Магазин не найден"]);
}

#[test]
fn backend_failure_shows_its_message() {
    let (state, transport) = test_state("public_backend_down");
    transport.respond(
        Method::Get,
        "/public/mechta/banks",
        500,
        r#"{"message":"Сервис банков временно недоступен"}"#,
    );

    let resp = handle(get("/p/mechta", None), &state).unwrap();
    assert_eq!(resp.status(), 502);
    assert_eq!(
        select_text(&body_text(resp), "main div.alert"),
        vec!["Сервис банков временно недоступен"]
    );
}

#[test]
fn malformed_slug_never_reaches_backend() {
    let (state, transport) = test_state("public_bad_slug");

    let resp = handle(get("/p/%D0%B0%20b", None), &state).unwrap();
    assert_eq!(resp.status(), 404);
    assert!(transport.requests().is_empty());
}

#[test]
fn apply_retries_then_redirects_to_bank() {
    let (state, transport) = test_state("apply_retry_ok");
    let path = "/public/mechta/applications";
    transport.fail(Method::Post, path, ApiError::Transport("connection reset".to_string()));
    transport.respond(Method::Post, path, 502, "");
    transport.respond(Method::Post, path, 200, r#"{"redirectUrl":"https://halykbank.kz/apply/xyz"}"#);

    let resp = handle(get("/p/mechta/apply/1", None), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "https://halykbank.kz/apply/xyz");

    let sent = transport.requests_to(Method::Post, path);
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].body, Some(serde_json::json!({"outletIndex": 1})));
}

#[test]
fn apply_gives_up_after_attempt_cap_with_manual_retry() {
    let (state, transport) = test_state("apply_retry_exhausted");
    let path = "/public/mechta/applications";
    transport.respond(Method::Post, path, 503, r#"{"message":"Банк временно недоступен"}"#);

    let resp = handle(get("/p/mechta/apply/0", None), &state).unwrap();
    assert_eq!(resp.status(), 502);

    let html = body_text(resp);
    assert_eq!(select_text(&html, "div.alert"), vec!["Банк временно недоступен"]);
    assert_eq!(
        select_attr(&html, "a#retry", "href"),
        vec!["https://pay.bnpl.kz/p/mechta/apply/0"]
    );
    assert_eq!(transport.requests_to(Method::Post, path).len(), 3);
}

#[test]
fn apply_client_errors_are_not_retried() {
    let (state, transport) = test_state("apply_no_retry");
    let path = "/public/mechta/applications";
    transport.respond(Method::Post, path, 400, r#"{"message":"Точка продаж не найдена"}"#);

    let resp = handle(get("/p/mechta/apply/9", None), &state).unwrap();
    assert_eq!(resp.status(), 502);
    assert_eq!(transport.requests_to(Method::Post, path).len(), 1);
}

#[test]
fn apply_for_unknown_merchant_is_not_found() {
    let (state, transport) = test_state("apply_missing");
    transport.respond(Method::Post, "/public/ghost/applications", 404, "");

    let resp = handle(get("/p/ghost/apply/0", None), &state).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(transport.requests().len(), 1);
}
