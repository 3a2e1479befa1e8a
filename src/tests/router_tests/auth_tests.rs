// src/tests/router_tests/auth_tests.rs
use crate::api::Method;
use crate::auth::{token_from_cookies, Role};
use crate::router::handle;
use crate::tests::fixtures::{mock_applications, to_json};
use crate::tests::utils::{body_text, get, header, now_unix, post_form, select_text, sign_in, test_state};

#[test]
fn root_redirects_by_session() {
    let (state, _) = test_state("root_redirect");

    let resp = handle(get("/", None), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");

    let cookie = sign_in(&state, Role::Merchant);
    let resp = handle(get("/", Some(&cookie)), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/applications");
}

#[test]
fn login_page_has_form() {
    let (state, _) = test_state("login_page");
    let resp = handle(get("/login", None), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_text(resp);
    assert_eq!(select_text(&html, "h1"), vec!["Вход в кабинет"]);
    assert!(html.contains(r#"name="password""#));
}

#[test]
fn successful_login_stores_session_and_uses_token() {
    let (state, transport) = test_state("login_ok");
    transport.respond(
        Method::Post,
        "/auth/login",
        200,
        r#"{"accessToken":"jwt-abc","role":"MERCHANT","merchantSlug":"technodom"}"#,
    );
    transport.respond(Method::Get, "/merchant/applications", 200, &to_json(&mock_applications()));

    let resp = handle(
        post_form("/login", "email=Owner%40Technodom.kz&password=secret-1", None),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/applications");

    let set_cookie = header(&resp, "Set-Cookie");
    assert!(set_cookie.contains("HttpOnly"));
    let raw = token_from_cookies(set_cookie.split(';').next().unwrap()).unwrap();

    let login_calls = transport.requests_to(Method::Post, "/auth/login");
    assert_eq!(
        login_calls[0].body,
        Some(serde_json::json!({"email": "owner@technodom.kz", "password": "secret-1"}))
    );

    let session = state.sessions.load(raw, now_unix()).unwrap().unwrap();
    assert_eq!(session.api_token, "jwt-abc");
    assert_eq!(session.merchant_slug.as_deref(), Some("technodom"));

    let cookie = format!("bnpl_session={raw}");
    let resp = handle(get("/applications", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let calls = transport.requests_to(Method::Get, "/merchant/applications");
    assert_eq!(calls[0].bearer.as_deref(), Some("jwt-abc"));
}

#[test]
fn wrong_password_shows_inline_message() {
    let (state, transport) = test_state("login_bad");
    transport.respond(Method::Post, "/auth/login", 401, r#"{"message":"Unauthorized"}"#);

    let resp = handle(post_form("/login", "email=a%40b.kz&password=nope", None), &state).unwrap();
    assert_eq!(resp.status(), 401);
    assert_eq!(header(&resp, "Set-Cookie"), "");
    let html = body_text(resp);
    assert_eq!(select_text(&html, "div.alert"), vec!["Неверный email или пароль"]);
}

#[test]
fn invalid_login_form_skips_backend() {
    let (state, transport) = test_state("login_invalid");
    let resp = handle(post_form("/login", "email=not-an-email&password=", None), &state).unwrap();
    assert_eq!(resp.status(), 422);
    let html = body_text(resp);
    assert_eq!(select_text(&html, r#"p.field-error[data-field="password"]"#), vec!["Введите пароль"]);
    assert!(transport.requests().is_empty());
}

#[test]
fn logout_revokes_session() {
    let (state, _) = test_state("logout");
    let cookie = sign_in(&state, Role::Merchant);

    let resp = handle(post_form("/logout", "", Some(&cookie)), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let resp = handle(get("/applications", Some(&cookie)), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn protected_pages_redirect_anonymous_users() {
    let (state, transport) = test_state("anon_redirect");
    for uri in ["/applications", "/banks", "/outlets", "/admin/merchants"] {
        let resp = handle(get(uri, None), &state).unwrap();
        assert_eq!(resp.status(), 303, "{uri}");
        assert_eq!(header(&resp, "Location"), "/login", "{uri}");
    }
    assert!(transport.requests().is_empty());
}

#[test]
fn backend_rejecting_token_ends_session() {
    let (state, transport) = test_state("token_rejected");
    transport.respond(Method::Get, "/merchant/applications", 401, "");
    let cookie = sign_in(&state, Role::Merchant);

    let resp = handle(get("/applications", Some(&cookie)), &state).unwrap();
    assert_eq!(header(&resp, "Location"), "/login");
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let raw = token_from_cookies(&cookie).unwrap();
    assert_eq!(state.sessions.load(raw, now_unix()).unwrap(), None);
}
