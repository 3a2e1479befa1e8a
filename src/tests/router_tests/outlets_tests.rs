// src/tests/router_tests/outlets_tests.rs
use crate::api::Method;
use crate::auth::Role;
use crate::router::handle;
use crate::tests::utils::{body_text, get, select_attr, sign_in, test_state};

#[test]
fn each_outlet_gets_an_absolute_link() {
    let (state, transport) = test_state("outlets");
    transport.respond(
        Method::Get,
        "/merchant/outlets",
        200,
        r#"[{"index":0,"name":"ТРЦ Mega"},{"index":1,"name":"Dostyk Plaza","address":"пр. Достык, 111"}]"#,
    );
    let cookie = sign_in(&state, Role::Merchant);

    let html = body_text(handle(get("/outlets", Some(&cookie)), &state).unwrap());
    assert_eq!(
        select_attr(&html, "a.outlet-url", "href"),
        vec![
            "https://pay.bnpl.kz/p/technodom/apply/0",
            "https://pay.bnpl.kz/p/technodom/apply/1"
        ]
    );
}
