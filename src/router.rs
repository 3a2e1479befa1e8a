// src/router.rs
use crate::api::{ApiError, BnplApi, RetryPolicy};
use crate::auth::{clear_session_cookie, session_cookie, token_from_cookies, Role, Session, SessionStore};
use crate::domain::application::bucket_counts;
use crate::domain::merchant::cities;
use crate::domain::outlet::outlet_links;
use crate::domain::{application_link, ApplicationQuery, BankType, MerchantQuery};
use crate::errors::ServerError;
use crate::forms::{parse_urlencoded, BankConnectionForm, FieldErrors, LoginForm, RegistrationForm};
use crate::responses::{html_response, html_response_with_status, redirect, redirect_with_cookie, ResultResp};
use crate::templates::pages::{self, ApplicationsVm, BanksVm, MerchantsVm};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Everything a handler needs, shared by all worker threads.
pub struct AppState {
    pub sessions: SessionStore,
    pub api: BnplApi,
    pub public_base_url: Url,
    pub apply_retry: RetryPolicy,
}

/// A request with a live dashboard session.
struct Authed {
    token: String,
    session: Session,
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => match authenticate(&req, state)? {
            Some(_) => redirect("/applications"),
            None => redirect("/login"),
        },

        ("GET", ["login"]) => match authenticate(&req, state)? {
            Some(_) => redirect("/applications"),
            None => html_response(pages::login_page("", &FieldErrors::new(), None)),
        },
        ("POST", ["login"]) => {
            let params = read_form(&mut req)?;
            login(state, LoginForm::from_params(&params))
        }
        ("POST", ["logout"]) => logout(&req, state),

        ("GET", ["register"]) => html_response(pages::register_page(
            &RegistrationForm::default(),
            &FieldErrors::new(),
            None,
        )),
        ("POST", ["register"]) => {
            let params = read_form(&mut req)?;
            register(state, RegistrationForm::from_params(&params))
        }

        ("GET", ["applications"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            applications(state, &auth, ApplicationQuery::from_params(&parse_query(&req)))
        }

        ("GET", ["admin", "merchants"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            require_role(&auth, Role::Admin)?;
            merchants(state, &auth, MerchantQuery::from_params(&parse_query(&req)))
        }

        ("GET", ["banks"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            require_role(&auth, Role::Merchant)?;
            banks(state, &auth, BanksVm::default())
        }
        ("POST", ["banks"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            require_role(&auth, Role::Merchant)?;
            let params = read_form(&mut req)?;
            create_bank(state, &auth, BankConnectionForm::from_params(&params))
        }
        ("POST", ["banks", target, "delete"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            require_role(&auth, Role::Merchant)?;
            delete_bank(state, &auth, target)
        }

        ("GET", ["outlets"]) => {
            let Some(auth) = authenticate(&req, state)? else {
                return redirect("/login");
            };
            require_role(&auth, Role::Merchant)?;
            outlets(state, &auth)
        }

        ("GET", ["p", slug]) if is_slug(slug) => {
            let outlet_index = parse_query(&req)
                .get("outlet")
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(0);
            public_offers(state, slug, outlet_index)
        }
        ("GET", ["p", slug, "apply", index]) if is_slug(slug) => {
            let outlet_index = index.parse::<u32>().map_err(|_| ServerError::NotFound)?;
            apply(state, slug, outlet_index)
        }
        ("GET", ["p", slug, ..]) => {
            html_response_with_status(404, pages::merchant_not_found_page(slug))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn login(state: &AppState, form: LoginForm) -> ResultResp {
    let typed_email = form.email.clone();
    let form = match form.validate() {
        Ok(form) => form,
        Err(errors) => {
            return html_response_with_status(422, pages::login_page(&typed_email, &errors, None));
        }
    };

    match state.api.login(&form) {
        Ok(granted) => {
            let now = now_unix();
            let (raw_token, session) = state.sessions.create(&granted, &form.email, now)?;
            tracing::info!(email = %session.email, role = session.role.key(), "signed in");
            let home = match session.role {
                Role::Admin => "/admin/merchants",
                Role::Merchant | Role::Bank => "/applications",
            };
            redirect_with_cookie(home, &session_cookie(&raw_token, session.expires_at - now))
        }
        Err(ApiError::Unauthorized) => html_response_with_status(
            401,
            pages::login_page(&form.email, &FieldErrors::new(), Some("Неверный email или пароль")),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "login call failed");
            html_response_with_status(
                502,
                pages::login_page(&form.email, &FieldErrors::new(), Some(&err.user_message())),
            )
        }
    }
}

fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = cookie_token(req) {
        if state.sessions.revoke(&token, now_unix())? {
            tracing::info!("signed out");
        }
    }
    redirect_with_cookie("/login", &clear_session_cookie())
}

fn register(state: &AppState, form: RegistrationForm) -> ResultResp {
    // validation failures never reach the backend
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => {
            return html_response_with_status(422, pages::register_page(&form, &errors, None));
        }
    };

    match state.api.register(&body) {
        Ok(()) => {
            tracing::info!(bin = %body.bin, "merchant registration submitted");
            html_response(pages::register_done_page(&body.email))
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration rejected");
            html_response_with_status(
                422,
                pages::register_page(&form, &FieldErrors::new(), Some(&err.user_message())),
            )
        }
    }
}

fn applications(state: &AppState, auth: &Authed, query: ApplicationQuery) -> ResultResp {
    let mut vm = ApplicationsVm {
        query,
        rows: Vec::new(),
        counts: bucket_counts(&[]),
        total: 0,
        failure: None,
    };

    match state.api.applications(&auth.session) {
        Ok(records) => {
            vm.rows = vm.query.apply(&records);
            vm.counts = bucket_counts(&records);
            vm.total = records.len();
        }
        Err(err) if is_session_error(&err) => return session_expired(state, auth),
        Err(err) => vm.failure = Some(err.user_message()),
    }

    html_response(pages::applications_page(&auth.session, &vm))
}

fn merchants(state: &AppState, auth: &Authed, query: MerchantQuery) -> ResultResp {
    let mut vm = MerchantsVm {
        query,
        rows: Vec::new(),
        cities: Vec::new(),
        failure: None,
    };

    match state.api.merchants(&auth.session) {
        Ok(records) => {
            vm.rows = vm.query.apply(&records);
            vm.cities = cities(&records);
        }
        Err(err) if is_session_error(&err) => return session_expired(state, auth),
        Err(err) => vm.failure = Some(err.user_message()),
    }

    html_response(pages::merchants_page(&auth.session, &vm))
}

/// Render the banks page around `vm`, filling in the current connections.
fn banks(state: &AppState, auth: &Authed, mut vm: BanksVm) -> ResultResp {
    match state.api.bank_connections(&auth.session) {
        Ok(connections) => vm.connections = connections,
        Err(err) if is_session_error(&err) => return session_expired(state, auth),
        Err(err) => {
            vm.failure.get_or_insert_with(|| err.user_message());
        }
    }

    let status = if vm.errors.is_empty() && vm.failure.is_none() {
        200
    } else {
        422
    };
    html_response_with_status(status, pages::banks_page(&auth.session, &vm))
}

fn create_bank(state: &AppState, auth: &Authed, form: BankConnectionForm) -> ResultResp {
    let body = match form.validate() {
        Ok(body) => body,
        Err(errors) => {
            return banks(state, auth, BanksVm { form, errors, ..BanksVm::default() });
        }
    };

    match state.api.create_bank_connection(&auth.session, &body) {
        Ok(created) => {
            tracing::info!(bank = created.bank_type.code(), id = created.id, "bank connected");
            redirect("/banks")
        }
        Err(err) if is_session_error(&err) => session_expired(state, auth),
        Err(err) => banks(
            state,
            auth,
            BanksVm {
                form,
                failure: Some(err.user_message()),
                ..BanksVm::default()
            },
        ),
    }
}

/// `target` is either a connection id or a bank type code.
fn delete_bank(state: &AppState, auth: &Authed, target: &str) -> ResultResp {
    let result = if let Ok(id) = target.parse::<i64>() {
        state.api.delete_bank_connection(&auth.session, id)
    } else if let Some(bank_type) = BankType::from_code(target) {
        state.api.delete_bank_connection_by_type(&auth.session, bank_type)
    } else {
        return Err(ServerError::NotFound);
    };

    match result {
        Ok(()) => {
            tracing::info!(bank = target, "bank disconnected");
            redirect("/banks")
        }
        Err(err) if is_session_error(&err) => session_expired(state, auth),
        Err(err) => banks(
            state,
            auth,
            BanksVm {
                failure: Some(err.user_message()),
                ..BanksVm::default()
            },
        ),
    }
}

fn outlets(state: &AppState, auth: &Authed) -> ResultResp {
    let Some(slug) = auth.session.merchant_slug.as_deref() else {
        tracing::warn!(email = %auth.session.email, "merchant session without slug");
        return html_response(pages::outlets_page(
            &auth.session,
            &[],
            Some("Профиль мерчанта не найден"),
        ));
    };

    match state.api.outlets(&auth.session) {
        Ok(list) => {
            let links = outlet_links(&state.public_base_url, slug, &list);
            html_response(pages::outlets_page(&auth.session, &links, None))
        }
        Err(err) if is_session_error(&err) => session_expired(state, auth),
        Err(err) => html_response(pages::outlets_page(
            &auth.session,
            &[],
            Some(&err.user_message()),
        )),
    }
}

fn public_offers(state: &AppState, slug: &str, outlet_index: u32) -> ResultResp {
    match state.api.public_banks(slug) {
        Ok(offers) => {
            let apply_url = application_link(&state.public_base_url, slug, outlet_index);
            html_response(pages::public_offers_page(&offers, &apply_url))
        }
        Err(ApiError::NotFound) => {
            html_response_with_status(404, pages::merchant_not_found_page(slug))
        }
        Err(err) => {
            tracing::warn!(merchant = slug, error = %err, "public offers unavailable");
            html_response_with_status(502, pages::offers_unavailable_page(&err.user_message()))
        }
    }
}

fn apply(state: &AppState, slug: &str, outlet_index: u32) -> ResultResp {
    match state
        .api
        .create_application_link_with_retry(&state.apply_retry, slug, outlet_index)
    {
        Ok(link) => {
            tracing::info!(merchant = slug, outlet_index, "application link issued");
            redirect(&link.redirect_url)
        }
        Err(ApiError::NotFound) => {
            html_response_with_status(404, pages::merchant_not_found_page(slug))
        }
        Err(err) => {
            tracing::warn!(merchant = slug, outlet_index, error = %err, "application link failed");
            let retry_url = application_link(&state.public_base_url, slug, outlet_index);
            html_response_with_status(502, pages::apply_failed_page(&retry_url, &err.user_message()))
        }
    }
}

fn authenticate(req: &Request, state: &AppState) -> Result<Option<Authed>, ServerError> {
    let Some(token) = cookie_token(req) else {
        return Ok(None);
    };
    Ok(state
        .sessions
        .load(&token, now_unix())?
        .map(|session| Authed { token, session }))
}

fn require_role(auth: &Authed, role: Role) -> Result<(), ServerError> {
    if auth.session.role == role {
        Ok(())
    } else {
        Err(ServerError::Unauthorized("Недостаточно прав".to_string()))
    }
}

fn is_session_error(err: &ApiError) -> bool {
    matches!(err, ApiError::Unauthorized | ApiError::NotAuthenticated)
}

/// The backend no longer accepts the stored token: drop the session.
fn session_expired(state: &AppState, auth: &Authed) -> ResultResp {
    state.sessions.revoke(&auth.token, now_unix())?;
    tracing::info!(email = %auth.session.email, "backend rejected session token");
    redirect_with_cookie("/login", &clear_session_cookie())
}

fn cookie_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(token_from_cookies)
        .map(str::to_string)
}

/// Merchant slugs are plain ASCII; anything else cannot name a merchant.
fn is_slug(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|query| parse_urlencoded(query.as_bytes()))
        .unwrap_or_default()
}

fn read_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(parse_urlencoded(&body))
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
