// src/tests/utils.rs
use crate::api::{ApiError, ApiRequest, ApiResponse, BnplApi, LoginResponse, Method, RetryPolicy, Transport};
use crate::auth::{Role, Session, SessionStore, SESSION_COOKIE};
use crate::db::{init_db, Database};
use crate::router::AppState;
use astra::{Body, Request, Response};
use std::collections::{HashMap, VecDeque};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use url::Url;

pub const PUBLIC_BASE: &str = "https://pay.bnpl.kz";

/// Fresh SQLite file per call, so tests never share session rows.
pub fn temp_db_path(name: &str) -> String {
    static SEQ: AtomicUsize = AtomicUsize::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("bnpl_{name}_{}_{seq}.sqlite3", std::process::id()))
        .to_string_lossy()
        .into_owned()
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

type Route = (&'static str, String);

#[derive(Default)]
struct FakeState {
    routes: HashMap<Route, VecDeque<Result<ApiResponse, ApiError>>>,
    log: Vec<ApiRequest>,
}

/// Transport double: canned responses per `(method, path)` and a log of
/// every request. The last canned response for a route repeats.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Ok(ApiResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
    }

    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.push(method, path, Err(error));
    }

    fn push(&self, method: Method, path: &str, outcome: Result<ApiResponse, ApiError>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry((method.as_str(), path.to_string()))
            .or_default()
            .push_back(outcome);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path() == path)
            .collect()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());

        let key = (request.method.as_str(), request.path());
        match state.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Ok(ApiResponse {
                status: 404,
                body: br#"{"message":"no fake route"}"#.to_vec(),
            }),
        }
    }
}

pub fn merchant_session() -> Session {
    Session {
        api_token: "merchant-token".to_string(),
        role: Role::Merchant,
        merchant_slug: Some("technodom".to_string()),
        email: "owner@technodom.kz".to_string(),
        expires_at: i64::MAX,
    }
}

/// App state over a throwaway DB and a fake backend.
pub fn test_state(name: &str) -> (AppState, FakeTransport) {
    let db = Database::new(temp_db_path(name));
    init_db(&db).expect("schema applies");

    let transport = FakeTransport::new();
    let state = AppState {
        sessions: SessionStore::new(db, Duration::from_secs(3_600)),
        api: BnplApi::new(transport.clone()),
        public_base_url: Url::parse(PUBLIC_BASE).unwrap(),
        apply_retry: RetryPolicy::immediate(3),
    };
    (state, transport)
}

/// Store a session for `role` and return the `Cookie` header value.
pub fn sign_in(state: &AppState, role: Role) -> String {
    let login = LoginResponse {
        access_token: format!("{}-token", role.key().to_lowercase()),
        role,
        merchant_slug: (role == Role::Merchant).then(|| "technodom".to_string()),
    };
    let (raw, _) = state
        .sessions
        .create(&login, "user@bnpl.kz", now_unix())
        .expect("session stored");
    format!("{SESSION_COOKIE}={raw}")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method(http::Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(form.as_bytes().to_vec())).unwrap()
}

pub fn body_text(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn header(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Text of every element matching `selector`.
pub fn select_text(html: &str, selector: &str) -> Vec<String> {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(selector).unwrap();
    doc.select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

pub fn select_attr(html: &str, selector: &str, attr: &str) -> Vec<String> {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse(selector).unwrap();
    doc.select(&selector)
        .filter_map(|el| el.value().attr(attr).map(str::to_string))
        .collect()
}
