// src/auth/session.rs
use crate::api::{ApiError, LoginResponse};
use crate::auth::claims::session_expiry;
use crate::auth::token::{generate_token_default, hash_token};
use crate::db::sessions::{
    find_active_session, insert_session, purge_stale_sessions, revoke_session, SessionRow,
};
use crate::db::Database;
use crate::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const SESSION_COOKIE: &str = "bnpl_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Merchant,
    Bank,
    Admin,
}

impl Role {
    pub const fn key(self) -> &'static str {
        match self {
            Role::Merchant => "MERCHANT",
            Role::Bank => "BANK",
            Role::Admin => "ADMIN",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Merchant => "Мерчант",
            Role::Bank => "Банк",
            Role::Admin => "Администратор",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [Role::Merchant, Role::Bank, Role::Admin]
            .into_iter()
            .find(|role| role.key() == key)
    }
}

/// Who is signed in and the backend token to act as them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_token: String,
    pub role: Role,
    pub merchant_slug: Option<String>,
    pub email: String,
    pub expires_at: i64,
}

impl Session {
    /// Token for the `Authorization` header. Fails before any request is
    /// built when the session carries no token.
    pub fn bearer(&self) -> Result<&str, ApiError> {
        let token = self.api_token.trim();
        if token.is_empty() {
            return Err(ApiError::NotAuthenticated);
        }
        Ok(token)
    }
}

/// Server-side session context: `create` sets it at sign-in, `load` reads
/// it per request, `revoke` clears it at sign-out.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db: Database,
    ttl_secs: i64,
}

impl SessionStore {
    pub fn new(db: Database, ttl: Duration) -> Self {
        Self {
            db,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2),
        }
    }

    /// Persist a session for a successful login. Returns the raw cookie token.
    pub fn create(
        &self,
        login: &LoginResponse,
        email: &str,
        now: i64,
    ) -> Result<(String, Session), ServerError> {
        let raw_token = generate_token_default();
        let session = Session {
            api_token: login.access_token.clone(),
            role: login.role,
            merchant_slug: login.merchant_slug.clone(),
            email: email.to_string(),
            expires_at: session_expiry(&login.access_token, now, self.ttl_secs),
        };
        if session.expires_at <= now {
            return Err(ServerError::Unauthorized(
                "Срок действия токена истёк".to_string(),
            ));
        }

        let row = SessionRow {
            api_token: session.api_token.clone(),
            role: session.role.key().to_string(),
            merchant_slug: session.merchant_slug.clone(),
            email: session.email.clone(),
            created_at: now,
            expires_at: session.expires_at,
        };
        self.db
            .with_conn(|conn| insert_session(conn, &hash_token(&raw_token), &row))?;

        Ok((raw_token, session))
    }

    pub fn load(&self, raw_token: &str, now: i64) -> Result<Option<Session>, ServerError> {
        let row = self
            .db
            .with_conn(|conn| find_active_session(conn, &hash_token(raw_token), now))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let Some(role) = Role::from_key(&row.role) else {
            tracing::warn!(role = %row.role, "stored session has unknown role");
            return Ok(None);
        };

        Ok(Some(Session {
            api_token: row.api_token,
            role,
            merchant_slug: row.merchant_slug,
            email: row.email,
            expires_at: row.expires_at,
        }))
    }

    /// Returns whether a live session was revoked.
    pub fn revoke(&self, raw_token: &str, now: i64) -> Result<bool, ServerError> {
        let changed = self
            .db
            .with_conn(|conn| revoke_session(conn, &hash_token(raw_token), now))?;
        Ok(changed > 0)
    }

    pub fn purge(&self, now: i64) -> Result<usize, ServerError> {
        self.db.with_conn(|conn| purge_stale_sessions(conn, now))
    }
}

pub fn session_cookie(raw_token: &str, max_age_secs: i64) -> String {
    format!(
        "{SESSION_COOKIE}={raw_token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Session token from a `Cookie` header value.
pub fn token_from_cookies(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}
