// src/db/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub api_token: String,
    pub role: String,
    pub merchant_slug: Option<String>,
    pub email: String,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Insert a session keyed by `token_hash` (SHA-256 of the cookie token).
pub fn insert_session(
    conn: &Connection,
    token_hash: &[u8],
    row: &SessionRow,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into sessions
            (token_hash, api_token, role, merchant_slug, email, created_at, expires_at)
        values (?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            token_hash,
            row.api_token,
            row.role,
            row.merchant_slug,
            row.email,
            row.created_at,
            row.expires_at
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert session failed: {e}")))?;
    Ok(())
}

/// Unexpired, unrevoked session for `token_hash`.
pub fn find_active_session(
    conn: &Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<SessionRow>, ServerError> {
    conn.query_row(
        r#"
        select api_token, role, merchant_slug, email, created_at, expires_at
        from sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![token_hash, now],
        |r| {
            Ok(SessionRow {
                api_token: r.get(0)?,
                role: r.get(1)?,
                merchant_slug: r.get(2)?,
                email: r.get(3)?,
                created_at: r.get(4)?,
                expires_at: r.get(5)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Mark a session revoked. Returns how many rows changed (0 or 1).
pub fn revoke_session(conn: &Connection, token_hash: &[u8], now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, token_hash],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))
}

/// Drop sessions that expired or were revoked before `now`.
pub fn purge_stale_sessions(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}
