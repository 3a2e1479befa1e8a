// src/main.rs
use crate::api::{BnplApi, ReqwestTransport, RetryPolicy};
use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::{Request, Server};
use std::process;
use std::time::Instant;

mod api;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod responses;
mod router;
mod status;
mod telemetry;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Err(e) = run(config) {
        tracing::error!(error = %e, "server stopped");
        process::exit(1);
    }
}

fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::new(config.session.db_path.clone());
    init_db(&db)?;

    let sessions = SessionStore::new(db, config.session.ttl);
    let purged = sessions.purge(chrono::Utc::now().timestamp())?;
    if purged > 0 {
        tracing::info!(purged, "removed stale sessions");
    }

    let transport = ReqwestTransport::new(config.backend.base_url.clone(), config.backend.timeout)?;
    let state = AppState {
        sessions,
        api: BnplApi::new(transport),
        public_base_url: config.server.public_base_url.clone(),
        apply_retry: RetryPolicy {
            max_attempts: config.backend.apply_retry_attempts,
            ..RetryPolicy::default()
        },
    };

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        workers = config.server.workers,
        backend = %config.backend.base_url,
        "starting dashboard"
    );

    Server::bind(&addr)
        .max_workers(config.server.workers)
        .serve(move |req: Request, _info| {
            let started = Instant::now();
            let method = req.method().to_string();
            let path = req.uri().path().to_string();

            let resp = match handle(req, &state) {
                Ok(resp) => resp,
                Err(err) => error_to_response(err),
            };

            tracing::info!(
                %method,
                %path,
                status = resp.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request"
            );
            resp
        })?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
