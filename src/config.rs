// src/config.rs
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Top-level configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Absolute base for customer-facing links (outlet QR targets).
    pub public_base_url: Url,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub apply_retry_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub db_path: String,
    pub ttl: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{key} must be an absolute http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                host: var("APP_HOST", "127.0.0.1"),
                port: number(&lookup, "APP_PORT", 3000, "u16")?,
                workers: number::<usize, _>(&lookup, "APP_WORKERS", 8, "worker count")?.max(1),
                public_base_url: http_url("BNPL_PUBLIC_BASE_URL", var("BNPL_PUBLIC_BASE_URL", "http://127.0.0.1:3000"))?,
            },
            telemetry: TelemetryConfig {
                log_level: var("APP_LOG_LEVEL", "info"),
            },
            backend: BackendConfig {
                base_url: http_url("BNPL_API_BASE_URL", var("BNPL_API_BASE_URL", "http://127.0.0.1:8080/api"))?,
                timeout: Duration::from_secs(number(&lookup, "HTTP_TIMEOUT_SECS", 30, "number of seconds")?),
                apply_retry_attempts: number(&lookup, "APPLY_RETRY_ATTEMPTS", 3, "attempt count")?,
            },
            session: SessionConfig {
                db_path: var("SESSION_DB_PATH", "bnpl_dashboard.sqlite3"),
                ttl: Duration::from_secs(number(&lookup, "SESSION_TTL_SECS", 43_200, "number of seconds")?),
            },
        })
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

fn number<T, F>(lookup: &F, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, expected, value }),
    }
}

fn http_url(key: &'static str, value: String) -> Result<Url, ConfigError> {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
        _ => Err(ConfigError::InvalidUrl { key, value }),
    }
}
