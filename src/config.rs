// src/config.rs

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

/// Number of questions served per exam.
pub const EXAM_QUESTION_COUNT: usize = 10;

/// Most answers one submission may carry; an exam never has more questions.
pub const MAX_ANSWERS: usize = EXAM_QUESTION_COUNT;

/// Upper bound on rows returned by the results listing.
pub const RESULTS_LIMIT: i64 = 200;

const DEFAULT_CORS_ORIGINS: &str =
    "https://breadtoad23.github.io,http://localhost:5500,http://127.0.0.1:5500";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    Any,
    /// Serialized origins, e.g. `http://localhost:5500`.
    Origins(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub log_dir: String,
    pub cors: CorsPolicy,
}

impl Config {
    /// Reads configuration from the process environment.
    /// Fails if a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), "0.0.0.0:3000")?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), "5")?;

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        let cors = parse_cors(
            lookup("CORS_ORIGINS")
                .as_deref()
                .unwrap_or(DEFAULT_CORS_ORIGINS),
        )?;

        Ok(Self {
            database_url,
            rust_log,
            bind_addr,
            db_max_connections,
            log_dir,
            cors,
        })
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_cors(raw: &str) -> Result<CorsPolicy, ConfigError> {
    if raw.trim() == "*" {
        return Ok(CorsPolicy::Any);
    }

    let mut origins = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let url = Url::parse(part).map_err(|e| ConfigError::Invalid {
            key: "CORS_ORIGINS",
            value: part.to_string(),
            reason: e.to_string(),
        })?;
        // Origin serialization drops path and trailing slash.
        origins.push(url.origin().ascii_serialization());
    }

    Ok(CorsPolicy::Origins(origins))
}
