use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Base URL of the remote HRM API, without the `/api/v1` suffix.
    pub hrms_api_url: String,
    pub api_prefix: String,
    pub http_timeout: Option<Duration>,

    // Aggregation
    pub attendance_fetch_concurrency: usize,

    // Notifications
    pub toast_duration_ms: u64,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            )),
            Err(_) => None,
        };

        let attendance_fetch_concurrency: usize = parse_or("ATTENDANCE_FETCH_CONCURRENCY", 4)?;

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8081".to_string()),
            hrms_api_url: env::var("HRMS_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/console".to_string()),
            http_timeout,
            attendance_fetch_concurrency: attendance_fetch_concurrency.max(1),
            toast_duration_ms: parse_or("TOAST_DURATION_MS", 4000)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
