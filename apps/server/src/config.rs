use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

use helpdesk_core::constants::{DEFAULT_CONTENT_CACHE_SECS, DEFAULT_PERIOD_DAYS};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Lifetime of a tenant's resolved guide list; zero disables caching.
    pub content_cache_ttl: Duration,
    /// Scoring window used when a request does not name one.
    pub health_period_days: i64,
}

impl Config {
    /// Reads `HD_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("HD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid HD_LISTEN_ADDR")?;
        let db_path = lookup("HD_DB_PATH").unwrap_or_else(|| "./db/helpdesk.db".into());
        let cors_allow = lookup("HD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = lookup("HD_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let cache_secs: u64 = lookup("HD_CONTENT_CACHE_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CONTENT_CACHE_SECS);
        let health_period_days: i64 = match lookup("HD_HEALTH_PERIOD_DAYS") {
            Some(v) => v.parse().context("Invalid HD_HEALTH_PERIOD_DAYS")?,
            None => DEFAULT_PERIOD_DAYS,
        };
        if health_period_days <= 0 {
            anyhow::bail!("HD_HEALTH_PERIOD_DAYS must be at least 1");
        }

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            content_cache_ttl: Duration::from_secs(cache_secs),
            health_period_days,
        })
    }
}
