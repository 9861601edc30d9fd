//! Environment-driven server configuration.
//!
//! Base URLs resolve through a layered fallback: the explicit variable,
//! then the generic one, then a hard-coded localhost default, so a bare
//! `cargo run` talks to a local upstream without any setup.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::domain::tag_cache::DEFAULT_TAG_TTL;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Default upstream base when no environment variable is set.
const DEFAULT_OFFERS_BASE: &str = "http://localhost:8000/api";
/// Default cadence of the background tag refresh task.
const DEFAULT_TAG_REFRESH_SECONDS: u64 = 300;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the offers service.
    pub offers_base_url: Url,
    /// Whether session cookies require HTTPS.
    pub cookie_secure: bool,
    /// Validity window of the tag cache.
    pub tag_ttl: Duration,
    /// Cadence of the periodic tag refresh.
    pub tag_refresh_interval: Duration,
}

impl AppConfig {
    /// Resolve configuration from the environment.
    ///
    /// Malformed values are logged and replaced by the next fallback layer
    /// rather than aborting startup.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: parse_env("BIND_ADDR", DEFAULT_BIND_ADDR),
            offers_base_url: offers_base_url(),
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v != "0")
                .unwrap_or(true),
            tag_ttl: seconds_env("TAG_CACHE_TTL_SECONDS", DEFAULT_TAG_TTL),
            tag_refresh_interval: seconds_env(
                "TAG_REFRESH_INTERVAL_SECONDS",
                Duration::from_secs(DEFAULT_TAG_REFRESH_SECONDS),
            ),
        }
    }
}

/// `OFFERS_API_URL`, else `API_BASE_URL`, else the localhost default.
fn offers_base_url() -> Url {
    for key in ["OFFERS_API_URL", "API_BASE_URL"] {
        if let Ok(raw) = std::env::var(key) {
            match Url::parse(raw.trim()) {
                Ok(url) => return url,
                Err(error) => {
                    warn!(%key, %error, "ignoring malformed base URL");
                }
            }
        }
    }
    parse_default_base()
}

fn parse_default_base() -> Url {
    match Url::parse(DEFAULT_OFFERS_BASE) {
        Ok(url) => url,
        // The default literal always parses; this arm guards refactors.
        Err(error) => panic!("default offers base URL must parse: {error}"),
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Debug>(key: &str, default: &str) -> T
where
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_owned());
    match raw.trim().parse() {
        Ok(value) => value,
        Err(error) => {
            warn!(%key, %error, "ignoring malformed value, using default");
            match default.parse() {
                Ok(value) => value,
                Err(error) => panic!("default for {key} must parse: {error}"),
            }
        }
    }
}

fn seconds_env(key: &str, default: Duration) -> Duration {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
            _ => {
                warn!(%key, %raw, "ignoring malformed duration, using default");
                default
            }
        },
        Err(_) => default,
    }
}
