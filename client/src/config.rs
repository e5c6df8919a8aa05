//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so the API location
//! and request timeout are baked in at compile time from `DOCBOOK_API_URL` and
//! `DOCBOOK_API_TIMEOUT_SECS`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 5 * 60;

/// Local-storage key holding the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access";
/// Local-storage key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh";
/// Local-storage key holding the serialized [`crate::net::types::User`].
pub const USER_KEY: &str = "user";

/// Resolved API settings shared by every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute base URL, always ending in `/`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build config from the compile-time environment.
    pub fn from_build_env() -> Self {
        Self::from_parts(option_env!("DOCBOOK_API_URL"), option_env!("DOCBOOK_API_TIMEOUT_SECS"))
    }

    fn from_parts(url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let base_url = normalize_base_url(url.filter(|u| !u.trim().is_empty()).unwrap_or(DEFAULT_API_URL));
        let timeout_secs = timeout_secs
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);
        Self { base_url, timeout: Duration::from_secs(timeout_secs) }
    }

    /// Join an endpoint path (e.g. `"doctors/"`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_parts(None, None)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') { trimmed.to_owned() } else { format!("{trimmed}/") }
}
