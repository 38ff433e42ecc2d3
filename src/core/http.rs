//! HTTP utilities for Sleeper API communication

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

/// Public Sleeper API root.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Overrides [`SLEEPER_BASE_URL`] when set (mirrors, local fixtures).
pub const BASE_URL_ENV_VAR: &str = "SLEEPER_BASE_URL";

/// Headers sent with every request. Sleeper needs no authentication.
pub fn default_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("sleeper-bestball/", env!("CARGO_PKG_VERSION"))),
    );
    h
}

/// API root from `SLEEPER_BASE_URL`, else the public endpoint. Trailing
/// slashes are dropped so paths can be appended with `/`.
pub fn resolve_base_url() -> String {
    std::env::var(BASE_URL_ENV_VAR)
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| SLEEPER_BASE_URL.to_string())
}
