//! Environment-driven configuration
//!
//! Single source of config for the suite. Every field has a documented
//! default and a `WEBCHECK_*` environment variable override.

use std::time::Duration;

/// Resolved configuration values, read once per test via [`Env::from_env`].
#[derive(Debug, Clone)]
pub struct Env {
    /// Base URL for UI navigation (`WEBCHECK_BASE_URL`)
    pub base_url: String,

    /// Base URL for API calls (`WEBCHECK_API_BASE_URL`)
    pub api_base_url: String,

    /// Navigation timeout (`WEBCHECK_NAV_TIMEOUT_MS`)
    pub navigation_timeout: Duration,

    /// Action timeout for clicks, fills and HTTP requests
    /// (`WEBCHECK_ACTION_TIMEOUT_MS`)
    pub action_timeout: Duration,

    /// Whether we are running under CI (`CI` set and non-empty)
    pub is_ci: bool,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            base_url: "https://the-internet.herokuapp.com".to_string(),
            api_base_url: "https://jsonplaceholder.typicode.com".to_string(),
            navigation_timeout: Duration::from_millis(60_000),
            action_timeout: Duration::from_millis(30_000),
            is_ci: false,
        }
    }
}

impl Env {
    /// Read configuration from the process environment, falling back to
    /// defaults for unset or malformed values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("WEBCHECK_BASE_URL").unwrap_or(defaults.base_url),
            api_base_url: std::env::var("WEBCHECK_API_BASE_URL").unwrap_or(defaults.api_base_url),
            navigation_timeout: millis_var("WEBCHECK_NAV_TIMEOUT_MS")
                .unwrap_or(defaults.navigation_timeout),
            action_timeout: millis_var("WEBCHECK_ACTION_TIMEOUT_MS")
                .unwrap_or(defaults.action_timeout),
            is_ci: std::env::var("CI").map(|v| !v.is_empty()).unwrap_or(false),
        }
    }
}

fn millis_var(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
}
