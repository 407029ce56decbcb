//! Shared support for the integration suites
//!
//! The suites under `tests/` exercise two public targets: the demo web
//! app (the-internet.herokuapp.com) through the Playwright bridge, and
//! JSONPlaceholder through the API client. Both need network access and
//! a local Playwright install, so every such test is gated behind
//! `WEBCHECK_E2E=1` and silently passes otherwise. Pure-logic coverage
//! lives in the harness crate's unit tests and runs unconditionally.

use webcheck_harness::{
    ApiClient, BasePage, BridgeConfig, Env, HarnessResult, PlaywrightBridge, PlaywrightDriver,
};

/// Initialize tracing once per test binary. Safe to call from every test.
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Whether the network/browser suites should run.
pub fn e2e_enabled() -> bool {
    std::env::var("WEBCHECK_E2E").map(|v| v == "1").unwrap_or(false)
}

/// Gate for network/browser tests. Returns `false` (after logging why)
/// when the suite should be skipped.
pub fn e2e_or_skip(test: &str) -> bool {
    init();
    if e2e_enabled() {
        true
    } else {
        eprintln!("skipping {}: set WEBCHECK_E2E=1 to run network/browser suites", test);
        false
    }
}

/// Client against the demo site itself (HTML endpoints).
pub fn site_client(env: &Env) -> HarnessResult<ApiClient> {
    ApiClient::new(env.base_url.clone(), env)
}

/// Client against the JSON API.
pub fn api_client(env: &Env) -> HarnessResult<ApiClient> {
    ApiClient::from_env(env)
}

fn bridge_config(env: &Env) -> BridgeConfig {
    BridgeConfig {
        base_url: env.base_url.clone(),
        action_timeout: env.action_timeout,
        ..Default::default()
    }
}

/// Fresh browser driver pointed at the configured UI base URL.
pub async fn ui_driver(env: &Env) -> HarnessResult<PlaywrightDriver> {
    let bridge = PlaywrightBridge::launch(bridge_config(env)).await?;
    Ok(PlaywrightDriver::new(bridge))
}

/// Fresh direct-page handle pointed at the configured UI base URL.
pub async fn ui_page(env: &Env) -> HarnessResult<BasePage> {
    let bridge = PlaywrightBridge::launch(bridge_config(env)).await?;
    Ok(BasePage::new(bridge))
}

/// Credentials for the demo app's login form.
pub mod users {
    pub const VALID_USERNAME: &str = "tomsmith";
    pub const VALID_PASSWORD: &str = "SuperSecretPassword!";
    pub const INVALID_USERNAME: &str = "invalid";
    pub const INVALID_PASSWORD: &str = "invalid";
}
