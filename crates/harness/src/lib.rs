//! Webcheck test harness
//!
//! Cross-checks a JSON API and the rendered UI views of the same
//! resource: fetch via HTTP, assert status/content, then drive a real
//! browser to the same place and assert the page agrees. Browser control
//! goes through a persistent Playwright subprocess speaking a JSON line
//! protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          test                                │
//! │   ├── fetch_via_api(request, path) -> ApiUiContext           │
//! │   ├── assert_api_and_ui_consistent(ctx, expectations)        │
//! │   └── page objects                                           │
//! │         ├── BasePage / LoginPage          (page directly)    │
//! │         └── PageObject / LoginPageWithDriver (via Driver)    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Driver (trait)                                              │
//! │    └── PlaywrightDriver                                      │
//! │          └── PlaywrightBridge ── ndjson ──> node/playwright  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ApiRequest (trait)                                          │
//! │    └── ApiClient (reqwest)                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod api_ui;
pub mod bridge;
pub mod config;
pub mod constants;
pub mod data;
pub mod driver;
pub mod error;
pub mod logger;
pub mod pages;

pub use api::{ApiClient, ApiRequest, ApiResponse};
pub use api_ui::{
    assert_api_and_ui_consistent, fetch_via_api, ApiUiContext, Expectations, FetchMethod,
    FetchOptions,
};
pub use bridge::{BridgeConfig, BrowserKind, PlaywrightBridge};
pub use config::Env;
pub use driver::{resolve_path, Driver, GotoOptions, PlaywrightDriver};
pub use error::{HarnessError, HarnessResult};
pub use logger::{logger, LogLevel, Logger};
pub use pages::{BasePage, LoginPage, LoginPageWithDriver, PageObject};
