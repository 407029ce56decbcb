//! Driver abstraction over browser control
//!
//! Page objects and tests talk to [`Driver`], not to the bridge, so a
//! fake driver can stand in for the browser in unit tests. Exactly one
//! production adapter exists: [`PlaywrightDriver`].

use std::time::Duration;

use async_trait::async_trait;

use crate::bridge::PlaywrightBridge;
use crate::error::HarnessResult;

/// Ceiling applied to navigation when the caller does not pass one.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolve a navigation target. Absolute URLs (scheme present) pass
/// through unchanged; anything else gets exactly one leading slash, no
/// matter how many the input had.
pub fn resolve_path(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("/{}", path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GotoOptions {
    pub timeout: Option<Duration>,
}

/// Browser-control capability. All operations suspend until the
/// underlying browser action completes or fails; failures propagate
/// unmodified, except that a missing text node reads as `""`.
#[async_trait]
pub trait Driver {
    async fn goto(&mut self, url: &str, options: GotoOptions) -> HarnessResult<()>;

    async fn click(&mut self, selector: &str) -> HarnessResult<()>;

    async fn fill(&mut self, selector: &str, value: &str) -> HarnessResult<()>;

    /// Text content of the first matching element; `""` when absent.
    async fn get_text(&mut self, selector: &str) -> HarnessResult<String>;

    async fn is_visible(&mut self, selector: &str) -> HarnessResult<bool>;
}

/// Production [`Driver`] over the Playwright bridge.
pub struct PlaywrightDriver {
    bridge: PlaywrightBridge,
}

impl PlaywrightDriver {
    pub fn new(bridge: PlaywrightBridge) -> Self {
        Self { bridge }
    }

    pub fn bridge_mut(&mut self) -> &mut PlaywrightBridge {
        &mut self.bridge
    }

    pub async fn close(self) -> HarnessResult<()> {
        self.bridge.close().await
    }
}

#[async_trait]
impl Driver for PlaywrightDriver {
    async fn goto(&mut self, url: &str, options: GotoOptions) -> HarnessResult<()> {
        let url = resolve_path(url);
        let timeout = options.timeout.unwrap_or(DEFAULT_NAVIGATION_TIMEOUT);
        self.bridge.goto(&url, timeout).await
    }

    async fn click(&mut self, selector: &str) -> HarnessResult<()> {
        self.bridge.click(selector).await
    }

    async fn fill(&mut self, selector: &str, value: &str) -> HarnessResult<()> {
        self.bridge.fill(selector, value).await
    }

    async fn get_text(&mut self, selector: &str) -> HarnessResult<String> {
        Ok(self.bridge.text_content(selector).await?.unwrap_or_default())
    }

    async fn is_visible(&mut self, selector: &str) -> HarnessResult<bool> {
        self.bridge.is_visible(selector).await
    }
}
