//! Page objects
//!
//! Two variants over the same role, "a page the test can navigate to":
//! [`BasePage`] holds the bridge page directly, while [`PageObject`]
//! implementors go through a [`Driver`] and can be unit-tested against a
//! fake one.

mod login;

pub use login::{LoginPage, LoginPageWithDriver};

use async_trait::async_trait;

use crate::bridge::PlaywrightBridge;
use crate::driver::{resolve_path, Driver, GotoOptions, DEFAULT_NAVIGATION_TIMEOUT};
use crate::error::HarnessResult;

/// Direct-page variant: owns the bridge page outright.
pub struct BasePage {
    page: PlaywrightBridge,
}

impl BasePage {
    pub fn new(page: PlaywrightBridge) -> Self {
        Self { page }
    }

    /// Navigate to a path (relative to the base URL) or full URL.
    pub async fn goto(&mut self, path: &str) -> HarnessResult<()> {
        self.page.goto(&resolve_path(path), DEFAULT_NAVIGATION_TIMEOUT).await
    }

    pub fn page_mut(&mut self) -> &mut PlaywrightBridge {
        &mut self.page
    }

    pub async fn close(self) -> HarnessResult<()> {
        self.page.close().await
    }
}

/// Driver-mediated variant: navigation delegates to the driver, and each
/// page names the selector anchoring its root in the DOM (subclasses use
/// it for scoping; nothing enforces it generically).
#[async_trait]
pub trait PageObject {
    fn driver_mut(&mut self) -> &mut dyn Driver;

    fn base_selector(&self) -> &'static str;

    async fn goto(&mut self, path: &str) -> HarnessResult<()> {
        let url = resolve_path(path);
        self.driver_mut().goto(&url, GotoOptions::default()).await
    }
}
