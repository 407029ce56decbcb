//! Login page objects for the demo app's `/login` form.

use async_trait::async_trait;

use super::{BasePage, PageObject};
use crate::driver::Driver;
use crate::error::HarnessResult;

const USERNAME_INPUT: &str = "#username";
const PASSWORD_INPUT: &str = "#password";
const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
const FLASH_MESSAGE: &str = "#flash";

/// Login page over the direct-page variant.
pub struct LoginPage {
    base: BasePage,
}

impl LoginPage {
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    pub async fn goto(&mut self, path: &str) -> HarnessResult<()> {
        self.base.goto(path).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> HarnessResult<()> {
        let page = self.base.page_mut();
        page.fill(USERNAME_INPUT, username).await?;
        page.fill(PASSWORD_INPUT, password).await?;
        page.click(SUBMIT_BUTTON).await
    }

    /// Text of the status flash region, `""` when it has no text.
    pub async fn flash_text(&mut self) -> HarnessResult<String> {
        Ok(self
            .base
            .page_mut()
            .text_content(FLASH_MESSAGE)
            .await?
            .unwrap_or_default())
    }

    pub async fn is_login_form_visible(&mut self) -> HarnessResult<bool> {
        self.base.page_mut().is_visible(USERNAME_INPUT).await
    }

    pub async fn close(self) -> HarnessResult<()> {
        self.base.close().await
    }
}

/// Login page over the driver-mediated variant. Generic over the driver
/// so tests can substitute a fake.
pub struct LoginPageWithDriver<D: Driver + Send> {
    driver: D,
}

impl<D: Driver + Send> LoginPageWithDriver<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> HarnessResult<()> {
        self.driver.fill(USERNAME_INPUT, username).await?;
        self.driver.fill(PASSWORD_INPUT, password).await?;
        self.driver.click(SUBMIT_BUTTON).await
    }

    pub async fn flash_text(&mut self) -> HarnessResult<String> {
        self.driver.get_text(FLASH_MESSAGE).await
    }

    pub async fn is_login_form_visible(&mut self) -> HarnessResult<bool> {
        self.driver.is_visible(USERNAME_INPUT).await
    }

    pub fn into_driver(self) -> D {
        self.driver
    }
}

#[async_trait]
impl<D: Driver + Send> PageObject for LoginPageWithDriver<D> {
    fn driver_mut(&mut self) -> &mut dyn Driver {
        &mut self.driver
    }

    fn base_selector(&self) -> &'static str {
        "#content"
    }
}
