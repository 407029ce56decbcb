//! API-UI integration: ensure API and UI stay in sync.
//!
//! Mechanism: fetch via API, assert expected status/content, then open
//! the same resource in the browser and assert the UI shows the same
//! logical state. Gated behind `WEBCHECK_E2E=1`.

use serde_json::json;
use webcheck_e2e::{e2e_or_skip, site_client, ui_driver};
use webcheck_harness::{
    assert_api_and_ui_consistent, fetch_via_api, logger, Driver, Env, Expectations, FetchOptions,
    GotoOptions, LoginPageWithDriver, PageObject,
};

#[tokio::test]
async fn root_content_matches_between_api_and_ui() {
    if !e2e_or_skip("root_content_matches_between_api_and_ui") {
        return;
    }
    let env = Env::from_env();
    let client = site_client(&env).unwrap();
    let log = logger(Some("api-ui"));

    let context = fetch_via_api(&client, "/", FetchOptions::default())
        .await
        .unwrap();
    assert_api_and_ui_consistent(
        &context,
        &Expectations {
            expected_status: Some(200),
            body_should_contain: Some("Welcome to the-internet".to_string()),
        },
    )
    .unwrap();
    log.info("API / OK", &[json!({ "status": context.status })]);

    let mut driver = ui_driver(&env).await.unwrap();
    driver.goto("/", GotoOptions::default()).await.unwrap();
    let body_text = driver.get_text("body").await.unwrap();
    assert!(body_text.contains("Welcome to the-internet"));
    log.info("UI / matches API content", &[]);

    driver.close().await.unwrap();
}

#[tokio::test]
async fn login_resource_agrees_between_api_and_ui() {
    if !e2e_or_skip("login_resource_agrees_between_api_and_ui") {
        return;
    }
    let env = Env::from_env();
    let client = site_client(&env).unwrap();
    let log = logger(Some("api-ui"));

    let context = fetch_via_api(&client, "/login", FetchOptions::default())
        .await
        .unwrap();
    assert_api_and_ui_consistent(
        &context,
        &Expectations {
            expected_status: Some(200),
            body_should_contain: Some("Login".to_string()),
        },
    )
    .unwrap();
    log.info("API /login OK", &[json!({ "status": context.status })]);

    let driver = ui_driver(&env).await.unwrap();
    let mut page = LoginPageWithDriver::new(driver);
    page.goto("/login").await.unwrap();
    assert!(page.is_login_form_visible().await.unwrap());
    log.info("UI login form visible after API check", &[]);

    page.into_driver().close().await.unwrap();
}
