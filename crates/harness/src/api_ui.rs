//! API-UI integration: fetch a resource via the API and assert the same
//! logical state the UI is about to show.

use serde_json::Value;

use crate::api::ApiRequest;
use crate::error::{HarnessError, HarnessResult};

/// Snapshot of one API response used for cross-checking against the UI.
///
/// `json` is `Some` if and only if `body` parses as JSON; a parse
/// failure is not an error, the caller still gets `status` and `body`.
#[derive(Debug, Clone)]
pub struct ApiUiContext {
    pub status: u16,
    pub body: String,
    pub json: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMethod {
    #[default]
    Get,
    Post,
}

/// Options for [`fetch_via_api`]. The body is only sent for POST.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: FetchMethod,
    pub body: Option<Value>,
}

/// Expectations to run against an [`ApiUiContext`]. Absent fields are
/// not checked.
#[derive(Debug, Clone, Default)]
pub struct Expectations {
    pub expected_status: Option<u16>,
    pub body_should_contain: Option<String>,
}

/// Issue one request and capture status, raw body and best-effort JSON
/// as a single atomic snapshot.
pub async fn fetch_via_api<R: ApiRequest + ?Sized>(
    request: &R,
    path: &str,
    options: FetchOptions,
) -> HarnessResult<ApiUiContext> {
    let response = match options.method {
        FetchMethod::Get => request.get(path).await?,
        FetchMethod::Post => request.post(path, options.body.as_ref()).await?,
    };

    let body = response.text().to_string();
    let json = serde_json::from_str(&body).ok();

    Ok(ApiUiContext {
        status: response.status(),
        body,
        json,
    })
}

/// Validate a captured API response against the expectations. Checks run
/// in declared order (status, then body substring) and the first
/// violation is reported.
pub fn assert_api_and_ui_consistent(
    context: &ApiUiContext,
    expectations: &Expectations,
) -> HarnessResult<()> {
    if let Some(expected) = expectations.expected_status {
        if context.status != expected {
            return Err(HarnessError::StatusMismatch {
                actual: context.status,
                expected,
            });
        }
    }
    if let Some(needle) = &expectations.body_should_contain {
        if !context.body.contains(needle.as_str()) {
            return Err(HarnessError::BodyMissingContent(needle.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::json;

    use crate::api::ApiResponse;

    /// Canned-response capability for exercising the helper offline.
    struct FakeRequest {
        status: u16,
        body: String,
    }

    #[async_trait]
    impl ApiRequest for FakeRequest {
        async fn send(
            &self,
            _method: Method,
            _path: &str,
            _data: Option<&Value>,
        ) -> HarnessResult<ApiResponse> {
            Ok(ApiResponse::new(
                self.status,
                HashMap::new(),
                self.body.clone(),
            ))
        }
    }

    fn context(status: u16, body: &str) -> ApiUiContext {
        ApiUiContext {
            status,
            body: body.to_string(),
            json: None,
        }
    }

    #[tokio::test]
    async fn non_json_body_yields_no_json_but_keeps_status_and_body() {
        let request = FakeRequest {
            status: 200,
            body: "not json".to_string(),
        };
        let ctx = fetch_via_api(&request, "/", FetchOptions::default())
            .await
            .unwrap();
        assert_eq!(ctx.status, 200);
        assert_eq!(ctx.body, "not json");
        assert!(ctx.json.is_none());
    }

    #[tokio::test]
    async fn json_body_round_trips() {
        let request = FakeRequest {
            status: 200,
            body: r#"{"id":1,"title":"post"}"#.to_string(),
        };
        let ctx = fetch_via_api(&request, "/posts/1", FetchOptions::default())
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&ctx.body).unwrap();
        assert_eq!(ctx.json, Some(parsed));
    }

    #[test]
    fn default_fetch_method_is_get() {
        assert_eq!(FetchOptions::default().method, FetchMethod::Get);
    }

    #[test]
    fn matching_expectations_pass() {
        let ctx = context(200, "Welcome to the-internet");
        let expectations = Expectations {
            expected_status: Some(200),
            body_should_contain: Some("Welcome to the-internet".to_string()),
        };
        assert!(assert_api_and_ui_consistent(&ctx, &expectations).is_ok());
    }

    #[test]
    fn status_mismatch_names_both_values() {
        let ctx = context(404, "x");
        let expectations = Expectations {
            expected_status: Some(200),
            ..Default::default()
        };
        let err = assert_api_and_ui_consistent(&ctx, &expectations).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("200"));
    }

    #[test]
    fn missing_substring_names_the_needle() {
        let ctx = context(200, "abc");
        let expectations = Expectations {
            body_should_contain: Some("xyz".to_string()),
            ..Default::default()
        };
        let err = assert_api_and_ui_consistent(&ctx, &expectations).unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn status_is_checked_before_body() {
        let ctx = context(500, "nothing useful");
        let expectations = Expectations {
            expected_status: Some(200),
            body_should_contain: Some("xyz".to_string()),
        };
        let err = assert_api_and_ui_consistent(&ctx, &expectations).unwrap_err();
        assert!(matches!(err, HarnessError::StatusMismatch { .. }));
    }

    #[test]
    fn empty_expectations_always_pass() {
        let ctx = context(500, "");
        assert!(assert_api_and_ui_consistent(&ctx, &Expectations::default()).is_ok());
    }

    #[test]
    fn substring_check_is_case_sensitive() {
        let ctx = context(200, "login");
        let expectations = Expectations {
            body_should_contain: Some("Login".to_string()),
            ..Default::default()
        };
        assert!(assert_api_and_ui_consistent(&ctx, &expectations).is_err());
    }

    #[tokio::test]
    async fn post_forwards_optional_body() {
        // The fake ignores the payload; this exercises the POST path.
        let request = FakeRequest {
            status: 201,
            body: r#"{"id":101}"#.to_string(),
        };
        let options = FetchOptions {
            method: FetchMethod::Post,
            body: Some(json!({"title": "Test"})),
        };
        let ctx = fetch_via_api(&request, "/posts", options).await.unwrap();
        assert_eq!(ctx.status, 201);
        assert_eq!(ctx.json.as_ref().unwrap()["id"], 101);
    }
}
