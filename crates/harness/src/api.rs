//! HTTP request capability
//!
//! The API side of every check goes through [`ApiRequest`], a capability
//! trait with one production implementation ([`ApiClient`], reqwest).
//! Responses are captured eagerly into an [`ApiResponse`] snapshot so a
//! test never has to re-fetch to read the body twice.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::config::Env;
use crate::driver::resolve_path;
use crate::error::HarnessResult;

/// One fully-read HTTP response: status, lowercase header map, body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: String) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header map keyed by lowercase header name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON. Errors on invalid JSON; callers that want
    /// parse tolerance go through [`crate::api_ui::fetch_via_api`].
    pub fn json(&self) -> HarnessResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Capability trait for issuing HTTP requests against the API base URL.
/// `Sync` so a shared reference can issue requests from any test task.
#[async_trait]
pub trait ApiRequest: Sync {
    /// Issue a request. `data` is serialized as a JSON body when present.
    async fn send(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> HarnessResult<ApiResponse>;

    async fn get(&self, path: &str) -> HarnessResult<ApiResponse> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, data: Option<&Value>) -> HarnessResult<ApiResponse> {
        self.send(Method::POST, path, data).await
    }

    async fn put(&self, path: &str, data: Option<&Value>) -> HarnessResult<ApiResponse> {
        self.send(Method::PUT, path, data).await
    }

    async fn patch(&self, path: &str, data: Option<&Value>) -> HarnessResult<ApiResponse> {
        self.send(Method::PATCH, path, data).await
    }

    async fn delete(&self, path: &str) -> HarnessResult<ApiResponse> {
        self.send(Method::DELETE, path, None).await
    }
}

/// Production [`ApiRequest`] implementation over reqwest.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` with the configured action
    /// timeout applied to every request.
    pub fn new(base_url: impl Into<String>, env: &Env) -> HarnessResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(env.action_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Client against the configured API base URL.
    pub fn from_env(env: &Env) -> HarnessResult<Self> {
        Self::new(env.api_base_url.clone(), env)
    }

    /// Absolute URLs pass through; relative paths join the base URL.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), resolve_path(path))
        }
    }
}

#[async_trait]
impl ApiRequest for ApiClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
    ) -> HarnessResult<ApiResponse> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, HashMap::new(), body.to_string())
    }

    #[test]
    fn ok_reflects_2xx_range() {
        assert!(response(200, "").ok());
        assert!(response(204, "").ok());
        assert!(!response(301, "").ok());
        assert!(!response(404, "").ok());
    }

    #[test]
    fn json_parses_valid_body() {
        let value = response(200, r#"{"id":1}"#).json().unwrap();
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn json_errors_on_invalid_body() {
        assert!(response(200, "<html>").json().is_err());
    }

    #[test]
    fn url_joins_relative_and_passes_absolute() {
        let env = Env::default();
        let client = ApiClient::new("https://api.example.com/", &env).unwrap();
        assert_eq!(client.url("posts"), "https://api.example.com/posts");
        assert_eq!(client.url("/posts/1"), "https://api.example.com/posts/1");
        assert_eq!(client.url("https://other.example.com/x"), "https://other.example.com/x");
    }
}
