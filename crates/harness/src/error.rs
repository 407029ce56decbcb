//! Error types for the harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("API status {actual} != expected {expected}")]
    StatusMismatch { actual: u16, expected: u16 },

    #[error("API body does not contain \"{0}\"")]
    BodyMissingContent(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("Bridge exited unexpectedly: {0}")]
    BridgeClosed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
