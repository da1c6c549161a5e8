use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    Chromium(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("timeout: {0}")]
    Timeout(String),
}
