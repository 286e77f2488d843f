use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out after {timeout_secs}s waiting for element: {selector}")]
    ElementWait { selector: String, timeout_secs: u64 },

    #[error("Delivery failed with status {status}: {body}")]
    Delivery { status: u16, body: String },
}

impl AppError {
    /// Wraps an error raised by the browser automation layer.
    pub fn browser(err: impl std::fmt::Display) -> Self {
        AppError::Browser(err.to_string())
    }
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
