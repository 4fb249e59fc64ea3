use thiserror::Error;

/// Custom error types for smart-textarea
#[derive(Debug, Error)]
pub enum SmartError {
    #[error("smart-textarea must be rendered immediately after a textarea element (found {0})")]
    NotAfterTextArea(String),

    #[error("Missing suggestion endpoint: set data-url or [endpoint] url in config")]
    MissingUrl,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
