//! Suggestion requests
//!
//! Builds the form body sent to the suggestion endpoint, captures the
//! snapshot a response is checked against, and fetches with an abort token.

mod client;
mod request;

pub use client::HttpSuggestionClient;
pub use request::{
    ATTR_ANTIFORGERY_NAME, ATTR_ANTIFORGERY_VALUE, ATTR_CONFIG, ATTR_URL, SmartTextAreaConfig,
    Snapshot, SuggestionRequest,
};

use futures::future::BoxFuture;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while fetching a suggestion
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Superseded by a newer request or dropped suggestion
    #[error("Request aborted")]
    Aborted,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Where suggestions come from
///
/// `Ok(None)` means the endpoint had nothing to offer (e.g. a non-OK status).
/// Implementations must resolve to `Err(FetchError::Aborted)` once `abort`
/// is cancelled.
pub trait SuggestionSource: Send + Sync {
    fn fetch(
        &self,
        request: SuggestionRequest,
        abort: CancellationToken,
    ) -> BoxFuture<'static, Result<Option<String>, FetchError>>;
}
