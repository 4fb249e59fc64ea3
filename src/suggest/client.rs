//! HTTP suggestion client
//!
//! Posts the form-encoded request to the endpoint and returns the raw
//! response body as the suggestion.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::{FetchError, SuggestionRequest, SuggestionSource};
use crate::error::SmartError;

#[derive(Debug, Clone)]
pub struct HttpSuggestionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSuggestionClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SmartError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SmartError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self::with_client(client, url))
    }

    /// Share an existing client (and its connection pool)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

async fn post_form(
    client: reqwest::Client,
    url: String,
    fields: Vec<(String, String)>,
) -> Result<Option<String>, FetchError> {
    let response = client
        .post(&url)
        .form(&fields)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        log::debug!("Suggestion endpoint returned {}", status);
        return Ok(None);
    }

    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;
    Ok(Some(text))
}

impl SuggestionSource for HttpSuggestionClient {
    fn fetch(
        &self,
        request: SuggestionRequest,
        abort: CancellationToken,
    ) -> BoxFuture<'static, Result<Option<String>, FetchError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        let fields = request.form_fields();
        Box::pin(async move {
            tokio::select! {
                biased;
                _ = abort.cancelled() => Err(FetchError::Aborted),
                result = post_form(client, url, fields) => result,
            }
        })
    }
}
