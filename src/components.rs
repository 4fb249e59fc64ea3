//! Startup registration of smart components
//!
//! `Components::init` runs once per process; later calls hand back the same
//! registry. Text areas created through it share one HTTP client and one
//! runtime handle.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::runtime::Handle;

use crate::element::Attributes;
use crate::error::SmartError;
use crate::suggest::{ATTR_URL, HttpSuggestionClient};
use crate::textarea::{SmartTextArea, SmartTextAreaOptions};

static COMPONENTS: OnceLock<Components> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct ComponentSettings {
    /// Per-request timeout for suggestion fetches
    pub timeout: Option<Duration>,
    pub text_area: SmartTextAreaOptions,
}

#[derive(Debug)]
pub struct Components {
    client: reqwest::Client,
    runtime: Handle,
    settings: ComponentSettings,
}

impl Components {
    /// Initialize the registry, or return the one already initialized
    pub fn init(settings: ComponentSettings, runtime: Handle) -> Result<&'static Self, SmartError> {
        if let Some(existing) = COMPONENTS.get() {
            log::debug!("Smart components already initialized");
            return Ok(existing);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SmartError::Config(format!("HTTP client: {}", e)))?;

        Ok(COMPONENTS.get_or_init(|| Components {
            client,
            runtime,
            settings,
        }))
    }

    pub fn get() -> Option<&'static Self> {
        COMPONENTS.get()
    }

    pub fn settings(&self) -> &ComponentSettings {
        &self.settings
    }

    /// Create a smart text area posting to the `data-url` attribute
    pub fn text_area(&self, attributes: Attributes) -> Result<SmartTextArea, SmartError> {
        let url = attributes
            .get_non_empty(ATTR_URL)
            .ok_or(SmartError::MissingUrl)?;
        let source = HttpSuggestionClient::with_client(self.client.clone(), url);
        Ok(SmartTextArea::new(
            attributes,
            self.settings.text_area.clone(),
            self.runtime.clone(),
            Arc::new(source),
        ))
    }
}

#[cfg(test)]
#[path = "components_tests.rs"]
mod components_tests;
