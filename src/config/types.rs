// Configuration type definitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::components::ComponentSettings;
use crate::display::OverlayOptions;
use crate::element::Attributes;
use crate::suggest::{
    ATTR_ANTIFORGERY_NAME, ATTR_ANTIFORGERY_VALUE, ATTR_CONFIG, ATTR_URL, SmartTextAreaConfig,
};
use crate::textarea::{ATTR_INLINE_SUGGESTIONS, SmartTextAreaOptions};

/// Suggestion endpoint section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub antiforgery_name: Option<String>,
    pub antiforgery_value: Option<String>,
    pub timeout_ms: Option<u64>,
}

/// Suggestion behavior section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    pub debounce_ms: u64,
    /// Force inline (`true`) or overlay (`false`) display
    pub inline: Option<bool>,
    pub user_role: Option<String>,
    pub user_phrases: Vec<String>,
    pub parameters: Option<String>,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        SuggestionsConfig {
            debounce_ms: 350,
            inline: None,
            user_role: None,
            user_phrases: Vec::new(),
            parameters: None,
        }
    }
}

/// Display section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub touch: bool,
    /// Defaults to the terminal width when unset
    pub viewport_width: Option<f64>,
    pub jitter_px: f64,
    pub max_overlay_lines: usize,
    pub prefix_lookback: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            touch: false,
            viewport_width: None,
            jitter_px: 10.0,
            max_overlay_lines: 2,
            prefix_lookback: 20,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub suggestions: SuggestionsConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Attributes of the smart text area element this config describes
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if let Some(url) = &self.endpoint.url {
            attributes.set(ATTR_URL, url.as_str());
        }
        let hints = SmartTextAreaConfig {
            parameters: self.suggestions.parameters.clone(),
            user_role: self.suggestions.user_role.clone(),
            user_phrases: self.suggestions.user_phrases.clone(),
        };
        attributes.set(ATTR_CONFIG, hints.to_attribute());
        if let Some(name) = &self.endpoint.antiforgery_name {
            attributes.set(ATTR_ANTIFORGERY_NAME, name.as_str());
            attributes.set(
                ATTR_ANTIFORGERY_VALUE,
                self.endpoint.antiforgery_value.clone().unwrap_or_default(),
            );
        }
        if let Some(inline) = self.suggestions.inline {
            attributes.set(ATTR_INLINE_SUGGESTIONS, inline.to_string());
        }
        attributes
    }

    /// Registry settings; `viewport_width` is used unless the config sets one
    pub fn component_settings(&self, viewport_width: f64, rem: f64) -> ComponentSettings {
        let overlay = OverlayOptions {
            viewport_width: self.display.viewport_width.unwrap_or(viewport_width),
            rem,
            jitter_px: self.display.jitter_px,
            max_lines: self.display.max_overlay_lines,
            prefix_lookback: self.display.prefix_lookback,
        };
        ComponentSettings {
            timeout: self.endpoint.timeout_ms.map(Duration::from_millis),
            text_area: SmartTextAreaOptions {
                debounce: Duration::from_millis(self.suggestions.debounce_ms),
                touch: self.display.touch,
                overlay,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Missing sections and fields fall back to defaults
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_missing_fields_use_defaults(
            include_section in prop::bool::ANY,
            include_debounce in prop::bool::ANY,
            debounce in 1u64..5000,
        ) {
            let toml_content = match (include_section, include_debounce) {
                (false, _) => String::new(),
                (true, false) => "[suggestions]\nuser_role = \"HR\"\n".to_string(),
                (true, true) => format!("[suggestions]\ndebounce_ms = {}\n", debounce),
            };

            let config: Result<Config, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_ok(), "Failed to parse: {}", toml_content);
            let config = config.unwrap();

            let expected = if include_section && include_debounce { debounce } else { 350 };
            prop_assert_eq!(config.suggestions.debounce_ms, expected);
            prop_assert_eq!(config.display, DisplayConfig::default());
        }

        #[test]
        fn prop_inline_setting_becomes_attribute(inline in prop::option::of(prop::bool::ANY)) {
            let config = Config {
                suggestions: SuggestionsConfig { inline, ..SuggestionsConfig::default() },
                ..Config::default()
            };
            let attributes = config.attributes();

            let expected = inline.map(|b| b.to_string());
            prop_assert_eq!(attributes.get(ATTR_INLINE_SUGGESTIONS), expected.as_deref());
        }
    }

    #[test]
    fn test_attributes_carry_endpoint_and_hints() {
        let config = Config {
            endpoint: EndpointConfig {
                url: Some("http://localhost:5000/suggest".to_string()),
                antiforgery_name: Some("token".to_string()),
                antiforgery_value: None,
                timeout_ms: None,
            },
            suggestions: SuggestionsConfig {
                user_role: Some("Support agent".to_string()),
                ..SuggestionsConfig::default()
            },
            ..Config::default()
        };

        let attributes = config.attributes();

        assert_eq!(attributes.get(ATTR_URL), Some("http://localhost:5000/suggest"));
        assert_eq!(attributes.get(ATTR_ANTIFORGERY_NAME), Some("token"));
        assert_eq!(attributes.get(ATTR_ANTIFORGERY_VALUE), Some(""));
        assert_eq!(
            attributes.get(ATTR_CONFIG),
            Some(r#"{"parameters":null,"userRole":"Support agent","userPhrases":[]}"#)
        );
    }

    #[test]
    fn test_component_settings_prefers_configured_viewport() {
        let mut config = Config::default();
        let settings = config.component_settings(80.0, 1.0);
        assert_eq!(settings.text_area.overlay.viewport_width, 80.0);
        assert_eq!(settings.text_area.debounce, Duration::from_millis(350));
        assert_eq!(settings.timeout, None);

        config.display.viewport_width = Some(120.0);
        config.endpoint.timeout_ms = Some(2500);
        let settings = config.component_settings(80.0, 1.0);
        assert_eq!(settings.text_area.overlay.viewport_width, 120.0);
        assert_eq!(settings.timeout, Some(Duration::from_millis(2500)));
    }
}
