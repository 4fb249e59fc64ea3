use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::element::{Attributes, TextAreaFacade, chars};

pub const ATTR_URL: &str = "data-url";
pub const ATTR_CONFIG: &str = "data-config";
pub const ATTR_ANTIFORGERY_NAME: &str = "data-antiforgery-name";
pub const ATTR_ANTIFORGERY_VALUE: &str = "data-antiforgery-value";

/// Hints for the inference backend, sent as the `config` field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartTextAreaConfig {
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub user_phrases: Vec<String>,
}

impl SmartTextAreaConfig {
    /// JSON form used as the `data-config` attribute value
    pub fn to_attribute(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// State of the text area when a request started
///
/// A response is only applied while value and caret still match.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub text_area_value: String,
    pub cursor_position: usize,
    pub abort: CancellationToken,
}

impl Snapshot {
    pub fn capture(text_area: &TextAreaFacade, abort: CancellationToken) -> Self {
        Self {
            text_area_value: text_area.value(),
            cursor_position: text_area.selection_start(),
            abort,
        }
    }

    pub fn matches(&self, text_area: &TextAreaFacade) -> bool {
        self.text_area_value == text_area.value()
            && self.cursor_position == text_area.selection_start()
    }

    pub fn text_before(&self) -> &str {
        chars::before(&self.text_area_value, self.cursor_position)
    }

    pub fn text_after(&self) -> &str {
        chars::after(&self.text_area_value, self.cursor_position)
    }
}

/// Body of a suggestion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub text_before: String,
    pub text_after: String,
    pub config: String,
    /// Antiforgery field name and token, when the host requires one
    pub antiforgery: Option<(String, String)>,
}

impl SuggestionRequest {
    /// Build the request for `snapshot` from the component's attributes
    pub fn from_snapshot(snapshot: &Snapshot, attributes: &Attributes) -> Self {
        let antiforgery = attributes.get_non_empty(ATTR_ANTIFORGERY_NAME).map(|name| {
            let value = attributes.get(ATTR_ANTIFORGERY_VALUE).unwrap_or_default();
            (name.to_string(), value.to_string())
        });
        Self {
            text_before: snapshot.text_before().to_string(),
            text_after: snapshot.text_after().to_string(),
            config: attributes.get(ATTR_CONFIG).unwrap_or_default().to_string(),
            antiforgery,
        }
    }

    /// Fields in the order they are form-encoded
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("textBefore".to_string(), self.text_before.clone()),
            ("textAfter".to_string(), self.text_after.clone()),
            ("config".to_string(), self.config.clone()),
        ];
        if let Some((name, value)) = &self.antiforgery {
            fields.push((name.clone(), value.clone()));
        }
        fields
    }
}
