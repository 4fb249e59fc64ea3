use std::collections::BTreeMap;

use super::TextInput;

/// String attributes of an element (`data-url`, `data-config`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Non-empty attribute value, matching how an empty attribute reads as unset
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// The element rendered immediately before a smart text area in markup
#[derive(Debug)]
pub enum Sibling {
    Input(TextInput),
    Other(String),
}

impl Sibling {
    /// Tag name used in error messages
    pub fn tag_name(&self) -> String {
        match self {
            Sibling::Input(input) => input.kind().tag_name().to_string(),
            Sibling::Other(tag) => tag.clone(),
        }
    }
}
