//! Comparison operations applied to filter values

use serde::{Deserialize, Serialize};

/// A comparison semantic applied to a filter's selection.
///
/// `value` is the wire-level token persisted under a filter's operation key;
/// `label` is the display string. When `value` is absent the label doubles as
/// the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub value: Option<String>,
    pub label: String,
}

impl Operation {
    /// Create an operation whose label doubles as the wire token.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }

    /// Create an operation with a distinct wire token and display label.
    pub fn with_value(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: label.into(),
        }
    }

    /// The wire token: `value` if present, otherwise the label.
    pub fn token(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.label)
    }

    /// Match an incoming token against this operation, value first, label as
    /// fallback.
    pub fn matches(&self, token: &str) -> bool {
        match &self.value {
            Some(value) => value == token || self.label == token,
            None => self.label == token,
        }
    }

    // The shared operation vocabulary.

    pub fn is() -> Self {
        Self::new("is")
    }

    pub fn is_on() -> Self {
        Self::with_value("is_on", "is on")
    }

    pub fn between() -> Self {
        Self::with_value("b/w", "between")
    }

    pub fn after() -> Self {
        Self::new("after")
    }

    pub fn before() -> Self {
        Self::new("before")
    }

    pub fn includes() -> Self {
        Self::new("includes")
    }

    pub fn has_all_of() -> Self {
        Self::with_value("has_all_of", "has all of")
    }

    pub fn has_any_of() -> Self {
        Self::with_value("has_any_of", "has any of")
    }
}
