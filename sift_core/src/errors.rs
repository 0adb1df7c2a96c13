//! Error types for filter configuration, state transitions and tag lookups

use std::fmt;

/// Errors in static filter configuration.
///
/// These are programmer errors in caller-authored `FilterConfig` data and are
/// surfaced when the configuration is constructed, not at interaction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A filter was declared with an empty key
    EmptyKey,
    /// Two filters share the same key
    DuplicateKey { key: String },
    /// A command filter declares the same option value twice
    DuplicateOption { key: String, value: String },
    /// A custom operation list was supplied but is empty
    EmptyOperationSet { key: String },
    /// A builder method was applied to a filter kind it does not support
    KindMismatch { key: String, expected: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyKey => {
                write!(f, "Filter key must not be empty")
            }
            ConfigError::DuplicateKey { key } => {
                write!(f, "Duplicate filter key '{}'", key)
            }
            ConfigError::DuplicateOption { key, value } => {
                write!(f, "Filter '{}' declares option value '{}' twice", key, value)
            }
            ConfigError::EmptyOperationSet { key } => {
                write!(f, "Filter '{}' declares an empty custom operation list", key)
            }
            ConfigError::KindMismatch { key, expected } => {
                write!(f, "Filter '{}' is not a {} filter", key, expected)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the filter state store at interaction time.
#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    /// The named filter is not part of the current configuration
    UnknownFilter { key: String },
    /// The supplied values do not match the filter's kind
    ValueShapeMismatch {
        key: String,
        expected: String,
        got: String,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnknownFilter { key } => {
                write!(f, "No filter configured for key '{}'", key)
            }
            StateError::ValueShapeMismatch { key, expected, got } => {
                write!(
                    f,
                    "Filter '{}' expects {} values but received {} values",
                    key, expected, got
                )
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Errors raised by a tag source while fetching tag hierarchies.
#[derive(Debug, Clone, PartialEq)]
pub enum TagLookupError {
    /// The lookup backend failed
    Lookup { resource: String, message: String },
    /// Children were requested for a tag that has none
    NotAGroup { id: String },
}

impl fmt::Display for TagLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagLookupError::Lookup { resource, message } => {
                write!(f, "Tag lookup for resource '{}' failed: {}", resource, message)
            }
            TagLookupError::NotAGroup { id } => {
                write!(f, "Tag '{}' has no children to load", id)
            }
        }
    }
}

impl std::error::Error for TagLookupError {}
