//! Filter configuration descriptors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::operation::Operation;
use super::values::FilterDateRange;
use crate::errors::ConfigError;

/// One selectable choice in a command filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
            icon: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Selection cardinality of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Selecting replaces the previous value (radio semantics)
    #[default]
    Single,
    /// Selecting accumulates values (checkbox semantics)
    Multi,
}

/// Resource scope of a tag hierarchy (e.g. "patient_tag").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResource(String);

impl TagResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, time-relative date range shortcut (e.g. "last 7 days").
///
/// The range is recomputed against the caller-supplied "today" at every
/// selection, never memoized.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeOption {
    pub label: String,
    pub range_fn: fn(NaiveDate) -> FilterDateRange,
    pub count: Option<u32>,
}

impl DateRangeOption {
    pub fn new(label: impl Into<String>, range_fn: fn(NaiveDate) -> FilterDateRange) -> Self {
        Self {
            label: label.into(),
            range_fn,
            count: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Compute the concrete range relative to `today`.
    pub fn range(&self, today: NaiveDate) -> FilterDateRange {
        (self.range_fn)(today)
    }
}

/// Discriminates what a filter's value domain is and how it is edited.
///
/// A tag filter structurally requires its resource; the "tag filter without a
/// resource" misconfiguration cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    /// Categorical filter over a static option list
    Command {
        options: Vec<FilterOption>,
        /// Custom operation set; defaults to a constant "is" when absent
        operations: Option<Vec<Operation>>,
    },
    /// Hierarchical tag picker backed by a tag lookup resource
    Tag { resource: TagResource },
    /// Date range picker with presets and a custom range
    Date { presets: Option<Vec<DateRangeOption>> },
}

impl FilterKind {
    /// Returns the kind name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Command { .. } => "choice",
            FilterKind::Tag { .. } => "tag",
            FilterKind::Date { .. } => "date range",
        }
    }
}

/// Immutable descriptor of one filterable field.
///
/// `key` doubles as the query-parameter name; `operation_key`, when present,
/// is the secondary parameter the chosen operation is persisted under.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub key: String,
    pub label: String,
    pub mode: FilterMode,
    pub kind: FilterKind,
    pub operation_key: Option<String>,
    pub icon: Option<String>,
    pub placeholder: Option<String>,
    pub disable_clear: bool,
}

impl FilterConfig {
    fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: FilterKind,
    ) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(Self {
            key,
            label: label.into(),
            mode: FilterMode::default(),
            kind,
            operation_key: None,
            icon: None,
            placeholder: None,
            disable_clear: false,
        })
    }

    /// Create a categorical filter over a static option list.
    pub fn command(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Result<Self, ConfigError> {
        let config = Self::new(
            key,
            label,
            FilterKind::Command {
                options,
                operations: None,
            },
        )?;

        if let FilterKind::Command { options, .. } = &config.kind {
            for (index, option) in options.iter().enumerate() {
                if options[..index].iter().any(|o| o.value == option.value) {
                    return Err(ConfigError::DuplicateOption {
                        key: config.key.clone(),
                        value: option.value.clone(),
                    });
                }
            }
        }

        Ok(config)
    }

    /// Create a tag hierarchy filter scoped to a lookup resource.
    pub fn tag(
        key: impl Into<String>,
        label: impl Into<String>,
        resource: TagResource,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(key, label, FilterKind::Tag { resource })?;
        // Tag selections accumulate by default
        config.mode = FilterMode::Multi;
        Ok(config)
    }

    /// Create a date range filter with the default preset list.
    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(key, label, FilterKind::Date { presets: None })
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_operation_key(mut self, operation_key: impl Into<String>) -> Self {
        self.operation_key = Some(operation_key.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_disable_clear(mut self) -> Self {
        self.disable_clear = true;
        self
    }

    /// Replace the default operation set of a command filter.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Result<Self, ConfigError> {
        if operations.is_empty() {
            return Err(ConfigError::EmptyOperationSet { key: self.key });
        }
        match &mut self.kind {
            FilterKind::Command {
                operations: slot, ..
            } => {
                *slot = Some(operations);
                Ok(self)
            }
            _ => Err(ConfigError::KindMismatch {
                key: self.key,
                expected: "command".to_string(),
            }),
        }
    }

    /// Replace the default preset list of a date filter.
    pub fn with_presets(mut self, presets: Vec<DateRangeOption>) -> Result<Self, ConfigError> {
        match &mut self.kind {
            FilterKind::Date { presets: slot } => {
                *slot = Some(presets);
                Ok(self)
            }
            _ => Err(ConfigError::KindMismatch {
                key: self.key,
                expected: "date".to_string(),
            }),
        }
    }

    /// The static option list, empty for tag and date filters.
    pub fn options(&self) -> &[FilterOption] {
        match &self.kind {
            FilterKind::Command { options, .. } => options,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_command_filter_construction() {
        let filter = FilterConfig::command(
            "status",
            "Status",
            vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("inactive", "Inactive"),
            ],
        )
        .unwrap();

        assert_eq!(filter.key, "status");
        assert_eq!(filter.mode, FilterMode::Single);
        assert_eq!(filter.options().len(), 2);
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = FilterConfig::date("", "Admitted");
        assert_matches!(result, Err(ConfigError::EmptyKey));
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let result = FilterConfig::command(
            "status",
            "Status",
            vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("active", "Also active"),
            ],
        );
        assert_matches!(result, Err(ConfigError::DuplicateOption { .. }));
    }

    #[test]
    fn test_tag_filter_defaults_to_multi() {
        let filter =
            FilterConfig::tag("tags", "Tags", TagResource::new("patient_tag")).unwrap();
        assert_eq!(filter.mode, FilterMode::Multi);
    }

    #[test]
    fn test_custom_operations_only_on_command_filters() {
        let result = FilterConfig::date("admitted", "Admitted")
            .unwrap()
            .with_operations(vec![Operation::is()]);
        assert_matches!(result, Err(ConfigError::KindMismatch { .. }));
    }

    #[test]
    fn test_empty_custom_operations_rejected() {
        let result = FilterConfig::command("status", "Status", vec![])
            .unwrap()
            .with_operations(vec![]);
        assert_matches!(result, Err(ConfigError::EmptyOperationSet { .. }));
    }
}
