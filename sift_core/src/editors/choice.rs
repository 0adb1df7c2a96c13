//! Categorical option editor with live search and single/multi toggling

use crate::errors::ConfigError;
use crate::filter::{FilterConfig, FilterKind, FilterMode, FilterOption};

/// Toggle an option value within a selection.
///
/// Multi mode appends a missing value and removes a present one, so toggling
/// twice always restores the original set. Single mode replaces the whole
/// selection (or empties it when the value was already chosen), keeping the
/// selection a one-element list at most.
pub fn toggle_choice(mode: FilterMode, selected: &[String], value: &str) -> Vec<String> {
    match mode {
        FilterMode::Multi => {
            if selected.iter().any(|v| v == value) {
                selected.iter().filter(|v| *v != value).cloned().collect()
            } else {
                let mut next = selected.to_vec();
                next.push(value.to_string());
                next
            }
        }
        FilterMode::Single => {
            if selected.iter().any(|v| v == value) {
                Vec::new()
            } else {
                vec![value.to_string()]
            }
        }
    }
}

/// Headless editor over a command filter's option list.
pub struct ChoiceEditor<'a> {
    options: &'a [FilterOption],
    mode: FilterMode,
    search: String,
}

impl<'a> ChoiceEditor<'a> {
    pub fn new(filter: &'a FilterConfig) -> Result<Self, ConfigError> {
        match &filter.kind {
            FilterKind::Command { options, .. } => Ok(Self {
                options,
                mode: filter.mode,
                search: String::new(),
            }),
            _ => Err(ConfigError::KindMismatch {
                key: filter.key.clone(),
                expected: "command".to_string(),
            }),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Options whose label contains the search text, case-insensitively. An
    /// empty search shows everything.
    pub fn visible_options(&self) -> Vec<&'a FilterOption> {
        if self.search.is_empty() {
            return self.options.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Toggle an option against a selection using this editor's mode.
    pub fn toggle(&self, selected: &[String], value: &str) -> Vec<String> {
        toggle_choice(self.mode, selected, value)
    }
}
