//! Composition shell: dropdown mode machine over the filter store

use serde::Serialize;

use crate::errors::{ConfigError, StateError};
use crate::filter::FilterConfig;
use crate::state::MultiFilterState;

/// The filter bar's interaction mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShellMode {
    /// Dropdown not shown
    #[default]
    Closed,
    /// Dropdown open, showing every configured filter as a selectable row
    Listing,
    /// Dropdown open on one filter's editor
    Editing(String),
}

/// Pill view model for a filter with a committed selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillSummary {
    pub key: String,
    pub label: String,
    pub summary: String,
    pub operation: Option<String>,
    pub count: usize,
}

/// Listing row view model for one configured filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRow {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub count: usize,
}

/// Orchestrates which filter is active (being edited) versus merely selected
/// (has a value, shown as a pill).
#[derive(Debug, Clone)]
pub struct MultiFilterShell {
    state: MultiFilterState,
    mode: ShellMode,
}

impl MultiFilterShell {
    pub fn new(filters: Vec<FilterConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            state: MultiFilterState::new(filters)?,
            mode: ShellMode::Closed,
        })
    }

    pub fn from_state(state: MultiFilterState) -> Self {
        Self {
            state,
            mode: ShellMode::Closed,
        }
    }

    pub fn mode(&self) -> &ShellMode {
        &self.mode
    }

    pub fn state(&self) -> &MultiFilterState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MultiFilterState {
        &mut self.state
    }

    /// The filter currently open for editing.
    pub fn active_filter(&self) -> Option<&str> {
        match &self.mode {
            ShellMode::Editing(key) => Some(key),
            _ => None,
        }
    }

    /// Open the dropdown on the filter listing.
    pub fn open(&mut self) {
        if self.mode == ShellMode::Closed {
            self.mode = ShellMode::Listing;
        }
    }

    /// Pick a filter row, moving from Listing to Editing.
    pub fn choose(&mut self, key: &str) -> Result<(), StateError> {
        if self.state.entry(key).is_none() {
            return Err(StateError::UnknownFilter {
                key: key.to_string(),
            });
        }
        self.mode = ShellMode::Editing(key.to_string());
        Ok(())
    }

    /// Jump straight into editing a pill's filter, bypassing the listing.
    pub fn edit_pill(&mut self, key: &str) -> Result<(), StateError> {
        self.choose(key)
    }

    /// Pop from Editing back to the listing; a back press on the listing
    /// closes the dropdown.
    pub fn back(&mut self) {
        self.mode = match &self.mode {
            ShellMode::Editing(_) => ShellMode::Listing,
            _ => ShellMode::Closed,
        };
    }

    /// Dismiss the dropdown. Always drops the active filter so a later open
    /// never lands on a stale edit view.
    pub fn dismiss(&mut self) {
        self.mode = ShellMode::Closed;
    }

    /// Pills for every filter with a non-empty selection, in configuration
    /// order.
    pub fn pills(&self) -> Vec<PillSummary> {
        self.state
            .entries()
            .iter()
            .filter(|entry| !entry.selected.is_empty())
            .map(|entry| PillSummary {
                key: entry.filter.key.clone(),
                label: entry.filter.label.clone(),
                summary: entry.filter.summarize(&entry.selected),
                operation: entry
                    .operation
                    .selected
                    .as_ref()
                    .map(|op| op.label.clone()),
                count: entry.selected.count(),
            })
            .collect()
    }

    /// Listing rows for every configured filter with its selection count.
    pub fn rows(&self) -> Vec<FilterRow> {
        self.state
            .entries()
            .iter()
            .map(|entry| FilterRow {
                key: entry.filter.key.clone(),
                label: entry.filter.label.clone(),
                icon: entry.filter.icon.clone(),
                count: entry.selected.count(),
            })
            .collect()
    }
}
