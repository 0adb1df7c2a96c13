//! Per-filter selection state and its query-parameter synchronization
//!
//! The store owns one `FilterEntry` per configured filter and keeps the
//! entry's available operations in lockstep with its selection. Mutations
//! return a `ParamPatch` describing the outbound query-parameter change;
//! inbound hydration (`sync_from_params`) never produces a patch, so the two
//! directions cannot echo into each other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, StateError};
use crate::filter::{
    FilterConfig, FilterDateRange, FilterKind, FilterMode, FilterValues, Operation, TagNode,
};

/// A query-parameter value: a scalar or a list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// Coerce to a list; scalars become one-element lists.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            ParamValue::Single(value) => vec![value.clone()],
            ParamValue::Many(values) => values.clone(),
        }
    }

    /// The scalar form, taking the first element of a list.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

/// The caller-owned query-parameter map (e.g. parsed from a URL).
pub type QueryParams = BTreeMap<String, ParamValue>;

/// An outbound partial update: `None` means "clear this key".
pub type ParamPatch = BTreeMap<String, Option<ParamValue>>;

/// Merge a patch into a parameter map, removing cleared keys.
pub fn apply_patch(params: &mut QueryParams, patch: &ParamPatch) {
    for (key, value) in patch {
        match value {
            Some(value) => {
                params.insert(key.clone(), value.clone());
            }
            None => {
                params.remove(key);
            }
        }
    }
}

/// The chosen operation and the set it was chosen from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationState {
    pub selected: Option<Operation>,
    pub available: Vec<Operation>,
}

/// Live state of one configured filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterEntry {
    pub filter: FilterConfig,
    pub selected: FilterValues,
    pub operation: OperationState,
}

impl FilterEntry {
    fn new(filter: FilterConfig) -> Self {
        let selected = FilterValues::empty_for(&filter.kind);
        let available = filter.operations_for(&selected);
        Self {
            filter,
            selected,
            operation: OperationState {
                selected: None,
                available,
            },
        }
    }

    fn clear(&mut self) {
        self.selected = FilterValues::empty_for(&self.filter.kind);
        self.operation.available = self.filter.operations_for(&self.selected);
        self.operation.selected = None;
    }

    /// A single-mode filter holds at most one selection; excess values are
    /// dropped so the stored state never disagrees with the scalar the patch
    /// carries.
    fn enforce_mode(&mut self) {
        if self.filter.mode != FilterMode::Single {
            return;
        }
        let truncated = match &mut self.selected {
            FilterValues::Choices(values) if values.len() > 1 => {
                values.truncate(1);
                true
            }
            FilterValues::Tags(tags) if tags.len() > 1 => {
                tags.truncate(1);
                true
            }
            _ => false,
        };
        if truncated {
            log::debug!(
                "filter '{}' is single-select, keeping the first value",
                self.filter.key
            );
        }
    }

    /// Recompute available operations for the current selection, keeping the
    /// previously chosen operation when it still matches by value or label,
    /// defaulting to the first available otherwise.
    fn refresh_operations(&mut self) {
        let available = self.filter.operations_for(&self.selected);
        let retained = self.operation.selected.take().and_then(|previous| {
            available
                .iter()
                .find(|op| previous.value.as_deref().is_some_and(|v| op.matches(v))
                    || op.matches(&previous.label))
                .cloned()
        });
        self.operation.selected = retained.or_else(|| available.first().cloned());
        self.operation.available = available;
    }

    /// The outbound parameter value for the current selection, `None` when
    /// the selection is empty.
    fn param_value(&self) -> Option<ParamValue> {
        if self.selected.is_empty() {
            return None;
        }
        match &self.selected {
            FilterValues::Choices(values) => Some(mode_value(self.filter.mode, values)),
            FilterValues::Tags(tags) => {
                let ids: Vec<String> = tags.iter().map(|tag| tag.id.clone()).collect();
                Some(mode_value(self.filter.mode, &ids))
            }
            FilterValues::Range(range) => Some(ParamValue::Single(range.encode())),
        }
    }
}

fn mode_value(mode: FilterMode, values: &[String]) -> ParamValue {
    match mode {
        FilterMode::Single => ParamValue::Single(values[0].clone()),
        FilterMode::Multi => ParamValue::Many(values.to_vec()),
    }
}

/// The multi-filter state store.
///
/// Entries keep their configuration order, which is also the pill and
/// listing-row order.
#[derive(Debug, Clone)]
pub struct MultiFilterState {
    entries: Vec<FilterEntry>,
    last_params: Option<QueryParams>,
}

impl MultiFilterState {
    /// Create a store with every filter defaulted to an empty selection.
    pub fn new(filters: Vec<FilterConfig>) -> Result<Self, ConfigError> {
        for (index, filter) in filters.iter().enumerate() {
            if filters[..index].iter().any(|f| f.key == filter.key) {
                return Err(ConfigError::DuplicateKey {
                    key: filter.key.clone(),
                });
            }
        }

        Ok(Self {
            entries: filters.into_iter().map(FilterEntry::new).collect(),
            last_params: None,
        })
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&FilterEntry> {
        self.entries.iter().find(|entry| entry.filter.key == key)
    }

    fn entry_mut(&mut self, key: &str) -> Result<&mut FilterEntry, StateError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.filter.key == key)
            .ok_or_else(|| StateError::UnknownFilter {
                key: key.to_string(),
            })
    }

    /// Replace a filter's selection and recompute its operations.
    ///
    /// Returns the outbound patch: the filter's own key (cleared when the new
    /// selection is empty) plus, when configured, the operation key carrying
    /// the chosen operation's token.
    pub fn handle_filter_change(
        &mut self,
        key: &str,
        values: FilterValues,
    ) -> Result<ParamPatch, StateError> {
        let entry = self.entry_mut(key)?;
        if !values.matches_kind(&entry.filter.kind) {
            return Err(StateError::ValueShapeMismatch {
                key: key.to_string(),
                expected: entry.filter.kind.name().to_string(),
                got: values.shape_name().to_string(),
            });
        }

        entry.selected = values;
        entry.enforce_mode();
        entry.refresh_operations();

        let mut patch = ParamPatch::new();
        patch.insert(entry.filter.key.clone(), entry.param_value());
        if let Some(operation_key) = &entry.filter.operation_key {
            let token = entry
                .operation
                .selected
                .as_ref()
                .map(|op| ParamValue::from(op.token()));
            patch.insert(operation_key.clone(), token);
        }

        // Local edits invalidate the snapshot so a later hydration from the
        // same external params is not skipped
        self.last_params = None;
        Ok(patch)
    }

    /// Choose an operation by token, resolving by value, then label, then
    /// falling back to the first available.
    pub fn handle_operation_change(
        &mut self,
        key: &str,
        token: &str,
    ) -> Result<ParamPatch, StateError> {
        let entry = self.entry_mut(key)?;
        let available = &entry.operation.available;

        let resolved = available
            .iter()
            .find(|op| op.value.as_deref() == Some(token))
            .or_else(|| available.iter().find(|op| op.label == token))
            .or_else(|| available.first())
            .cloned();

        if resolved.is_none() {
            log::debug!("no available operations for filter '{}'", key);
        }
        entry.operation.selected = resolved;

        let mut patch = ParamPatch::new();
        if let (Some(operation_key), Some(op)) =
            (&entry.filter.operation_key, &entry.operation.selected)
        {
            patch.insert(operation_key.clone(), Some(ParamValue::from(op.token())));
        }

        self.last_params = None;
        Ok(patch)
    }

    /// Reset one filter's selection, clearing its value and operation keys.
    pub fn handle_clear_filter(&mut self, key: &str) -> Result<ParamPatch, StateError> {
        let entry = self.entry_mut(key)?;
        entry.clear();

        let mut patch = ParamPatch::new();
        patch.insert(entry.filter.key.clone(), None);
        if let Some(operation_key) = &entry.filter.operation_key {
            patch.insert(operation_key.clone(), None);
        }

        self.last_params = None;
        Ok(patch)
    }

    /// Reset every filter, clearing all value and operation keys. Filters
    /// flagged `disable_clear` keep their selection; they only reset through
    /// `handle_clear_filter`.
    pub fn handle_clear_all(&mut self) -> ParamPatch {
        let mut patch = ParamPatch::new();
        for entry in &mut self.entries {
            if entry.filter.disable_clear {
                continue;
            }
            entry.clear();
            patch.insert(entry.filter.key.clone(), None);
            if let Some(operation_key) = &entry.filter.operation_key {
                patch.insert(operation_key.clone(), None);
            }
        }

        self.last_params = None;
        patch
    }

    /// One-way inbound hydration from the caller's query parameters.
    ///
    /// Only keys present in `params` touch their entries; parameters with no
    /// matching filter are ignored. Re-running with an unchanged map is a
    /// no-op.
    pub fn sync_from_params(&mut self, params: &QueryParams) {
        if self.last_params.as_ref() == Some(params) {
            return;
        }

        for entry in &mut self.entries {
            if let Some(value) = params.get(&entry.filter.key) {
                match hydrate_values(&entry.filter, value) {
                    Some(values) => {
                        entry.selected = values;
                        entry.refresh_operations();
                    }
                    None => {
                        log::debug!(
                            "ignoring unparseable value for filter '{}'",
                            entry.filter.key
                        );
                    }
                }
            }

            if let Some(operation_key) = &entry.filter.operation_key {
                if let Some(token) = params.get(operation_key).and_then(ParamValue::as_scalar) {
                    let available = &entry.operation.available;
                    entry.operation.selected = available
                        .iter()
                        .find(|op| op.value.as_deref() == Some(token))
                        .or_else(|| available.iter().find(|op| op.label == token))
                        .or_else(|| available.first())
                        .cloned();
                }
            }
        }

        let known = |key: &str| {
            self.entries.iter().any(|entry| {
                entry.filter.key == key || entry.filter.operation_key.as_deref() == Some(key)
            })
        };
        for key in params.keys() {
            if !known(key) {
                log::debug!("ignoring query parameter '{}' with no matching filter", key);
            }
        }

        self.last_params = Some(params.clone());
    }
}

/// Derive a selection from a raw parameter value, shaped by the filter kind.
fn hydrate_values(filter: &FilterConfig, value: &ParamValue) -> Option<FilterValues> {
    match &filter.kind {
        FilterKind::Command { .. } => {
            let mut values = value.as_list();
            if filter.mode == FilterMode::Single && values.len() > 1 {
                log::debug!(
                    "filter '{}' is single-select, keeping first of {} values",
                    filter.key,
                    values.len()
                );
                values.truncate(1);
            }
            Some(FilterValues::Choices(values))
        }
        FilterKind::Tag { .. } => {
            let tags = value.as_list().into_iter().map(TagNode::unresolved).collect();
            Some(FilterValues::Tags(tags))
        }
        FilterKind::Date { .. } => {
            let range = FilterDateRange::parse(value.as_scalar()?)?;
            Some(FilterValues::Range(range))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterOption, TagResource};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_filters() -> Vec<FilterConfig> {
        vec![
            FilterConfig::command(
                "status",
                "Status",
                vec![
                    FilterOption::new("active", "Active"),
                    FilterOption::new("inactive", "Inactive"),
                ],
            )
            .unwrap(),
            FilterConfig::command(
                "class",
                "Class",
                vec![
                    FilterOption::new("inpatient", "Inpatient"),
                    FilterOption::new("outpatient", "Outpatient"),
                ],
            )
            .unwrap()
            .with_mode(FilterMode::Multi),
            FilterConfig::tag("tags", "Tags", TagResource::new("patient_tag"))
                .unwrap()
                .with_operation_key("tags_op"),
            FilterConfig::date("admitted", "Admitted")
                .unwrap()
                .with_operation_key("admitted_op"),
        ]
    }

    fn test_store() -> MultiFilterState {
        MultiFilterState::new(test_filters()).unwrap()
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let filters = vec![
            FilterConfig::date("admitted", "Admitted").unwrap(),
            FilterConfig::date("admitted", "Also admitted").unwrap(),
        ];
        assert_matches!(
            MultiFilterState::new(filters),
            Err(ConfigError::DuplicateKey { .. })
        );
    }

    #[test]
    fn test_operations_invariant_after_change() {
        let mut store = test_store();
        store
            .handle_filter_change(
                "admitted",
                FilterValues::Range(FilterDateRange::single_day(day(2024, 6, 10))),
            )
            .unwrap();

        let entry = store.entry("admitted").unwrap();
        assert_eq!(
            entry.operation.available,
            entry.filter.operations_for(&entry.selected)
        );
        assert_eq!(entry.operation.selected, Some(Operation::is_on()));
    }

    #[test]
    fn test_change_emits_value_and_operation_keys() {
        let mut store = test_store();
        let patch = store
            .handle_filter_change(
                "admitted",
                FilterValues::Range(FilterDateRange::between(
                    day(2024, 6, 3),
                    day(2024, 6, 10),
                )),
            )
            .unwrap();

        assert_eq!(
            patch.get("admitted"),
            Some(&Some(ParamValue::from("2024-06-03..2024-06-10")))
        );
        assert_eq!(
            patch.get("admitted_op"),
            Some(&Some(ParamValue::from("b/w")))
        );
    }

    #[test]
    fn test_single_mode_emits_scalar_multi_emits_list() {
        let mut store = test_store();

        let patch = store
            .handle_filter_change("status", FilterValues::Choices(vec!["active".into()]))
            .unwrap();
        assert_eq!(patch.get("status"), Some(&Some(ParamValue::from("active"))));

        let patch = store
            .handle_filter_change(
                "class",
                FilterValues::Choices(vec!["inpatient".into(), "outpatient".into()]),
            )
            .unwrap();
        assert_eq!(
            patch.get("class"),
            Some(&Some(ParamValue::Many(vec![
                "inpatient".into(),
                "outpatient".into()
            ])))
        );
    }

    #[test]
    fn test_single_mode_truncates_excess_values() {
        let mut store = test_store();
        let patch = store
            .handle_filter_change(
                "status",
                FilterValues::Choices(vec!["active".into(), "inactive".into()]),
            )
            .unwrap();

        // Stored state and emitted param agree on the one kept value
        assert_eq!(
            store.entry("status").unwrap().selected,
            FilterValues::Choices(vec!["active".into()])
        );
        assert_eq!(patch.get("status"), Some(&Some(ParamValue::from("active"))));
    }

    #[test]
    fn test_clear_all_skips_disable_clear_filters() {
        let filters = vec![
            FilterConfig::command(
                "status",
                "Status",
                vec![FilterOption::new("active", "Active")],
            )
            .unwrap()
            .with_disable_clear(),
            FilterConfig::date("admitted", "Admitted").unwrap(),
        ];
        let mut store = MultiFilterState::new(filters).unwrap();
        store
            .handle_filter_change("status", FilterValues::Choices(vec!["active".into()]))
            .unwrap();
        store
            .handle_filter_change(
                "admitted",
                FilterValues::Range(FilterDateRange::single_day(day(2024, 6, 10))),
            )
            .unwrap();

        let patch = store.handle_clear_all();
        assert!(!patch.contains_key("status"));
        assert_eq!(patch.get("admitted"), Some(&None));
        assert_eq!(
            store.entry("status").unwrap().selected,
            FilterValues::Choices(vec!["active".into()])
        );
        assert!(store.entry("admitted").unwrap().selected.is_empty());

        // A targeted clear still resets the protected filter
        store.handle_clear_filter("status").unwrap();
        assert!(store.entry("status").unwrap().selected.is_empty());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut store = test_store();
        let result = store.handle_filter_change(
            "status",
            FilterValues::Range(FilterDateRange::single_day(day(2024, 6, 10))),
        );
        assert_matches!(result, Err(StateError::ValueShapeMismatch { .. }));
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let mut store = test_store();
        let result = store.handle_filter_change("ward", FilterValues::Choices(vec![]));
        assert_matches!(result, Err(StateError::UnknownFilter { .. }));
    }

    #[test]
    fn test_operation_preserved_when_still_available() {
        let mut store = test_store();
        let two_tags = FilterValues::Tags(vec![
            TagNode::leaf("icu", "ICU"),
            TagNode::leaf("er", "ER"),
        ]);
        store.handle_filter_change("tags", two_tags).unwrap();
        store.handle_operation_change("tags", "has_any_of").unwrap();

        // A third tag keeps the operation set, so the choice survives
        let three_tags = FilterValues::Tags(vec![
            TagNode::leaf("icu", "ICU"),
            TagNode::leaf("er", "ER"),
            TagNode::leaf("ward_b", "Ward B"),
        ]);
        store.handle_filter_change("tags", three_tags).unwrap();
        let entry = store.entry("tags").unwrap();
        assert_eq!(entry.operation.selected, Some(Operation::has_any_of()));
    }

    #[test]
    fn test_operation_defaults_when_set_changes() {
        let mut store = test_store();
        let two_tags = FilterValues::Tags(vec![
            TagNode::leaf("icu", "ICU"),
            TagNode::leaf("er", "ER"),
        ]);
        store.handle_filter_change("tags", two_tags).unwrap();
        store.handle_operation_change("tags", "has_any_of").unwrap();

        // Dropping to one tag invalidates has_any_of
        let one_tag = FilterValues::Tags(vec![TagNode::leaf("icu", "ICU")]);
        store.handle_filter_change("tags", one_tag).unwrap();
        let entry = store.entry("tags").unwrap();
        assert_eq!(entry.operation.selected, Some(Operation::includes()));
    }

    #[test]
    fn test_operation_change_resolves_by_label() {
        let mut store = test_store();
        let two_tags = FilterValues::Tags(vec![
            TagNode::leaf("icu", "ICU"),
            TagNode::leaf("er", "ER"),
        ]);
        store.handle_filter_change("tags", two_tags).unwrap();

        let patch = store
            .handle_operation_change("tags", "has any of")
            .unwrap();
        assert_eq!(
            patch.get("tags_op"),
            Some(&Some(ParamValue::from("has_any_of")))
        );
    }

    #[test]
    fn test_clear_filter_emits_nulls_and_leaves_others() {
        let mut store = test_store();
        store
            .handle_filter_change("status", FilterValues::Choices(vec!["active".into()]))
            .unwrap();
        store
            .handle_filter_change(
                "tags",
                FilterValues::Tags(vec![TagNode::leaf("icu", "ICU")]),
            )
            .unwrap();

        let patch = store.handle_clear_filter("tags").unwrap();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("tags"), Some(&None));
        assert_eq!(patch.get("tags_op"), Some(&None));

        assert!(store.entry("tags").unwrap().selected.is_empty());
        assert_eq!(
            store.entry("status").unwrap().selected,
            FilterValues::Choices(vec!["active".into()])
        );
    }

    #[test]
    fn test_clear_all_emits_null_for_every_key() {
        let mut store = test_store();
        let patch = store.handle_clear_all();

        for key in ["status", "class", "tags", "tags_op", "admitted", "admitted_op"] {
            assert_eq!(patch.get(key), Some(&None), "missing clear for '{}'", key);
        }
        assert!(store.entries().iter().all(|e| e.selected.is_empty()));
    }

    #[test]
    fn test_hydration_round_trip_after_clear_all() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert("status".into(), ParamValue::from("active"));
        params.insert(
            "class".into(),
            ParamValue::Many(vec!["inpatient".into(), "outpatient".into()]),
        );
        params.insert("admitted".into(), ParamValue::from("2024-06-03..2024-06-10"));
        params.insert("admitted_op".into(), ParamValue::from("b/w"));

        store.sync_from_params(&params);
        let before: Vec<FilterValues> =
            store.entries().iter().map(|e| e.selected.clone()).collect();

        store.handle_clear_all();
        store.sync_from_params(&params);
        let after: Vec<FilterValues> =
            store.entries().iter().map(|e| e.selected.clone()).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_hydration_coerces_scalar_to_list() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert("class".into(), ParamValue::from("inpatient"));

        store.sync_from_params(&params);
        assert_eq!(
            store.entry("class").unwrap().selected,
            FilterValues::Choices(vec!["inpatient".into()])
        );
    }

    #[test]
    fn test_hydration_ignores_unknown_keys() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert("removed_in_v2".into(), ParamValue::from("whatever"));

        store.sync_from_params(&params);
        assert!(store.entries().iter().all(|e| e.selected.is_empty()));
    }

    #[test]
    fn test_hydration_applies_operation_token() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert(
            "tags".into(),
            ParamValue::Many(vec!["icu".into(), "er".into()]),
        );
        params.insert("tags_op".into(), ParamValue::from("has_all_of"));

        store.sync_from_params(&params);
        let entry = store.entry("tags").unwrap();
        assert_eq!(entry.operation.selected, Some(Operation::has_all_of()));
    }

    #[test]
    fn test_hydration_wraps_tag_ids_as_unresolved_nodes() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert("tags".into(), ParamValue::Many(vec!["icu".into()]));

        store.sync_from_params(&params);
        let entry = store.entry("tags").unwrap();
        assert_eq!(
            entry.selected.as_tags().unwrap(),
            &[TagNode::unresolved("icu")]
        );
    }

    #[test]
    fn test_resync_with_equal_params_is_noop() {
        let mut store = test_store();
        let mut params = QueryParams::new();
        params.insert("status".into(), ParamValue::from("active"));
        store.sync_from_params(&params);

        // Re-syncing the snapshot the store already saw changes nothing
        store.sync_from_params(&params);
        assert_eq!(
            store.entry("status").unwrap().selected,
            FilterValues::Choices(vec!["active".into()])
        );
    }

    #[test]
    fn test_params_deserialize_from_json() {
        // The caller's URL layer hands the store a JSON-shaped map: scalars
        // and string arrays both land as ParamValue
        let params: QueryParams = serde_json::from_str(
            r#"{"status": "active", "class": ["inpatient", "emergency"]}"#,
        )
        .unwrap();

        let mut store = test_store();
        store.sync_from_params(&params);
        assert_eq!(
            store.entry("status").unwrap().selected,
            FilterValues::Choices(vec!["active".into()])
        );
        assert_eq!(
            store.entry("class").unwrap().selected,
            FilterValues::Choices(vec!["inpatient".into(), "emergency".into()])
        );
    }

    #[test]
    fn test_apply_patch_round_trip() {
        let mut store = test_store();
        let mut params = QueryParams::new();

        let patch = store
            .handle_filter_change("status", FilterValues::Choices(vec!["active".into()]))
            .unwrap();
        apply_patch(&mut params, &patch);
        assert_eq!(params.get("status"), Some(&ParamValue::from("active")));

        let patch = store.handle_clear_filter("status").unwrap();
        apply_patch(&mut params, &patch);
        assert!(params.is_empty());
    }
}
