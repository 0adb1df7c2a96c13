//! Per-kind rules computing which operations are valid for a selection

use super::config::{FilterConfig, FilterKind};
use super::operation::Operation;
use super::values::{FilterDateRange, FilterValues, TagNode};

/// Operations valid for a date range selection.
///
/// Same day on both bounds reads as "is on"; a lone `from` as "after"; a lone
/// `to` as "before"; everything else (including the empty range) as a span.
pub fn date_operations(range: &FilterDateRange) -> Vec<Operation> {
    match (range.from, range.to) {
        (Some(from), Some(to)) if from == to => vec![Operation::is_on()],
        (Some(_), None) => vec![Operation::after()],
        (None, Some(_)) => vec![Operation::before()],
        _ => vec![Operation::between()],
    }
}

/// Operations valid for a tag selection: a single tag is a plain inclusion,
/// multiple tags can be matched conjunctively or disjunctively.
pub fn tag_operations(tags: &[TagNode]) -> Vec<Operation> {
    if tags.len() > 1 {
        vec![Operation::has_all_of(), Operation::has_any_of()]
    } else {
        vec![Operation::includes()]
    }
}

/// Operations for a command filter: the caller's custom list when supplied,
/// otherwise a constant "is".
pub fn command_operations(custom: Option<&[Operation]>) -> Vec<Operation> {
    match custom {
        Some(operations) => operations.to_vec(),
        None => vec![Operation::is()],
    }
}

impl FilterConfig {
    /// Compute the operations valid for `selected`.
    ///
    /// Total over every selection shape: a mismatched shape falls back to the
    /// kind's empty-selection operations, so the result is never empty.
    pub fn operations_for(&self, selected: &FilterValues) -> Vec<Operation> {
        match &self.kind {
            FilterKind::Command { operations, .. } => command_operations(operations.as_deref()),
            FilterKind::Tag { .. } => tag_operations(selected.as_tags().unwrap_or(&[])),
            FilterKind::Date { .. } => {
                let empty = FilterDateRange::default();
                date_operations(selected.as_range().unwrap_or(&empty))
            }
        }
    }
}
