//! Filter value types: selections, tag nodes and date ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::FilterKind;

/// One node of a tag hierarchy, as returned by a tag lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagNode {
    pub id: String,
    pub display: String,
    pub has_children: bool,
    pub parent: Option<String>,
}

impl TagNode {
    /// Create a leaf tag with no parent.
    pub fn leaf(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            has_children: false,
            parent: None,
        }
    }

    /// Create a group tag (has lazily loadable children).
    pub fn group(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            has_children: true,
            parent: None,
        }
    }

    /// Attach a parent id to this tag.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// A tag hydrated from a bare id in query parameters. The display name is
    /// unknown until the caller resolves it against the tag source.
    pub fn unresolved(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display: id.clone(),
            id,
            has_children: false,
            parent: None,
        }
    }
}

/// A date range where either bound may be absent (open-ended).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterDateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Separator used when a range travels as a single query-parameter string.
const RANGE_SEPARATOR: &str = "..";

impl FilterDateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// A closed range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
        }
    }

    /// A closed range between two days.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Both bounds present and equal to the same day.
    pub fn is_single_day(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from == to,
            _ => false,
        }
    }

    /// A range is ordered unless both bounds are present and `to` precedes
    /// `from`. Open ranges are always ordered.
    pub fn is_ordered(&self) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= to,
            _ => true,
        }
    }

    /// Parse the query-parameter encoding: `from..to`, `from..`, `..to` or a
    /// bare single day.
    pub fn parse(input: &str) -> Option<Self> {
        let parse_day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();

        match input.split_once(RANGE_SEPARATOR) {
            Some((from_str, to_str)) => {
                let from = match from_str {
                    "" => None,
                    s => Some(parse_day(s)?),
                };
                let to = match to_str {
                    "" => None,
                    s => Some(parse_day(s)?),
                };
                if from.is_none() && to.is_none() {
                    return None;
                }
                Some(Self { from, to })
            }
            None => {
                let day = parse_day(input)?;
                Some(Self::single_day(day))
            }
        }
    }

    /// Canonical query-parameter encoding of this range.
    pub fn encode(&self) -> String {
        let bound = |b: Option<NaiveDate>| match b {
            Some(day) => day.format("%Y-%m-%d").to_string(),
            None => String::new(),
        };
        format!("{}{}{}", bound(self.from), RANGE_SEPARATOR, bound(self.to))
    }
}

/// The live selection of one filter, tagged by the shape its kind demands.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValues {
    /// Selected option values of a command filter
    Choices(Vec<String>),
    /// Selected tags of a tag filter
    Tags(Vec<TagNode>),
    /// Selected range of a date filter
    Range(FilterDateRange),
}

impl FilterValues {
    /// The empty selection for a filter kind.
    pub fn empty_for(kind: &FilterKind) -> Self {
        match kind {
            FilterKind::Command { .. } => FilterValues::Choices(Vec::new()),
            FilterKind::Tag { .. } => FilterValues::Tags(Vec::new()),
            FilterKind::Date { .. } => FilterValues::Range(FilterDateRange::default()),
        }
    }

    /// Whether this selection matches the runtime shape its kind demands.
    pub fn matches_kind(&self, kind: &FilterKind) -> bool {
        matches!(
            (self, kind),
            (FilterValues::Choices(_), FilterKind::Command { .. })
                | (FilterValues::Tags(_), FilterKind::Tag { .. })
                | (FilterValues::Range(_), FilterKind::Date { .. })
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FilterValues::Choices(values) => values.is_empty(),
            FilterValues::Tags(tags) => tags.is_empty(),
            FilterValues::Range(range) => range.is_empty(),
        }
    }

    /// Number of committed selections, used for pill and row counts. A date
    /// range counts as one selection once either bound is set.
    pub fn count(&self) -> usize {
        match self {
            FilterValues::Choices(values) => values.len(),
            FilterValues::Tags(tags) => tags.len(),
            FilterValues::Range(range) => {
                if range.is_empty() {
                    0
                } else {
                    1
                }
            }
        }
    }

    /// Returns the shape name of this selection for error messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            FilterValues::Choices(_) => "choice",
            FilterValues::Tags(_) => "tag",
            FilterValues::Range(_) => "date range",
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            FilterValues::Choices(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[TagNode]> {
        match self {
            FilterValues::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&FilterDateRange> {
        match self {
            FilterValues::Range(range) => Some(range),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_closed_range() {
        let range = FilterDateRange::parse("2024-06-03..2024-06-10").unwrap();
        assert_eq!(range.from, Some(day(2024, 6, 3)));
        assert_eq!(range.to, Some(day(2024, 6, 10)));
    }

    #[test]
    fn test_parse_open_from() {
        let range = FilterDateRange::parse("2024-06-03..").unwrap();
        assert_eq!(range.from, Some(day(2024, 6, 3)));
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_parse_open_to() {
        let range = FilterDateRange::parse("..2024-06-10").unwrap();
        assert_eq!(range.from, None);
        assert_eq!(range.to, Some(day(2024, 6, 10)));
    }

    #[test]
    fn test_parse_bare_day_is_single_day() {
        let range = FilterDateRange::parse("2024-06-10").unwrap();
        assert!(range.is_single_day());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(FilterDateRange::parse("not a date"), None);
        assert_eq!(FilterDateRange::parse(".."), None);
        assert_eq!(FilterDateRange::parse("2024-06-03..later"), None);
    }

    #[test]
    fn test_encode_round_trip() {
        let range = FilterDateRange::between(day(2024, 6, 3), day(2024, 6, 10));
        assert_eq!(FilterDateRange::parse(&range.encode()), Some(range));
    }

    #[test]
    fn test_is_ordered() {
        assert!(FilterDateRange::between(day(2024, 6, 3), day(2024, 6, 10)).is_ordered());
        assert!(!FilterDateRange::between(day(2024, 6, 10), day(2024, 6, 3)).is_ordered());
        assert!(FilterDateRange::new(Some(day(2024, 6, 10)), None).is_ordered());
    }

    #[test]
    fn test_range_counts_as_one_selection() {
        let values = FilterValues::Range(FilterDateRange::single_day(day(2024, 6, 10)));
        assert_eq!(values.count(), 1);
        assert_eq!(FilterValues::Range(FilterDateRange::default()).count(), 0);
    }
}
