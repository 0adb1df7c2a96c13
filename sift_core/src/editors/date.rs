//! Date range editor: presets that commit immediately, a custom draft that
//! commits only on confirm

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::ConfigError;
use crate::filter::{DateRangeOption, FilterConfig, FilterDateRange, FilterKind};

/// The built-in preset list, each computed relative to "today" at selection
/// time.
pub fn default_presets() -> Vec<DateRangeOption> {
    vec![
        DateRangeOption::new("today", |today| FilterDateRange::single_day(today)),
        DateRangeOption::new("yesterday", |today| {
            FilterDateRange::single_day(today - Duration::days(1))
        }),
        DateRangeOption::new("last 7 days", |today| {
            FilterDateRange::between(today - Duration::days(7), today)
        })
        .with_count(7),
        DateRangeOption::new("last 30 days", |today| {
            FilterDateRange::between(today - Duration::days(30), today)
        })
        .with_count(30),
        DateRangeOption::new("this month", |today| {
            let first = today.with_day(1).unwrap_or(today);
            FilterDateRange::between(first, today)
        }),
    ]
}

/// Headless date range editor.
///
/// Presets commit a concrete range on selection. The custom draft holds
/// partial input (either bound may still be absent) and only `confirm` turns
/// it into a committable range, so intermediate states never leak out.
pub struct DateEditor {
    presets: Vec<DateRangeOption>,
    custom: bool,
    draft: FilterDateRange,
}

impl DateEditor {
    pub fn new(filter: &FilterConfig) -> Result<Self, ConfigError> {
        match &filter.kind {
            FilterKind::Date { presets } => Ok(Self {
                presets: presets.clone().unwrap_or_else(default_presets),
                custom: false,
                draft: FilterDateRange::default(),
            }),
            _ => Err(ConfigError::KindMismatch {
                key: filter.key.clone(),
                expected: "date".to_string(),
            }),
        }
    }

    pub fn presets(&self) -> &[DateRangeOption] {
        &self.presets
    }

    /// Commit a preset immediately, computing its range against `today`.
    pub fn select_preset(&self, index: usize, today: NaiveDate) -> Option<FilterDateRange> {
        self.presets.get(index).map(|preset| preset.range(today))
    }

    /// Enter custom range mode, seeding the draft from the current selection.
    pub fn enter_custom(&mut self, current: FilterDateRange) {
        self.custom = true;
        self.draft = current;
    }

    pub fn leave_custom(&mut self) {
        self.custom = false;
        self.draft = FilterDateRange::default();
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn draft(&self) -> &FilterDateRange {
        &self.draft
    }

    pub fn set_draft_from(&mut self, from: Option<NaiveDate>) {
        self.draft.from = from;
    }

    pub fn set_draft_to(&mut self, to: Option<NaiveDate>) {
        self.draft.to = to;
    }

    /// A draft is confirmable once at least one bound is set and the bounds
    /// are ordered. When this is false the confirm action is unavailable
    /// rather than an error.
    pub fn can_confirm(&self) -> bool {
        !self.draft.is_empty() && self.draft.is_ordered()
    }

    /// Commit the custom draft, or nothing while it is not confirmable.
    pub fn confirm(&self) -> Option<FilterDateRange> {
        if self.can_confirm() {
            Some(self.draft)
        } else {
            None
        }
    }
}
