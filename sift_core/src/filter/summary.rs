//! Compact pill summaries for committed selections

use super::config::{FilterConfig, FilterKind};
use super::values::{FilterDateRange, FilterValues};

impl FilterConfig {
    /// Produce the compact pill text for a selection.
    ///
    /// Empty selections fall back to the placeholder or the filter label.
    /// Multi selections show the first entry plus a count; ranges render
    /// their bounds.
    pub fn summarize(&self, selected: &FilterValues) -> String {
        if selected.is_empty() {
            return self
                .placeholder
                .clone()
                .unwrap_or_else(|| self.label.clone());
        }

        match selected {
            FilterValues::Choices(values) => {
                let labels: Vec<&str> = values
                    .iter()
                    .map(|value| self.option_label(value))
                    .collect();
                summarize_labels(&labels)
            }
            FilterValues::Tags(tags) => {
                let labels: Vec<&str> = tags.iter().map(|tag| tag.display.as_str()).collect();
                summarize_labels(&labels)
            }
            FilterValues::Range(range) => summarize_range(range),
        }
    }

    /// The display label of an option value, falling back to the raw value
    /// for choices no longer present in the configuration.
    fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        if let FilterKind::Command { options, .. } = &self.kind {
            if let Some(option) = options.iter().find(|o| o.value == value) {
                return &option.label;
            }
        }
        value
    }
}

fn summarize_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, rest @ ..] => format!("{} +{}", first, rest.len()),
    }
}

fn summarize_range(range: &FilterDateRange) -> String {
    let format = |day: chrono::NaiveDate| day.format("%Y-%m-%d").to_string();
    match (range.from, range.to) {
        (Some(from), Some(to)) if from == to => format(from),
        (Some(from), Some(to)) => format!("{} \u{2192} {}", format(from), format(to)),
        (Some(from), None) => format!("after {}", format(from)),
        (None, Some(to)) => format!("before {}", format(to)),
        (None, None) => String::new(),
    }
}
