use std::path::Path;

use sift_core::{
    FilterDateRange, FilterKind, FilterValues, TagNode, apply_patch,
};

use super::load_store;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Sets a filter's selection and merges the resulting patch into the params.
pub fn set_filter(
    params_path: Option<&Path>,
    key: String,
    values: Vec<String>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Setting filter");
    let mut params = files::load_params(params_path)?;
    let mut store = load_store(&params)?;

    let entry = store.entry(&key).ok_or_else(|| {
        ui::error(&format!("No filter configured for key '{}'", key));
        ui::info("Available filters:");
        for entry in store.entries() {
            ui::info(&format!("  - {}", entry.filter.key));
        }
        CliError::InputError
    })?;

    let new_values = match &entry.filter.kind {
        FilterKind::Command { .. } => FilterValues::Choices(values),
        FilterKind::Tag { .. } => {
            FilterValues::Tags(values.into_iter().map(TagNode::unresolved).collect())
        }
        FilterKind::Date { .. } => {
            let raw = values.first().map(String::as_str).unwrap_or("");
            let range = FilterDateRange::parse(raw).ok_or_else(|| {
                ui::error(&format!(
                    "Couldn't parse date range '{}' (expected YYYY-MM-DD..YYYY-MM-DD)",
                    raw
                ));
                CliError::InputError
            })?;
            FilterValues::Range(range)
        }
    };

    let patch = store.handle_filter_change(&key, new_values).map_err(|e| {
        ui::error(&e.to_string());
        CliError::FilterError
    })?;

    apply_patch(&mut params, &patch);
    files::save_params(params_path, &params)?;
    ui::success(&format!("Filter '{}' updated", key));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_params(&params),
        OutputFormat::Json => ui::json_output(&params),
    }

    Ok(())
}
