use std::path::Path;

use sift_core::apply_patch;

use super::load_store;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Chooses a filter's comparison operation.
pub fn set_operation(
    params_path: Option<&Path>,
    key: String,
    operation: String,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Setting operation");
    let mut params = files::load_params(params_path)?;
    let mut store = load_store(&params)?;

    let patch = store
        .handle_operation_change(&key, &operation)
        .map_err(|e| {
            ui::error(&e.to_string());
            CliError::FilterError
        })?;

    if patch.is_empty() {
        ui::info(&format!(
            "Filter '{}' has no operation key; the choice is not persisted",
            key
        ));
    }

    apply_patch(&mut params, &patch);
    files::save_params(params_path, &params)?;

    let entry = store.entry(&key).ok_or(CliError::FilterError)?;
    match &entry.operation.selected {
        Some(op) => ui::success(&format!("Operation for '{}' is now '{}'", key, op.label)),
        None => ui::info(&format!("Filter '{}' has no selected operation", key)),
    }

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_params(&params),
        OutputFormat::Json => ui::json_output(&params),
    }

    Ok(())
}
