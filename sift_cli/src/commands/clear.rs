use std::path::Path;

use sift_core::apply_patch;

use super::load_store;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Clears one filter, or every filter when no key is given.
pub fn clear_filters(
    params_path: Option<&Path>,
    key: Option<String>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Clearing filters");
    let mut params = files::load_params(params_path)?;
    let mut store = load_store(&params)?;

    let patch = match &key {
        Some(key) => store.handle_clear_filter(key).map_err(|e| {
            ui::error(&e.to_string());
            CliError::FilterError
        })?,
        None => store.handle_clear_all(),
    };

    apply_patch(&mut params, &patch);
    files::save_params(params_path, &params)?;

    match key {
        Some(key) => ui::success(&format!("Filter '{}' cleared", key)),
        None => ui::success("All filters cleared"),
    }

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_params(&params),
        OutputFormat::Json => ui::json_output(&params),
    }

    Ok(())
}
