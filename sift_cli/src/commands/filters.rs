use std::path::Path;

use sift_core::MultiFilterShell;

use super::load_store;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Lists the configured filters with their selection counts.
pub fn list_filters(params_path: Option<&Path>, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Configured filters");
    let params = files::load_params(params_path)?;
    let shell = MultiFilterShell::from_state(load_store(&params)?);

    let rows = shell.rows();
    ui::success(&format!("{} filters configured", rows.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_rows(&rows),
        OutputFormat::Json => ui::json_output(&rows),
    }

    Ok(())
}
