use std::path::Path;

use sift_core::MultiFilterShell;

use super::load_store;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Shows the pill bar for the current query parameters.
pub fn show_pills(params_path: Option<&Path>, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Active filters");
    let params = files::load_params(params_path)?;
    let shell = MultiFilterShell::from_state(load_store(&params)?);

    let pills = shell.pills();
    ui::success(&format!("{} active filters", pills.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_pills(&pills),
        OutputFormat::Json => ui::json_output(&pills),
    }

    Ok(())
}
