mod browse;
mod clear;
mod filters;
mod op;
mod pills;
mod set;

pub use browse::browse_filters;
pub use clear::clear_filters;
pub use filters::list_filters;
pub use op::set_operation;
pub use pills::show_pills;
pub use set::set_filter;

use sift_core::{MultiFilterState, QueryParams};

use crate::demo;
use crate::errors::CliError;
use crate::ui;

/// Build the demo filter store hydrated from the given query parameters.
pub(crate) fn load_store(params: &QueryParams) -> Result<MultiFilterState, CliError> {
    let filters = demo::demo_filters().map_err(|e| {
        ui::error(&format!("Invalid filter configuration: {}", e));
        CliError::FilterError
    })?;
    let mut store = MultiFilterState::new(filters).map_err(|e| {
        ui::error(&format!("Invalid filter configuration: {}", e));
        CliError::FilterError
    })?;
    store.sync_from_params(params);
    Ok(store)
}
