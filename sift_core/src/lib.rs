//! Core state machines and filter strategies for Sift filter bars
//!
//! This crate is the UI-agnostic engine behind a query-string-synchronized
//! filter bar:
//! - Filter descriptors and per-kind operation rules (`filter`)
//! - The per-filter selection store and its query-parameter sync (`state`)
//! - Headless editors for the three filter kinds (`editors`)
//! - The keyboard focus controller (`navigation`)
//! - The dropdown composition shell (`shell`)
//!
//! Callers supply `FilterConfig` definitions and a query-parameter map,
//! consume the returned `ParamPatch`es, and render the view models however
//! they like. The crate performs no I/O.

pub mod editors;
pub mod errors;
pub mod filter;
pub mod navigation;
pub mod shell;
pub mod state;

pub use errors::{ConfigError, StateError, TagLookupError};
pub use filter::{
    COLOR_PALETTE, DateRangeOption, FilterConfig, FilterDateRange, FilterKind, FilterMode,
    FilterOption, FilterValues, Operation, TagNode, TagResource, color_for,
};
pub use navigation::{FocusRing, NavAction, NavKey};
pub use shell::{FilterRow, MultiFilterShell, PillSummary, ShellMode};
pub use state::{
    FilterEntry, MultiFilterState, OperationState, ParamPatch, ParamValue, QueryParams,
    apply_patch,
};
