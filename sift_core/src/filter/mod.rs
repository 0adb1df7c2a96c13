//! Filter descriptors, values and operation rules

mod colors;
mod config;
mod operation;
mod operations;
mod summary;
mod values;

// Re-export types
pub use colors::{COLOR_PALETTE, color_for};
pub use config::*;
pub use operation::Operation;
pub use operations::{command_operations, date_operations, tag_operations};
pub use values::*;
