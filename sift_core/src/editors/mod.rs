//! Type-specific filter editors
//!
//! Three interchangeable strategies, one per filter kind:
//! - choice: categorical option list with search and toggle semantics
//! - tag: hierarchical tag picker with lazy child loading
//! - date: presets plus a confirm-gated custom range
//!
//! Editors are headless: they own interaction state and produce row models,
//! never terminal or widget output.

mod choice;
mod date;
mod tag;

pub use choice::{ChoiceEditor, toggle_choice};
pub use date::{DateEditor, default_presets};
pub use tag::{InMemoryTagSource, TagEditor, TagGroupRow, TagPage, TagQuery, TagSections, TagSource};
