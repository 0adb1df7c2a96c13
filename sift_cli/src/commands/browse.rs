use std::fmt;
use std::path::Path;

use chrono::Local;
use inquire::{Confirm, DateSelect, Select};
use sift_core::editors::{ChoiceEditor, DateEditor, TagEditor, TagGroupRow};
use sift_core::{
    FilterConfig, FilterDateRange, FilterKind, FilterRow, FilterValues, MultiFilterShell,
    QueryParams, TagNode, apply_patch,
};

use super::load_store;
use crate::demo;
use crate::errors::CliError;
use crate::files;
use crate::ui::{self, OutputFormat};

/// Top-level menu entries of the interactive walk.
enum MenuItem {
    Row(FilterRow),
    ClearAll,
    Done,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Row(row) => {
                if row.count > 0 {
                    write!(f, "{} ({})", row.label, row.count)
                } else {
                    write!(f, "{}", row.label)
                }
            }
            MenuItem::ClearAll => write!(f, "Clear all"),
            MenuItem::Done => write!(f, "Done"),
        }
    }
}

/// A selectable option row with its checked marker.
struct OptionItem {
    value: String,
    label: String,
    checked: bool,
}

impl fmt::Display for OptionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.checked { "[x]" } else { "[ ]" };
        write!(f, "{} {}", marker, self.label)
    }
}

enum TagItem {
    Tag { node: TagNode, checked: bool },
    Group(TagGroupRow),
    Back,
}

impl fmt::Display for TagItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagItem::Tag { node, checked } => {
                let marker = if *checked { "[x]" } else { "[ ]" };
                write!(f, "{} {}", marker, node.display)
            }
            TagItem::Group(group) => {
                if group.disabled {
                    write!(f, "\u{25b8} {} (all selected)", group.node.display)
                } else {
                    write!(f, "\u{25b8} {}", group.node.display)
                }
            }
            TagItem::Back => write!(f, "Back"),
        }
    }
}

enum DateItem {
    Preset { index: usize, label: String },
    Custom,
    Back,
}

impl fmt::Display for DateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateItem::Preset { label, .. } => write!(f, "{}", label),
            DateItem::Custom => write!(f, "Custom range"),
            DateItem::Back => write!(f, "Back"),
        }
    }
}

const BACK_LABEL: &str = "Back";

/// Walks the filter bar interactively, committing edits as they happen.
pub fn browse_filters(
    params_path: Option<&Path>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Browsing filters");
    let mut params = files::load_params(params_path)?;
    let mut shell = MultiFilterShell::from_state(load_store(&params)?);

    loop {
        shell.open();
        let mut items: Vec<MenuItem> = shell.rows().into_iter().map(MenuItem::Row).collect();
        items.push(MenuItem::ClearAll);
        items.push(MenuItem::Done);

        let chosen = Select::new("Filter:", items)
            .prompt()
            .map_err(|_| CliError::PromptError)?;

        match chosen {
            MenuItem::Done => {
                shell.dismiss();
                break;
            }
            MenuItem::ClearAll => {
                let patch = shell.state_mut().handle_clear_all();
                apply_patch(&mut params, &patch);
                ui::success("All filters cleared");
            }
            MenuItem::Row(row) => {
                shell.choose(&row.key).map_err(|e| {
                    ui::error(&e.to_string());
                    CliError::FilterError
                })?;
                edit_active_filter(&mut shell, &mut params, &row.key)?;
                shell.back();
            }
        }

        ui::pretty_output_pills(&shell.pills());
    }

    files::save_params(params_path, &params)?;
    match output_format {
        OutputFormat::Pretty => ui::pretty_output_params(&params),
        OutputFormat::Json => ui::json_output(&params),
    }

    Ok(())
}

/// Dispatch to the kind-specific editor flow for the active filter.
fn edit_active_filter(
    shell: &mut MultiFilterShell,
    params: &mut QueryParams,
    key: &str,
) -> Result<(), CliError> {
    let filter = shell
        .state()
        .entry(key)
        .ok_or(CliError::FilterError)?
        .filter
        .clone();

    match &filter.kind {
        FilterKind::Command { .. } => edit_choices(shell, params, &filter),
        FilterKind::Tag { .. } => edit_tags(shell, params, &filter),
        FilterKind::Date { .. } => edit_date(shell, params, &filter),
    }
}

fn commit(
    shell: &mut MultiFilterShell,
    params: &mut QueryParams,
    key: &str,
    values: FilterValues,
) -> Result<(), CliError> {
    let patch = shell
        .state_mut()
        .handle_filter_change(key, values)
        .map_err(|e| {
            ui::error(&e.to_string());
            CliError::FilterError
        })?;
    apply_patch(params, &patch);
    Ok(())
}

fn edit_choices(
    shell: &mut MultiFilterShell,
    params: &mut QueryParams,
    filter: &FilterConfig,
) -> Result<(), CliError> {
    loop {
        let selected: Vec<String> = shell
            .state()
            .entry(&filter.key)
            .and_then(|entry| entry.selected.as_choices())
            .unwrap_or(&[])
            .to_vec();

        let editor = ChoiceEditor::new(filter).map_err(|_| CliError::FilterError)?;
        let mut items: Vec<OptionItem> = editor
            .visible_options()
            .into_iter()
            .map(|option| OptionItem {
                value: option.value.clone(),
                label: option.label.clone(),
                checked: selected.iter().any(|v| v == &option.value),
            })
            .collect();
        items.push(OptionItem {
            value: String::new(),
            label: BACK_LABEL.to_string(),
            checked: false,
        });

        let chosen = Select::new(&format!("{}:", filter.label), items)
            .prompt()
            .map_err(|_| CliError::PromptError)?;
        if chosen.label == BACK_LABEL {
            return Ok(());
        }

        let next = editor.toggle(&selected, &chosen.value);
        commit(shell, params, &filter.key, FilterValues::Choices(next))?;
    }
}

fn edit_tags(
    shell: &mut MultiFilterShell,
    params: &mut QueryParams,
    filter: &FilterConfig,
) -> Result<(), CliError> {
    let mut editor =
        TagEditor::new(filter, demo::demo_tag_source()).map_err(|_| CliError::FilterError)?;
    editor.refresh().map_err(|e| {
        ui::error(&e.to_string());
        CliError::FilterError
    })?;

    loop {
        let selected: Vec<TagNode> = shell
            .state()
            .entry(&filter.key)
            .and_then(|entry| entry.selected.as_tags())
            .unwrap_or(&[])
            .to_vec();

        let sections = editor.sections(&selected);
        let mut items: Vec<TagItem> = Vec::new();
        for node in sections.selected {
            items.push(TagItem::Tag {
                node,
                checked: true,
            });
        }
        for group in sections.groups {
            items.push(TagItem::Group(group));
        }
        for node in sections.leaves {
            items.push(TagItem::Tag {
                node,
                checked: false,
            });
        }
        items.push(TagItem::Back);

        let chosen = Select::new(&format!("{}:", filter.label), items)
            .prompt()
            .map_err(|_| CliError::PromptError)?;

        let toggled = match chosen {
            TagItem::Back => return Ok(()),
            TagItem::Group(group) if group.disabled => {
                ui::info("Every tag in this group is already selected");
                continue;
            }
            TagItem::Group(group) => {
                let children = editor
                    .expand(&group.node.id)
                    .map_err(|e| {
                        ui::error(&e.to_string());
                        CliError::FilterError
                    })?
                    .to_vec();

                let mut child_items: Vec<TagItem> = children
                    .into_iter()
                    .map(|node| {
                        let checked = selected.iter().any(|tag| tag.id == node.id);
                        TagItem::Tag { node, checked }
                    })
                    .collect();
                child_items.push(TagItem::Back);

                match Select::new(&format!("{}:", group.node.display), child_items)
                    .prompt()
                    .map_err(|_| CliError::PromptError)?
                {
                    TagItem::Tag { node, .. } => Some(node),
                    _ => None,
                }
            }
            TagItem::Tag { node, .. } => Some(node),
        };

        if let Some(node) = toggled {
            let next = editor.toggle(&selected, &node);
            commit(shell, params, &filter.key, FilterValues::Tags(next))?;
        }
    }
}

fn edit_date(
    shell: &mut MultiFilterShell,
    params: &mut QueryParams,
    filter: &FilterConfig,
) -> Result<(), CliError> {
    let mut editor = DateEditor::new(filter).map_err(|_| CliError::FilterError)?;

    let mut items: Vec<DateItem> = editor
        .presets()
        .iter()
        .enumerate()
        .map(|(index, preset)| DateItem::Preset {
            index,
            label: preset.label.clone(),
        })
        .collect();
    items.push(DateItem::Custom);
    items.push(DateItem::Back);

    let chosen = Select::new(&format!("{}:", filter.label), items)
        .prompt()
        .map_err(|_| CliError::PromptError)?;

    match chosen {
        DateItem::Back => Ok(()),
        DateItem::Preset { index, .. } => {
            let today = Local::now().date_naive();
            if let Some(range) = editor.select_preset(index, today) {
                commit(shell, params, &filter.key, FilterValues::Range(range))?;
            }
            Ok(())
        }
        DateItem::Custom => {
            let current = shell
                .state()
                .entry(&filter.key)
                .and_then(|entry| entry.selected.as_range())
                .copied()
                .unwrap_or(FilterDateRange::default());
            editor.enter_custom(current);

            let set_from = Confirm::new("Set a start date?")
                .with_default(true)
                .prompt()
                .map_err(|_| CliError::PromptError)?;
            if set_from {
                let from = DateSelect::new("From:")
                    .prompt()
                    .map_err(|_| CliError::PromptError)?;
                editor.set_draft_from(Some(from));
            } else {
                editor.set_draft_from(None);
            }

            let set_to = Confirm::new("Set an end date?")
                .with_default(true)
                .prompt()
                .map_err(|_| CliError::PromptError)?;
            if set_to {
                let to = DateSelect::new("To:")
                    .prompt()
                    .map_err(|_| CliError::PromptError)?;
                editor.set_draft_to(Some(to));
            } else {
                editor.set_draft_to(None);
            }

            // The draft only leaves the editor through a confirmed commit
            match editor.confirm() {
                Some(range) => {
                    let apply = Confirm::new(&format!("Apply {}?", range.encode()))
                        .with_default(true)
                        .prompt()
                        .map_err(|_| CliError::PromptError)?;
                    if apply {
                        commit(shell, params, &filter.key, FilterValues::Range(range))?;
                    }
                }
                None => {
                    ui::error("Range is empty or the end precedes the start");
                }
            }
            editor.leave_custom();
            Ok(())
        }
    }
}
