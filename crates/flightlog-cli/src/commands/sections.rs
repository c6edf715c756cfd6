//! `section` and `item` commands: Mutation Engine edits on a stored report.

use flightlog_core::editor::{apply_edit, ItemPatch, SectionEdit};
use flightlog_core::{ItemKind, Report, Section};

use crate::app::AppContext;
use crate::cli::{ItemArgs, ItemSetArgs, ItemSubcommand, SectionArgs, SectionSubcommand};
use crate::errors::CliError;
use crate::helpers::{
    find_section, find_top_level_item, item_kind, load_report, resolve_item_id, resolve_section_id,
    resolve_section_template, save_sections,
};
use crate::ui::{print, receipt};

pub fn handle_section(ctx: &AppContext, args: &SectionArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let report = load_report(&store, &args.report)?;

    let (edit, summary) = match &args.command {
        SectionSubcommand::Add { title } => (
            SectionEdit::AddSection {
                title: title.clone(),
            },
            "Section added",
        ),
        SectionSubcommand::AddTemplate { template } => (
            SectionEdit::AddSectionFromTemplate(resolve_section_template(&store, template)?),
            "Section added from template",
        ),
        SectionSubcommand::Remove { section } => (
            SectionEdit::DeleteSection {
                section_id: resolve_section_id(&report, section)?,
            },
            "Section removed",
        ),
        SectionSubcommand::Rename { section, title } => {
            if title.trim().is_empty() {
                return Err(CliError::invalid_input("Section title cannot be empty").into());
            }
            (
                SectionEdit::RenameSection {
                    section_id: resolve_section_id(&report, section)?,
                    title: title.clone(),
                },
                "Section renamed",
            )
        }
        SectionSubcommand::Move { from, to } => {
            let len = report.sections.len();
            if *from >= len || *to >= len {
                return Err(CliError::invalid_input(format!(
                    "Section positions must be below {} (got {} -> {})",
                    len, from, to
                ))
                .into());
            }
            (
                SectionEdit::ReorderSections {
                    from: *from,
                    to: *to,
                },
                "Section moved",
            )
        }
    };

    let updated = save_sections(&mut store, &report, apply_edit(&report.sections, &edit))?;
    print_receipt(ctx, summary, &updated);
    Ok(())
}

pub fn handle_item(ctx: &AppContext, args: &ItemArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let report = load_report(&store, &args.report)?;

    let (sections, summary) = match &args.command {
        ItemSubcommand::Add {
            section,
            kind,
            content,
        } => {
            let section_id = resolve_section_id(&report, section)?;
            let sections = apply_edit(
                &report.sections,
                &SectionEdit::AddItem {
                    section_id: section_id.clone(),
                    kind: item_kind(*kind),
                },
            );
            let sections = match content {
                Some(content) => rename_last_item(sections, &section_id, content),
                None => sections,
            };
            (sections, "Item added")
        }
        ItemSubcommand::Remove { section, item } => {
            let section_id = resolve_section_id(&report, section)?;
            let item_id = item_in(&report, &section_id, item)?;
            let edit = SectionEdit::DeleteItem {
                section_id,
                item_id,
            };
            (apply_edit(&report.sections, &edit), "Item removed")
        }
        ItemSubcommand::Set(set) => {
            let section_id = resolve_section_id(&report, &set.section)?;
            let item_id = item_in(&report, &section_id, &set.item)?;
            let current = find_section(&report, &section_id)
                .and_then(|s| find_top_level_item(s, &item_id))
                .map(|item| item.kind)
                .unwrap_or_default();
            let edit = SectionEdit::UpdateItem {
                section_id,
                item_id,
                patch: build_patch(set, current)?,
            };
            (apply_edit(&report.sections, &edit), "Item updated")
        }
        ItemSubcommand::Move {
            from_section,
            from_index,
            to_section,
            to_index,
        } => {
            let source_section_id = resolve_section_id(&report, from_section)?;
            let dest_section_id = resolve_section_id(&report, to_section)?;
            check_move(&report, &source_section_id, *from_index, &dest_section_id, *to_index)?;
            let edit = SectionEdit::MoveItem {
                source_section_id,
                source_index: *from_index,
                dest_section_id,
                dest_index: *to_index,
            };
            (apply_edit(&report.sections, &edit), "Item moved")
        }
    };

    let updated = save_sections(&mut store, &report, sections)?;
    print_receipt(ctx, summary, &updated);
    Ok(())
}

fn item_in(report: &Report, section_id: &str, key: &str) -> anyhow::Result<String> {
    match find_section(report, section_id) {
        Some(section) => resolve_item_id(section, key),
        None => Err(CliError::invalid_input(format!("Section '{}' vanished", section_id)).into()),
    }
}

/// Give the item just appended to `section_id` its requested content.
fn rename_last_item(
    sections: Vec<Section>,
    section_id: &str,
    content: &str,
) -> Vec<Section> {
    let last = sections
        .iter()
        .find(|s| s.id == section_id)
        .and_then(|s| s.items.last())
        .map(|item| item.id.clone());
    match last {
        Some(item_id) => apply_edit(
            &sections,
            &SectionEdit::UpdateItem {
                section_id: section_id.to_string(),
                item_id,
                patch: ItemPatch::new().content(content),
            },
        ),
        None => sections,
    }
}

/// Translate `item set` flags into a patch. Values for number items must
/// parse as numbers.
fn build_patch(args: &ItemSetArgs, current: ItemKind) -> anyhow::Result<ItemPatch> {
    let mut patch = ItemPatch::new();
    if let Some(content) = &args.content {
        patch = patch.content(content.clone());
    }
    if args.check {
        patch = patch.checked(true);
    } else if args.uncheck {
        patch = patch.checked(false);
    }
    if let Some(kind) = args.kind {
        patch = patch.kind(item_kind(kind));
    }
    if let Some(value) = &args.value {
        let kind = args.kind.map(item_kind).unwrap_or(current);
        if kind == ItemKind::Number {
            value.trim().parse::<f64>().map_err(|_| {
                CliError::invalid_input(format!("Value '{}' is not a number", value))
            })?;
        }
        patch = patch.value(value.clone());
    }
    if !args.options.is_empty() {
        patch = patch.options(args.options.clone());
    }
    if patch.is_empty() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass --content, --check, --uncheck, --type, --value or --option.",
        )
        .into());
    }
    Ok(patch)
}

fn check_move(
    report: &Report,
    source_section_id: &str,
    source_index: usize,
    dest_section_id: &str,
    dest_index: usize,
) -> anyhow::Result<()> {
    let len_of = |id: &str| find_section(report, id).map(|s| s.items.len()).unwrap_or(0);
    let source_len = len_of(source_section_id);
    if source_index >= source_len {
        return Err(CliError::invalid_input(format!(
            "Source position {} is out of range (section has {} items)",
            source_index, source_len
        ))
        .into());
    }
    let dest_max = if source_section_id == dest_section_id {
        source_len - 1
    } else {
        len_of(dest_section_id)
    };
    if dest_index > dest_max {
        return Err(CliError::invalid_input(format!(
            "Destination position {} is out of range (max {})",
            dest_index, dest_max
        ))
        .into());
    }
    Ok(())
}

fn print_receipt(ctx: &AppContext, summary: &str, report: &Report) {
    if ctx.quiet() {
        return;
    }
    let ui = ctx.ui_context(false, None);
    let sections = report.sections.len().to_string();
    let items = report.top_level_item_count().to_string();
    print(
        &ui,
        &receipt(
            &ui,
            summary,
            &[
                ("Report", report.id.as_str()),
                ("Sections", sections.as_str()),
                ("Items", items.as_str()),
            ],
        ),
    );
}
