//! Lookup and parsing helpers shared by command handlers.

use flightlog_core::assembly::{assemble, validate_date, ReportMetadata};
use flightlog_core::{
    DroneProfile, Item, ItemKind, Report, ReportStore, ReportTemplate, Section, SectionTemplate,
};

use crate::cli::ItemType;
use crate::errors::CliError;

/// Resolve a full id or a unique id prefix among `ids`.
///
/// Returns `Ok(None)` when nothing matches. A blank key is rejected since
/// it would prefix-match every id.
fn match_id<'a, I>(ids: I, key: &str, what: &str) -> anyhow::Result<Option<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    if key.trim().is_empty() {
        return Err(CliError::invalid_input(format!("{} id must not be empty", what)).into());
    }
    let candidates: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(key)).collect();
    if candidates.iter().any(|id| *id == key) {
        return Ok(candidates.into_iter().find(|id| *id == key));
    }
    match candidates.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        _ => Err(CliError::invalid_input(format!(
            "{} id '{}' is ambiguous ({} matches)",
            what,
            key,
            candidates.len()
        ))
        .into()),
    }
}

/// Load a report by id or unique id prefix.
pub fn load_report(store: &dyn ReportStore, key: &str) -> anyhow::Result<Report> {
    if let Some(report) = store.get_report(key)? {
        return Ok(report);
    }
    if key.trim().is_empty() {
        return Err(report_not_found(key));
    }
    let reports = store.list_reports()?;
    let id = match_id(reports.iter().map(|r| r.id.as_str()), key, "Report")?
        .map(str::to_string)
        .ok_or_else(|| report_not_found(key))?;
    reports
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| report_not_found(key))
}

fn report_not_found(key: &str) -> anyhow::Error {
    CliError::not_found(
        format!("Report '{}' not found", key),
        "Run `flightlog list` to see report ids.",
    )
    .into()
}

/// Find a drone by id, then by exact model.
pub fn resolve_drone(store: &dyn ReportStore, key: &str) -> anyhow::Result<DroneProfile> {
    if let Some(drone) = store.get_drone(key)? {
        return Ok(drone);
    }
    store
        .list_drones()?
        .into_iter()
        .find(|d| d.model == key)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Drone '{}' not found", key),
                "Run `flightlog templates drones` to see drone ids and models.",
            )
            .into()
        })
}

pub fn resolve_report_template(
    store: &dyn ReportStore,
    key: &str,
) -> anyhow::Result<ReportTemplate> {
    store.get_report_template(key)?.ok_or_else(|| {
        CliError::not_found(
            format!("Report template '{}' not found", key),
            "Run `flightlog templates reports` to see template ids.",
        )
        .into()
    })
}

pub fn resolve_section_template(
    store: &dyn ReportStore,
    key: &str,
) -> anyhow::Result<SectionTemplate> {
    store.get_section_template(key)?.ok_or_else(|| {
        CliError::not_found(
            format!("Section template '{}' not found", key),
            "Run `flightlog templates sections` to see template ids.",
        )
        .into()
    })
}

/// Resolve a section id or unique prefix within a report.
pub fn resolve_section_id(report: &Report, key: &str) -> anyhow::Result<String> {
    match_id(report.sections.iter().map(|s| s.id.as_str()), key, "Section")?
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Section '{}' not found in report {}", key, report.id),
                format!("Run `flightlog show {}` to see section ids.", report.id),
            )
            .into()
        })
}

/// Resolve a top-level item id or unique prefix within a section.
pub fn resolve_item_id(section: &Section, key: &str) -> anyhow::Result<String> {
    match_id(section.items.iter().map(|i| i.id.as_str()), key, "Item")?
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Item '{}' not found in section '{}'", key, section.title),
                "Only top-level items can be edited.",
            )
            .into()
        })
}

pub fn find_section<'a>(report: &'a Report, section_id: &str) -> Option<&'a Section> {
    report.sections.iter().find(|s| s.id == section_id)
}

pub fn find_top_level_item<'a>(section: &'a Section, item_id: &str) -> Option<&'a Item> {
    section.items.iter().find(|i| i.id == item_id)
}

/// Validate an optional `dd.mm.yyyy` argument.
pub fn parse_date_arg(value: Option<&str>, flag: &str) -> anyhow::Result<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(date) => {
            validate_date(date).map_err(|_| {
                CliError::invalid_input(format!("{} must be dd.mm.yyyy, got '{}'", flag, date))
            })?;
            Ok(Some(date.to_string()))
        }
    }
}

pub fn item_kind(kind: ItemType) -> ItemKind {
    match kind {
        ItemType::Checkbox => ItemKind::Checkbox,
        ItemType::Text => ItemKind::Text,
        ItemType::Number => ItemKind::Number,
        ItemType::Select => ItemKind::Select,
    }
}

/// Re-assemble a report around new sections and save it under its id.
pub fn save_sections(
    store: &mut dyn ReportStore,
    report: &Report,
    sections: Vec<Section>,
) -> anyhow::Result<Report> {
    let updated = assemble(
        &ReportMetadata::from_report(report),
        &report.drone,
        &report.weather,
        sections,
    )?;
    store.save_report(&updated)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightlog_core::demo::seed_demo_data;
    use flightlog_core::SqliteStore;

    #[test]
    fn test_match_id_prefers_exact_then_unique_prefix() {
        let ids = ["abc", "abcd", "xyz"];
        assert_eq!(match_id(ids, "abc", "Report").unwrap(), Some("abc"));
        assert_eq!(match_id(ids, "x", "Report").unwrap(), Some("xyz"));
        assert_eq!(match_id(ids, "q", "Report").unwrap(), None);
        assert!(match_id(["ab1", "ab2"], "ab", "Report").is_err());
    }

    #[test]
    fn test_blank_key_never_resolves() {
        assert!(match_id(["only"], "", "Section").is_err());
        assert!(match_id(["only"], "  ", "Section").is_err());

        let section = Section {
            items: vec![Item::checkbox("Props")],
            ..Section::new("Prep")
        };
        let err = resolve_item_id(&section, "").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert!(resolve_item_id(&section, &section.items[0].id[..4]).is_ok());
    }

    #[test]
    fn test_resolve_drone_by_id_or_model() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        seed_demo_data(&mut store).unwrap();
        assert_eq!(resolve_drone(&store, "drone-2").unwrap().model, "Orlan-10");
        assert_eq!(resolve_drone(&store, "Orlan-10").unwrap().id, "drone-2");
        assert!(resolve_drone(&store, "Mavic").is_err());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg(None, "--from").unwrap(), None);
        assert_eq!(parse_date_arg(Some("  "), "--from").unwrap(), None);
        assert_eq!(
            parse_date_arg(Some("05.01.2025"), "--from").unwrap().as_deref(),
            Some("05.01.2025")
        );
        assert!(parse_date_arg(Some("2025-01-05"), "--from").is_err());
    }
}
