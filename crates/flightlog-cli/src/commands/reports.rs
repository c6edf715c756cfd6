use dialoguer::Confirm;

use flightlog_core::assembly::{assemble, ReportMetadata};
use flightlog_core::filter::parse_report_date;
use flightlog_core::{ReportFilter, ReportStore, SortBy, SortOrder};

use crate::app::AppContext;
use crate::cli::{DeleteArgs, EditArgs, ListArgs, NewArgs, ShowArgs, SortDirection, SortKey};
use crate::errors::CliError;
use crate::helpers::{load_report, parse_date_arg, resolve_drone, resolve_report_template};
use crate::output::{print_json, print_report, print_report_list, reports_summary_json};
use crate::ui::{badge, check_format, header, hint, print, receipt, Badge};
use crate::weather::weather_for_report;

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let mut store = ctx.open_store()?;

    let drone = resolve_drone(&store, &args.drone)?;
    let date = parse_date_arg(args.date.as_deref(), "--date")?;
    let mut meta = match date.as_deref().and_then(parse_report_date) {
        Some(day) => ReportMetadata::for_date(day),
        None => ReportMetadata::today(),
    };
    if let Some(name) = &args.name {
        meta.name = name.clone();
    }
    meta.notes = args.notes.clone();
    meta.created_by = args.created_by.clone();

    let sections = match &args.template {
        Some(key) => {
            let template = resolve_report_template(&store, key)?;
            if !template.supports(&drone.model) {
                return Err(CliError::invalid_input(format!(
                    "Template '{}' does not support drone model {} (supports: {})",
                    template.id,
                    drone.model,
                    template.drone_types.join(", ")
                ))
                .into());
            }
            flightlog_core::editor::replace_with_template(&template)
        }
        None => Vec::new(),
    };

    let weather = weather_for_report(&ui, &ctx.weather_settings()?, args.weather_file.as_deref())?;
    let report = assemble(&meta, &drone, &weather, sections)?;
    store.save_report(&report)?;

    if ui.mode.is_json() {
        return print_json(&report);
    }
    if ctx.quiet() {
        println!("{}", report.id);
        return Ok(());
    }
    let sections = report.sections.len().to_string();
    print(
        &ui,
        &receipt(
            &ui,
            "Report saved",
            &[
                ("ID", report.id.as_str()),
                ("Name", report.name.as_str()),
                ("Date", report.date.as_str()),
                ("Drone", report.drone.model.as_str()),
                ("Sections", sections.as_str()),
            ],
        ),
    );
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    check_format(args.format.as_deref()).map_err(CliError::invalid_input)?;
    let ui = ctx.ui_context(args.json, args.format.as_deref());
    let store = ctx.open_store()?;

    let sort_by = match args.sort {
        SortKey::Date => SortBy::Date,
        SortKey::Drone => SortBy::Drone,
    };
    let sort_order = match args.order {
        SortDirection::Asc => SortOrder::Asc,
        SortDirection::Desc => SortOrder::Desc,
    };
    let mut filter = ReportFilter::new().sort(sort_by, sort_order);
    if let Some(from) = parse_date_arg(args.from.as_deref(), "--from")? {
        filter = filter.date_from(from);
    }
    if let Some(to) = parse_date_arg(args.to.as_deref(), "--to")? {
        filter = filter.date_to(to);
    }
    if let Some(model) = &args.drone {
        filter = filter.drone_model(model.clone());
    }

    let reports = store.filter_reports(&filter)?;
    if ui.mode.is_json() {
        return print_json(&reports_summary_json(&reports));
    }
    if reports.is_empty() {
        if !ctx.quiet() {
            print(&ui, &badge(&ui, Badge::Info, "No reports found"));
            print(&ui, &hint(&ui, "flightlog new --drone <id|model>"));
        }
        return Ok(());
    }
    if !ctx.quiet() && ui.mode.is_pretty() {
        let count = format!("{} reports", reports.len());
        print(&ui, &header(&ui, "list", Some(&count)));
    }
    print_report_list(&ui, &reports);
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let store = ctx.open_store()?;
    let report = load_report(&store, &args.id)?;
    if ui.mode.is_json() {
        return print_json(&report);
    }
    print_report(&ui, &report);
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut store = ctx.open_store()?;
    let report = load_report(&store, &args.id)?;

    if args.name.is_none() && args.date.is_none() && args.notes.is_none() && args.drone.is_none()
    {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass --name, --date, --notes or --drone.",
        )
        .into());
    }

    let mut meta = ReportMetadata::from_report(&report);
    if let Some(name) = &args.name {
        meta.name = name.clone();
    }
    if let Some(date) = parse_date_arg(args.date.as_deref(), "--date")? {
        meta.date = date;
    }
    if let Some(notes) = &args.notes {
        meta.notes = Some(notes.clone());
    }
    let drone = match &args.drone {
        Some(key) => resolve_drone(&store, key)?,
        None => report.drone.clone(),
    };

    let updated = assemble(&meta, &drone, &report.weather, report.sections.clone())?;
    store.save_report(&updated)?;

    if !ctx.quiet() {
        print(
            &ui,
            &receipt(
                &ui,
                "Report updated",
                &[
                    ("ID", updated.id.as_str()),
                    ("Name", updated.name.as_str()),
                    ("Date", updated.date.as_str()),
                    ("Drone", updated.drone.model.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let mut store = ctx.open_store()?;
    let report = load_report(&store, &args.id)?;

    if !args.yes {
        if !ui.is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation\nHint: Pass --yes to delete non-interactively.",
            )
            .into());
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete report '{}' ({})?", report.name, report.date))
            .default(false)
            .interact()?;
        if !confirmed {
            if !ctx.quiet() {
                if ui.mode.is_pretty() {
                    print(&ui, &badge(&ui, Badge::Info, "Cancelled"));
                } else {
                    println!("status=cancelled");
                }
            }
            return Ok(());
        }
    }

    store.delete_report(&report.id)?;
    if !ctx.quiet() {
        print(&ui, &receipt(&ui, "Report deleted", &[("ID", report.id.as_str())]));
    }
    Ok(())
}
