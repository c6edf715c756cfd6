use std::path::PathBuf;

use chrono::Local;

use flightlog_core::export::{import_json, write_export, ExportFormat};
use flightlog_core::ReportStore;

use crate::app::AppContext;
use crate::cli::{ExportArgs, ImportArgs};
use crate::errors::CliError;
use crate::helpers::load_report;
use crate::ui::{print, receipt};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let format: ExportFormat = args
        .format
        .parse()
        .map_err(|e: flightlog_core::FlightlogError| CliError::invalid_input(e.to_string()))?;
    let store = ctx.open_store()?;
    let report = load_report(&store, &args.id)?;

    let dir = match &args.out {
        Some(dir) => PathBuf::from(dir),
        None => ctx.export_dir()?,
    };
    let path = write_export(&dir, &report, format, &Local::now())?;

    let path_display = path.display().to_string();
    if ctx.quiet() {
        println!("{}", path_display);
    } else {
        let format_name = format.to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Report exported",
                &[
                    ("Path", path_display.as_str()),
                    ("Format", format_name.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let json = std::fs::read_to_string(&args.file).map_err(|e| {
        CliError::not_found(
            format!("Cannot read {}: {}", args.file, e),
            "Pass the path of a JSON file written by `flightlog export`.",
        )
    })?;
    let report = import_json(&json).map_err(|e| CliError::invalid_input(e.to_string()))?;

    let mut store = ctx.open_store()?;
    if !args.replace && store.get_report(&report.id)?.is_some() {
        return Err(CliError::invalid_input(format!(
            "Report {} already exists\nHint: Pass --replace to overwrite it.",
            report.id
        ))
        .into());
    }
    store.save_report(&report)?;

    if ctx.quiet() {
        println!("{}", report.id);
    } else {
        print(
            &ui,
            &receipt(
                &ui,
                "Report imported",
                &[("ID", report.id.as_str()), ("Name", report.name.as_str())],
            ),
        );
    }
    Ok(())
}
