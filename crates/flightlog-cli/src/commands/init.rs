use std::path::PathBuf;

use flightlog_core::demo::seed_demo_data;
use flightlog_core::SqliteStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_db_path, write_config, FlightlogConfig};
use crate::errors::CliError;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let db_path = match args.path.as_ref().or(ctx.cli().db.as_ref()) {
        Some(path) => PathBuf::from(path),
        None => default_db_path()?,
    };
    let config = FlightlogConfig::new(db_path.clone(), args.city.clone());
    write_config(&config_path, &config)?;

    let mut store = SqliteStore::open(&db_path)?;
    let demo = if args.no_demo {
        "skipped"
    } else if seed_demo_data(&mut store)? {
        "seeded"
    } else {
        "already present"
    };

    if !ctx.quiet() {
        let config_display = config_path.display().to_string();
        let db_display = db_path.display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Flightlog initialized",
                &[
                    ("Config", config_display.as_str()),
                    ("Database", db_display.as_str()),
                    ("City", config.weather.city.as_str()),
                    ("Demo data", demo),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            print(&ui, &hint(&ui, "flightlog new --drone miniSIGMA-1 --template report-template-1"));
        }
    }
    Ok(())
}
