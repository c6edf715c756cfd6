use clap::CommandFactory;
use clap_complete::generate;

use flightlog_core::ReportStore;

use crate::app::AppContext;
use crate::cli::{Cli, CompletionsArgs};
use crate::errors::CliError;
use crate::ui::{badge, kv, print, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let store = ctx.open_store()?;
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                let reports = store.list_reports()?.len().to_string();
                let drones = store.list_drones()?.len().to_string();
                print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
                print(&ui, &kv(&ui, "Reports", &reports));
                print(&ui, &kv(&ui, "Drones", &drones));
            }
            Ok(())
        }
        Err(err) => Err(CliError::IntegrityFailed(format!(
            "{}\nHint: Export the readable reports and re-import them into a fresh database.",
            err
        ))
        .into()),
    }
}

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "flightlog", &mut std::io::stdout());
    Ok(())
}
