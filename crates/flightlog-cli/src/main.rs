//! Flightlog CLI - checklist-style flight reports for drone operations
//!
//! Command-line front end over `flightlog-core`: report creation from
//! templates, section/item editing, filtered listings, exports and weather.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;
mod weather;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flightlog_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{catalog, init, maintenance, reports, sections, transfer};
use crate::constants::env;
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let (message, hint) = split_error_hint(&format!("{:#}", e));
        let hint = hint.or_else(|| contextual_hint(&message));
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Logs go to stderr. `FLIGHTLOG_LOG` takes an `EnvFilter` directive;
/// `--verbose` raises the default from `warn` to debug for both crates.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "flightlog_core=debug,flightlog_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split "message\nHint: text" into its parts.
fn split_error_hint(error: &str) -> (String, Option<String>) {
    match error.find("\nHint:") {
        Some(idx) => (
            error[..idx].to_string(),
            Some(error[idx + "\nHint:".len()..].trim().to_string()),
        ),
        None => (error.to_string(), None),
    }
}

/// Hints for common failures that carry none.
fn contextual_hint(error: &str) -> Option<String> {
    let lower = error.to_lowercase();
    if lower.contains("validation error") && lower.contains("date") {
        return Some("Dates use the dd.mm.yyyy format, e.g. 05.01.2025.".to_string());
    }
    if lower.contains("validation error") && lower.contains("name") {
        return Some("Pass a non-empty --name.".to_string());
    }
    if lower.contains("sqlite error") || lower.contains("storage error") {
        return Some("Run `flightlog check` to verify the database.".to_string());
    }
    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::New(args)) => reports::handle_new(ctx, args)?,
        Some(Commands::List(args)) => reports::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => reports::handle_show(ctx, args)?,
        Some(Commands::Edit(args)) => reports::handle_edit(ctx, args)?,
        Some(Commands::Section(args)) => sections::handle_section(ctx, args)?,
        Some(Commands::Item(args)) => sections::handle_item(ctx, args)?,
        Some(Commands::Delete(args)) => reports::handle_delete(ctx, args)?,
        Some(Commands::Export(args)) => transfer::handle_export(ctx, args)?,
        Some(Commands::Import(args)) => transfer::handle_import(ctx, args)?,
        Some(Commands::Templates(args)) => catalog::handle_templates(ctx, args)?,
        Some(Commands::Weather(args)) => commands::weather::handle_weather(ctx, args)?,
        Some(Commands::Check) => maintenance::handle_check(ctx)?,
        Some(Commands::Completions(args)) => maintenance::handle_completions(args)?,
        None => {
            println!("Flightlog v{}", VERSION);
            println!("\nQuickstart:");
            println!("  flightlog init");
            println!("  flightlog new --drone miniSIGMA-1 --template report-template-1");
            println!("  flightlog list --sort date --order desc");
            println!("  flightlog show <id>");
            println!("  flightlog export <id> --format text");
            println!("\nRun `flightlog --help` for full usage.");
        }
    }
    Ok(())
}
