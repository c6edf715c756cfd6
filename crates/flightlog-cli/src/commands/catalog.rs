use flightlog_core::ReportStore;

use crate::app::AppContext;
use crate::cli::{TemplateKind, TemplatesArgs};
use crate::output::{print_drones, print_json, print_report_templates, print_section_templates};
use crate::ui::{badge, header, hint, print, Badge};

pub fn handle_templates(ctx: &AppContext, args: &TemplatesArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let store = ctx.open_store()?;

    let (count, title) = match args.kind {
        TemplateKind::Drones => {
            let drones = store.list_drones()?;
            if ui.mode.is_json() {
                return print_json(&drones);
            }
            print_header(ctx, &ui, "drones", drones.len());
            if !drones.is_empty() {
                print_drones(&ui, &drones);
            }
            (drones.len(), "drones")
        }
        TemplateKind::Sections => {
            let templates = store.list_section_templates()?;
            if ui.mode.is_json() {
                return print_json(&templates);
            }
            print_header(ctx, &ui, "section templates", templates.len());
            if !templates.is_empty() {
                print_section_templates(&ui, &templates);
            }
            (templates.len(), "section templates")
        }
        TemplateKind::Reports => {
            let templates = store.list_report_templates()?;
            if ui.mode.is_json() {
                return print_json(&templates);
            }
            print_header(ctx, &ui, "report templates", templates.len());
            if !templates.is_empty() {
                print_report_templates(&ui, &templates);
            }
            (templates.len(), "report templates")
        }
    };

    if count == 0 && !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Info, &format!("No {} stored", title)));
        print(&ui, &hint(&ui, "flightlog init --force seeds the demo catalog"));
    }
    Ok(())
}

fn print_header(ctx: &AppContext, ui: &crate::ui::UiContext, what: &str, count: usize) {
    if !ctx.quiet() && ui.mode.is_pretty() && count > 0 {
        let context = format!("{} {}", count, what);
        print(ui, &header(ui, "templates", Some(&context)));
    }
}
