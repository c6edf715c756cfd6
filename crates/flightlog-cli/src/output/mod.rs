//! Output helpers for reports, catalogs and weather.

mod json;
mod text;

pub use json::{print_json, report_summary_json, reports_summary_json};
pub use text::{
    print_drones, print_report, print_report_list, print_report_templates,
    print_section_templates, print_weather,
};
