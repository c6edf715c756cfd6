//! Text and table output for reports and catalogs.

use flightlog_core::render::{flatten, render_report_text, RenderedLine, INDENT};
use flightlog_core::{DroneProfile, Item, Report, ReportTemplate, SectionTemplate, WeatherSnapshot};

use crate::ui::format::{format_timestamp, number, short_id, single_line, truncate};
use crate::ui::theme::{check_marker, styled, styles};
use crate::ui::{heading, kv, table, Column, TableStyle, UiContext};

/// Listing rows: short id, date, name, drone model, top-level item count.
pub fn report_rows(reports: &[Report]) -> Vec<Vec<String>> {
    reports
        .iter()
        .map(|r| {
            vec![
                short_id(&r.id),
                r.date.clone(),
                truncate(&single_line(&r.name), 40),
                r.drone.model.clone(),
                r.top_level_item_count().to_string(),
            ]
        })
        .collect()
}

pub fn print_report_list(ui: &UiContext, reports: &[Report]) {
    let columns = [
        Column::new("ID"),
        Column::new("Date"),
        Column::new("Name"),
        Column::new("Drone"),
        Column::numeric("Items"),
    ];
    println!("{}", table(ui, TableStyle::Boxed, &columns, &report_rows(reports)));
}

/// Full report view.
///
/// Plain mode prints the same text the text export writes. Pretty mode
/// adds colored headings and the ids needed by `section` / `item`.
pub fn print_report(ui: &UiContext, report: &Report) {
    if !ui.mode.is_pretty() {
        print!("{}", render_report_text(report));
        return;
    }

    println!("{}", styled(&report.name, styles::bold(), ui.color));
    println!("{}", kv(ui, "ID", &report.id));
    println!("{}", kv(ui, "Date", &report.date));
    println!("{}", kv(ui, "Saved", &format_timestamp(report.timestamp, true)));
    if let Some(author) = &report.created_by {
        println!("{}", kv(ui, "Created by", author));
    }
    println!();
    print_weather(ui, &report.weather);
    println!();
    println!(
        "{}",
        heading(ui, &format!("Drone: {} ({})", report.drone.name, report.drone.model))
    );
    print_drone_specs(ui, &report.drone);

    for section in &report.sections {
        println!();
        let id = styled(&format!("[{}]", short_id(&section.id)), styles::dim(), ui.color);
        println!("{} {}", heading(ui, &section.title), id);
        for item in &section.items {
            print_top_level_item(ui, item);
        }
    }

    if let Some(notes) = &report.notes {
        println!();
        println!("{}", heading(ui, "Notes"));
        println!("{}", notes);
    }
}

fn print_top_level_item(ui: &UiContext, item: &Item) {
    let id = styled(&short_id(&item.id), styles::dim(), ui.color);
    for (index, line) in flatten(std::slice::from_ref(item)).iter().enumerate() {
        let indent = INDENT.repeat(line.depth + 1);
        if index == 0 {
            println!("{}{} {}", indent, render_line(ui, line), id);
        } else {
            println!("{}{}", indent, render_line(ui, line));
        }
    }
}

fn render_line(ui: &UiContext, line: &RenderedLine) -> String {
    let mut out = format!("{} {}", check_marker(line.checked, ui.unicode), line.content);
    if let Some(detail) = &line.detail {
        out.push_str(&format!(
            "  {}",
            styled(&format!("({})", detail), styles::dim(), ui.color)
        ));
    }
    out
}

pub fn print_weather(ui: &UiContext, weather: &WeatherSnapshot) {
    println!("{}", heading(ui, &format!("Weather: {}", weather.city)));
    let rows = [
        ("Temperature", format!("{}°C", number(weather.temperature))),
        ("Conditions", weather.description.clone()),
        (
            "Wind",
            format!("{} m/s {}", number(weather.wind_speed), weather.wind_direction),
        ),
        ("Humidity", format!("{}%", number(weather.humidity))),
        ("Pressure", format!("{} mmHg", number(weather.pressure))),
        ("Visibility", format!("{} km", number(weather.visibility))),
        ("Captured", format_timestamp(weather.timestamp, ui.mode.is_pretty())),
    ];
    for (key, value) in rows {
        println!("{}{}", INDENT, kv(ui, key, &value));
    }
}

fn print_drone_specs(ui: &UiContext, drone: &DroneProfile) {
    let specs = &drone.specifications;
    let mut rows = vec![
        ("Max flight time", format!("{} min", number(specs.max_flight_time))),
        ("Max speed", format!("{} km/h", number(specs.max_speed))),
        ("Max altitude", format!("{} m", number(specs.max_altitude))),
        ("Max range", format!("{} km", number(specs.max_range))),
        ("Weight", format!("{} g", number(specs.weight))),
        ("Battery", specs.battery_type.clone()),
    ];
    if let Some(camera) = &specs.camera {
        rows.push(("Camera", format!("{} ({})", camera.model, camera.resolution)));
    }
    for (key, value) in rows {
        println!("{}{}", INDENT, kv(ui, key, &value));
    }
}

pub fn drone_rows(drones: &[DroneProfile]) -> Vec<Vec<String>> {
    drones
        .iter()
        .map(|d| {
            let specs = &d.specifications;
            vec![
                d.id.clone(),
                d.name.clone(),
                d.model.clone(),
                format!("{} min", number(specs.max_flight_time)),
                format!("{} km", number(specs.max_range)),
            ]
        })
        .collect()
}

pub fn print_drones(ui: &UiContext, drones: &[DroneProfile]) {
    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Model"),
        Column::numeric("Flight time"),
        Column::numeric("Range"),
    ];
    println!("{}", table(ui, TableStyle::Bare, &columns, &drone_rows(drones)));
}

pub fn print_section_templates(ui: &UiContext, templates: &[SectionTemplate]) {
    let columns = [Column::new("ID"), Column::new("Title"), Column::numeric("Items")];
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                truncate(&t.title, 50),
                flightlog_core::tree::count_items(&t.items).to_string(),
            ]
        })
        .collect();
    println!("{}", table(ui, TableStyle::Bare, &columns, &rows));
}

pub fn print_report_templates(ui: &UiContext, templates: &[ReportTemplate]) {
    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::numeric("Sections"),
        Column::new("Drones"),
    ];
    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            let drones = if t.drone_types.is_empty() {
                "any".to_string()
            } else {
                t.drone_types.join(",")
            };
            vec![
                t.id.clone(),
                truncate(&t.name, 40),
                t.sections.len().to_string(),
                drones,
            ]
        })
        .collect();
    println!("{}", table(ui, TableStyle::Bare, &columns, &rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightlog_core::demo::drone_profiles;

    #[test]
    fn test_drone_rows() {
        let rows = drone_rows(&drone_profiles());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "drone-1");
        assert_eq!(rows[1][2], "Orlan-10");
    }

    #[test]
    fn test_render_line_with_detail() {
        let ui = crate::ui::render::tests::plain_ctx();
        let item = Item::new("Flight time, min", flightlog_core::ItemKind::Number).with_value("25");
        let line = flatten(std::slice::from_ref(&item)).remove(0);
        assert_eq!(render_line(&ui, &line), "- Flight time, min  (Value: 25)");
    }
}
