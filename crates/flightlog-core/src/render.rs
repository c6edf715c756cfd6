//! Recursive rendering of item trees.
//!
//! [`flatten`] walks a tree depth-first, pre-order: every child appears
//! after its parent and before the parent's next sibling. Screen output,
//! the plain-text export and anything a PDF sink consumes are all built
//! from the flattened lines.

use std::fmt;

use crate::model::{Item, ItemKind, Report};

/// Indentation unit for one nesting level in text output.
pub const INDENT: &str = "  ";

/// One rendered item.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    /// 0 for a section's top-level items.
    pub depth: usize,
    /// Checked state, checkboxes only.
    pub checked: Option<bool>,
    pub content: String,
    pub kind: ItemKind,
    /// Type-specific detail such as `Value: 120`; absent when the item
    /// has no value.
    pub detail: Option<String>,
}

impl RenderedLine {
    fn from_item(item: &Item, depth: usize) -> Self {
        Self {
            depth,
            checked: (item.kind == ItemKind::Checkbox).then_some(item.is_checked),
            content: item.content.clone(),
            kind: item.kind,
            detail: detail_for(item),
        }
    }

    /// Marker shown before the content: `[x]`, `[ ]` or `-`.
    pub fn marker(&self) -> &'static str {
        match self.checked {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "-",
        }
    }
}

fn detail_for(item: &Item) -> Option<String> {
    let label = match item.kind {
        ItemKind::Checkbox => return None,
        ItemKind::Text => "Text",
        ItemKind::Number => "Value",
        ItemKind::Select => "Selected",
    };
    item.value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(|v| format!("{}: {}", label, v))
}

/// Flatten an item tree starting at depth 0.
pub fn flatten(items: &[Item]) -> Vec<RenderedLine> {
    let mut lines = Vec::new();
    flatten_into(items, 0, &mut lines);
    lines
}

fn flatten_into(items: &[Item], depth: usize, out: &mut Vec<RenderedLine>) {
    for item in items {
        out.push(RenderedLine::from_item(item, depth));
        if item.has_children() {
            flatten_into(&item.children, depth + 1, out);
        }
    }
}

/// Indented text for an item tree.
pub struct ItemsText<'a> {
    pub items: &'a [Item],
    /// Indentation units applied at depth 0
    pub base_level: usize,
}

impl fmt::Display for ItemsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in flatten(self.items) {
            let indent = INDENT.repeat(self.base_level + line.depth);
            writeln!(f, "{}{} {}", indent, line.marker(), line.content)?;
            if let Some(detail) = &line.detail {
                writeln!(f, "{}    {}", indent, detail)?;
            }
        }
        Ok(())
    }
}

/// Render items as indented text, `base_level` indentation units deep at
/// depth 0.
pub fn render_items(items: &[Item], base_level: usize) -> String {
    ItemsText { items, base_level }.to_string()
}

/// Plain-text rendition of a whole report.
pub struct ReportText<'a>(pub &'a Report);

impl ReportText<'_> {
    fn weather(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weather = &self.0.weather;
        writeln!(f, "Weather for {}:", weather.city)?;
        writeln!(f, "{}Temperature: {}°C", INDENT, weather.temperature)?;
        writeln!(f, "{}Description: {}", INDENT, weather.description)?;
        writeln!(
            f,
            "{}Wind: {} m/s, direction: {}",
            INDENT, weather.wind_speed, weather.wind_direction
        )?;
        writeln!(f, "{}Humidity: {}%", INDENT, weather.humidity)?;
        writeln!(f, "{}Pressure: {} mmHg", INDENT, weather.pressure)?;
        writeln!(f, "{}Visibility: {} km", INDENT, weather.visibility)
    }

    fn drone(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let drone = &self.0.drone;
        let specs = &drone.specifications;
        let dims = &specs.dimensions;
        writeln!(f, "Drone ({} - {}):", drone.name, drone.model)?;
        writeln!(f, "{}Max flight time: {} min", INDENT, specs.max_flight_time)?;
        writeln!(f, "{}Max speed: {} km/h", INDENT, specs.max_speed)?;
        writeln!(f, "{}Max altitude: {} m", INDENT, specs.max_altitude)?;
        writeln!(f, "{}Max range: {} km", INDENT, specs.max_range)?;
        writeln!(f, "{}Weight: {} g", INDENT, specs.weight)?;
        writeln!(
            f,
            "{}Dimensions: {} x {} x {} cm",
            INDENT, dims.length, dims.width, dims.height
        )?;
        if let Some(camera) = &specs.camera {
            writeln!(f, "{}Camera: {} ({})", INDENT, camera.model, camera.resolution)?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Flight report: {}", report.name)?;
        writeln!(f, "Date: {}", report.date)?;
        if let Some(author) = &report.created_by {
            writeln!(f, "Created by: {}", author)?;
        }
        self.weather(f)?;
        writeln!(f)?;
        self.drone(f)?;
        writeln!(f)?;

        for section in &report.sections {
            writeln!(f, "## {}", section.title)?;
            write!(f, "{}", ItemsText { items: &section.items, base_level: 1 })?;
            writeln!(f)?;
        }

        if let Some(notes) = &report.notes {
            writeln!(f, "Notes:\n{}", notes)?;
        }
        Ok(())
    }
}

pub fn render_report_text(report: &Report) -> String {
    ReportText(report).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, WeatherSnapshot};

    fn tree() -> Vec<Item> {
        vec![
            Item::checkbox("Batteries").with_children(vec![
                Item::checkbox("Pack A").checked(true),
                Item::checkbox("Pack B").with_children(vec![Item::checkbox("Voltage")]),
            ]),
            Item::new("Altitude", ItemKind::Number).with_value("120"),
            Item::new("Wind", ItemKind::Select).with_options(["calm", "strong"]),
        ]
    }

    #[test]
    fn test_flatten_is_preorder_with_depth() {
        let lines = flatten(&tree());
        let shape: Vec<(usize, &str)> = lines
            .iter()
            .map(|l| (l.depth, l.content.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (0, "Batteries"),
                (1, "Pack A"),
                (1, "Pack B"),
                (2, "Voltage"),
                (0, "Altitude"),
                (0, "Wind"),
            ]
        );
    }

    #[test]
    fn test_flatten_details() {
        let lines = flatten(&tree());
        assert_eq!(lines[1].checked, Some(true));
        assert_eq!(lines[4].checked, None);
        assert_eq!(lines[4].detail.as_deref(), Some("Value: 120"));
        // select without a value has nothing to show
        assert_eq!(lines[5].detail, None);
    }

    #[test]
    fn test_empty_values_have_no_detail() {
        let items = vec![
            Item::new("Pilot remarks", ItemKind::Text),
            Item::new("Flight time", ItemKind::Number).with_value(""),
            Item::new("Wind", ItemKind::Select).with_value("  "),
            Item::new("Landing", ItemKind::Text).with_value("soft"),
        ];
        let details: Vec<Option<String>> = flatten(&items).into_iter().map(|l| l.detail).collect();
        assert_eq!(details, vec![None, None, None, Some("Text: soft".to_string())]);
        assert_eq!(
            render_items(&items, 0),
            "- Pilot remarks\n- Flight time\n- Wind\n- Landing\n    Text: soft\n"
        );
    }

    #[test]
    fn test_render_items_indentation() {
        let text = render_items(&tree(), 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  [ ] Batteries");
        assert_eq!(lines[1], "    [x] Pack A");
        assert_eq!(lines[3], "      [ ] Voltage");
        assert_eq!(lines[4], "  - Altitude");
        assert_eq!(lines[5], "      Value: 120");
    }

    #[test]
    fn test_render_report_text_sections_in_order() {
        let report = Report {
            id: "r".to_string(),
            name: "Morning".to_string(),
            date: "15.01.2025".to_string(),
            timestamp: 0,
            weather: WeatherSnapshot::unavailable("Moscow", 0),
            drone: crate::demo::drone_profiles().remove(0),
            sections: vec![
                Section {
                    items: tree(),
                    ..Section::new("Preparation")
                },
                Section::new("Post-flight"),
            ],
            created_by: None,
            notes: Some("All good".to_string()),
        };

        let text = render_report_text(&report);
        assert!(text.starts_with("Flight report: Morning\nDate: 15.01.2025\n"));
        let prep = text.find("## Preparation").unwrap();
        let post = text.find("## Post-flight").unwrap();
        assert!(prep < post);
        assert!(text.contains("  [ ] Batteries\n    [x] Pack A\n"));
        assert!(text.ends_with("Notes:\nAll good\n"));
        assert!(text.contains("  Dimensions: 120 x 180 x 30 cm\n"));
        assert!(text.contains("  Camera: HD Camera 1080p (1920x1080)\n"));
    }
}
