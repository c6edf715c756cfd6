//! Data model for flight reports.
//!
//! Field names on the wire are camelCase and stable, so a JSON export of a
//! [`Report`] reads `id`, `name`, `date`, `timestamp`, `weather`, `drone`,
//! `sections` and `notes` at the top level, with `sections[].items[]`
//! nesting recursively through `children`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlightlogError;
use crate::id::{new_id, Id};

/// Kind of checklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Checkbox,
    Text,
    Number,
    Select,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Checkbox,
        ItemKind::Text,
        ItemKind::Number,
        ItemKind::Select,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = FlightlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checkbox" => Ok(Self::Checkbox),
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "select" => Ok(Self::Select),
            other => Err(FlightlogError::InvalidInput(format!(
                "Unknown item type: {} (use checkbox, text, number or select)",
                other
            ))),
        }
    }
}

/// A checklist entry, possibly containing nested sub-entries.
///
/// `is_checked` is only meaningful for checkboxes, `value` for
/// text/number/select and `options` for select, but all fields are always
/// carried so that changing an item's kind never loses data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Id,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Absent and empty are equivalent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,
}

impl Item {
    /// New unchecked item with a fresh id.
    pub fn new(content: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: new_id(),
            content: content.into(),
            kind,
            is_checked: false,
            value: None,
            options: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn checkbox(content: impl Into<String>) -> Self {
        Self::new(content, ItemKind::Checkbox)
    }

    pub fn with_children(mut self, children: Vec<Item>) -> Self {
        self.children = children;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn checked(mut self, is_checked: bool) -> Self {
        self.is_checked = is_checked;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A titled, ordered group of top-level items within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            items: Vec::new(),
        }
    }
}

/// Blueprint for a single section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTemplate {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Blueprint for a whole report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplate {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub sections: Vec<SectionTemplate>,
    /// Compatible drone models; empty means any model.
    #[serde(default)]
    pub drone_types: Vec<String>,
}

impl ReportTemplate {
    /// Whether this template lists `model` as compatible.
    pub fn supports(&self, model: &str) -> bool {
        self.drone_types.is_empty() || self.drone_types.iter().any(|m| m == model)
    }
}

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Onboard camera description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub model: String,
    pub resolution: String,
}

/// Fixed specification record of a drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneSpecifications {
    /// Minutes
    pub max_flight_time: f64,
    /// km/h
    pub max_speed: f64,
    /// Metres
    pub max_altitude: f64,
    /// Kilometres
    pub max_range: f64,
    /// Grams
    pub weight: f64,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
    pub battery_type: String,
}

/// Immutable reference data describing a drone. Embedded by value in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneProfile {
    pub id: Id,
    pub name: String,
    pub model: String,
    pub specifications: DroneSpecifications,
}

/// Weather conditions captured at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    pub description: String,
    /// m/s
    pub wind_speed: f64,
    pub wind_direction: String,
    /// Percent
    pub humidity: f64,
    /// mmHg
    pub pressure: f64,
    /// Kilometres
    pub visibility: f64,
    pub icon: String,
    /// Capture instant, Unix milliseconds
    pub timestamp: i64,
}

/// A saved flight report.
///
/// `timestamp` is authoritative for chronological ordering; `date` is a
/// user-editable display string in `dd.mm.yyyy` form. The two are allowed
/// to diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Id,
    pub name: String,
    pub date: String,
    /// Unix milliseconds at assembly time
    pub timestamp: i64,
    pub weather: WeatherSnapshot,
    pub drone: DroneProfile,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Report {
    /// Number of top-level items across all sections.
    pub fn top_level_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Drone-model filter value meaning "every model".
pub const ALL_DRONE_MODELS: &str = "_all";

/// Sort key for report listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Drone,
}

impl FromStr for SortBy {
    type Err = FlightlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "drone" => Ok(Self::Drone),
            other => Err(FlightlogError::InvalidInput(format!(
                "Unknown sort key: {} (use date or drone)",
                other
            ))),
        }
    }
}

/// Sort direction for report listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = FlightlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(FlightlogError::InvalidInput(format!(
                "Unknown sort order: {} (use asc or desc)",
                other
            ))),
        }
    }
}

/// Filter and ordering for a report listing.
///
/// The default is the listing's reset state: newest first, no constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// Inclusive lower bound, `dd.mm.yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    /// Inclusive upper bound, `dd.mm.yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    /// Exact, case-sensitive drone model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_model: Option<String>,

    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = Some(date.into());
        self
    }

    pub fn date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }

    pub fn drone_model(mut self, model: impl Into<String>) -> Self {
        self.drone_model = Some(model.into());
        self
    }

    pub fn sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Select a sort key the way a column header does: re-selecting the
    /// active key flips the order, a new key starts descending.
    pub fn toggle_sort(&mut self, sort_by: SortBy) {
        if self.sort_by == sort_by {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = sort_by;
            self.sort_order = SortOrder::Desc;
        }
    }

    /// Drone model constraint, with blank and the `_all` sentinel treated as unset.
    pub fn effective_drone_model(&self) -> Option<&str> {
        self.drone_model
            .as_deref()
            .filter(|m| !m.is_empty() && *m != ALL_DRONE_MODELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_shape() {
        let item = Item {
            id: "a".to_string(),
            content: "Charge batteries".to_string(),
            kind: ItemKind::Checkbox,
            is_checked: true,
            value: None,
            options: Vec::new(),
            children: Vec::new(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "a",
                "content": "Charge batteries",
                "type": "checkbox",
                "isChecked": true
            })
        );
    }

    #[test]
    fn test_item_missing_children_is_empty() {
        let item: Item = serde_json::from_str(
            r#"{"id":"x","content":"Wind","type":"select","isChecked":false,"options":["low","high"]}"#,
        )
        .unwrap();
        assert!(item.children.is_empty());
        assert_eq!(item.kind, ItemKind::Select);
        assert_eq!(item.options, vec!["low", "high"]);
    }

    #[test]
    fn test_item_kind_from_str() {
        assert_eq!("Number".parse::<ItemKind>().unwrap(), ItemKind::Number);
        assert!("radio".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_report_template_supports() {
        let template = ReportTemplate {
            id: "t".to_string(),
            name: "Standard".to_string(),
            sections: Vec::new(),
            drone_types: vec!["miniSIGMA-1".to_string()],
        };
        assert!(template.supports("miniSIGMA-1"));
        assert!(!template.supports("minisigma-1"));

        let open = ReportTemplate {
            drone_types: Vec::new(),
            ..template
        };
        assert!(open.supports("anything"));
    }

    #[test]
    fn test_filter_default_is_newest_first() {
        let filter = ReportFilter::default();
        assert_eq!(filter.sort_by, SortBy::Date);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(filter.date_from.is_none());
    }

    #[test]
    fn test_filter_toggle_sort() {
        let mut filter = ReportFilter::new();
        filter.toggle_sort(SortBy::Date);
        assert_eq!(filter.sort_order, SortOrder::Asc);

        filter.toggle_sort(SortBy::Drone);
        assert_eq!(filter.sort_by, SortBy::Drone);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_filter_drone_sentinel() {
        assert_eq!(
            ReportFilter::new().drone_model("_all").effective_drone_model(),
            None
        );
        assert_eq!(ReportFilter::new().drone_model("").effective_drone_model(), None);
        assert_eq!(
            ReportFilter::new()
                .drone_model("Orlan-10")
                .effective_drone_model(),
            Some("Orlan-10")
        );
    }
}
