//! Export sinks and JSON interop.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::error::{FlightlogError, Result};
use crate::fs::write_atomic;
use crate::model::Report;
use crate::render::render_report_text;
use crate::tree::duplicate_ids;

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Text => f.write_str("text"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FlightlogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            "pdf" => Err(FlightlogError::InvalidInput(
                "PDF export is not supported; use text".to_string(),
            )),
            other => Err(FlightlogError::InvalidInput(format!(
                "Unknown export format: {} (use json or text)",
                other
            ))),
        }
    }
}

/// Pretty-printed JSON in the persisted report shape.
pub fn export_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render `report` in `format`.
pub fn export_contents(report: &Report, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(report),
        ExportFormat::Text => Ok(render_report_text(report)),
    }
}

/// `<name>_<dd-mm-yyyy_HH-MM>.<ext>`, whitespace runs in the name
/// collapsed to `_`.
pub fn export_file_name<Tz>(report: &Report, extension: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let name = report.name.split_whitespace().collect::<Vec<_>>().join("_");
    // path separators would escape the export directory
    let name: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!(
        "{}_{}.{}",
        name,
        now.format("%d-%m-%Y_%H-%M"),
        extension
    )
}

/// Write an export file into `dir` and return its path.
pub fn write_export<Tz>(
    dir: &Path,
    report: &Report,
    format: ExportFormat,
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let contents = export_contents(report, format)?;
    let path = dir.join(export_file_name(report, format.extension(), now));
    write_atomic(&path, contents.as_bytes())
        .map_err(|e| FlightlogError::Export(format!("{}: {}", path.display(), e)))?;
    info!(report_id = %report.id, path = %path.display(), %format, "Exported report");
    Ok(path)
}

/// Parse a JSON export, rejecting reports whose ids are not unique.
pub fn import_json(json: &str) -> Result<Report> {
    let report: Report = serde_json::from_str(json)?;
    if report.id.trim().is_empty() {
        return Err(FlightlogError::InvalidInput(
            "Imported report has no id".to_string(),
        ));
    }
    let duplicates = duplicate_ids(&report.sections);
    if !duplicates.is_empty() {
        return Err(FlightlogError::InvalidInput(format!(
            "Imported report has duplicate ids: {}",
            duplicates.join(", ")
        )));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::model::{Item, Section, WeatherSnapshot};
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_report() -> Report {
        Report {
            id: "report-1".to_string(),
            name: "Morning  flight\tcheck".to_string(),
            date: "15.01.2025".to_string(),
            timestamp: 1_736_930_000_000,
            weather: WeatherSnapshot::unavailable("Moscow", 0),
            drone: demo::drone_profiles().remove(1),
            sections: vec![Section {
                items: vec![Item::checkbox("Props").with_children(vec![Item::checkbox("Tight")])],
                ..Section::new("Prep")
            }],
            created_by: None,
            notes: None,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_export_file_name() {
        let name = export_file_name(&sample_report(), "json", &at());
        assert_eq!(name, "Morning_flight_check_15-01-2025_09-05.json");
    }

    #[test]
    fn test_export_json_shape() {
        let json = export_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["id", "name", "date", "timestamp", "weather", "drone", "sections"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value.get("notes").is_none());
        assert_eq!(
            value["sections"][0]["items"][0]["children"][0]["content"],
            "Tight"
        );
        assert_eq!(value["weather"]["windSpeed"], 0.0);
    }

    #[test]
    fn test_import_round_trip() {
        let report = sample_report();
        let imported = import_json(&export_json(&report).unwrap()).unwrap();
        assert_eq!(imported, report);
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut report = sample_report();
        let twin = report.sections[0].clone();
        report.sections.push(twin);
        let err = import_json(&export_json(&report).unwrap()).unwrap_err();
        assert!(err.to_string().contains("duplicate ids"));
    }

    #[test]
    fn test_write_export_text() {
        let dir = tempdir().unwrap();
        let path = write_export(dir.path(), &sample_report(), ExportFormat::Text, &at()).unwrap();
        assert!(path.ends_with("Morning_flight_check_15-01-2025_09-05.txt"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("## Prep\n  [ ] Props\n    [ ] Tight\n"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
