//! Report assembly and submit-time validation.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::{FlightlogError, Result};
use crate::filter::format_report_date;
use crate::id::{new_id, Id};
use crate::model::{DroneProfile, Report, Section, WeatherSnapshot};

/// User-supplied report fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportMetadata {
    /// Set when re-saving an existing report.
    pub id: Option<Id>,
    pub name: String,
    /// `dd.mm.yyyy`
    pub date: String,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

impl ReportMetadata {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    /// Defaults for a report created on `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        let date = format_report_date(date);
        Self::new(format!("Report from {}", date), date)
    }

    pub fn today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Metadata of an existing report, for re-saving it under the same id.
    pub fn from_report(report: &Report) -> Self {
        Self {
            id: Some(report.id.clone()),
            name: report.name.clone(),
            date: report.date.clone(),
            notes: report.notes.clone(),
            created_by: report.created_by.clone(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Reject a blank name or a date that is not a real `dd.mm.yyyy` date.
pub fn validate_metadata(metadata: &ReportMetadata) -> Result<()> {
    if metadata.name.trim().is_empty() {
        return Err(FlightlogError::Validation(
            "Report name is required".to_string(),
        ));
    }
    validate_date(&metadata.date)
}

/// Strict `dd.mm.yyyy`: two-digit day 01-31, two-digit month 01-12,
/// four-digit year, and an existing calendar day.
pub fn validate_date(date: &str) -> Result<()> {
    if date.trim().is_empty() {
        return Err(FlightlogError::Validation(
            "Report date is required".to_string(),
        ));
    }
    if !matches_date_pattern(date) {
        return Err(FlightlogError::Validation(format!(
            "Date must be in dd.mm.yyyy format: {}",
            date
        )));
    }
    crate::filter::parse_report_date(date)
        .map(|_| ())
        .ok_or_else(|| FlightlogError::Validation(format!("No such calendar date: {}", date)))
}

fn matches_date_pattern(date: &str) -> bool {
    let parts: Vec<&str> = date.split('.').collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month, year] => (*day, *month, *year),
        _ => return false,
    };
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(day, 2) || !all_digits(month, 2) || !all_digits(year, 4) {
        return false;
    }
    let in_range = |s: &str, max: u32| s.parse::<u32>().map_or(false, |v| (1..=max).contains(&v));
    in_range(day, 31) && in_range(month, 12)
}

/// Package the editing state into a report stamped with the current instant.
pub fn assemble(
    metadata: &ReportMetadata,
    drone: &DroneProfile,
    weather: &WeatherSnapshot,
    sections: Vec<Section>,
) -> Result<Report> {
    assemble_at(metadata, drone, weather, sections, Utc::now())
}

/// [`assemble`] with an explicit instant.
///
/// `sections` is moved into the report; keep editing a fresh copy rather
/// than the saved snapshot.
pub fn assemble_at(
    metadata: &ReportMetadata,
    drone: &DroneProfile,
    weather: &WeatherSnapshot,
    sections: Vec<Section>,
    now: DateTime<Utc>,
) -> Result<Report> {
    validate_metadata(metadata)?;

    Ok(Report {
        id: metadata.id.clone().unwrap_or_else(new_id),
        name: metadata.name.trim().to_string(),
        date: metadata.date.clone(),
        timestamp: now.timestamp_millis(),
        weather: weather.clone(),
        drone: drone.clone(),
        sections,
        created_by: metadata.created_by.clone(),
        notes: metadata
            .notes
            .clone()
            .filter(|notes| !notes.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_for_date_defaults() {
        let meta = ReportMetadata::for_date(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(meta.name, "Report from 07.03.2025");
        assert_eq!(meta.date, "07.03.2025");
        assert!(meta.id.is_none());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = validate_metadata(&ReportMetadata::new("   ", "01.01.2025")).unwrap_err();
        assert!(matches!(err, FlightlogError::Validation(_)));
    }

    #[test]
    fn test_validate_date_pattern() {
        assert!(validate_date("15.01.2025").is_ok());
        assert!(validate_date("29.02.2024").is_ok());
        for bad in [
            "",
            "1.01.2025",
            "15.1.2025",
            "15.01.25",
            "32.01.2025",
            "15.13.2025",
            "00.01.2025",
            "2025-01-15",
            "31.04.2025",
            "29.02.2025",
        ] {
            assert!(validate_date(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_assemble_embeds_by_value_and_stamps_time() {
        let drone = demo::drone_profiles().remove(0);
        let weather = WeatherSnapshot::unavailable("Moscow", 0);
        let sections = vec![Section::new("Prep")];
        let meta = ReportMetadata::new("Morning flight", "15.01.2025").with_notes("gusty");

        let report = assemble_at(&meta, &drone, &weather, sections.clone(), fixed_now()).unwrap();

        assert_eq!(report.timestamp, fixed_now().timestamp_millis());
        assert_eq!(report.drone, drone);
        assert_eq!(report.weather, weather);
        assert_eq!(report.sections, sections);
        assert_eq!(report.notes.as_deref(), Some("gusty"));
        assert!(!report.id.is_empty());
    }

    #[test]
    fn test_assemble_keeps_existing_id() {
        let drone = demo::drone_profiles().remove(0);
        let weather = WeatherSnapshot::unavailable("Moscow", 0);
        let mut meta = ReportMetadata::new("Flight", "15.01.2025");
        meta.id = Some("report-42".to_string());

        let report = assemble_at(&meta, &drone, &weather, Vec::new(), fixed_now()).unwrap();
        assert_eq!(report.id, "report-42");

        let again = ReportMetadata::from_report(&report);
        assert_eq!(again.id.as_deref(), Some("report-42"));
    }

    #[test]
    fn test_assemble_validation_failure_leaves_sections_with_caller() {
        let drone = demo::drone_profiles().remove(0);
        let weather = WeatherSnapshot::unavailable("Moscow", 0);
        let sections = vec![Section::new("Prep")];
        let meta = ReportMetadata::new("Flight", "15/01/2025");

        let result = assemble(&meta, &drone, &weather, sections.clone());
        assert!(matches!(result, Err(FlightlogError::Validation(_))));
        assert_eq!(sections.len(), 1);
    }
}
