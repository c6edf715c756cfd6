//! JSON output for reports and catalogs.

use serde::Serialize;

use flightlog_core::Report;

/// Compact view of a report for listings.
pub fn report_summary_json(report: &Report) -> serde_json::Value {
    serde_json::json!({
        "id": report.id,
        "name": report.name,
        "date": report.date,
        "timestamp": report.timestamp,
        "droneName": report.drone.name,
        "droneModel": report.drone.model,
        "sections": report.sections.len(),
        "items": report.top_level_item_count(),
        "createdBy": report.created_by,
    })
}

pub fn reports_summary_json(reports: &[Report]) -> Vec<serde_json::Value> {
    reports.iter().map(report_summary_json).collect()
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightlog_core::demo::drone_profiles;
    use flightlog_core::{Item, Section, WeatherSnapshot};

    #[test]
    fn test_summary_counts_top_level_items() {
        let drone = drone_profiles().remove(0);
        let mut section = Section::new("Checks");
        section.items = vec![Item::checkbox("a"), Item::checkbox("b")];
        let report = Report {
            id: "r1".into(),
            name: "Morning".into(),
            date: "01.02.2025".into(),
            timestamp: 1,
            weather: WeatherSnapshot::unavailable("Krasnoyarsk", 1),
            drone,
            sections: vec![section],
            created_by: None,
            notes: None,
        };
        let json = report_summary_json(&report);
        assert_eq!(json["droneModel"], "miniSIGMA-1");
        assert_eq!(json["sections"], 1);
        assert_eq!(json["items"], 2);
        assert!(json["createdBy"].is_null());
    }
}
