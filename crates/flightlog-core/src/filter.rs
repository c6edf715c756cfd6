//! Report filtering and ordering.
//!
//! [`apply`] is a pure function of its inputs: the collection is only read,
//! and the same `(reports, filter)` pair always yields the same sequence.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::warn;

use crate::model::{Report, ReportFilter, SortBy, SortOrder};

/// Textual date format used by `Report::date` and filter bounds.
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a `dd.mm.yyyy` date.
pub fn parse_report_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), REPORT_DATE_FORMAT).ok()
}

pub fn format_report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

/// Select and order reports according to `filter`.
pub fn apply(reports: &[Report], filter: &ReportFilter) -> Vec<Report> {
    let from = parse_bound(filter.date_from.as_deref(), "dateFrom");
    let to = parse_bound(filter.date_to.as_deref(), "dateTo");
    let drone_model = filter.effective_drone_model();

    let mut selected: Vec<Report> = reports
        .iter()
        .filter(|report| within_dates(report, from, to))
        .filter(|report| drone_model.map_or(true, |model| report.drone.model == model))
        .cloned()
        .collect();

    sort_reports(&mut selected, filter.sort_by, filter.sort_order);
    selected
}

/// Stable in-place sort; equal keys keep their input order in both directions.
pub fn sort_reports(reports: &mut [Report], sort_by: SortBy, sort_order: SortOrder) {
    let compare = |a: &Report, b: &Report| -> Ordering {
        match sort_by {
            SortBy::Date => a.timestamp.cmp(&b.timestamp),
            SortBy::Drone => a
                .drone
                .model
                .to_lowercase()
                .cmp(&b.drone.model.to_lowercase()),
        }
    };
    match sort_order {
        SortOrder::Asc => reports.sort_by(compare),
        SortOrder::Desc => reports.sort_by(|a, b| compare(b, a)),
    }
}

/// A bound that is absent, blank or unparseable does not constrain anything.
fn parse_bound(bound: Option<&str>, name: &str) -> Option<NaiveDate> {
    let raw = bound.filter(|b| !b.trim().is_empty())?;
    let parsed = parse_report_date(raw);
    if parsed.is_none() {
        warn!(bound = name, value = raw, "Ignoring unparseable filter date");
    }
    parsed
}

fn within_dates(report: &Report, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(date) = parse_report_date(&report.date) else {
        warn!(
            report_id = %report.id,
            date = %report.date,
            "Excluding report with unparseable date from date-bounded results"
        );
        return false;
    };
    from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dimensions, DroneProfile, DroneSpecifications, WeatherSnapshot};

    fn drone(model: &str) -> DroneProfile {
        DroneProfile {
            id: format!("drone-{}", model),
            name: model.to_string(),
            model: model.to_string(),
            specifications: DroneSpecifications {
                max_flight_time: 30.0,
                max_speed: 60.0,
                max_altitude: 500.0,
                max_range: 5.0,
                weight: 900.0,
                dimensions: Dimensions {
                    length: 30.0,
                    width: 30.0,
                    height: 10.0,
                },
                camera: None,
                battery_type: "LiPo".to_string(),
            },
        }
    }

    fn report(id: &str, date: &str, timestamp: i64, model: &str) -> Report {
        Report {
            id: id.to_string(),
            name: format!("Report {}", id),
            date: date.to_string(),
            timestamp,
            weather: WeatherSnapshot::unavailable("Moscow", 0),
            drone: drone(model),
            sections: Vec::new(),
            created_by: None,
            notes: None,
        }
    }

    fn ids(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_date_range_sorted_ascending() {
        let reports = vec![
            report("a", "15.01.2025", 100, "X"),
            report("b", "05.02.2025", 300, "X"),
            report("c", "20.01.2025", 200, "X"),
        ];
        let filter = ReportFilter::new()
            .date_from("01.01.2025")
            .date_to("31.01.2025")
            .sort(SortBy::Date, SortOrder::Asc);

        let out = apply(&reports, &filter);
        let dates: Vec<&str> = out.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["15.01.2025", "20.01.2025"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let reports = vec![
            report("a", "01.01.2025", 1, "X"),
            report("b", "31.01.2025", 2, "X"),
            report("c", "01.02.2025", 3, "X"),
        ];
        let filter = ReportFilter::new()
            .date_from("01.01.2025")
            .date_to("31.01.2025")
            .sort(SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &filter)), vec!["a", "b"]);
    }

    #[test]
    fn test_single_bound() {
        let reports = vec![
            report("a", "10.03.2025", 1, "X"),
            report("b", "20.03.2025", 2, "X"),
        ];
        let after = ReportFilter::new()
            .date_from("15.03.2025")
            .sort(SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &after)), vec!["b"]);

        let before = ReportFilter::new()
            .date_to("15.03.2025")
            .sort(SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &before)), vec!["a"]);
    }

    #[test]
    fn test_sort_uses_timestamp_not_date_text() {
        // date text and timestamp deliberately disagree
        let reports = vec![
            report("a", "01.01.2030", 10, "X"),
            report("b", "01.01.2020", 20, "X"),
        ];
        let out = apply(&reports, &ReportFilter::new());
        assert_eq!(ids(&out), vec!["b", "a"]);
    }

    #[test]
    fn test_unparseable_report_date_excluded_only_when_bounded() {
        let reports = vec![
            report("bad", "2025-01-15", 1, "X"),
            report("ok", "15.01.2025", 2, "X"),
        ];
        let bounded = ReportFilter::new()
            .date_from("01.01.2025")
            .sort(SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &bounded)), vec!["ok"]);

        let unbounded = ReportFilter::new().sort(SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &unbounded)), vec!["bad", "ok"]);
    }

    #[test]
    fn test_unparseable_or_blank_bound_is_ignored() {
        let reports = vec![report("a", "15.01.2025", 1, "X")];
        let filter = ReportFilter::new().date_from("yesterday").date_to("");
        assert_eq!(ids(&apply(&reports, &filter)), vec!["a"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let reports = vec![report("a", "15.01.2025", 1, "X")];
        let filter = ReportFilter::new()
            .date_from("31.01.2025")
            .date_to("01.01.2025");
        assert!(apply(&reports, &filter).is_empty());
    }

    #[test]
    fn test_drone_model_exact_match() {
        let reports = vec![
            report("a", "01.01.2025", 1, "Orlan-10"),
            report("b", "01.01.2025", 2, "orlan-10"),
            report("c", "01.01.2025", 3, "miniSIGMA-1"),
        ];
        let filter = ReportFilter::new().drone_model("Orlan-10");
        assert_eq!(ids(&apply(&reports, &filter)), vec!["a"]);

        let all = ReportFilter::new().drone_model("_all");
        assert_eq!(apply(&reports, &all).len(), 3);
    }

    #[test]
    fn test_drone_sort_is_case_insensitive_and_stable() {
        let reports = vec![
            report("1", "01.01.2025", 1, "orlan-10"),
            report("2", "01.01.2025", 2, "Alpha"),
            report("3", "01.01.2025", 3, "Orlan-10"),
            report("4", "01.01.2025", 4, "ORLAN-10"),
        ];
        let asc = ReportFilter::new().sort(SortBy::Drone, SortOrder::Asc);
        assert_eq!(ids(&apply(&reports, &asc)), vec!["2", "1", "3", "4"]);

        let desc = ReportFilter::new().sort(SortBy::Drone, SortOrder::Desc);
        assert_eq!(ids(&apply(&reports, &desc)), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn test_apply_is_pure() {
        let reports = vec![
            report("a", "15.01.2025", 100, "X"),
            report("b", "20.01.2025", 200, "Y"),
        ];
        let snapshot = reports.clone();
        let filter = ReportFilter::new().sort(SortBy::Drone, SortOrder::Desc);

        let first = apply(&reports, &filter);
        let second = apply(&reports, &filter);
        assert_eq!(first, second);
        assert_eq!(reports, snapshot);
    }

    #[test]
    fn test_parse_and_format_round_trip() {
        let date = parse_report_date("05.02.2025").unwrap();
        assert_eq!(format_report_date(date), "05.02.2025");
        assert!(parse_report_date("31.02.2025").is_none());
    }
}
