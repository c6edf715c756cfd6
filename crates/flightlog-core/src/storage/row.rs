//! Row types for the SQLite store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{FlightlogError, Result};
use crate::model::{DroneProfile, Report, ReportTemplate, SectionTemplate};

/// Tables holding one JSON record per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Reports,
    Drones,
    ReportTemplates,
    SectionTemplates,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Reports,
        Table::Drones,
        Table::ReportTemplates,
        Table::SectionTemplates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Reports => "reports",
            Self::Drones => "drones",
            Self::ReportTemplates => "report_templates",
            Self::SectionTemplates => "section_templates",
        }
    }
}

/// A domain type stored as a JSON body keyed by its id.
pub trait Record: Serialize + DeserializeOwned {
    const TABLE: Table;

    fn id(&self) -> &str;

    /// Human-readable column kept next to the body for ad-hoc inspection.
    fn label(&self) -> &str;
}

impl Record for Report {
    const TABLE: Table = Table::Reports;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Record for DroneProfile {
    const TABLE: Table = Table::Drones;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.model
    }
}

impl Record for ReportTemplate {
    const TABLE: Table = Table::ReportTemplates;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Record for SectionTemplate {
    const TABLE: Table = Table::SectionTemplates;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Raw row data, before decoding into a domain type.
#[derive(Debug)]
pub struct RecordRow {
    pub id: String,
    pub body_json: String,
}

impl RecordRow {
    /// Decode the body, checking that it belongs to this row.
    pub fn decode<T: Record>(self) -> Result<T> {
        let record: T = serde_json::from_str(&self.body_json).map_err(|e| {
            FlightlogError::Storage(format!(
                "Invalid JSON in {} row {}: {}",
                T::TABLE.name(),
                self.id,
                e
            ))
        })?;
        if record.id() != self.id {
            return Err(FlightlogError::Storage(format!(
                "{} row {} holds a record with id {}",
                T::TABLE.name(),
                self.id,
                record.id()
            )));
        }
        Ok(record)
    }
}
