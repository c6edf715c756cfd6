//! Persistence interface.
//!
//! `ReportStore` is what the rest of Flightlog needs from storage: put/get/
//! delete by id plus listing, for reports and for each template catalog.
//! Saving is a wholesale replace keyed by id, and deleting an id that does
//! not exist is not an error.

use crate::error::Result;
use crate::filter;
use crate::id::Id;
use crate::model::{DroneProfile, Report, ReportFilter, ReportTemplate, SectionTemplate};

/// Storage backend for reports and template catalogs.
pub trait ReportStore: Send + Sync {
    // --- Reports ---

    /// Insert or replace a report, returning its id.
    fn save_report(&mut self, report: &Report) -> Result<Id>;

    fn get_report(&self, id: &str) -> Result<Option<Report>>;

    fn delete_report(&mut self, id: &str) -> Result<()>;

    /// Every stored report, in insertion order.
    fn list_reports(&self) -> Result<Vec<Report>>;

    /// Stored reports selected and ordered by `filter`.
    fn filter_reports(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        Ok(filter::apply(&self.list_reports()?, filter))
    }

    // --- Drone templates ---

    fn save_drone(&mut self, drone: &DroneProfile) -> Result<Id>;

    fn get_drone(&self, id: &str) -> Result<Option<DroneProfile>>;

    fn delete_drone(&mut self, id: &str) -> Result<()>;

    fn list_drones(&self) -> Result<Vec<DroneProfile>>;

    // --- Report templates ---

    fn save_report_template(&mut self, template: &ReportTemplate) -> Result<Id>;

    fn get_report_template(&self, id: &str) -> Result<Option<ReportTemplate>>;

    fn delete_report_template(&mut self, id: &str) -> Result<()>;

    fn list_report_templates(&self) -> Result<Vec<ReportTemplate>>;

    // --- Section templates ---

    fn save_section_template(&mut self, template: &SectionTemplate) -> Result<Id>;

    fn get_section_template(&self, id: &str) -> Result<Option<SectionTemplate>>;

    fn delete_section_template(&mut self, id: &str) -> Result<()>;

    fn list_section_templates(&self) -> Result<Vec<SectionTemplate>>;

    // --- Maintenance ---

    /// True when no drone, report or section templates are stored.
    fn is_empty_catalog(&self) -> Result<bool>;

    /// Verify that every record decodes and every report has unique ids.
    ///
    /// # Errors
    ///
    /// Returns `FlightlogError::Storage` describing the first problem found.
    fn check_integrity(&self) -> Result<()>;
}
