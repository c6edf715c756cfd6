//! # Flightlog Core
//!
//! Core library for Flightlog, a checklist-style flight report keeper for
//! drone operations.
//!
//! This crate holds the domain model, the editing and listing engines and
//! the storage abstraction, independent of the CLI.
//!
//! ## Architecture
//!
//! - **model**: reports, sections, items, templates, filters
//! - **tree**: identity-fresh cloning of item trees
//! - **editor**: copy-on-write section/item mutations
//! - **filter**: date/drone filtering and stable sorting of reports
//! - **assembly**: metadata validation and report packaging
//! - **render** / **export**: flattened text, JSON and export files
//! - **storage**: `ReportStore` trait and the SQLite backend
//! - **weather**: weather sources and the on-disk snapshot cache

pub mod assembly;
pub mod demo;
pub mod editor;
pub mod error;
pub mod export;
pub mod filter;
pub mod fs;
pub mod id;
pub mod model;
pub mod render;
pub mod storage;
pub mod tree;
pub mod weather;

pub use assembly::{assemble, ReportMetadata};
pub use error::{FlightlogError, Result};
pub use id::{new_id, Id};
pub use model::{
    DroneProfile, Item, ItemKind, Report, ReportFilter, ReportTemplate, Section, SectionTemplate,
    SortBy, SortOrder, WeatherSnapshot,
};
pub use storage::{ReportStore, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
