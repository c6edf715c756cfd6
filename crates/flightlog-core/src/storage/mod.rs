//! Persistence for reports and template catalogs.

mod row;
mod sqlite;
mod traits;

pub use row::{Record, Table};
pub use sqlite::{SqliteStore, FORMAT_VERSION};
pub use traits::ReportStore;
