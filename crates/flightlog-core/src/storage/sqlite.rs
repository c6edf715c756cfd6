//! SQLite storage backend.
//!
//! Each record kind lives in its own table as a JSON body keyed by id.
//! Bodies are the same camelCase shape as a JSON export, so a row can be
//! inspected with the `sqlite3` shell and `json_extract`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use super::row::{Record, RecordRow, Table};
use super::traits::ReportStore;
use crate::error::{FlightlogError, Result};
use crate::id::Id;
use crate::model::{DroneProfile, Report, ReportTemplate, SectionTemplate};
use crate::tree::duplicate_ids;

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "1";

/// SQLite-backed [`ReportStore`].
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self::init(conn, Some(path.to_path_buf()))?;
        info!(path = %path.display(), "Opened report store");
        Ok(store)
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    /// Database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let mut schema = String::from(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        );
        for table in Table::ALL {
            schema.push_str(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id TEXT PRIMARY KEY,
                    label TEXT NOT NULL,
                    body_json TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                "#,
                table.name()
            ));
        }
        conn.execute_batch(&schema)?;

        let created_at = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES (?, ?)",
            ["format_version", FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO meta (key, value) VALUES (?, ?)",
            ["created_at", created_at.as_str()],
        )?;

        let version: String = conn.query_row(
            "SELECT value FROM meta WHERE key = 'format_version'",
            [],
            |row| row.get(0),
        )?;
        if version != FORMAT_VERSION {
            return Err(FlightlogError::Storage(format!(
                "Unsupported store format version {} (expected {})",
                version, FORMAT_VERSION
            )));
        }

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FlightlogError::Storage("SQLite connection poisoned".to_string()))
    }

    fn put<T: Record>(&self, record: &T) -> Result<Id> {
        if record.id().trim().is_empty() {
            return Err(FlightlogError::InvalidInput(format!(
                "Cannot store a {} record without an id",
                T::TABLE.name()
            )));
        }
        let body = serde_json::to_string(record)?;
        let conn = self.lock_conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (id, label, body_json, updated_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    label = excluded.label,
                    body_json = excluded.body_json,
                    updated_at = excluded.updated_at",
                T::TABLE.name()
            ),
            [
                record.id(),
                record.label(),
                body.as_str(),
                Utc::now().to_rfc3339().as_str(),
            ],
        )?;
        debug!(table = T::TABLE.name(), id = record.id(), "Saved record");
        Ok(record.id().to_string())
    }

    fn fetch<T: Record>(&self, id: &str) -> Result<Option<T>> {
        let conn = self.lock_conn()?;
        let row = conn
            .query_row(
                &format!("SELECT id, body_json FROM {} WHERE id = ?", T::TABLE.name()),
                [id],
                |row| {
                    Ok(RecordRow {
                        id: row.get(0)?,
                        body_json: row.get(1)?,
                    })
                },
            )
            .optional()?;
        row.map(RecordRow::decode).transpose()
    }

    fn remove(&self, table: Table, id: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute(&format!("DELETE FROM {} WHERE id = ?", table.name()), [id])?;
        if deleted == 0 {
            debug!(table = table.name(), id, "Delete of missing record ignored");
        } else {
            info!(table = table.name(), id, "Deleted record");
        }
        Ok(())
    }

    fn rows(&self, table: Table) -> Result<Vec<RecordRow>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, body_json FROM {} ORDER BY rowid",
            table.name()
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(RecordRow {
                id: row.get(0)?,
                body_json: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn all<T: Record>(&self) -> Result<Vec<T>> {
        self.rows(T::TABLE)?
            .into_iter()
            .map(RecordRow::decode)
            .collect()
    }

    fn count(&self, table: Table) -> Result<i64> {
        let conn = self.lock_conn()?;
        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.name()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl ReportStore for SqliteStore {
    fn save_report(&mut self, report: &Report) -> Result<Id> {
        let id = self.put(report)?;
        info!(report_id = %id, "Saved report");
        Ok(id)
    }

    fn get_report(&self, id: &str) -> Result<Option<Report>> {
        self.fetch(id)
    }

    fn delete_report(&mut self, id: &str) -> Result<()> {
        self.remove(Table::Reports, id)
    }

    fn list_reports(&self) -> Result<Vec<Report>> {
        self.all()
    }

    fn save_drone(&mut self, drone: &DroneProfile) -> Result<Id> {
        self.put(drone)
    }

    fn get_drone(&self, id: &str) -> Result<Option<DroneProfile>> {
        self.fetch(id)
    }

    fn delete_drone(&mut self, id: &str) -> Result<()> {
        self.remove(Table::Drones, id)
    }

    fn list_drones(&self) -> Result<Vec<DroneProfile>> {
        self.all()
    }

    fn save_report_template(&mut self, template: &ReportTemplate) -> Result<Id> {
        self.put(template)
    }

    fn get_report_template(&self, id: &str) -> Result<Option<ReportTemplate>> {
        self.fetch(id)
    }

    fn delete_report_template(&mut self, id: &str) -> Result<()> {
        self.remove(Table::ReportTemplates, id)
    }

    fn list_report_templates(&self) -> Result<Vec<ReportTemplate>> {
        self.all()
    }

    fn save_section_template(&mut self, template: &SectionTemplate) -> Result<Id> {
        self.put(template)
    }

    fn get_section_template(&self, id: &str) -> Result<Option<SectionTemplate>> {
        self.fetch(id)
    }

    fn delete_section_template(&mut self, id: &str) -> Result<()> {
        self.remove(Table::SectionTemplates, id)
    }

    fn list_section_templates(&self) -> Result<Vec<SectionTemplate>> {
        self.all()
    }

    fn is_empty_catalog(&self) -> Result<bool> {
        for table in [Table::Drones, Table::ReportTemplates, Table::SectionTemplates] {
            if self.count(table)? > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn check_integrity(&self) -> Result<()> {
        {
            let conn = self.lock_conn()?;
            let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if status != "ok" {
                return Err(FlightlogError::Storage(format!(
                    "SQLite integrity check failed: {}",
                    status
                )));
            }

            let metadata_count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at')",
                [],
                |row| row.get(0),
            )?;
            if metadata_count < 2 {
                return Err(FlightlogError::Storage(
                    "Metadata table missing required keys".to_string(),
                ));
            }
        }

        self.list_drones()?;
        self.list_report_templates()?;
        self.list_section_templates()?;
        for report in self.list_reports()? {
            let duplicates = duplicate_ids(&report.sections);
            if !duplicates.is_empty() {
                return Err(FlightlogError::Storage(format!(
                    "Report {} has duplicate ids: {}",
                    report.id,
                    duplicates.join(", ")
                )));
            }
        }
        Ok(())
    }
}
