//! Identity generation for sections, items and reports.

use uuid::Uuid;

/// Opaque identifier shared by every entity in a report.
///
/// Identifiers are plain strings so that fixed catalog ids such as
/// `drone-1` survive a JSON round trip unchanged.
pub type Id = String;

/// Allocate a new globally-unique identifier (random v4 UUID).
pub fn new_id() -> Id {
    Uuid::new_v4().to_string()
}
