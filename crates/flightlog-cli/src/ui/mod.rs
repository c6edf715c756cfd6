//! UI primitives for the Flightlog CLI.
//!
//! - **context**: TTY, width, color and unicode detection
//! - **mode**: json / plain / pretty resolution
//! - **theme**: badges, checklist markers, styles
//! - **render**: headers, key/value lines, tables, hints, errors
//! - **progress**: spinner for weather fetches
//! - **format**: truncation, ids, timestamps

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::{UiContext, UiFlags};
pub use mode::{check_format, OutputMode};
pub use theme::Badge;

pub use render::{
    badge, header, heading, hint, kv, print, print_error, receipt, table, Column, TableStyle,
};
