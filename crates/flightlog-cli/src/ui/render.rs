//! Rendering primitives for CLI output.
//!
//! Every function returns the text for the resolved [`OutputMode`]; plain
//! output is stable `key=value` or space-separated rows for scripts.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// "Flightlog · list (3 reports)" when pretty, "flightlog list" when plain.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("flightlog {}", command),
        OutputMode::Pretty => {
            let mut line = format!(
                "{} \u{00B7} {}",
                styled("Flightlog", styles::bold(), ctx.color),
                command
            );
            if let Some(extra) = context {
                line.push_str(&format!(" ({})", extra));
            }
            line
        }
    }
}

/// Section heading inside a report view. Plain output mirrors the text export.
pub fn heading(ctx: &UiContext, text: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => styled(text, styles::accent(), ctx.color),
        _ => format!("## {}", text),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        return marker;
    }
    format!("{} {}", marker, message)
}

/// "Drone model: Orlan-10" when pretty, "drone_model=Orlan-10" when plain.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => format!(
            "{} {}",
            styled(&format!("{}:", key), styles::dim(), ctx.color),
            value
        ),
        _ => format!("{}={}", plain_key(key), value),
    }
}

fn plain_key(key: &str) -> String {
    key.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    match ctx.mode {
        OutputMode::Pretty => format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text),
        _ => format!("hint={}", text),
    }
}

/// Summary block printed after a mutating command.
///
/// Plain output always starts with `status=ok`.
pub fn receipt(ctx: &UiContext, title: &str, fields: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(
            fields
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Border treatment for [`table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Rounded frame, used for report listings
    Boxed,
    /// No borders and a dim header, used for catalogs
    Bare,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Right-aligned in pretty mode
    pub numeric: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

/// Table in pretty mode; one space-separated line per row otherwise.
pub fn table(ctx: &UiContext, style: TableStyle, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    match style {
        TableStyle::Boxed if ctx.unicode => {
            table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
        }
        TableStyle::Boxed => {
            table.load_preset(ASCII_MARKDOWN);
        }
        TableStyle::Bare => {
            table.load_preset(NOTHING);
        }
    }
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let dim_header = style == TableStyle::Bare && ctx.color;
    table.set_header(columns.iter().map(|c| {
        let cell = Cell::new(c.header);
        if dim_header {
            cell.add_attribute(Attribute::Dim)
        } else {
            cell
        }
    }));
    for (idx, column) in columns.iter().enumerate() {
        if let Some(col) = table.column_mut(idx) {
            if style == TableStyle::Bare {
                col.set_padding((0, 2));
            }
            if column.numeric {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() && !message.is_empty() {
        println!("{}", message);
    }
}

/// Error line plus optional hint, written to stderr in every mode.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let first = match ctx.mode {
        OutputMode::Pretty => badge(ctx, Badge::Err, message),
        _ => format!("error={}", message),
    };
    match error_hint {
        Some(text) => format!("{}\n{}", first, hint(ctx, text)),
        None => first,
    }
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    pub(crate) fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    fn sample() -> ([Column; 2], Vec<Vec<String>>) {
        (
            [Column::new("Model"), Column::numeric("Items")],
            vec![vec!["Orlan-10".to_string(), "12".to_string()]],
        )
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&plain_ctx(), "list", None), "flightlog list");
        let pretty = header(&pretty_ctx(), "list", Some("3 reports"));
        assert_eq!(pretty, "Flightlog \u{00B7} list (3 reports)");
    }

    #[test]
    fn test_heading_plain_matches_export() {
        assert_eq!(heading(&plain_ctx(), "Post-flight"), "## Post-flight");
        assert_eq!(heading(&pretty_ctx(), "Post-flight"), "Post-flight");
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&plain_ctx(), "Drone Model", "Orlan-10"), "drone_model=Orlan-10");
        assert_eq!(kv(&pretty_ctx(), "Name", "x"), "Name: x");
    }

    #[test]
    fn test_receipt() {
        let fields = [("ID", "abc"), ("Demo data", "seeded")];
        assert_eq!(
            receipt(&plain_ctx(), "Saved", &fields),
            "status=ok\nid=abc\ndemo_data=seeded"
        );
        let pretty = receipt(&pretty_ctx(), "Saved", &fields);
        assert_eq!(pretty.lines().nth(1), Some("  ID: abc"));
    }

    #[test]
    fn test_table_plain_has_no_header() {
        let (columns, rows) = sample();
        assert_eq!(table(&plain_ctx(), TableStyle::Boxed, &columns, &rows), "Orlan-10 12");
        assert_eq!(table(&plain_ctx(), TableStyle::Bare, &columns, &rows), "Orlan-10 12");
    }

    #[test]
    fn test_table_pretty_includes_header() {
        let (columns, rows) = sample();
        let bare = table(&pretty_ctx(), TableStyle::Bare, &columns, &rows);
        assert!(bare.contains("Model"));
        assert!(bare.contains("Orlan-10"));
        let boxed = table(&pretty_ctx(), TableStyle::Boxed, &columns, &rows);
        assert!(boxed.contains('\u{256D}'));
    }

    #[test]
    fn test_error_message_with_hint() {
        let out = error_message(&plain_ctx(), "Report not found", Some("Run `flightlog list`"));
        assert_eq!(out, "error=Report not found\nhint=Run `flightlog list`");
        let pretty = error_message(&pretty_ctx(), "boom", None);
        assert!(pretty.starts_with("[\u{2717}] boom"));
    }
}
