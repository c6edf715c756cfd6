//! Badges, checklist markers and text styles.

use owo_colors::{OwoColorize, Style};

/// Status badge shown before one-line messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, true) => "[\u{2139}]",
            (Self::Info, false) => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => Style::new().green().bold(),
            Self::Warn => Style::new().yellow().bold(),
            Self::Err => Style::new().red().bold(),
            Self::Info => Style::new().cyan(),
        }
    }
}

/// Checklist marker for a rendered item.
///
/// `checked` is `None` for non-checkbox items.
pub fn check_marker(checked: Option<bool>, unicode: bool) -> &'static str {
    match (checked, unicode) {
        (Some(true), true) => "\u{2611}",
        (Some(false), true) => "\u{2610}",
        (None, true) => "\u{2022}",
        (Some(true), false) => "[x]",
        (Some(false), false) => "[ ]",
        (None, false) => "-",
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn accent() -> Style {
        Style::new().cyan()
    }
}

/// Apply `style` when color is enabled, otherwise return the text as is.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_ascii_and_unicode() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Err.display(false), "[ERR]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
    }

    #[test]
    fn test_styled_without_color_is_identity() {
        assert_eq!(styled("plain", styles::bold(), false), "plain");
    }

    #[test]
    fn test_styled_with_color_adds_escapes() {
        let out = styled("bold", styles::bold(), true);
        assert!(out.contains("bold"));
        assert!(out.contains('\x1b'));
    }

    #[test]
    fn test_check_markers() {
        assert_eq!(check_marker(Some(true), false), "[x]");
        assert_eq!(check_marker(Some(false), false), "[ ]");
        assert_eq!(check_marker(None, false), "-");
    }
}
