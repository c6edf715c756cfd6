//! Output mode routing.

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON only, for scripts
    Json,
    /// Stable `key=value` / space-separated text
    #[default]
    Plain,
    /// Colored tables and badges (TTY only)
    Pretty,
}

impl OutputMode {
    /// Pick a mode from flags and the terminal.
    ///
    /// `--json` wins over everything. `--format plain` and `TERM=dumb`
    /// force plain. Otherwise pretty on a TTY, plain when piped.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if matches!(format_flag, Some("plain")) || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Validate a `--format` value.
pub fn check_format(format: Option<&str>) -> Result<(), String> {
    match format {
        None | Some("table") | Some("plain") => Ok(()),
        Some(other) => Err(format!(
            "Unknown output format '{}'; expected table or plain",
            other
        )),
    }
}
