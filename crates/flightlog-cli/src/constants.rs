//! Constants used throughout the CLI.

/// Exit codes.
///
/// 0 is success, 1 a general error and 2 is reserved for usage errors
/// reported by clap. Application-specific codes start at 3.
pub mod exit_codes {
    pub const GENERAL: i32 = 1;

    /// Report, drone or template not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Store integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Environment variables read by the CLI.
pub mod env {
    pub const CONFIG: &str = "FLIGHTLOG_CONFIG";
    pub const LOG: &str = "FLIGHTLOG_LOG";
    pub const WEATHER_API_KEY: &str = "FLIGHTLOG_WEATHER_API_KEY";
}

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Seconds to wait for the weather service.
pub const WEATHER_TIMEOUT_SECS: u64 = 10;
