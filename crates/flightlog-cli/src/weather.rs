//! Weather sources backed by the network or a local file.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use flightlog_core::weather::{CachedWeather, OpenWeatherResponse, WeatherSource};
use flightlog_core::{FlightlogError, WeatherSnapshot};

use crate::app::WeatherSettings;
use crate::constants::{OPENWEATHER_URL, WEATHER_TIMEOUT_SECS};
use crate::ui::progress::Spinner;
use crate::ui::{badge, Badge, UiContext};

/// Current conditions from the OpenWeatherMap API.
pub struct OpenWeatherSource {
    city: String,
    api_key: Option<String>,
}

impl OpenWeatherSource {
    pub fn new(city: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            city: city.into(),
            api_key,
        }
    }
}

impl WeatherSource for OpenWeatherSource {
    fn fetch(&self) -> flightlog_core::Result<WeatherSnapshot> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            FlightlogError::Weather("No weather API key configured".to_string())
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(WEATHER_TIMEOUT_SECS))
            .build()
            .map_err(|e| FlightlogError::Weather(e.to_string()))?;
        debug!(city = %self.city, "Fetching weather");
        let response = client
            .get(OPENWEATHER_URL)
            .query(&[
                ("q", self.city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| FlightlogError::Weather(e.without_url().to_string()))?;
        let body: OpenWeatherResponse = response
            .json()
            .map_err(|e| FlightlogError::Weather(e.to_string()))?;
        body.into_snapshot(Utc::now())
    }
}

/// Weather read from a JSON file: a saved snapshot or a raw OpenWeather
/// response.
pub struct FileWeatherSource {
    path: PathBuf,
}

impl FileWeatherSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WeatherSource for FileWeatherSource {
    fn fetch(&self) -> flightlog_core::Result<WeatherSnapshot> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            FlightlogError::Weather(format!("{}: {}", self.path.display(), e))
        })?;
        if let Ok(snapshot) = serde_json::from_str::<WeatherSnapshot>(&raw) {
            return Ok(snapshot);
        }
        let response: OpenWeatherResponse = serde_json::from_str(&raw).map_err(|e| {
            FlightlogError::Weather(format!(
                "{} is neither a weather snapshot nor an OpenWeather response: {}",
                self.path.display(),
                e
            ))
        })?;
        response.into_snapshot(Utc::now())
    }
}

/// Cached network weather; `refresh` skips the freshness check.
pub fn fetch_weather(
    ui: &UiContext,
    settings: &WeatherSettings,
    refresh: bool,
) -> flightlog_core::Result<WeatherSnapshot> {
    let source = OpenWeatherSource::new(settings.city.clone(), settings.api_key.clone());
    let cached = CachedWeather::new(source, settings.cache_path.clone(), settings.ttl);
    let spinner = Spinner::start(ui, "Fetching weather");
    let now = Utc::now();
    let result = if refresh {
        cached.refresh(now)
    } else {
        cached.current(now)
    };
    spinner.finish();
    result
}

/// Weather to attach to a new report.
///
/// A file always wins. Otherwise the cached or fetched snapshot, and
/// finally the "unavailable" placeholder so a report can still be saved.
pub fn weather_for_report(
    ui: &UiContext,
    settings: &WeatherSettings,
    weather_file: Option<&str>,
) -> anyhow::Result<WeatherSnapshot> {
    if let Some(path) = weather_file {
        return Ok(FileWeatherSource::new(path).fetch()?);
    }
    match fetch_weather(ui, settings, false) {
        Ok(snapshot) => Ok(snapshot),
        Err(err) => {
            warn!(error = %err, city = %settings.city, "Saving report without weather");
            if ui.mode.is_pretty() {
                eprintln!("{}", badge(ui, Badge::Warn, "Weather unavailable, saving without it"));
            }
            Ok(WeatherSnapshot::unavailable(
                settings.city.clone(),
                Utc::now().timestamp_millis(),
            ))
        }
    }
}
