//! Weather capability.
//!
//! Reports embed a [`WeatherSnapshot`] by value. Where the snapshot comes
//! from is a [`WeatherSource`]; [`CachedWeather`] puts a time-limited,
//! on-disk cache in front of a source and falls back to the last good
//! snapshot when the source fails.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{FlightlogError, Result};
use crate::fs::write_atomic;
use crate::model::WeatherSnapshot;

/// Default cache lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Icon code shown when no weather data is available (fog).
pub const UNAVAILABLE_ICON: &str = "50d";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Anything that can produce current conditions.
pub trait WeatherSource {
    fn fetch(&self) -> Result<WeatherSnapshot>;
}

impl WeatherSnapshot {
    /// Placeholder used when neither a fetch nor the cache produced data.
    pub fn unavailable(city: impl Into<String>, timestamp: i64) -> Self {
        Self {
            city: city.into(),
            temperature: 0.0,
            description: "No data (offline)".to_string(),
            wind_speed: 0.0,
            wind_direction: "N/A".to_string(),
            humidity: 0.0,
            pressure: 0.0,
            visibility: 0.0,
            icon: UNAVAILABLE_ICON.to_string(),
            timestamp,
        }
    }

    /// Whether this snapshot is older than `ttl` at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = now.timestamp_millis().saturating_sub(self.timestamp);
        age_ms < 0 || age_ms as u128 > ttl.as_millis()
    }
}

/// 16-point compass name for a bearing in degrees.
pub fn compass_direction(degrees: f64) -> &'static str {
    let index = (degrees.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// hPa to mmHg, rounded.
pub fn hpa_to_mmhg(hpa: f64) -> f64 {
    (hpa * 0.75).round()
}

/// Body of an OpenWeatherMap "current weather" response (metric units).
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherResponse {
    pub name: String,
    pub weather: Vec<OpenWeatherCondition>,
    pub main: OpenWeatherMain,
    pub wind: OpenWeatherWind,
    /// Metres
    #[serde(default)]
    pub visibility: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

impl OpenWeatherResponse {
    /// Convert to a snapshot captured at `now`.
    pub fn into_snapshot(self, now: DateTime<Utc>) -> Result<WeatherSnapshot> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            FlightlogError::Weather("Response has no weather conditions".to_string())
        })?;
        Ok(WeatherSnapshot {
            city: self.name,
            temperature: self.main.temp.round(),
            description: condition.description,
            wind_speed: self.wind.speed.round(),
            wind_direction: compass_direction(self.wind.deg).to_string(),
            humidity: self.main.humidity,
            pressure: hpa_to_mmhg(self.main.pressure),
            visibility: self.visibility / 1000.0,
            icon: condition.icon,
            timestamp: now.timestamp_millis(),
        })
    }
}

/// A source with a time-limited on-disk cache in front of it.
pub struct CachedWeather<S> {
    source: S,
    cache_path: PathBuf,
    ttl: Duration,
}

impl<S: WeatherSource> CachedWeather<S> {
    pub fn new(source: S, cache_path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
            ttl,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Last cached snapshot, if any. An unreadable cache counts as empty.
    pub fn cached(&self) -> Option<WeatherSnapshot> {
        let raw = fs::read_to_string(&self.cache_path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.cache_path.display(), error = %e, "Ignoring corrupt weather cache");
                None
            }
        }
    }

    /// Cached snapshot while fresh, otherwise a new fetch.
    pub fn current(&self, now: DateTime<Utc>) -> Result<WeatherSnapshot> {
        if let Some(cached) = self.cached() {
            if !cached.is_stale(now, self.ttl) {
                debug!(city = %cached.city, "Using cached weather");
                return Ok(cached);
            }
        }
        self.refresh(now)
    }

    /// Fetch regardless of cache age, falling back to the stale cache on
    /// failure. A cache write failure never discards a fetched snapshot.
    pub fn refresh(&self, now: DateTime<Utc>) -> Result<WeatherSnapshot> {
        match self.source.fetch() {
            Ok(snapshot) => {
                if let Err(e) = self.store(&snapshot) {
                    warn!(
                        path = %self.cache_path.display(),
                        error = %e,
                        "Could not write weather cache"
                    );
                }
                info!(city = %snapshot.city, "Weather refreshed");
                Ok(snapshot)
            }
            Err(err) => match self.cached() {
                Some(cached) => {
                    let age_secs = (now.timestamp_millis() - cached.timestamp) / 1000;
                    warn!(error = %err, age_secs, "Weather fetch failed; using cached snapshot");
                    Ok(cached)
                }
                None => Err(err),
            },
        }
    }

    fn store(&self, snapshot: &WeatherSnapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        write_atomic(&self.cache_path, &json)
    }
}
