//! Application context shared by command handlers.
//!
//! Bundles the parsed CLI arguments with the lazily-loaded config file so
//! handlers do not thread paths and settings through every call.

use std::path::PathBuf;
use std::time::Duration;

use once_cell::unsync::OnceCell;

use flightlog_core::SqliteStore;

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_weather_cache_path, read_config, FlightlogConfig,
    DEFAULT_CITY, DEFAULT_WEATHER_TTL_SECONDS,
};
use crate::constants::env;
use crate::errors::CliError;
use crate::ui::{UiContext, UiFlags};

/// Resolved weather settings.
#[derive(Debug, Clone)]
pub struct WeatherSettings {
    pub city: String,
    pub api_key: Option<String>,
    pub ttl: Duration,
    pub cache_path: PathBuf,
}

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<FlightlogConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// UI context for a command with its own `--json` / `--format` flags.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::detect(UiFlags {
            json,
            format,
            no_color: self.cli.no_color,
            ascii: self.cli.ascii,
        })
    }

    /// The config file, or `None` when it has not been written yet.
    pub fn config(&self) -> anyhow::Result<Option<&FlightlogConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                read_config(&path).map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(config.as_ref())
    }

    /// Database path from `--db`/`FLIGHTLOG_DB`, then the config file.
    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.db.as_ref().filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }
        match self.config()? {
            Some(config) => Ok(PathBuf::from(&config.storage.path)),
            None => Err(CliError::not_found(
                format!(
                    "Flightlog is not initialized: no config at {}",
                    resolve_config_path()?.display()
                ),
                "Run `flightlog init` or pass --db <PATH>.",
            )
            .into()),
        }
    }

    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.db_path()?;
        Ok(SqliteStore::open(&path)?)
    }

    pub fn weather_settings(&self) -> anyhow::Result<WeatherSettings> {
        let section = self.config()?.map(|c| &c.weather);
        let api_key = std::env::var(env::WEATHER_API_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| section.and_then(|w| w.api_key.clone()));
        let cache_path = match section.and_then(|w| w.cache_path.as_ref()) {
            Some(path) => PathBuf::from(path),
            None => default_weather_cache_path()?,
        };
        Ok(WeatherSettings {
            city: section
                .map(|w| w.city.clone())
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
            api_key,
            ttl: Duration::from_secs(
                section
                    .map(|w| w.cache_ttl_seconds)
                    .unwrap_or(DEFAULT_WEATHER_TTL_SECONDS),
            ),
            cache_path,
        })
    }

    /// Export directory from the config, else the current directory.
    pub fn export_dir(&self) -> anyhow::Result<PathBuf> {
        let configured = self
            .config()?
            .and_then(|c| c.export.directory.as_ref())
            .map(PathBuf::from);
        match configured {
            Some(dir) => Ok(dir),
            None => Ok(std::env::current_dir()?),
        }
    }
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}
