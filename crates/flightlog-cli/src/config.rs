use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Seconds a weather snapshot stays fresh.
pub const DEFAULT_WEATHER_TTL_SECONDS: u64 = 300;

pub const DEFAULT_CITY: &str = "Krasnoyarsk";

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightlogConfig {
    pub storage: StorageSection,
    #[serde(default)]
    pub weather: WeatherSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherSection {
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_ttl")]
    pub cache_ttl_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<String>,
}

impl Default for WeatherSection {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            api_key: None,
            cache_ttl_seconds: DEFAULT_WEATHER_TTL_SECONDS,
            cache_path: None,
        }
    }
}

fn default_ttl() -> u64 {
    DEFAULT_WEATHER_TTL_SECONDS
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ExportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl FlightlogConfig {
    pub fn new(db_path: PathBuf, city: Option<String>) -> Self {
        Self {
            storage: StorageSection {
                path: db_path.to_string_lossy().to_string(),
            },
            weather: WeatherSection {
                city: city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
                ..WeatherSection::default()
            },
            export: ExportSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("flightlog.db"))
}

pub fn default_weather_cache_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("weather.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<FlightlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &FlightlogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("flightlog"));
        }
    }
    Ok(home_dir()?.join(".config").join("flightlog"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("flightlog"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("flightlog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config: FlightlogConfig = toml::from_str(
            r#"
            [storage]
            path = "/tmp/flightlog.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.weather.city, DEFAULT_CITY);
        assert_eq!(config.weather.cache_ttl_seconds, 300);
        assert!(config.export.directory.is_none());
    }

    #[test]
    fn test_config_round_trip() {
        let config = FlightlogConfig::new(PathBuf::from("/data/flightlog.db"), Some("Moscow".into()));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: FlightlogConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.storage.path, "/data/flightlog.db");
        assert_eq!(parsed.weather.city, "Moscow");
    }
}
