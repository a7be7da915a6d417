use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::GeoPoint;
use crate::locate::{PositionOptions, nominatim::NOMINATIM_URL};
use crate::view::{DEFAULT_CENTER, DEFAULT_ZOOM};

fn default_center_lat() -> f64 {
    DEFAULT_CENTER.lat
}
fn default_center_lon() -> f64 {
    DEFAULT_CENTER.lon
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub geolocation: Option<GeolocationConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            verbose: default_verbose(),
            geolocation: None,
        }
    }
}

fn default_high_accuracy() -> bool {
    true
}

fn default_maximum_age_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    #[serde(default = "default_maximum_age_secs")]
    pub maximum_age_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Place name resolved through Nominatim on `locate`
    #[serde(default)]
    pub query: Option<String>,
    /// Fixed position reported on `locate` (use with `lon`)
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: default_high_accuracy(),
            maximum_age_secs: default_maximum_age_secs(),
            timeout_secs: default_timeout_secs(),
            query: None,
            lat: None,
            lon: None,
            nominatim_url: default_nominatim_url(),
        }
    }
}

impl GeolocationConfig {
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.high_accuracy,
            maximum_age: Duration::from_secs(self.maximum_age_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn fixed_position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

impl FileConfig {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lon)
    }

    /// Load from an explicit path. A missing or malformed file is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }

        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Search the default locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("Loaded config from {:?}", path);
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("farmtrace.toml"));
    paths.push(PathBuf::from(".farmtrace.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("farmtrace").join("config.toml"));
        paths.push(config_dir.join("farmtrace.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".farmtrace.toml"));
        paths.push(home.join(".config").join("farmtrace").join("config.toml"));
    }

    paths
}
