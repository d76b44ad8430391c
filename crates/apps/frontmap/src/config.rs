//! Run configuration.
//!
//! Layered, later wins: built-in defaults, an optional JSON file, `FRONTMAP_*`
//! environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use feeds::{DEFAULT_AIRCRAFT_URL, DEFAULT_FRONTLINE_URL};
use foundation::{GeoBounds, LatLon};
use layers::{AssemblerConfig, DEFAULT_STROKE_WEIGHT};
use render::{MapView, TileStyle};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_FRONTLINE_URL: &str = "FRONTMAP_FRONTLINE_URL";
pub const ENV_AIRCRAFT_URL: &str = "FRONTMAP_AIRCRAFT_URL";
pub const ENV_STROKE_WEIGHT: &str = "FRONTMAP_STROKE_WEIGHT";
pub const ENV_OUTPUT: &str = "FRONTMAP_OUTPUT";
pub const ENV_TIMEOUT_SECS: &str = "FRONTMAP_TIMEOUT_SECS";

const MAX_ZOOM: u8 = 22;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid value {value:?} for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Aircraft query box as it appears in the config file.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct BoundsConfig {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl From<BoundsConfig> for GeoBounds {
    fn from(b: BoundsConfig) -> Self {
        GeoBounds::new(b.lat_min, b.lat_max, b.lon_min, b.lon_max)
    }
}

impl From<GeoBounds> for BoundsConfig {
    fn from(b: GeoBounds) -> Self {
        Self {
            lat_min: b.lat_min,
            lat_max: b.lat_max,
            lon_min: b.lon_min,
            lon_max: b.lon_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub frontline_url: String,
    pub aircraft_url: String,
    pub bbox: BoundsConfig,
    /// Polygon border width; `0.0` draws no border.
    pub stroke_weight: f64,
    pub timeout_secs: u64,
    pub output: PathBuf,
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: TileStyle,
    pub include_aircraft: bool,
    pub title: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            frontline_url: DEFAULT_FRONTLINE_URL.to_string(),
            aircraft_url: DEFAULT_AIRCRAFT_URL.to_string(),
            bbox: BoundsConfig {
                lat_min: 30.539508,
                lat_max: 62.8764788,
                lon_min: -37.5116545,
                lon_max: 78.4397979,
            },
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            timeout_secs: 30,
            output: PathBuf::from("ukraine_map.html"),
            center: [49.7377041, 32.9794409],
            zoom: 6,
            tiles: TileStyle::CartodbDarkMatter,
            include_aircraft: true,
            title: "frontmap".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Applies `FRONTMAP_*` overrides. `lookup` is `std::env::var` in
    /// production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_FRONTLINE_URL) {
            self.frontline_url = url;
        }
        if let Some(url) = lookup(ENV_AIRCRAFT_URL) {
            self.aircraft_url = url;
        }
        if let Some(path) = lookup(ENV_OUTPUT) {
            self.output = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_STROKE_WEIGHT) {
            self.stroke_weight = parse_env(ENV_STROKE_WEIGHT, value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_env(ENV_TIMEOUT_SECS, value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("frontline_url", &self.frontline_url),
            ("aircraft_url", &self.aircraft_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        self.bounds()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("bbox: {e}")))?;
        if !self.stroke_weight.is_finite() || self.stroke_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stroke_weight must be a non-negative number, got {}",
                self.stroke_weight
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.zoom > MAX_ZOOM {
            return Err(ConfigError::Invalid(format!(
                "zoom must be at most {MAX_ZOOM}, got {}",
                self.zoom
            )));
        }
        let [lat, lon] = self.center;
        if !(lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0) {
            return Err(ConfigError::Invalid(format!(
                "center [{lat}, {lon}] is not a valid position"
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is empty".to_string()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bbox.into()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn view(&self) -> MapView {
        MapView {
            center: LatLon::new(self.center[0], self.center[1]),
            zoom: self.zoom,
            tiles: self.tiles,
        }
    }

    pub fn assembler(&self) -> AssemblerConfig {
        AssemblerConfig {
            stroke_weight: self.stroke_weight,
            ..AssemblerConfig::default()
        }
    }
}

fn parse_env<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        reason: e.to_string(),
        value,
    })
}
