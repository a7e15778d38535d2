//! Configuration loading and typed config structures for the Kindle simulation.
//!
//! The canonical configuration lives in `kindle-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Range checks
//! happen when each subsystem is built from its section, so one bad
//! section can disable one feature without rejecting the whole file.

use std::path::Path;

use kindle_fire::FireConfig;
use kindle_types::Color;
use serde::Deserialize;

/// Environment variable that overrides `world.time_scale`.
pub const TIME_SCALE_ENV: &str = "KINDLE_TIME_SCALE";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `kindle-config.yaml`. Every section has
/// defaults matching a 20-minute day starting at noon.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Driver settings (name, tick rate, time scale, run bounds).
    #[serde(default)]
    pub world: WorldConfig,

    /// Day length and start hour.
    #[serde(default)]
    pub time: TimeConfig,

    /// Ambient light palette and fade speed.
    #[serde(default)]
    pub ambient: AmbientConfig,

    /// Sun rotation settings.
    #[serde(default)]
    pub sun: SunConfig,

    /// Tide settings.
    #[serde(default)]
    pub tide: TideConfig,

    /// Fires placed in the scene.
    #[serde(default)]
    pub fires: Vec<FireConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Periodic debug reporting.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `KINDLE_TIME_SCALE` environment variable overrides
    /// `world.time_scale` when set to a number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is a valid "all defaults" config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides();
        Ok(config)
    }
}

/// Driver-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable scene name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Simulated seconds per real second.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,

    /// Stop after this many ticks. Runs until shutdown when unset.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl WorldConfig {
    /// Override the time scale from the environment when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(scale) = std::env::var(TIME_SCALE_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<f32>().ok())
        {
            self.time_scale = scale;
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
            time_scale: default_time_scale(),
            max_ticks: None,
        }
    }
}

/// Time-of-day configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Real seconds in one simulated day.
    #[serde(default = "default_day_length_seconds")]
    pub day_length_seconds: f64,

    /// Hour of day the clock starts at, in `[0, 24]`.
    #[serde(default = "default_start_hour")]
    pub start_hour: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: default_day_length_seconds(),
            start_hour: default_start_hour(),
        }
    }
}

/// Ambient light configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AmbientConfig {
    /// Fades per day: each transition lasts `day_length / fade_speed`.
    #[serde(default = "default_fade_speed")]
    pub fade_speed: f64,

    /// Ambient colour for full daylight.
    #[serde(default = "default_day_color")]
    pub day: Color,

    /// Ambient colour for sunset.
    #[serde(default = "default_sunset_color")]
    pub sunset: Color,

    /// Ambient colour for night.
    #[serde(default = "default_night_color")]
    pub night: Color,

    /// Ambient colour for sunrise.
    #[serde(default = "default_sunrise_color")]
    pub sunrise: Color,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            fade_speed: default_fade_speed(),
            day: default_day_color(),
            sunset: default_sunset_color(),
            night: default_night_color(),
            sunrise: default_sunrise_color(),
        }
    }
}

/// Sun rotation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SunConfig {
    /// Share of rotation on the pitch axis, in `[0.1, 0.9]`. The rest goes
    /// to yaw.
    #[serde(default = "default_sun_offset")]
    pub offset: f64,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            offset: default_sun_offset(),
        }
    }
}

/// Tide configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TideConfig {
    /// Whether tides run at all.
    #[serde(default)]
    pub enabled: bool,

    /// Handle of the water surface the tide moves. Required when enabled.
    #[serde(default)]
    pub water_plane: Option<String>,

    /// Water height at low tide.
    #[serde(default = "default_min_height")]
    pub min_height: f32,

    /// Water height at high tide.
    #[serde(default = "default_max_height")]
    pub max_height: f32,

    /// Hour of the first high tide.
    #[serde(default = "default_high_tide_hour")]
    pub high_tide_hour: f32,

    /// Full tide cycles per day.
    #[serde(default = "default_cycles_per_day")]
    pub cycles_per_day: f32,
}

impl Default for TideConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            water_plane: None,
            min_height: default_min_height(),
            max_height: default_max_height(),
            high_tide_hour: default_high_tide_hour(),
            cycles_per_day: default_cycles_per_day(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Periodic debug reporting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DebugConfig {
    /// Whether to log clock, tide, and ambient state periodically.
    #[serde(default)]
    pub enabled: bool,

    /// Simulated seconds between reports.
    #[serde(default = "default_report_interval_seconds")]
    pub interval_seconds: f32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: default_report_interval_seconds(),
        }
    }
}

fn default_world_name() -> String {
    "Kindle".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    16
}

const fn default_time_scale() -> f32 {
    1.0
}

const fn default_day_length_seconds() -> f64 {
    1_200.0
}

const fn default_start_hour() -> f32 {
    12.0
}

const fn default_fade_speed() -> f64 {
    15.0
}

const fn default_day_color() -> Color {
    Color::BLUE
}

const fn default_sunset_color() -> Color {
    Color::YELLOW
}

const fn default_night_color() -> Color {
    Color::BLACK
}

const fn default_sunrise_color() -> Color {
    Color::YELLOW
}

const fn default_sun_offset() -> f64 {
    0.9
}

const fn default_min_height() -> f32 {
    0.9
}

const fn default_max_height() -> f32 {
    1.1
}

const fn default_high_tide_hour() -> f32 {
    8.0
}

const fn default_cycles_per_day() -> f32 {
    2.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_report_interval_seconds() -> f32 {
    5.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.time.day_length_seconds, 1_200.0);
        assert_eq!(config.time.start_hour, 12.0);
        assert_eq!(config.ambient.fade_speed, 15.0);
        assert_eq!(config.tide.cycles_per_day, 2.0);
        assert!(!config.tide.enabled);
        assert!(config.fires.is_empty());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Harbour"
  tick_interval_ms: 20
  max_ticks: 500

time:
  day_length_seconds: 600
  start_hour: 6

ambient:
  fade_speed: 10
  night:
    r: 0.02
    g: 0.02
    b: 0.1

sun:
  offset: 0.5

tide:
  enabled: true
  water_plane: "harbour/water"
  min_height: 0.5
  max_height: 2.0
  high_tide_hour: 4
  cycles_per_day: 1

fires:
  - name: "lighthouse"
    lit: true
    water_proof: true
    lights:
      - handle: "lighthouse/lamp"
        intensity: 6

logging:
  level: "debug"
  json: true

debug:
  enabled: true
  interval_seconds: 2
"#;

        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Harbour");
        assert_eq!(config.world.max_ticks, Some(500));
        assert_eq!(config.time.day_length_seconds, 600.0);
        assert_eq!(config.ambient.night, Color::rgb(0.02, 0.02, 0.1));
        // Unset palette entries keep their defaults.
        assert_eq!(config.ambient.day, Color::BLUE);
        assert_eq!(config.sun.offset, 0.5);
        assert_eq!(config.tide.water_plane.as_deref(), Some("harbour/water"));
        assert_eq!(config.fires.len(), 1);
        assert!(config.fires.first().is_some_and(|f| f.water_proof));
        assert!(config.logging.json);
        assert!(config.debug.enabled);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("time:\n  start_hour: 21\n").unwrap();
        assert_eq!(config.time.start_hour, 21.0);
        assert_eq!(config.time.day_length_seconds, 1_200.0);
        assert_eq!(config.world.tick_interval_ms, 16);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SimulationConfig::parse("").is_ok());
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let result = SimulationConfig::parse("time: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("kindle-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
