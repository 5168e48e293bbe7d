//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `catpoint.toml` in the working directory (or the path in
//! `CATPOINT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::{Sensor, SensorType};
use catpoint_domain::status::ArmingStatus;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Panel settings.
    pub security: SecurityConfig,
    /// Sensors registered at startup.
    pub sensors: Vec<SensorConfig>,
    /// Simulated feed settings.
    pub simulation: SimulationConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Panel configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Arming status applied once the sensors are registered.
    pub initial_arming: ArmingStatus,
}

/// One sensor to register at startup.
#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    pub sensor_type: SensorType,
}

/// Simulated sensor and camera feed.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Run the virtual feed.
    pub enabled: bool,
    /// Milliseconds between ticks.
    pub tick_ms: u64,
    /// Emit a camera frame every this many ticks (`0` disables the camera).
    pub frame_every: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `catpoint.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CATPOINT_CONFIG").unwrap_or_else(|_| "catpoint.toml".into());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("CATPOINT_ARMING") {
            self.security.initial_arming = val
                .parse()
                .map_err(|err| ConfigError::Validation(format!("CATPOINT_ARMING: {err}")))?;
        }
        if let Ok(val) = std::env::var("CATPOINT_TICK_MS")
            && let Ok(tick_ms) = val.parse()
        {
            self.simulation.tick_ms = tick_ms;
        }
        if let Ok(val) = std::env::var("CATPOINT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "simulation tick_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the startup sensors, falling back to one of each type when
    /// none are configured.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a sensor with an empty name.
    pub fn startup_sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        if self.sensors.is_empty() {
            return [
                ("Front Door", SensorType::Door),
                ("Living Room Window", SensorType::Window),
                ("Hallway", SensorType::Motion),
            ]
            .into_iter()
            .map(|(name, sensor_type)| {
                Sensor::builder()
                    .name(name)
                    .sensor_type(sensor_type)
                    .build()
            })
            .collect();
        }
        self.sensors
            .iter()
            .map(|sensor| {
                Sensor::builder()
                    .name(&sensor.name)
                    .sensor_type(sensor.sensor_type)
                    .build()
            })
            .collect()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_ms: 1000,
            frame_every: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "catpointd=info,catpoint_app=info,catpoint_adapter_virtual=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.security.initial_arming, ArmingStatus::Disarmed);
        assert!(config.sensors.is_empty());
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.tick_ms, 1000);
        assert_eq!(config.simulation.frame_every, 5);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.simulation.tick_ms, 1000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [security]
            initial_arming = 'armed_home'

            [[sensors]]
            name = 'Back Door'
            sensor_type = 'door'

            [[sensors]]
            name = 'Garage'
            sensor_type = 'motion'

            [simulation]
            enabled = false
            tick_ms = 250
            frame_every = 0

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.security.initial_arming, ArmingStatus::ArmedHome);
        assert_eq!(config.sensors.len(), 2);
        assert_eq!(config.sensors[1].sensor_type, SensorType::Motion);
        assert!(!config.simulation.enabled);
        assert_eq!(config.simulation.tick_ms, 250);
        assert_eq!(config.simulation.frame_every, 0);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [simulation]
            tick_ms = 50
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.tick_ms, 50);
        assert!(config.simulation.enabled);
        assert_eq!(config.simulation.frame_every, 5);
    }

    #[test]
    fn should_reject_unknown_sensor_type() {
        let toml = "
            [[sensors]]
            name = 'Chimney'
            sensor_type = 'smoke'
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.simulation.tick_ms, 1000);
    }

    #[test]
    fn should_reject_zero_tick() {
        let mut config = Config::default();
        config.simulation.tick_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_seed_one_sensor_of_each_type_when_none_configured() {
        let sensors = Config::default().startup_sensors().unwrap();
        let types: Vec<SensorType> = sensors.iter().map(|s| s.sensor_type).collect();
        assert_eq!(
            types,
            vec![SensorType::Door, SensorType::Window, SensorType::Motion]
        );
        assert!(sensors.iter().all(|s| !s.active));
    }

    #[test]
    fn should_reject_configured_sensor_with_empty_name() {
        let mut config = Config::default();
        config.sensors.push(SensorConfig {
            name: String::new(),
            sensor_type: SensorType::Window,
        });
        assert!(matches!(
            config.startup_sensors(),
            Err(CatpointError::Validation(_))
        ));
    }
}
