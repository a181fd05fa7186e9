/// Service configuration loader - parses floodcast.toml
///
/// Separates operational knobs from code, making it easy to point the
/// service at a different station, stretch the tide window, or slow the
/// poll cadence without recompiling. Every field has a compiled-in
/// default, so the file is optional.

use crate::stations;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "floodcast.toml";

/// Operational configuration for the forecast daemon.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Gauge station the forecast is computed for.
    pub station_id: String,

    /// Minutes between refresh cycles.
    pub poll_interval_minutes: u64,

    /// Days of tide predictions to request (72 hours needs 3).
    pub tide_window_days: i64,

    /// Days of water level history to request for trend display.
    pub history_days: i64,

    /// Coordinate the weather forecast is requested for. Defaults to the
    /// Jefferson Creek gauge location.
    pub latitude: f64,
    pub longitude: f64,

    /// CO-OPS harmonic station used for tide predictions.
    pub tide_station: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            station_id: stations::DEFAULT_STATION_ID.to_string(),
            poll_interval_minutes: 6,
            tide_window_days: 3,
            history_days: 7,
            latitude: 38.5351,
            longitude: -75.0593,
            tide_station: stations::TIDE_REFERENCE_STATION.to_string(),
        }
    }
}

/// Loads service configuration from floodcast.toml in the working
/// directory, falling back to compiled-in defaults when the file is
/// absent.
///
/// # Panics
/// Panics if the file exists but is unreadable or malformed. This is
/// intentional — running with a half-applied configuration is worse than
/// not starting.
pub fn load_config() -> ServiceConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return ServiceConfig::default();
    }

    let contents = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", CONFIG_PATH, e));

    parse_config(&contents).unwrap_or_else(|e| panic!("Failed to parse {}: {}", CONFIG_PATH, e))
}

/// Parses configuration TOML. Split from [`load_config`] so tests can
/// exercise parsing without touching the filesystem.
pub fn parse_config(contents: &str) -> Result<ServiceConfig, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_jefferson_creek() {
        let config = ServiceConfig::default();
        assert_eq!(config.station_id, "sbed1");
        assert_eq!(config.poll_interval_minutes, 6);
        assert_eq!(config.tide_window_days, 3);
        assert_eq!(config.history_days, 7);
        assert_eq!(config.tide_station, "8557380");
        assert!((config.latitude - 38.5351).abs() < 1e-9);
        assert!((config.longitude - -75.0593).abs() < 1e-9);
    }

    #[test]
    fn test_default_station_references_resolve_in_registry() {
        let config = ServiceConfig::default();
        assert!(stations::find_station(&config.station_id).is_some());
        assert!(stations::find_station(&config.tide_station).is_some());
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let config = parse_config(
            r#"
            station_id = "8557380"
            poll_interval_minutes = 15
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.station_id, "8557380");
        assert_eq!(config.poll_interval_minutes, 15);
        assert_eq!(config.tide_window_days, 3, "unset field keeps default");
        assert_eq!(config.tide_station, "8557380");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config.station_id, ServiceConfig::default().station_id);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        assert!(parse_config("poll_interval_minutes = \"soon\"").is_err());
        assert!(parse_config("this is not toml").is_err());
    }
}
