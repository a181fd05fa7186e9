/// Station registry for the Delaware coast flood forecast service.
///
/// Defines the canonical list of water gauge stations this service can
/// forecast for, along with their metadata and source family. This is the
/// single source of truth for station ids — all other modules should
/// reference stations from here rather than hardcoding ids.

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Which upstream system serves a station's water level.
///
/// The two families have different semantics: `Stage` stations are NWPS
/// stream gauges with no long-history query and (pending a live feed) a
/// simulated latest reading, while `TidalDatum` stations are CO-OPS tide
/// gauges queried live, with a 7-day history for trend display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationFamily {
    /// NWPS stream gauge reporting stream stage.
    Stage,
    /// CO-OPS coastal gauge reporting water level against the NAVD88 datum.
    TidalDatum,
}

/// Metadata for a single gauge station.
pub struct Station {
    /// NWPS identifier (lowercase alphanumeric) or CO-OPS station number
    /// (7 digits).
    pub station_id: &'static str,
    /// Official station name.
    pub name: &'static str,
    /// Human-readable description of the waterway.
    pub description: &'static str,
    pub family: StationFamily,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

/// Station the service forecasts for when none is configured.
pub const DEFAULT_STATION_ID: &str = "sbed1";

/// CO-OPS reference station used for tide predictions regardless of which
/// gauge station is selected (Lewes is the nearest harmonic station to
/// Jefferson Creek).
pub const TIDE_REFERENCE_STATION: &str = "8557380";

/// All gauge stations known to the service, the local creek gauge first,
/// then CO-OPS and NWPS stations ordered up the Delaware Bay and River.
///
/// Sources:
///   - CO-OPS station numbers: tidesandcurrents.noaa.gov
///   - NWPS identifiers: water.noaa.gov
pub static STATION_REGISTRY: &[Station] = &[
    Station {
        station_id: "sbed1",
        name: "Jefferson Creek at South Bethany Beach",
        description: "Jefferson Creek, DE",
        family: StationFamily::Stage,
        latitude: 38.5351,
        longitude: -75.0593,
    },
    Station {
        station_id: "8557380",
        name: "Lewes, DE",
        description: "Delaware Bay",
        family: StationFamily::TidalDatum,
        latitude: 38.7828,
        longitude: -75.1193,
    },
    Station {
        station_id: "8551910",
        name: "Reedy Point, DE",
        description: "Delaware River",
        family: StationFamily::TidalDatum,
        latitude: 39.5583,
        longitude: -75.5733,
    },
    Station {
        station_id: "deld1",
        name: "Delaware River at Delaware City",
        description: "Delaware River",
        family: StationFamily::Stage,
        latitude: 39.5817,
        longitude: -75.5883,
    },
    Station {
        station_id: "8545240",
        name: "Philadelphia, PA",
        description: "Delaware River",
        family: StationFamily::TidalDatum,
        latitude: 39.9333,
        longitude: -75.1417,
    },
];

/// Returns the ids of all registered stations.
pub fn all_station_ids() -> Vec<&'static str> {
    STATION_REGISTRY.iter().map(|s| s.station_id).collect()
}

/// Looks up a station by id. Returns `None` if not found.
pub fn find_station(station_id: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.station_id == station_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_ids_match_their_family_format() {
        // CO-OPS station numbers are 7-digit numeric strings; NWPS ids are
        // lowercase alphanumerics. A malformed id would be silently
        // rejected by the corresponding upstream API.
        for station in STATION_REGISTRY {
            match station.family {
                StationFamily::TidalDatum => {
                    assert_eq!(
                        station.station_id.len(),
                        7,
                        "CO-OPS id for '{}' should be 7 digits, got '{}'",
                        station.name,
                        station.station_id
                    );
                    assert!(
                        station.station_id.chars().all(|c| c.is_ascii_digit()),
                        "CO-OPS id for '{}' should be numeric",
                        station.name
                    );
                }
                StationFamily::Stage => {
                    assert!(
                        station
                            .station_id
                            .chars()
                            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                        "NWPS id for '{}' should be lowercase alphanumeric, got '{}'",
                        station.name,
                        station.station_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_station_ids() {
        let mut seen = std::collections::HashSet::new();
        for station in STATION_REGISTRY {
            assert!(
                seen.insert(station.station_id),
                "duplicate station id '{}' found in STATION_REGISTRY",
                station.station_id
            );
        }
    }

    #[test]
    fn test_default_station_is_registered() {
        let station =
            find_station(DEFAULT_STATION_ID).expect("default station should be in registry");
        assert_eq!(station.family, StationFamily::Stage);
        assert!(station.name.contains("Jefferson Creek"));
    }

    #[test]
    fn test_tide_reference_station_is_a_tidal_datum_gauge() {
        let station = find_station(TIDE_REFERENCE_STATION)
            .expect("tide reference station should be in registry");
        assert_eq!(
            station.family,
            StationFamily::TidalDatum,
            "tide predictions require a CO-OPS harmonic station"
        );
    }

    #[test]
    fn test_find_station_returns_none_for_unknown_id() {
        assert!(find_station("0000000").is_none());
        assert!(find_station("").is_none());
    }

    #[test]
    fn test_all_station_ids_helper_matches_registry_length() {
        assert_eq!(all_station_ids().len(), STATION_REGISTRY.len());
    }

    #[test]
    fn test_coordinates_are_plausible_for_delaware_valley() {
        for station in STATION_REGISTRY {
            assert!(
                station.latitude > 38.0 && station.latitude < 40.5,
                "latitude for '{}' outside the Delaware valley",
                station.name
            );
            assert!(
                station.longitude > -76.0 && station.longitude < -74.5,
                "longitude for '{}' outside the Delaware valley",
                station.name
            );
        }
    }
}
