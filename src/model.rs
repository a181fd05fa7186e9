/// Shared data types for the flood forecast service.
///
/// Everything that crosses a module boundary lives here: the normalized
/// upstream readings (gauge, weather, tide), the fused forecast output,
/// and the adapter error taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Upstream readings (normalized)
// ---------------------------------------------------------------------------

/// Current water level at a gauge station, one per station per refresh
/// cycle. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeReading {
    pub timestamp: DateTime<Utc>,
    /// Water level in feet (NAVD88 datum for tide gauges, stream stage
    /// for creek gauges).
    pub level_ft: f64,
    /// Upstream quality flag, passed through verbatim (e.g. "0", "1").
    pub flag: String,
    pub station_id: String,
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One hour of weather forecast with every field already resolved to a
/// plain scalar. Adapters apply the value-extractor defaults at ingestion
/// so nothing downstream ever sees a wrapped `{value: …}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherHour {
    pub start_time: DateTime<Utc>,
    pub temperature_f: f64,
    /// Chance of precipitation, clamped to 0–100.
    pub precip_probability_pct: u8,
    pub wind_speed_mph: f64,
    pub pressure_in_hg: f64,
    pub short_forecast: String,
}

/// One hour of predicted tide level. The CO-OPS wire form carries the
/// level as a decimal string; it is parsed to f64 at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideHour {
    pub time: DateTime<Utc>,
    pub level_ft: f64,
}

/// A historical water level sample for trend display (7-day window,
/// subsampled to one point per 4 hours for tide gauges, daily for the
/// creek gauge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub time: DateTime<Utc>,
    pub level_ft: f64,
}

// ---------------------------------------------------------------------------
// Forecast output
// ---------------------------------------------------------------------------

/// Flood risk tier assigned to a forecast hour. Ordered by severity so
/// `>`/`<` comparisons follow escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Normal,
    Elevated,
    #[serde(rename = "Minor Flood")]
    MinorFlood,
    #[serde(rename = "Moderate Flood")]
    ModerateFlood,
    #[serde(rename = "Major Flood")]
    MajorFlood,
}

impl RiskTier {
    /// Human-readable label matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Normal => "Normal",
            RiskTier::Elevated => "Elevated",
            RiskTier::MinorFlood => "Minor Flood",
            RiskTier::ModerateFlood => "Moderate Flood",
            RiskTier::MajorFlood => "Major Flood",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One hour of the fused flood forecast. Generated fresh every fusion
/// run, never mutated afterwards. Carries the resolved scalar inputs
/// alongside the prediction so consumers never re-resolve ambiguous
/// upstream shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastHour {
    pub time: DateTime<Utc>,
    /// Predicted water level in feet, rounded to 2 decimal places.
    pub predicted_level_ft: f64,
    pub risk_tier: RiskTier,
    pub rainfall_pct: u8,
    pub pressure_in_hg: f64,
    pub wind_speed_mph: f64,
    pub tide_level_ft: f64,
    pub short_forecast: String,
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Upstream source failure. Every variant is recovered locally by the
/// refresh cycle substituting synthetic data — none of these ever reach
/// the fusion stage.
#[derive(Debug)]
pub enum SourceError {
    /// Upstream unreachable or returned a non-2xx status.
    ApiError(String),
    /// Malformed or unexpected payload structure.
    ParseError(String),
    /// Structurally valid response that carried no usable data.
    NoDataAvailable(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::ApiError(msg) => write!(f, "upstream API error: {}", msg),
            SourceError::ParseError(msg) => write!(f, "response parse error: {}", msg),
            SourceError::NoDataAvailable(msg) => write!(f, "no data available: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::ApiError(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
