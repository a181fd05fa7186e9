/// Forecast fusion engine: combines the current gauge level with aligned
/// hourly weather and tide series into a 72-hour predicted-level series,
/// and classifies each hour into a flood risk tier.
///
/// The coefficients are hand-tuned heuristics, not a calibrated
/// hydrological model. The contract is the shape of the computation:
/// pure and deterministic, monotone classification, graceful truncation
/// when inputs are partial.
///
/// Series are paired by hour index, not by timestamp: weather hour `i`
/// fuses with tide hour `i` on the assumption that both series start at
/// the same wall-clock hour as `now`. Upstream series with a different
/// start offset would silently misalign — a known correctness risk,
/// tolerable while both adapters anchor their requests to the same
/// refresh instant.

use crate::model::{ForecastHour, RiskTier, TideHour, WeatherHour};
use chrono::{DateTime, Duration, Utc};

/// Maximum forecast horizon, hours.
pub const MAX_HORIZON_HOURS: usize = 72;

/// Assumed mean tide level (ft); deviation from it drives the tidal term.
pub const MEAN_TIDE_FT: f64 = 2.0;
/// Damping applied to tide deviation.
pub const TIDE_COEFFICIENT: f64 = 0.3;
/// Contribution of a 100% rain probability, ft.
pub const RAIN_COEFFICIENT: f64 = 0.5;
/// Reference barometric pressure (inHg); lower pressure raises the
/// prediction, modeling storm surge correlation.
pub const REFERENCE_PRESSURE_IN_HG: f64 = 30.0;
pub const PRESSURE_COEFFICIENT: f64 = 0.1;
/// Wind below this speed (mph) contributes nothing.
pub const WIND_THRESHOLD_MPH: f64 = 20.0;
pub const WIND_COEFFICIENT: f64 = 0.02;

// Risk tier thresholds (ft), evaluated high to low, strict comparison.
const MAJOR_FLOOD_FT: f64 = 4.0;
const MODERATE_FLOOD_FT: f64 = 3.5;
const MINOR_FLOOD_FT: f64 = 3.0;
const ELEVATED_FT: f64 = 2.8;

/// Rounds to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classifies a predicted level into a risk tier. Pure and monotone:
/// first strict threshold match from the top wins.
pub fn classify(predicted_level_ft: f64) -> RiskTier {
    if predicted_level_ft > MAJOR_FLOOD_FT {
        RiskTier::MajorFlood
    } else if predicted_level_ft > MODERATE_FLOOD_FT {
        RiskTier::ModerateFlood
    } else if predicted_level_ft > MINOR_FLOOD_FT {
        RiskTier::MinorFlood
    } else if predicted_level_ft > ELEVATED_FT {
        RiskTier::Elevated
    } else {
        RiskTier::Normal
    }
}

/// Fuses the current level with hour-aligned weather and tide series into
/// a predicted-level forecast.
///
/// For each hour `i` in `[0, min(72, weather.len(), tide.len()))`:
///   level = current
///         + (tide[i] − mean_tide) × 0.3
///         + (rain% / 100) × 0.5
///         + (30.0 − pressure) × 0.1
///         + max(0, wind − 20) × 0.02
/// rounded to 2 decimals and classified.
///
/// Accepts series of unequal, possibly zero, length: the output is
/// truncated to the shortest input and an empty input yields an empty
/// forecast, never an error. Pure function — no I/O, no clock reads;
/// `now` anchors the emitted timestamps.
pub fn fuse(
    current_level_ft: f64,
    now: DateTime<Utc>,
    weather: &[WeatherHour],
    tide: &[TideHour],
) -> Vec<ForecastHour> {
    let horizon = MAX_HORIZON_HOURS.min(weather.len()).min(tide.len());

    (0..horizon)
        .map(|i| {
            let weather_hour = &weather[i];
            let tide_hour = &tide[i];

            let rain_pct = weather_hour.precip_probability_pct as f64;
            let mut level = current_level_ft;
            level += (tide_hour.level_ft - MEAN_TIDE_FT) * TIDE_COEFFICIENT;
            level += (rain_pct / 100.0) * RAIN_COEFFICIENT;
            level += (REFERENCE_PRESSURE_IN_HG - weather_hour.pressure_in_hg) * PRESSURE_COEFFICIENT;
            level += (weather_hour.wind_speed_mph - WIND_THRESHOLD_MPH).max(0.0) * WIND_COEFFICIENT;

            let predicted_level_ft = round2(level);

            ForecastHour {
                time: now + Duration::hours(i as i64),
                predicted_level_ft,
                risk_tier: classify(predicted_level_ft),
                rainfall_pct: weather_hour.precip_probability_pct,
                pressure_in_hg: weather_hour.pressure_in_hg,
                wind_speed_mph: weather_hour.wind_speed_mph,
                tide_level_ft: tide_hour.level_ft,
                short_forecast: weather_hour.short_forecast.clone(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Forecast summaries
// ---------------------------------------------------------------------------

/// Highest predicted level across the forecast, if any.
pub fn peak_level(forecast: &[ForecastHour]) -> Option<f64> {
    forecast
        .iter()
        .map(|f| f.predicted_level_ft)
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// First hour carrying any flood risk above Normal.
pub fn first_risk(forecast: &[ForecastHour]) -> Option<&ForecastHour> {
    forecast.iter().find(|f| f.risk_tier > RiskTier::Normal)
}

/// First weather hour with rain probability above 50%.
pub fn next_rain_hour(weather: &[WeatherHour]) -> Option<&WeatherHour> {
    weather.iter().find(|w| w.precip_probability_pct > 50)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
