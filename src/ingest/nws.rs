/// NWS (api.weather.gov) hourly forecast client.
///
/// Fetching is a two-step dance: the points endpoint maps a lat/lon to a
/// grid and returns the `forecastHourly` URL, which then yields hourly
/// periods. Ambiguous scalar-or-wrapped fields are resolved here, at
/// ingestion, through the value extractor — downstream code only ever
/// sees `WeatherHour` with plain scalars.

use crate::ingest::extract::{resolve_or, MaybeWrapped};
use crate::model::{SourceError, WeatherHour};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const NWS_BASE_URL: &str = "https://api.weather.gov";

/// Forecast horizon in hours; upstream may return two weeks of periods,
/// everything past the first 72 is truncated.
pub const FORECAST_HOURS: usize = 72;

/// Default barometric pressure (inHg) when the field is unresolvable.
pub const DEFAULT_PRESSURE_IN_HG: f64 = 29.9;
/// Default wind speed (mph) when the field is unresolvable.
pub const DEFAULT_WIND_MPH: f64 = 5.0;
/// Default temperature (°F) when the field is unresolvable.
pub const DEFAULT_TEMPERATURE_F: f64 = 65.0;

// ---------------------------------------------------------------------------
// Serde structures for NWS JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Deserialize)]
struct PointsProperties {
    #[serde(rename = "forecastHourly")]
    forecast_hourly: String,
}

#[derive(Deserialize)]
struct HourlyResponse {
    properties: HourlyProperties,
}

#[derive(Deserialize)]
struct HourlyProperties {
    periods: Vec<RawPeriod>,
}

/// A raw forecast period. Numeric fields use [`MaybeWrapped`] because the
/// API mixes bare numbers, `{value: …}` wrappers, and text forms.
#[derive(Deserialize)]
struct RawPeriod {
    #[serde(rename = "startTime")]
    start_time: String,
    temperature: Option<MaybeWrapped>,
    #[serde(rename = "probabilityOfPrecipitation")]
    probability_of_precipitation: Option<MaybeWrapped>,
    #[serde(rename = "windSpeed")]
    wind_speed: Option<MaybeWrapped>,
    #[serde(rename = "barometricPressure")]
    barometric_pressure: Option<MaybeWrapped>,
    #[serde(rename = "shortForecast")]
    short_forecast: Option<String>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the points URL that maps a coordinate to its forecast grid.
pub fn build_points_url(latitude: f64, longitude: f64) -> String {
    format!("{}/points/{:.4},{:.4}", NWS_BASE_URL, latitude, longitude)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extracts the hourly forecast URL from a points response.
pub fn parse_points_response(json: &str) -> Result<String, SourceError> {
    let response: PointsResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("points deserialization failed: {}", e)))?;
    Ok(response.properties.forecast_hourly)
}

/// Parses an hourly forecast response into at most [`FORECAST_HOURS`]
/// normalized `WeatherHour` entries, chronological, one per hour.
///
/// # Errors
/// - `SourceError::ParseError` — malformed JSON or timestamps.
/// - `SourceError::NoDataAvailable` — no periods in the response.
pub fn parse_hourly_response(json: &str) -> Result<Vec<WeatherHour>, SourceError> {
    let response: HourlyResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("forecast deserialization failed: {}", e)))?;

    if response.properties.periods.is_empty() {
        return Err(SourceError::NoDataAvailable(
            "no forecast periods in response".to_string(),
        ));
    }

    response
        .properties
        .periods
        .iter()
        .take(FORECAST_HOURS)
        .map(normalize_period)
        .collect()
}

/// Resolves one raw period to plain scalars, applying the documented
/// defaults for anything absent or non-numeric.
fn normalize_period(period: &RawPeriod) -> Result<WeatherHour, SourceError> {
    let start_time = DateTime::parse_from_rfc3339(&period.start_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SourceError::ParseError(format!("bad startTime '{}': {}", period.start_time, e))
        })?;

    let precip = resolve_or(period.probability_of_precipitation.as_ref(), 0.0);

    Ok(WeatherHour {
        start_time,
        temperature_f: resolve_or(period.temperature.as_ref(), DEFAULT_TEMPERATURE_F),
        precip_probability_pct: precip.clamp(0.0, 100.0).round() as u8,
        wind_speed_mph: resolve_or(period.wind_speed.as_ref(), DEFAULT_WIND_MPH),
        pressure_in_hg: resolve_or(period.barometric_pressure.as_ref(), DEFAULT_PRESSURE_IN_HG),
        short_forecast: period
            .short_forecast
            .clone()
            .unwrap_or_else(|| "Clear".to_string()),
    })
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetches up to 72 hours of forecast for a coordinate (points lookup
/// followed by the hourly grid query).
pub fn fetch_hourly(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<WeatherHour>, SourceError> {
    let points_body = get(client, &build_points_url(latitude, longitude))?;
    let hourly_url = parse_points_response(&points_body)?;
    let hourly_body = get(client, &hourly_url)?;
    parse_hourly_response(&hourly_body)
}

fn get(client: &reqwest::blocking::Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .header("Accept", "application/geo+json")
        // api.weather.gov rejects requests without a user agent
        .header("User-Agent", "floodcast_service/0.1.0")
        .send()?;
    if !response.status().is_success() {
        return Err(SourceError::ApiError(format!(
            "NWS API returned {}",
            response.status()
        )));
    }
    Ok(response.text()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_points_url_embeds_rounded_coordinates() {
        let url = build_points_url(38.5351, -75.0593);
        assert_eq!(url, "https://api.weather.gov/points/38.5351,-75.0593");
    }

    #[test]
    fn test_points_url_truncates_excess_precision() {
        // api.weather.gov 301-redirects coordinates with more than four
        // decimal places; build them pre-rounded instead.
        let url = build_points_url(38.53512345, -75.05934567);
        assert_eq!(url, "https://api.weather.gov/points/38.5351,-75.0593");
    }

    // --- Points parsing -----------------------------------------------------

    #[test]
    fn test_parse_points_extracts_hourly_forecast_url() {
        let url = parse_points_response(fixture_nws_points_json())
            .expect("points fixture should parse");
        assert!(url.contains("/gridpoints/PHI/"), "got: {}", url);
        assert!(url.ends_with("/forecast/hourly"));
    }

    #[test]
    fn test_parse_points_malformed_returns_parse_error() {
        assert!(matches!(
            parse_points_response("{}"),
            Err(SourceError::ParseError(_))
        ));
    }

    // --- Hourly parsing: field shape handling -------------------------------

    #[test]
    fn test_parse_hourly_resolves_wrapped_precipitation() {
        let hours =
            parse_hourly_response(fixture_nws_hourly_json()).expect("hourly fixture should parse");

        // First period: probabilityOfPrecipitation is {unitCode, value: 40}.
        assert_eq!(hours[0].precip_probability_pct, 40);
        assert_eq!(hours[0].short_forecast, "Chance Showers");
    }

    #[test]
    fn test_parse_hourly_wrapped_null_precip_defaults_to_zero() {
        let hours = parse_hourly_response(fixture_nws_hourly_json()).unwrap();
        // Second period carries {value: null}.
        assert_eq!(hours[1].precip_probability_pct, 0);
    }

    #[test]
    fn test_parse_hourly_salvages_wind_speed_text() {
        let hours = parse_hourly_response(fixture_nws_hourly_json()).unwrap();
        // Second period has windSpeed "10 mph".
        assert!((hours[1].wind_speed_mph - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_hourly_missing_pressure_defaults() {
        let hours = parse_hourly_response(fixture_nws_hourly_json()).unwrap();
        // Third period has no barometricPressure field at all.
        assert!((hours[2].pressure_in_hg - DEFAULT_PRESSURE_IN_HG).abs() < 0.001);
    }

    #[test]
    fn test_parse_hourly_scalar_fields_pass_through() {
        let hours = parse_hourly_response(fixture_nws_hourly_json()).unwrap();
        // Third period uses bare scalars throughout.
        assert!((hours[2].temperature_f - 58.0).abs() < 0.001);
        assert_eq!(hours[2].precip_probability_pct, 80);
        assert!((hours[2].wind_speed_mph - 23.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_hourly_timestamps_are_chronological() {
        let hours = parse_hourly_response(fixture_nws_hourly_json()).unwrap();
        for pair in hours.windows(2) {
            assert!(pair[1].start_time > pair[0].start_time);
        }
    }

    // --- Hourly parsing: truncation and errors ------------------------------

    #[test]
    fn test_parse_hourly_truncates_to_72_entries() {
        // Synthesize a response with 156 periods (the real API returns a
        // week or more of hours).
        let periods: Vec<String> = (0..156)
            .map(|i| {
                format!(
                    r#"{{ "startTime": "2024-05-{:02}T{:02}:00:00-04:00", "temperature": 65,
                         "probabilityOfPrecipitation": {{ "value": 10 }},
                         "windSpeed": "5 mph", "shortForecast": "Sunny" }}"#,
                    1 + i / 24,
                    i % 24
                )
            })
            .collect();
        let json = format!(
            r#"{{ "properties": {{ "periods": [{}] }} }}"#,
            periods.join(",")
        );

        let hours = parse_hourly_response(&json).expect("synthesized response should parse");
        assert_eq!(hours.len(), FORECAST_HOURS, "must truncate to first 72 hours");
    }

    #[test]
    fn test_parse_hourly_empty_periods_returns_no_data() {
        let json = r#"{ "properties": { "periods": [] } }"#;
        assert!(matches!(
            parse_hourly_response(json),
            Err(SourceError::NoDataAvailable(_))
        ));
    }

    #[test]
    fn test_parse_hourly_malformed_returns_parse_error() {
        assert!(matches!(
            parse_hourly_response("not json at all"),
            Err(SourceError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_hourly_bad_timestamp_returns_parse_error() {
        let json = r#"{ "properties": { "periods": [
            { "startTime": "yesterday-ish", "temperature": 65 }
        ] } }"#;
        assert!(matches!(
            parse_hourly_response(json),
            Err(SourceError::ParseError(_))
        ));
    }
}
