/// NOAA CO-OPS datagetter API client.
///
/// Handles URL construction and JSON response parsing for the CO-OPS
/// Tides & Currents data API:
///   https://api.tidesandcurrents.noaa.gov/api/prod/datagetter
///
/// Three products are used: `water_level` (latest observation and 7-day
/// history for tidal-datum stations) and `predictions` (hourly tide
/// forecast for the reference station). See `fixtures.rs` for annotated
/// examples of the response structures.

use crate::model::{GaugeReading, HistoryPoint, SourceError, TideHour};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc};
use serde::Deserialize;

const COOPS_BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Query parameters common to every datagetter request.
const COMMON_PARAMS: &str = "datum=navd&units=english&time_zone=lst_ldt&application=web_services&format=json";

// ---------------------------------------------------------------------------
// Serde structures for datagetter JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DatagetterResponse {
    error: Option<DatagetterError>,
    data: Option<Vec<WaterLevelEntry>>,
    metadata: Option<StationMetadata>,
    predictions: Option<Vec<PredictionEntry>>,
}

#[derive(Deserialize)]
struct DatagetterError {
    message: String,
}

#[derive(Deserialize)]
struct WaterLevelEntry {
    t: String,         // "YYYY-MM-DD HH:MM"
    v: String,         // level as decimal string, may be empty on gaps
    f: Option<String>, // quality flags, e.g. "0,0,0,0"
}

#[derive(Deserialize)]
struct StationMetadata {
    id: String,
    name: String,
    lat: String,
    lon: String,
}

#[derive(Deserialize)]
struct PredictionEntry {
    t: String,
    v: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a datagetter URL for the latest water level observation at a
/// CO-OPS station.
pub fn build_water_level_url(station_id: &str) -> String {
    format!(
        "{}?date=latest&station={}&product=water_level&{}",
        COOPS_BASE_URL, station_id, COMMON_PARAMS
    )
}

/// Builds a datagetter URL for hourly water level history over
/// `[now - history_days, now]`, for trend display.
pub fn build_history_url(station_id: &str, now: DateTime<Utc>, history_days: i64) -> String {
    let begin = now - Duration::days(history_days);
    format!(
        "{}?begin_date={}&end_date={}&station={}&product=water_level&interval=h&{}",
        COOPS_BASE_URL,
        format_coops_date(begin),
        format_coops_date(now),
        station_id,
        COMMON_PARAMS
    )
}

/// Builds a datagetter URL for hourly tide predictions spanning
/// `[today, today + days]` at a harmonic reference station.
pub fn build_predictions_url(station_id: &str, now: DateTime<Utc>, days: i64) -> String {
    let end = now + Duration::days(days);
    format!(
        "{}?begin_date={}&end_date={}&station={}&product=predictions&interval=h&{}",
        COOPS_BASE_URL,
        format_coops_date(now),
        format_coops_date(end),
        station_id,
        COMMON_PARAMS
    )
}

/// Formats a date as the compact YYYYMMDD form datagetter expects.
fn format_coops_date(dt: DateTime<Utc>) -> String {
    format!("{:04}{:02}{:02}", dt.year(), dt.month(), dt.day())
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a `water_level` response into the latest `GaugeReading`.
///
/// # Errors
/// - `SourceError::ParseError` — malformed JSON, timestamp, or level.
/// - `SourceError::NoDataAvailable` — datagetter error envelope, or an
///   empty `data` array.
pub fn parse_water_level_response(json: &str) -> Result<GaugeReading, SourceError> {
    let response: DatagetterResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if let Some(err) = response.error {
        return Err(SourceError::NoDataAvailable(err.message));
    }

    let metadata = response
        .metadata
        .ok_or_else(|| SourceError::ParseError("missing station metadata".to_string()))?;

    let data = response
        .data
        .ok_or_else(|| SourceError::NoDataAvailable("no data array in response".to_string()))?;

    // date=latest returns a single observation; take the first entry.
    let latest = data
        .first()
        .ok_or_else(|| SourceError::NoDataAvailable("empty data array".to_string()))?;

    Ok(GaugeReading {
        timestamp: parse_coops_time(&latest.t)?,
        level_ft: parse_level(&latest.v)?,
        flag: latest.f.clone().unwrap_or_else(|| "0".to_string()),
        station_id: metadata.id,
        station_name: metadata.name,
        latitude: parse_coordinate(&metadata.lat)?,
        longitude: parse_coordinate(&metadata.lon)?,
    })
}

/// Parses a `water_level` history response into hourly history points,
/// skipping entries with empty level strings (sensor gaps).
pub fn parse_history_response(json: &str) -> Result<Vec<HistoryPoint>, SourceError> {
    let response: DatagetterResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if let Some(err) = response.error {
        return Err(SourceError::NoDataAvailable(err.message));
    }

    let data = response
        .data
        .ok_or_else(|| SourceError::NoDataAvailable("no data array in response".to_string()))?;

    let mut points = Vec::new();
    for entry in &data {
        if entry.v.is_empty() {
            continue; // data gap, skip
        }
        points.push(HistoryPoint {
            time: parse_coops_time(&entry.t)?,
            level_ft: parse_level(&entry.v)?,
        });
    }

    if points.is_empty() {
        return Err(SourceError::NoDataAvailable(
            "history contained no usable entries".to_string(),
        ));
    }

    Ok(points)
}

/// Parses a `predictions` response into an ordered hourly tide series.
pub fn parse_predictions_response(json: &str) -> Result<Vec<TideHour>, SourceError> {
    let response: DatagetterResponse = serde_json::from_str(json)
        .map_err(|e| SourceError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if let Some(err) = response.error {
        return Err(SourceError::NoDataAvailable(err.message));
    }

    let predictions = response
        .predictions
        .ok_or_else(|| SourceError::NoDataAvailable("no predictions in response".to_string()))?;

    if predictions.is_empty() {
        return Err(SourceError::NoDataAvailable(
            "empty predictions array".to_string(),
        ));
    }

    predictions
        .iter()
        .map(|p| {
            Ok(TideHour {
                time: parse_coops_time(&p.t)?,
                level_ft: parse_level(&p.v)?,
            })
        })
        .collect()
}

/// Subsamples hourly history to one point per `step` hours, keeping the
/// first point of each stride. Mirrors the 4-hour trend-chart density.
pub fn subsample_history(points: Vec<HistoryPoint>, step: usize) -> Vec<HistoryPoint> {
    if step <= 1 {
        return points;
    }
    points
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0)
        .map(|(_, p)| p)
        .collect()
}

fn parse_coops_time(raw: &str) -> Result<DateTime<Utc>, SourceError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
        .map_err(|e| SourceError::ParseError(format!("bad timestamp '{}': {}", raw, e)))
}

fn parse_level(raw: &str) -> Result<f64, SourceError> {
    raw.parse()
        .map_err(|e| SourceError::ParseError(format!("bad level '{}': {}", raw, e)))
}

fn parse_coordinate(raw: &str) -> Result<f64, SourceError> {
    raw.parse()
        .map_err(|e| SourceError::ParseError(format!("bad coordinate '{}': {}", raw, e)))
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetches the latest water level observation for a CO-OPS station.
pub fn fetch_latest_water_level(
    client: &reqwest::blocking::Client,
    station_id: &str,
) -> Result<GaugeReading, SourceError> {
    let body = get(client, &build_water_level_url(station_id))?;
    parse_water_level_response(&body)
}

/// Fetches hourly water level history and subsamples it to one point per
/// 4 hours for trend display.
pub fn fetch_history(
    client: &reqwest::blocking::Client,
    station_id: &str,
    now: DateTime<Utc>,
    history_days: i64,
) -> Result<Vec<HistoryPoint>, SourceError> {
    let body = get(client, &build_history_url(station_id, now, history_days))?;
    Ok(subsample_history(parse_history_response(&body)?, 4))
}

/// Fetches hourly tide predictions for `[today, today + days]`.
pub fn fetch_predictions(
    client: &reqwest::blocking::Client,
    station_id: &str,
    now: DateTime<Utc>,
    days: i64,
) -> Result<Vec<TideHour>, SourceError> {
    let body = get(client, &build_predictions_url(station_id, now, days))?;
    parse_predictions_response(&body)
}

fn get(client: &reqwest::blocking::Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(SourceError::ApiError(format!(
            "CO-OPS API returned {}",
            response.status()
        )));
    }
    Ok(response.text()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
