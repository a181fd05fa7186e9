/// Test fixtures: representative JSON payloads from the CO-OPS and NWS
/// APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// CO-OPS datagetter response shapes:
///   water_level: { metadata: {id, name, lat, lon}, data: [{t, v, f}] }
///   predictions: { predictions: [{t, v}] }
///   error:       { error: { message } }
/// Timestamps are "YYYY-MM-DD HH:MM" local; levels are decimal STRINGS.
///
/// NWS response shapes:
///   points:  { properties: { forecastHourly: url } }
///   hourly:  { properties: { periods: [...] } } where numeric fields are
///            inconsistently bare scalars, {unitCode, value} wrappers, or
///            text like "10 mph". Parsers must handle all three.

/// Latest water level at Lewes (8557380): a single observation with the
/// full metadata block.
#[cfg(test)]
pub(crate) fn fixture_lewes_water_level_json() -> &'static str {
    r#"{
      "metadata": {
        "id": "8557380",
        "name": "Lewes",
        "lat": "38.7828",
        "lon": "-75.1193"
      },
      "data": [
        { "t": "2024-05-01 12:00", "v": "2.34", "s": "0.003", "f": "0,0,0,0", "q": "p" }
      ]
    }"#
}

/// Four hours of tide predictions at Lewes, rising toward high tide.
#[cfg(test)]
pub(crate) fn fixture_tide_predictions_json() -> &'static str {
    r#"{
      "predictions": [
        { "t": "2024-05-01 12:00", "v": "1.82" },
        { "t": "2024-05-01 13:00", "v": "2.45" },
        { "t": "2024-05-01 14:00", "v": "3.05" },
        { "t": "2024-05-01 15:00", "v": "3.41" }
      ]
    }"#
}

/// Nine hours of water level history with one sensor gap (empty level
/// string). Parsers should drop the gap entry and keep the rest.
#[cfg(test)]
pub(crate) fn fixture_history_json() -> &'static str {
    r#"{
      "metadata": {
        "id": "8557380",
        "name": "Lewes",
        "lat": "38.7828",
        "lon": "-75.1193"
      },
      "data": [
        { "t": "2024-05-01 00:00", "v": "1.95", "f": "0,0,0,0" },
        { "t": "2024-05-01 01:00", "v": "2.31", "f": "0,0,0,0" },
        { "t": "2024-05-01 02:00", "v": "2.78", "f": "0,0,0,0" },
        { "t": "2024-05-01 03:00", "v": "",     "f": "1,0,0,0" },
        { "t": "2024-05-01 04:00", "v": "3.02", "f": "0,0,0,0" },
        { "t": "2024-05-01 05:00", "v": "2.71", "f": "0,0,0,0" },
        { "t": "2024-05-01 06:00", "v": "2.22", "f": "0,0,0,0" },
        { "t": "2024-05-01 07:00", "v": "1.84", "f": "0,0,0,0" },
        { "t": "2024-05-01 08:00", "v": "1.63", "f": "0,0,0,0" }
      ]
    }"#
}

/// Datagetter error envelope, returned with HTTP 200 — the error must be
/// detected from the body, not the status code.
#[cfg(test)]
pub(crate) fn fixture_coops_error_json() -> &'static str {
    r#"{
      "error": {
        "message": "No data was found. This product may not be offered at this station at the requested time."
      }
    }"#
}

/// NWS points response mapping the Jefferson Creek coordinate to the
/// Philadelphia/Mount Holly forecast grid.
#[cfg(test)]
pub(crate) fn fixture_nws_points_json() -> &'static str {
    r#"{
      "properties": {
        "gridId": "PHI",
        "gridX": 42,
        "gridY": 15,
        "forecast": "https://api.weather.gov/gridpoints/PHI/42,15/forecast",
        "forecastHourly": "https://api.weather.gov/gridpoints/PHI/42,15/forecast/hourly"
      }
    }"#
}

/// Three hourly periods exercising every field shape the NWS API emits:
///   1. wrapped precipitation {unitCode, value: 40}, wrapped pressure
///   2. wrapped-null precipitation, wind speed as text "10 mph"
///   3. bare scalars throughout, pressure field absent
#[cfg(test)]
pub(crate) fn fixture_nws_hourly_json() -> &'static str {
    r#"{
      "properties": {
        "periods": [
          {
            "number": 1,
            "startTime": "2024-05-01T12:00:00-04:00",
            "temperature": 63,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 40 },
            "windSpeed": { "unitCode": "wmoUnit:mph", "value": 8 },
            "barometricPressure": { "unitCode": "wmoUnit:inHg", "value": 29.75 },
            "shortForecast": "Chance Showers"
          },
          {
            "number": 2,
            "startTime": "2024-05-01T13:00:00-04:00",
            "temperature": { "unitCode": "wmoUnit:degF", "value": 64 },
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
            "windSpeed": "10 mph",
            "barometricPressure": { "unitCode": "wmoUnit:inHg", "value": 29.81 },
            "shortForecast": "Partly Cloudy"
          },
          {
            "number": 3,
            "startTime": "2024-05-01T14:00:00-04:00",
            "temperature": 58,
            "probabilityOfPrecipitation": 80,
            "windSpeed": 23,
            "shortForecast": "Heavy Rain"
          }
        ]
      }
    }"#
}
