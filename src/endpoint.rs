/// HTTP endpoint for the forecast service.
///
/// Serves two kinds of routes:
/// - CORS proxy routes that relay upstream APIs for browser clients,
///   wrapping every body in a `{"success": …}` envelope:
///   - GET /api/weather?lat={lat}&lon={lon} - NWS hourly forecast
///   - GET /api/tides?station={id}&days={n} - CO-OPS tide predictions
/// - Service routes backed by the refresh scheduler:
///   - GET /forecast - latest completed fusion cycle
///   - GET /health - service health check
///
/// Every response carries permissive CORS headers, and OPTIONS preflight
/// on any route returns 200 with an empty body.

use crate::daemon::SharedLatest;
use crate::ingest::{coops, nws};
use crate::stations::TIDE_REFERENCE_STATION;
use chrono::Utc;
use std::collections::HashMap;

const DEFAULT_TIDE_DAYS: i64 = 3;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Success envelope for proxy routes: `{"success": true, "data": …}`.
fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": data
    })
}

/// Failure envelope for proxy routes: `{"success": false, "error": …}`.
fn err_envelope(message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": message
    })
}

// ---------------------------------------------------------------------------
// Query string parsing
// ---------------------------------------------------------------------------

/// Parses the query string of a request URL into a key/value map,
/// percent-decoding both sides. Malformed pairs are skipped.
pub fn query_params(url: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some(query) = url.splitn(2, '?').nth(1) else {
        return params;
    };
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let key = urlencoding::decode(key).map(|k| k.into_owned());
        let value = urlencoding::decode(value).map(|v| v.into_owned());
        if let (Ok(key), Ok(value)) = (key, value) {
            params.insert(key, value);
        }
    }
    params
}

fn route_path(url: &str) -> &str {
    url.splitn(2, '?').next().unwrap_or(url)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handle /api/weather - proxies the NWS two-step hourly forecast fetch.
pub fn handle_weather(
    client: &reqwest::blocking::Client,
    params: &HashMap<String, String>,
) -> (u16, serde_json::Value) {
    let lat = params.get("lat").and_then(|v| v.parse::<f64>().ok());
    let lon = params.get("lon").and_then(|v| v.parse::<f64>().ok());
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return (400, err_envelope("Missing or invalid lat/lon parameters"));
    };

    match nws::fetch_hourly(client, lat, lon) {
        Ok(hours) => match serde_json::to_value(&hours) {
            Ok(data) => (200, ok_envelope(data)),
            Err(e) => (500, err_envelope(&e.to_string())),
        },
        Err(e) => (500, err_envelope(&e.to_string())),
    }
}

/// Handle /api/tides - proxies CO-OPS hourly tide predictions. Station
/// and window default to the Lewes reference station over 3 days.
pub fn handle_tides(
    client: &reqwest::blocking::Client,
    params: &HashMap<String, String>,
) -> (u16, serde_json::Value) {
    let station = params
        .get("station")
        .map(String::as_str)
        .unwrap_or(TIDE_REFERENCE_STATION);

    let days = match params.get("days") {
        Some(raw) => match raw.parse::<i64>() {
            Ok(days) if days > 0 => days,
            _ => return (400, err_envelope("Invalid days parameter")),
        },
        None => DEFAULT_TIDE_DAYS,
    };

    match coops::fetch_predictions(client, station, Utc::now(), days) {
        Ok(tides) => match serde_json::to_value(&tides) {
            Ok(data) => (200, ok_envelope(data)),
            Err(e) => (500, err_envelope(&e.to_string())),
        },
        Err(e) => (500, err_envelope(&e.to_string())),
    }
}

/// Handle /forecast - latest completed refresh cycle, if any.
pub fn handle_forecast(latest: &SharedLatest) -> (u16, serde_json::Value) {
    match latest.snapshot() {
        Some(outcome) => match serde_json::to_value(&outcome) {
            Ok(data) => (200, ok_envelope(data)),
            Err(e) => (500, err_envelope(&e.to_string())),
        },
        None => (503, err_envelope("No forecast cycle has completed yet")),
    }
}

/// Handle /health endpoint
pub fn handle_health(latest: &SharedLatest) -> (u16, serde_json::Value) {
    let last_refreshed_at = latest
        .snapshot()
        .map(|outcome| outcome.refreshed_at.to_rfc3339());
    (
        200,
        serde_json::json!({
            "status": "ok",
            "service": "floodcast_service",
            "version": "0.1.0",
            "lastRefreshedAt": last_refreshed_at
        }),
    )
}

fn handle_not_found() -> (u16, serde_json::Value) {
    (
        404,
        serde_json::json!({
            "error": "Not found",
            "available_endpoints": ["/api/weather", "/api/tides", "/forecast", "/health"]
        }),
    )
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(port: u16, latest: SharedLatest) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /api/weather?lat=..&lon=.. - NWS hourly forecast proxy");
    println!("   GET /api/tides?station=..&days=.. - CO-OPS tide prediction proxy");
    println!("   GET /forecast - Latest fusion cycle");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let url = request.url().to_string();

        // Preflight succeeds on every route, even unknown ones.
        let response = if *request.method() == tiny_http::Method::Options {
            preflight_response()
        } else {
            let params = query_params(&url);
            let (status, body) = match route_path(&url) {
                "/api/weather" => handle_weather(&client, &params),
                "/api/tides" => handle_tides(&client, &params),
                "/forecast" => handle_forecast(&latest),
                "/health" => handle_health(&latest),
                _ => handle_not_found(),
            };
            create_response(status, body)
        };

        if let Err(e) = request.respond(response) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body and CORS headers
fn create_response(
    status_code: u16,
    json: serde_json::Value,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string(&json).unwrap_or_else(|_| "{}".to_string());

    with_cors(
        tiny_http::Response::from_data(body.into_bytes())
            .with_status_code(tiny_http::StatusCode::from(status_code)),
    )
    .with_header(
        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
    )
}

/// Empty 200 for OPTIONS preflight
fn preflight_response() -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    with_cors(tiny_http::Response::from_data(Vec::new()).with_status_code(200))
}

fn with_cors(
    response: tiny_http::Response<std::io::Cursor<Vec<u8>>>,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    response
        .with_header(
            tiny_http::Header::from_bytes(&b"Access-Control-Allow-Origin"[..], &b"*"[..]).unwrap(),
        )
        .with_header(
            tiny_http::Header::from_bytes(
                &b"Access-Control-Allow-Methods"[..],
                &b"GET, POST, OPTIONS"[..],
            )
            .unwrap(),
        )
        .with_header(
            tiny_http::Header::from_bytes(
                &b"Access-Control-Allow-Headers"[..],
                &b"Content-Type"[..],
            )
            .unwrap(),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
