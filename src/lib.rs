/// floodcast_service: Delaware coastal flood forecast fusion service.
///
/// # Module structure
///
/// ```text
/// floodcast_service
/// ├── model       — shared data types (GaugeReading, WeatherHour, RiskTier, …)
/// ├── config      — service configuration loader (floodcast.toml)
/// ├── stations    — gauge and tide station registry for the Delaware coast
/// ├── ingest
/// │   ├── extract — upstream value-shape normalization (wrapped/scalar/absent)
/// │   ├── coops   — NOAA CO-OPS datagetter API: URL construction + JSON parsing
/// │   ├── nws     — NWS two-step hourly forecast API client
/// │   └── fixtures (test only) — representative API response payloads
/// ├── fallback    — deterministic synthetic series for upstream outages
/// ├── forecast    — fusion engine: gauge + weather + tide → 72h risk forecast
/// ├── daemon      — refresh scheduler (sequential reads, fallback policy, sinks)
/// └── endpoint    — CORS proxy routes + /forecast and /health HTTP API
/// ```

/// Public modules
pub mod config;
pub mod daemon;
pub mod endpoint;
pub mod fallback;
pub mod forecast;
pub mod ingest;
pub mod model;
pub mod stations;
