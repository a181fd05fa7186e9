/// Refresh scheduler for the flood forecast service.
///
/// Owns the refresh cycle: read gauge → read weather → read tide → fuse,
/// strictly in that order, on demand and on a fixed interval. Source
/// failures never abort a cycle — the cycle substitutes the synthetic
/// generators from `fallback` and carries an advisory notice instead.
/// Completed cycles are handed to subscribed `ForecastSink`s rather than
/// mutating shared fields.
///
/// The scheduler is a two-state machine: `Idle` and `Refreshing`, with
/// `Refreshing → Idle` unconditional on completion. Overlap is resolved
/// by serialization: the loop is single-threaded, so a timer tick or
/// manual trigger lands only after the previous cycle has returned.

use crate::config::ServiceConfig;
use crate::fallback;
use crate::forecast;
use crate::ingest::{coops, nws};
use crate::model::{ForecastHour, GaugeReading, HistoryPoint, SourceError, TideHour, WeatherHour};
use crate::stations::{self, Station, StationFamily};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Notice shown while the creek gauge has no live NWPS feed.
pub const NOTICE_SIMULATED_GAUGE: &str =
    "Connecting to live data sources. Some features may show demo data during API transitions.";

/// Notice shown when a live gauge query failed and synthetic data stands in.
pub const NOTICE_GAUGE_UNAVAILABLE: &str =
    "API temporarily unavailable. Showing simulated data for demonstration.";

// ---------------------------------------------------------------------------
// Scheduler state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Refreshing,
}

/// Context threaded through each refresh cycle instead of ambient
/// mutable state.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    pub station_id: String,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Everything one refresh cycle produced. Immutable once assembled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleOutcome {
    pub station_id: String,
    pub gauge: GaugeReading,
    pub history: Vec<HistoryPoint>,
    pub forecast: Vec<ForecastHour>,
    /// Advisory notice when any source degraded to synthetic data. Never
    /// blocks the forecast — synthetic data renders like real data.
    pub notice: Option<String>,
    pub refreshed_at: DateTime<Utc>,
}

/// Subscription interface for completed cycles.
pub trait ForecastSink: Send {
    fn publish(&mut self, outcome: &CycleOutcome);
}

/// A sink retaining the most recent outcome, shareable with the HTTP
/// endpoint thread.
#[derive(Clone, Default)]
pub struct SharedLatest(Arc<Mutex<Option<CycleOutcome>>>);

impl SharedLatest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the most recent outcome, if any cycle has completed.
    pub fn snapshot(&self) -> Option<CycleOutcome> {
        self.0.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ForecastSink for SharedLatest {
    fn publish(&mut self, outcome: &CycleOutcome) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(outcome.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome assembly (fallback policy lives here, not in the adapters)
// ---------------------------------------------------------------------------

/// Combines the four source results into a cycle outcome, substituting
/// synthetic series for anything that failed. This is where the fallback
/// policy is decided — adapters only report success or `SourceError`.
pub fn assemble_outcome(
    station: &Station,
    now: DateTime<Utc>,
    gauge: Result<GaugeReading, SourceError>,
    history: Result<Vec<HistoryPoint>, SourceError>,
    weather: Result<Vec<WeatherHour>, SourceError>,
    tide: Result<Vec<TideHour>, SourceError>,
) -> CycleOutcome {
    let mut rng = fallback::wall_clock_rng(now);

    let (gauge, notice) = match gauge {
        Ok(reading) => (reading, None),
        Err(e) => {
            let notice = match station.family {
                StationFamily::Stage => NOTICE_SIMULATED_GAUGE,
                StationFamily::TidalDatum => {
                    eprintln!("gauge read failed for {}: {}", station.station_id, e);
                    NOTICE_GAUGE_UNAVAILABLE
                }
            };
            (
                fallback::synthetic_gauge_reading(station, now),
                Some(notice.to_string()),
            )
        }
    };

    let history = match history {
        Ok(points) => points,
        Err(e) => match station.family {
            StationFamily::Stage => fallback::synthetic_history(now, &mut rng),
            StationFamily::TidalDatum => {
                // Trend display is optional; an empty trend beats a fake one
                // for a station that normally has real history.
                eprintln!("history read failed for {}: {}", station.station_id, e);
                Vec::new()
            }
        },
    };

    let weather = weather.unwrap_or_else(|e| {
        eprintln!("weather read failed: {}", e);
        fallback::synthetic_weather(now, forecast::MAX_HORIZON_HOURS, &mut rng)
    });

    let tide = tide.unwrap_or_else(|e| {
        eprintln!("tide read failed: {}", e);
        fallback::synthetic_tide(now, forecast::MAX_HORIZON_HOURS)
    });

    let forecast = forecast::fuse(gauge.level_ft, now, &weather, &tide);

    CycleOutcome {
        station_id: station.station_id.to_string(),
        gauge,
        history,
        forecast,
        notice,
        refreshed_at: now,
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

pub struct Scheduler {
    config: ServiceConfig,
    station: &'static Station,
    client: reqwest::blocking::Client,
    context: RefreshContext,
    state: SchedulerState,
    sinks: Vec<Box<dyn ForecastSink>>,
}

impl Scheduler {
    /// Creates a scheduler for the configured station.
    ///
    /// # Errors
    /// Fails when the configured station or tide reference station is not
    /// in the registry, or the HTTP client cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self, Box<dyn Error>> {
        let station = stations::find_station(&config.station_id).ok_or_else(|| {
            format!(
                "unknown station id '{}' (known stations: {})",
                config.station_id,
                stations::all_station_ids().join(", ")
            )
        })?;

        if stations::find_station(&config.tide_station).is_none() {
            return Err(format!("unknown tide station id '{}'", config.tide_station).into());
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            context: RefreshContext {
                station_id: config.station_id.clone(),
                last_refreshed_at: None,
            },
            config,
            station,
            client,
            state: SchedulerState::Idle,
            sinks: Vec::new(),
        })
    }

    /// Registers a sink to receive every completed cycle.
    pub fn subscribe(&mut self, sink: Box<dyn ForecastSink>) {
        self.sinks.push(sink);
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn context(&self) -> &RefreshContext {
        &self.context
    }

    /// Runs one full refresh cycle: gauge (with history) → weather →
    /// tide, sequentially, then fusion. Returns the outcome after
    /// publishing it to all sinks. Never fails — every source error
    /// degrades to synthetic data inside `assemble_outcome`.
    pub fn refresh(&mut self) -> CycleOutcome {
        self.state = SchedulerState::Refreshing;
        let now = Utc::now();

        let (gauge, history) = match self.station.family {
            // No live NWPS feed yet; the synthetic reading is the primary
            // path for stage stations.
            StationFamily::Stage => (
                Err(SourceError::NoDataAvailable(
                    "no live feed for NWPS stage stations".to_string(),
                )),
                Err(SourceError::NoDataAvailable(
                    "no history query for NWPS stage stations".to_string(),
                )),
            ),
            StationFamily::TidalDatum => (
                coops::fetch_latest_water_level(&self.client, self.station.station_id),
                coops::fetch_history(
                    &self.client,
                    self.station.station_id,
                    now,
                    self.config.history_days,
                ),
            ),
        };

        let weather = nws::fetch_hourly(&self.client, self.config.latitude, self.config.longitude);

        let tide = coops::fetch_predictions(
            &self.client,
            &self.config.tide_station,
            now,
            self.config.tide_window_days,
        );

        let outcome = assemble_outcome(self.station, now, gauge, history, weather, tide);

        self.context.last_refreshed_at = Some(outcome.refreshed_at);
        for sink in &mut self.sinks {
            sink.publish(&outcome);
        }

        // Unconditional: handled failures already degraded to fallbacks.
        self.state = SchedulerState::Idle;
        outcome
    }

    /// Main polling loop (runs indefinitely): refresh, report, sleep out
    /// the remainder of the interval, repeat.
    pub fn run(&mut self) -> ! {
        println!("🔄 Starting refresh loop...");
        println!("   Poll interval: {} minutes", self.config.poll_interval_minutes);
        println!("   Station: {} ({})", self.station.name, self.station.station_id);

        loop {
            let start = Utc::now();
            let outcome = self.refresh();

            match &outcome.notice {
                Some(notice) => println!(
                    "✓ Refresh complete: {} forecast hours, peak {:.2} ft (degraded: {})",
                    outcome.forecast.len(),
                    forecast::peak_level(&outcome.forecast).unwrap_or(0.0),
                    notice
                ),
                None => println!(
                    "✓ Refresh complete: {} forecast hours, peak {:.2} ft",
                    outcome.forecast.len(),
                    forecast::peak_level(&outcome.forecast).unwrap_or(0.0)
                ),
            }

            let elapsed = (Utc::now() - start).num_seconds();
            let sleep_seconds = (self.config.poll_interval_minutes * 60) as i64 - elapsed;
            if sleep_seconds > 0 {
                std::thread::sleep(std::time::Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
