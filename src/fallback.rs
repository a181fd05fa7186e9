/// Deterministic synthetic series generators.
///
/// When an upstream feed is unavailable the refresh cycle substitutes
/// these series so the fusion engine always receives input of the
/// expected shape. The shapes are plausible rather than accurate: a
/// semidiurnal tide, a mild diurnal temperature swing, occasional rain.
/// Noise comes from a wall-clock-seeded RNG, so two concurrent fallback
/// cycles may legitimately differ — acceptable for explicitly
/// approximate data.

use crate::forecast::round2;
use crate::model::{GaugeReading, HistoryPoint, TideHour, WeatherHour};
use crate::stations::{Station, StationFamily};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic gauge baseline for NWPS stream stations (ft).
const STAGE_BASELINE_FT: f64 = 2.3;
const STAGE_AMPLITUDE_FT: f64 = 0.3;
/// Synthetic gauge baseline for CO-OPS tidal-datum stations (ft).
const TIDAL_BASELINE_FT: f64 = 2.0;
const TIDAL_AMPLITUDE_FT: f64 = 0.5;

/// Slow oscillation period for the synthetic gauge level, in
/// milliseconds (~17 minutes per radian).
const GAUGE_PERIOD_MS: f64 = 1_000_000.0;

/// Principal lunar semidiurnal period (M2), hours.
const SEMIDIURNAL_PERIOD_H: f64 = 12.4;
/// Secondary harmonic at half the M2 period.
const HARMONIC_PERIOD_H: f64 = 6.2;

/// RNG for fallback noise, seeded from the wall clock.
pub fn wall_clock_rng(now: DateTime<Utc>) -> StdRng {
    StdRng::seed_from_u64(now.timestamp_millis() as u64)
}

/// Synthesizes a current gauge reading as a slow sinusoid around a
/// per-family baseline, so repeated refreshes drift believably instead
/// of repeating one constant.
pub fn synthetic_gauge_reading(station: &Station, now: DateTime<Utc>) -> GaugeReading {
    let (baseline, amplitude, flag) = match station.family {
        StationFamily::Stage => (STAGE_BASELINE_FT, STAGE_AMPLITUDE_FT, "0"),
        StationFamily::TidalDatum => (TIDAL_BASELINE_FT, TIDAL_AMPLITUDE_FT, "1"),
    };
    let phase = now.timestamp_millis() as f64 / GAUGE_PERIOD_MS;

    GaugeReading {
        timestamp: now,
        level_ft: round2(baseline + amplitude * phase.sin()),
        flag: flag.to_string(),
        station_id: station.station_id.to_string(),
        station_name: station.name.to_string(),
        latitude: station.latitude,
        longitude: station.longitude,
    }
}

/// Synthesizes an hourly weather series: temperature oscillating around
/// 65°F, pressure around 29.8 inHg with noise, and roughly 30% of hours
/// randomly elevated to simulate rain events.
pub fn synthetic_weather(
    now: DateTime<Utc>,
    hours: usize,
    rng: &mut StdRng,
) -> Vec<WeatherHour> {
    (0..hours)
        .map(|i| {
            let diurnal = (i as f64 / 12.0).sin();
            let is_raining = rng.gen_bool(0.3);
            let precip = if is_raining {
                rng.gen_range(40..=100)
            } else {
                rng.gen_range(0..=30)
            };
            let short_forecast = if is_raining {
                if rng.gen_bool(0.5) { "Rain" } else { "Showers" }
            } else {
                "Partly Cloudy"
            };

            WeatherHour {
                start_time: now + Duration::hours(i as i64),
                temperature_f: (65.0 + diurnal * 10.0 + (rng.r#gen::<f64>() - 0.5) * 5.0).round(),
                precip_probability_pct: precip,
                wind_speed_mph: (5.0 + rng.r#gen::<f64>() * 15.0).round(),
                pressure_in_hg: round2(29.8 + diurnal * 0.3 + (rng.r#gen::<f64>() - 0.5) * 0.2),
                short_forecast: short_forecast.to_string(),
            }
        })
        .collect()
}

/// Synthesizes an hourly tide series as a compound sinusoid: the M2
/// semidiurnal constituent plus a secondary harmonic. Fully
/// deterministic — no noise.
pub fn synthetic_tide(now: DateTime<Utc>, hours: usize) -> Vec<TideHour> {
    use std::f64::consts::TAU;
    (0..hours)
        .map(|i| {
            let h = i as f64;
            let level = 2.0
                + 1.5 * (TAU * h / SEMIDIURNAL_PERIOD_H).sin()
                + 0.3 * (TAU * h / HARMONIC_PERIOD_H).sin();
            TideHour {
                time: now + Duration::hours(i as i64),
                level_ft: round2(level),
            }
        })
        .collect()
}

/// Synthesizes a 7-day daily history for stations with no real history
/// query, drifting gently around 2.2 ft.
pub fn synthetic_history(now: DateTime<Utc>, rng: &mut StdRng) -> Vec<HistoryPoint> {
    (0..7)
        .rev()
        .map(|days_back| {
            let time = now - Duration::days(days_back);
            let drift = (time.timestamp_millis() as f64 / GAUGE_PERIOD_MS).sin() * 0.4;
            HistoryPoint {
                time,
                level_ft: round2(2.2 + drift + (rng.r#gen::<f64>() - 0.5) * 0.2),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
