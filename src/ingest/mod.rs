/// Upstream source adapters.
///
/// Each external feed gets its own file: `coops` for NOAA CO-OPS water
/// levels and tide predictions, `nws` for the hourly weather forecast.
/// `extract` holds the shared scalar-or-wrapped field normalization, and
/// `fixtures` (test only) carries representative API payloads.
///
/// Adapters return `Result<_, SourceError>`; substituting synthetic
/// fallback data on failure is the refresh cycle's decision (see
/// `daemon`), not the adapter's.

pub mod coops;
pub mod extract;
pub mod nws;

#[cfg(test)]
pub(crate) mod fixtures;
