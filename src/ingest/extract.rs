/// Value extractor: normalizes upstream fields that may arrive either as
/// a bare scalar or as a `{value: …}` wrapper.
///
/// The NWS hourly forecast is inconsistent about this — some fields (e.g.
/// `probabilityOfPrecipitation`) come wrapped with a unit code, others are
/// plain numbers, and wind speed sometimes arrives as text like "10 mph".
/// All of that ambiguity is resolved exactly once, at ingestion, so the
/// fusion engine only ever sees plain scalars.

use serde::Deserialize;
use serde_json::Value;

/// Sentinel returned by [`extract`] for absent input.
pub const MISSING: &str = "N/A";

/// Safely extracts a value from an upstream field of unknown shape.
///
/// - absent / JSON null → the string sentinel `"N/A"`
/// - `{value: x, ...}` → `x`
/// - anything else → the input unchanged
///
/// This function never fails: absence and malformed input both degrade to
/// a safe default.
///
/// This is the contract-level form of the normalization, operating on
/// untyped `serde_json::Value` trees. The adapters go through the typed
/// [`MaybeWrapped`] / [`resolve_or`] path, which applies the same shape
/// rules during deserialization.
pub fn extract(raw: Option<&Value>) -> Value {
    match raw {
        None | Some(Value::Null) => Value::String(MISSING.to_string()),
        Some(Value::Object(map)) => match map.get("value") {
            Some(inner) => inner.clone(),
            None => Value::Object(map.clone()),
        },
        Some(other) => other.clone(),
    }
}

/// Typed form of the scalar-or-wrapped ambiguity, deserialized directly
/// from upstream JSON. Resolved once via [`MaybeWrapped::resolve`] or
/// [`resolve_or`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped {
    /// Plain numeric field.
    Scalar(f64),
    /// `{value: …}` wrapper; the inner value may itself be null.
    Wrapped { value: Option<f64> },
    /// Free text such as "10 mph"; a leading number is salvaged if present.
    Text(String),
}

impl MaybeWrapped {
    /// Resolves to a plain scalar, or `None` when nothing numeric is there.
    pub fn resolve(&self) -> Option<f64> {
        match self {
            MaybeWrapped::Scalar(v) => Some(*v),
            MaybeWrapped::Wrapped { value } => *value,
            MaybeWrapped::Text(s) => s.split_whitespace().next()?.parse().ok(),
        }
    }
}

/// Resolves an optional maybe-wrapped field to a scalar, falling back to
/// `default` when the field is absent or carries nothing numeric.
pub fn resolve_or(raw: Option<&MaybeWrapped>, default: f64) -> f64 {
    raw.and_then(MaybeWrapped::resolve).unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
