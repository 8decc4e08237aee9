//! Lenient deserializers for backend payloads.
//!
//! The backend emits naive ISO-8601 timestamps (no offset) and occasionally
//! `null` for numeric fields; both are normalized here so the domain types can
//! stay strict.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Accepts RFC 3339 or naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC).
/// `null`, a missing field or an empty string become `None`.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// A scalar in `[0, 1]`. Out-of-range values are clamped, `null`/NaN read as 0.
pub(crate) fn unit_interval<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(clamp_unit(raw.unwrap_or(0.0)))
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Non-negative count where `null` reads as 0.
pub(crate) fn count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<u32> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0))
}
