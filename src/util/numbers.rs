//! Numeric coercion for form input and loosely typed backend JSON.
//!
//! DESIGN
//! ======
//! Backends built on decimal columns send money as strings (`"12.50"`), and
//! form inputs are always strings. Both paths funnel through the parsers
//! here so the rules live in one place:
//!
//! - decimals must be finite; `inf`/`NaN` are treated as unparsable
//! - integers accept a decimal form and truncate toward zero (`"3.7"` → 3)
//! - JSON strings that are not numeric are a hard deserialize error, never 0

use serde::de::{self, Deserializer};
use serde::Deserialize;

// =============================================================================
// TEXT PARSING
// =============================================================================

/// Parse a trimmed decimal string. Returns `None` when empty, unparsable, or
/// not finite.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a trimmed integer string, truncating a decimal form toward zero.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    parse_decimal(trimmed).and_then(truncate)
}

/// Decimal with a fallback for empty or unparsable input.
#[must_use]
pub fn decimal_or(raw: &str, fallback: f64) -> f64 {
    parse_decimal(raw).unwrap_or(fallback)
}

/// Integer with a fallback for empty or unparsable input.
#[must_use]
pub fn integer_or(raw: &str, fallback: i64) -> i64 {
    parse_integer(raw).unwrap_or(fallback)
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> Option<i64> {
    let whole = value.trunc();
    // i64::MAX is not exactly representable; stay strictly inside the range.
    (-9.2e18..=9.2e18).contains(&whole).then(|| whole as i64)
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(serde_json::Number),
    Text(String),
}

impl Loose {
    fn into_decimal<E: de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Self::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| E::custom(format!("number out of range: {n}"))),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => parse_decimal(&s)
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid numeric string: {s:?}"))),
        }
    }

    fn into_integer<E: de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            Self::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(truncate))
                .map(Some)
                .ok_or_else(|| E::custom(format!("integer out of range: {n}"))),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => parse_integer(&s)
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid integer string: {s:?}"))),
        }
    }
}

/// `deserialize_with` for a required decimal given as a number or numeric string.
pub fn de_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Loose::deserialize(d)?
        .into_decimal()?
        .ok_or_else(|| de::Error::custom("expected a number, found an empty string"))
}

/// `deserialize_with` for an optional decimal. `null` and `""` map to `None`.
pub fn de_opt_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<Loose>::deserialize(d)? {
        Some(loose) => loose.into_decimal(),
        None => Ok(None),
    }
}

/// `deserialize_with` for a required integer given as a number or numeric string.
pub fn de_integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Loose::deserialize(d)?
        .into_integer()?
        .ok_or_else(|| de::Error::custom("expected an integer, found an empty string"))
}

/// `deserialize_with` for an optional integer. `null` and `""` map to `None`.
pub fn de_opt_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Option::<Loose>::deserialize(d)? {
        Some(loose) => loose.into_integer(),
        None => Ok(None),
    }
}

/// `deserialize_with` for aggregate columns: a `SUM` over no rows arrives as
/// `null`, so `null` and `""` read as zero.
pub fn de_decimal_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    de_opt_decimal(d).map(|v| v.unwrap_or(0.0))
}

/// Integer counterpart of [`de_decimal_or_zero`].
pub fn de_integer_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    de_opt_integer(d).map(|v| v.unwrap_or(0))
}

/// `deserialize_with` for flags sent as `true`, `1`, or `"1"`.
pub fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    match Option::<Flag>::deserialize(d)? {
        None => Ok(false),
        Some(Flag::Bool(b)) => Ok(b),
        Some(Flag::Number(n)) => Ok(n != 0),
        Some(Flag::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid flag: {other:?}"))),
        },
    }
}

#[cfg(test)]
#[path = "numbers_test.rs"]
mod tests;
