use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseDecimalError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Trims whitespace, then drops a leading currency sign and comma separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    unsigned.trim_start().replace(',', "")
}

/// Parses a user-entered amount into a [`Decimal`].
///
/// Handles comma as thousands separator and a leading `$`
/// (e.g. `"$1,234.56"`). Empty or whitespace-only input is treated as 0.
/// Invalid input is logged and returned as an error.
///
/// ```
/// use budget_data::parse_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
/// assert_eq!(parse_decimal("  ").unwrap(), dec!(0));
/// assert!(parse_decimal("12abc").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Serde adapter accepting an amount as an integer, a float or a string.
///
/// Floats go through their shortest decimal rendering, so `0.0505` in a
/// document becomes exactly `0.0505`. Strings use [`parse_decimal`].
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Integer(value) => Ok(Decimal::from(value)),
        RawAmount::Float(value) => {
            parse_decimal(&value.to_string()).map_err(serde::de::Error::custom)
        }
        RawAmount::Text(value) => parse_decimal(&value).map_err(serde::de::Error::custom),
    }
}
