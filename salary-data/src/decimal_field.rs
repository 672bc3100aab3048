//! Decimal cell parsing for CSV records.
//!
//! The csv deserializer hands numeric-looking cells to `Decimal` as `f64`,
//! which drops digits on large or precise amounts. These helpers read the raw
//! cell text and parse it directly.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
}

pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_decimal(&s).map_err(|err| serde::de::Error::custom(format!("invalid decimal '{s}': {err}")))
}

pub(crate) fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_decimal(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
