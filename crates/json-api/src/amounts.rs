//! Money amounts on the wire.
//!
//! Amounts travel as decimal strings so no precision is lost in JSON.

use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse a decimal amount from a request field.
pub(crate) fn parse_amount(value: &str, field: &str) -> Result<Decimal, StatusError> {
    value
        .trim()
        .parse::<Decimal>()
        .or_400(&format!("\"{field}\" must be a decimal amount"))
}

/// Parse an optional decimal amount from a request field.
pub(crate) fn parse_optional_amount(
    value: Option<&str>,
    field: &str,
) -> Result<Option<Decimal>, StatusError> {
    value.map(|value| parse_amount(value, field)).transpose()
}
