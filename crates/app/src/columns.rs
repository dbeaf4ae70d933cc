//! Column codecs
//!
//! Amounts are stored as decimal text so no precision is lost, and timestamps
//! as integer milliseconds since the Unix epoch.

use std::{error::Error as StdError, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqliteRow};

fn decode_error(
    column: &str,
    source: impl StdError + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

pub(crate) fn decimal_value(amount: Decimal) -> String {
    amount.to_string()
}

pub(crate) fn timestamp_value(timestamp: Timestamp) -> i64 {
    timestamp.as_millisecond()
}

pub(crate) fn try_get_parsed<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;

    raw.parse().map_err(|e| decode_error(column, e))
}

pub(crate) fn try_get_decimal(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;

    Decimal::from_str(&raw).map_err(|e| decode_error(column, e))
}

pub(crate) fn try_get_optional_decimal(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, sqlx::Error> {
    row.try_get::<Option<String>, _>(column)?
        .map(|raw| Decimal::from_str(&raw).map_err(|e| decode_error(column, e)))
        .transpose()
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let millis: i64 = row.try_get(column)?;

    Timestamp::from_millisecond(millis).map_err(|e| decode_error(column, e))
}

pub(crate) fn try_get_optional_timestamp(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<Timestamp>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|millis| Timestamp::from_millisecond(millis).map_err(|e| decode_error(column, e)))
        .transpose()
}

/// Non-negative integer column.
pub(crate) fn try_get_count(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;

    u32::try_from(raw).map_err(|e| decode_error(column, e))
}

pub(crate) fn try_get_optional_count(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<u32>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(column)?
        .map(|raw| u32::try_from(raw).map_err(|e| decode_error(column, e)))
        .transpose()
}
