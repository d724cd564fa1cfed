//! Helpers shared by the SQLite repositories.
//!
//! Decimals and timestamps are stored as TEXT. Record metadata parsers log and
//! fall back so that one bad row cannot hide the rest; ledger dates are never
//! guessed, see [`parse_ledger_timestamp`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite limits the number of bound parameters per statement
/// (SQLITE_MAX_VARIABLE_NUMBER, often 999). 500 leaves room for the
/// query's other parameters.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits a slice into chunks small enough for an `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a stored decimal string, falling back to zero.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse {} '{}' as Decimal: {}. Falling back to ZERO.",
            field_name,
            value,
            e
        );
        Decimal::ZERO
    })
}

/// Parses a stored RFC 3339 metadata timestamp (`created_at` and friends),
/// falling back to the Unix epoch.
pub fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    parse_ledger_timestamp(value, field_name).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Parses a stored RFC 3339 timestamp that places a stock movement in time.
///
/// Returns `None` (after logging) when the value is unreadable. Callers must
/// not substitute a date: a made-up `occurred_at` moves stock into the wrong
/// month.
pub fn parse_ledger_timestamp(value: &str, field_name: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chunk_for_sqlite() {
        let items: Vec<i32> = (0..1200).collect();
        let sizes: Vec<usize> = chunk_for_sqlite(&items).map(<[i32]>::len).collect();
        assert_eq!(sizes, vec![500, 500, 200]);

        let empty: Vec<i32> = vec![];
        assert_eq!(chunk_for_sqlite(&empty).count(), 0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1500000", "unit_price"), dec!(1500000));
        assert_eq!(parse_decimal("12.50", "unit_price"), dec!(12.50));
        assert_eq!(parse_decimal("abc", "unit_price"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2024-01-15T09:00:00+07:00", "occurred_at"),
            Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("yesterday", "occurred_at"),
            DateTime::<Utc>::UNIX_EPOCH
        );
    }

    #[test]
    fn test_parse_ledger_timestamp_never_guesses() {
        assert_eq!(
            parse_ledger_timestamp("2024-01-15T09:00:00Z", "occurred_at"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
        );
        assert_eq!(parse_ledger_timestamp("", "occurred_at"), None);
        assert_eq!(parse_ledger_timestamp("2024-13-45", "occurred_at"), None);
    }
}
