//! Monthly stock summary domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::transactions::TransactionDirection;
use crate::utils::time_utils::YearMonth;

/// One item's movement within one transaction, as fed to the aggregator.
///
/// `item_name` and `unit_price` are the item's attributes at query time,
/// not at the time of the transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLine {
    pub item_id: String,
    pub item_name: String,
    pub unit_price: Decimal,
    pub direction: TransactionDirection,
    /// Expected to be non-negative; the aggregator does not check.
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// An item joined with every transaction line that references it.
/// Lines are in no particular order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithTransactionLines {
    pub item_id: String,
    pub item_name: String,
    pub unit_price: Decimal,
    pub lines: Vec<TransactionLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    const ALL: [MonthName; 12] = [
        MonthName::January,
        MonthName::February,
        MonthName::March,
        MonthName::April,
        MonthName::May,
        MonthName::June,
        MonthName::July,
        MonthName::August,
        MonthName::September,
        MonthName::October,
        MonthName::November,
        MonthName::December,
    ];

    /// 1-indexed month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(month: u32) -> Option<Self> {
        month
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MonthName::January => "January",
            MonthName::February => "February",
            MonthName::March => "March",
            MonthName::April => "April",
            MonthName::May => "May",
            MonthName::June => "June",
            MonthName::July => "July",
            MonthName::August => "August",
            MonthName::September => "September",
            MonthName::October => "October",
            MonthName::November => "November",
            MonthName::December => "December",
        }
    }
}

impl From<YearMonth> for MonthName {
    fn from(year_month: YearMonth) -> Self {
        // YearMonth keeps its month in 1..=12.
        Self::ALL[(year_month.month() - 1) as usize]
    }
}

impl FromStr for MonthName {
    type Err = String;

    /// Accepts full English names or three-letter abbreviations, any case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let name = m.as_str().to_ascii_lowercase();
                needle == name || (needle.len() == 3 && name.starts_with(&needle))
            })
            .ok_or_else(|| format!("Unknown month name: {}", s))
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional month/year restriction on a stock summary.
///
/// Filtering only applies when both parts are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthFilter {
    pub month: Option<MonthName>,
    pub year: Option<i32>,
}

impl MonthFilter {
    pub fn new(month: Option<MonthName>, year: Option<i32>) -> Self {
        Self { month, year }
    }

    /// The single calendar month to keep, or `None` when the filter is incomplete.
    pub fn target(&self) -> Option<YearMonth> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => YearMonth::new(year, month.number()),
            _ => None,
        }
    }
}

/// Stock movement and valuation of one item over one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
    pub item_id: String,
    pub item_name: String,
    pub year: i32,
    /// 1-indexed month of the year.
    pub month: u32,
    pub month_name: MonthName,
    pub opening_stock: i64,
    pub stock_in: i64,
    pub stock_out: i64,
    pub closing_stock: i64,
    /// Current item price, applied to every month.
    pub unit_price: Decimal,
    pub valuation: Decimal,
}

impl MonthBucket {
    pub fn is_in(&self, year_month: YearMonth) -> bool {
        self.year == year_month.year() && self.month == year_month.month()
    }
}

/// All items' buckets for one calendar month, summed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub month_name: MonthName,
    pub stock_in: i64,
    pub stock_out: i64,
    pub closing_stock: i64,
    pub valuation: Decimal,
    pub item_count: usize,
}
