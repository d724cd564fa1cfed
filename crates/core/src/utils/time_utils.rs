use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for assigning transaction timestamps to calendar months.
pub const DEFAULT_REPORTING_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a reporting date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
/// Use this whenever you need to derive a "business date" from a timestamp.
pub fn reporting_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Calendar month of a UTC instant, as seen from `tz`.
pub fn reporting_month_from_utc(instant: DateTime<Utc>, tz: Tz) -> YearMonth {
    YearMonth::from_date(reporting_date_from_utc(instant, tz))
}

/// A calendar month. Orders chronologically (year first, then month).
///
/// Fields are private: every constructor keeps `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-indexed month of the year.
    pub fn month(self) -> u32 {
        self.month
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of months from `start` to `self`; negative when `self` is earlier.
    pub fn months_since(self, start: YearMonth) -> i64 {
        (i64::from(self.year) - i64::from(start.year)) * 12 + i64::from(self.month)
            - i64::from(start.month)
    }
}

/// Every calendar month from `start` to `end`, both inclusive.
pub fn get_months_between(start: YearMonth, end: YearMonth) -> Vec<YearMonth> {
    if start > end {
        return Vec::new();
    }
    let mut months = Vec::with_capacity((end.months_since(start) + 1) as usize);
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.succ();
    }
    months
}
