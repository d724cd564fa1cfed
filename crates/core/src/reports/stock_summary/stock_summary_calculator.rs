use crate::reports::stock_summary::stock_summary_model::{
    ItemWithTransactionLines, MonthBucket, MonthFilter, MonthName, MonthlyTotal, TransactionLine,
};
use crate::transactions::TransactionDirection;
use crate::utils::time_utils::{get_months_between, reporting_month_from_utc, YearMonth};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Rebuilds month-by-month running stock for each item from its transaction lines.
///
/// Pure: the output depends only on the items, `as_of` and the reporting
/// timezone. Items are folded independently and in parallel; results are
/// concatenated in input order.
#[derive(Debug, Clone, Copy)]
pub struct StockSummaryCalculator {
    reporting_tz: Tz,
}

impl StockSummaryCalculator {
    pub fn new(reporting_tz: Tz) -> Self {
        Self { reporting_tz }
    }

    /// Produces one bucket per item per month, from the month of the item's
    /// earliest line through the month of `as_of`.
    ///
    /// Data problems are not errors here: negative quantities flow through the
    /// arithmetic, `Unknown` directions move nothing and stock may close
    /// negative. Callers validate before recording transactions.
    ///
    /// Never panics on overflow. Stock counts saturate at `i64::MIN`/`i64::MAX`
    /// and a valuation that does not fit a `Decimal` is clamped to
    /// `Decimal::MIN`/`Decimal::MAX`; both cases are logged.
    ///
    /// When `filter` names both a month and a year only that month's buckets
    /// are returned; the result equals filtering the unfiltered output.
    pub fn aggregate(
        &self,
        items: &[ItemWithTransactionLines],
        as_of: DateTime<Utc>,
        filter: &MonthFilter,
    ) -> Vec<MonthBucket> {
        let end_month = reporting_month_from_utc(as_of, self.reporting_tz);
        let target = filter.target();

        let per_item: Vec<Vec<MonthBucket>> = items
            .par_iter()
            .map(|item| {
                let buckets = self.summarize_item(item, end_month);
                match target {
                    Some(target) => buckets
                        .into_iter()
                        .filter(|b| b.is_in(target))
                        .collect(),
                    None => buckets,
                }
            })
            .collect();

        per_item.into_iter().flatten().collect()
    }

    fn summarize_item(
        &self,
        item: &ItemWithTransactionLines,
        end_month: YearMonth,
    ) -> Vec<MonthBucket> {
        let mut lines: Vec<&TransactionLine> = item.lines.iter().collect();
        // Stable: lines sharing a timestamp keep their input order.
        lines.sort_by_key(|line| line.occurred_at);

        let Some(first) = lines.first() else {
            return Vec::new();
        };
        let start_month = reporting_month_from_utc(first.occurred_at, self.reporting_tz);
        let months = get_months_between(start_month, end_month);
        if months.is_empty() {
            debug!(
                "Item '{}' has no transactions on or before {}-{:02}; no buckets",
                item.item_id,
                end_month.year(),
                end_month.month()
            );
            return Vec::new();
        }

        // (stock_in, stock_out) per month, indexed by offset from start_month
        let mut movements = vec![(0i64, 0i64); months.len()];
        for line in lines {
            let month = reporting_month_from_utc(line.occurred_at, self.reporting_tz);
            let slot = match usize::try_from(month.months_since(start_month)) {
                Ok(offset) => movements.get_mut(offset),
                Err(_) => None,
            };
            let Some((stock_in, stock_out)) = slot else {
                debug!(
                    "Skipping line for item '{}' dated {} after report month {}-{:02}",
                    item.item_id,
                    line.occurred_at,
                    end_month.year(),
                    end_month.month()
                );
                continue;
            };
            match line.direction {
                TransactionDirection::Receiving => {
                    *stock_in = stock_in.saturating_add(line.quantity)
                }
                TransactionDirection::Issuing => {
                    *stock_out = stock_out.saturating_add(line.quantity)
                }
                TransactionDirection::Unknown => {}
            }
        }

        months
            .into_iter()
            .zip(movements)
            .scan(0i64, |opening_stock, (year_month, (stock_in, stock_out))| {
                let opening = *opening_stock;
                let closing_stock = opening.saturating_add(stock_in).saturating_sub(stock_out);
                if closing_stock == i64::MAX || closing_stock == i64::MIN {
                    warn!(
                        "Closing stock of item '{}' saturated in {}-{:02}",
                        item.item_id,
                        year_month.year(),
                        year_month.month()
                    );
                }
                *opening_stock = closing_stock;
                Some(MonthBucket {
                    item_id: item.item_id.clone(),
                    item_name: item.item_name.clone(),
                    year: year_month.year(),
                    month: year_month.month(),
                    month_name: MonthName::from(year_month),
                    opening_stock: opening,
                    stock_in,
                    stock_out,
                    closing_stock,
                    unit_price: item.unit_price,
                    valuation: valuation_of(&item.item_id, item.unit_price, closing_stock),
                })
            })
            .collect()
    }
}

/// `unit_price * closing_stock`, clamped to the `Decimal` range.
fn valuation_of(item_id: &str, unit_price: Decimal, closing_stock: i64) -> Decimal {
    let stock = Decimal::from(closing_stock);
    unit_price.checked_mul(stock).unwrap_or_else(|| {
        warn!(
            "Valuation of item '{}' ({} x {}) overflows; clamping",
            item_id, unit_price, closing_stock
        );
        unit_price.saturating_mul(stock)
    })
}

/// Sums buckets per calendar month across items, ascending by month.
///
/// Sums saturate instead of overflowing.
pub fn summarize_monthly_totals(buckets: &[MonthBucket]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<(i32, u32), MonthlyTotal> = BTreeMap::new();
    for bucket in buckets {
        let total = totals
            .entry((bucket.year, bucket.month))
            .or_insert_with(|| MonthlyTotal {
                year: bucket.year,
                month: bucket.month,
                month_name: bucket.month_name,
                stock_in: 0,
                stock_out: 0,
                closing_stock: 0,
                valuation: Decimal::ZERO,
                item_count: 0,
            });
        total.stock_in = total.stock_in.saturating_add(bucket.stock_in);
        total.stock_out = total.stock_out.saturating_add(bucket.stock_out);
        total.closing_stock = total.closing_stock.saturating_add(bucket.closing_stock);
        total.valuation = total.valuation.saturating_add(bucket.valuation);
        total.item_count += 1;
    }
    totals.into_values().collect()
}
