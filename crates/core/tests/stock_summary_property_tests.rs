//! Property-based integration tests for the monthly stock summary.
//!
//! These tests verify that the running-balance rules hold across random
//! item histories, using the `proptest` crate for random test case generation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use stockroom_core::reports::stock_summary::{
    ItemWithTransactionLines, MonthBucket, MonthFilter, MonthName, StockSummaryCalculator,
    TransactionLine,
};
use stockroom_core::transactions::TransactionDirection;

// =============================================================================
// Generators
// =============================================================================

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
}

/// Three years of seconds past 2022-01-01.
const SPAN_SECONDS: i64 = 3 * 365 * 24 * 3600;

fn arb_direction() -> impl Strategy<Value = TransactionDirection> {
    prop_oneof![
        4 => Just(TransactionDirection::Receiving),
        4 => Just(TransactionDirection::Issuing),
        1 => Just(TransactionDirection::Unknown),
    ]
}

fn arb_as_of() -> impl Strategy<Value = DateTime<Utc>> {
    (0..SPAN_SECONDS + 90 * 24 * 3600).prop_map(|s| epoch() + Duration::seconds(s))
}

/// Generates an item with up to `max_lines` lines at random instants.
fn arb_item(index: usize, max_lines: usize) -> impl Strategy<Value = ItemWithTransactionLines> {
    let line = (arb_direction(), 0i64..500, 0..SPAN_SECONDS);
    (
        1u32..100_000,
        proptest::collection::vec(line, 0..=max_lines),
    )
        .prop_map(move |(cents, raw_lines)| {
            let item_id = format!("item-{}", index);
            let item_name = format!("Item {}", index);
            let unit_price = Decimal::new(i64::from(cents), 2);
            let lines = raw_lines
                .into_iter()
                .map(|(direction, quantity, offset)| TransactionLine {
                    item_id: item_id.clone(),
                    item_name: item_name.clone(),
                    unit_price,
                    direction,
                    quantity,
                    occurred_at: epoch() + Duration::seconds(offset),
                })
                .collect();
            ItemWithTransactionLines {
                item_id,
                item_name,
                unit_price,
                lines,
            }
        })
}

fn arb_items(max_items: usize) -> impl Strategy<Value = Vec<ItemWithTransactionLines>> {
    (0..=max_items).prop_flat_map(|count| {
        (0..count)
            .map(|index| arb_item(index, 12))
            .collect::<Vec<_>>()
    })
}

fn arb_filter() -> impl Strategy<Value = MonthFilter> {
    (1u32..=12, 2021i32..=2025).prop_map(|(month, year)| {
        MonthFilter::new(MonthName::from_number(month), Some(year))
    })
}

fn calculator() -> StockSummaryCalculator {
    StockSummaryCalculator::new(chrono_tz::UTC)
}

fn buckets_of<'a>(buckets: &'a [MonthBucket], item_id: &str) -> Vec<&'a MonthBucket> {
    buckets.iter().filter(|b| b.item_id == item_id).collect()
}

fn month_index(bucket: &MonthBucket) -> i64 {
    i64::from(bucket.year) * 12 + i64::from(bucket.month) - 1
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every bucket closes at opening + in - out and is valued at the item price.
    #[test]
    fn prop_bucket_arithmetic_closes(items in arb_items(5), as_of in arb_as_of()) {
        for bucket in calculator().aggregate(&items, as_of, &MonthFilter::default()) {
            prop_assert_eq!(
                bucket.closing_stock,
                bucket.opening_stock + bucket.stock_in - bucket.stock_out
            );
            prop_assert_eq!(
                bucket.valuation,
                bucket.unit_price * Decimal::from(bucket.closing_stock)
            );
            prop_assert_eq!(MonthName::from_number(bucket.month), Some(bucket.month_name));
        }
    }

    /// Each item's months are consecutive, start from zero and chain balances.
    #[test]
    fn prop_months_chain_without_gaps(items in arb_items(5), as_of in arb_as_of()) {
        let buckets = calculator().aggregate(&items, as_of, &MonthFilter::default());

        for item in &items {
            let own = buckets_of(&buckets, &item.item_id);
            if let Some(first) = own.first() {
                prop_assert_eq!(first.opening_stock, 0);
            }
            for pair in own.windows(2) {
                prop_assert_eq!(month_index(pair[1]), month_index(pair[0]) + 1);
                prop_assert_eq!(pair[1].opening_stock, pair[0].closing_stock);
            }
        }
    }

    /// The last closing balance equals everything received minus everything
    /// issued up to and including the report month.
    #[test]
    fn prop_final_balance_matches_ledger(items in arb_items(5), as_of in arb_as_of()) {
        let buckets = calculator().aggregate(&items, as_of, &MonthFilter::default());
        let as_of_index = i64::from(chrono::Datelike::year(&as_of)) * 12
            + i64::from(chrono::Datelike::month0(&as_of));

        for item in &items {
            let counted: Vec<&TransactionLine> = item
                .lines
                .iter()
                .filter(|l| {
                    let index = i64::from(chrono::Datelike::year(&l.occurred_at)) * 12
                        + i64::from(chrono::Datelike::month0(&l.occurred_at));
                    index <= as_of_index
                })
                .collect();
            let expected: i64 = counted
                .iter()
                .map(|l| match l.direction {
                    TransactionDirection::Receiving => l.quantity,
                    TransactionDirection::Issuing => -l.quantity,
                    TransactionDirection::Unknown => 0,
                })
                .sum();

            let own = buckets_of(&buckets, &item.item_id);
            if counted.is_empty() {
                prop_assert!(own.is_empty());
            } else {
                let last = own.last().unwrap();
                prop_assert_eq!(last.closing_stock, expected);
                prop_assert_eq!(month_index(last), as_of_index);
            }
        }
    }

    /// Items without lines never produce buckets.
    #[test]
    fn prop_items_without_lines_are_absent(items in arb_items(6), as_of in arb_as_of()) {
        let buckets = calculator().aggregate(&items, as_of, &MonthFilter::default());
        let idle: HashSet<&str> = items
            .iter()
            .filter(|i| i.lines.is_empty())
            .map(|i| i.item_id.as_str())
            .collect();
        prop_assert!(buckets.iter().all(|b| !idle.contains(b.item_id.as_str())));
    }

    /// Line order within an item does not change the result.
    #[test]
    fn prop_line_order_does_not_matter(items in arb_items(4), as_of in arb_as_of()) {
        let mut reordered = items.clone();
        for item in &mut reordered {
            item.lines.reverse();
            if !item.lines.is_empty() {
                let len = item.lines.len();
                item.lines.rotate_left(len / 2);
            }
        }

        let calc = calculator();
        prop_assert_eq!(
            calc.aggregate(&items, as_of, &MonthFilter::default()),
            calc.aggregate(&reordered, as_of, &MonthFilter::default())
        );
    }

    /// Filtering by month and year is the same as filtering the full output.
    #[test]
    fn prop_filter_equals_post_filter(
        items in arb_items(4),
        as_of in arb_as_of(),
        filter in arb_filter(),
    ) {
        let calc = calculator();
        let target = filter.target().unwrap();
        let expected: Vec<MonthBucket> = calc
            .aggregate(&items, as_of, &MonthFilter::default())
            .into_iter()
            .filter(|b| b.is_in(target))
            .collect();

        prop_assert_eq!(calc.aggregate(&items, as_of, &filter), expected);
    }
}
