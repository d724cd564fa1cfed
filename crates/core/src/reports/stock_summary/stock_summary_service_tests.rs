#[cfg(test)]
mod tests {
    use crate::auth::{AuthContext, Role};
    use crate::errors::{DatabaseError, Error, Result};
    use crate::reports::stock_summary::{
        ItemWithTransactionLines, MonthFilter, MonthName, StockSummaryRepositoryTrait,
        StockSummaryService, StockSummaryServiceTrait, TransactionLine,
    };
    use crate::transactions::TransactionDirection;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    // --- Mock StockSummaryRepository ---
    struct MockStockSummaryRepository {
        items: Vec<ItemWithTransactionLines>,
        fail: bool,
    }

    impl StockSummaryRepositoryTrait for MockStockSummaryRepository {
        fn load_items_with_transaction_lines(&self) -> Result<Vec<ItemWithTransactionLines>> {
            if self.fail {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "connection reset".to_string(),
                )));
            }
            Ok(self.items.clone())
        }
    }

    fn stapler() -> ItemWithTransactionLines {
        let line = |direction, quantity, day| TransactionLine {
            item_id: "item-stapler".to_string(),
            item_name: "Stapler".to_string(),
            unit_price: dec!(12.50),
            direction,
            quantity,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap(),
        };
        ItemWithTransactionLines {
            item_id: "item-stapler".to_string(),
            item_name: "Stapler".to_string(),
            unit_price: dec!(12.50),
            lines: vec![
                line(TransactionDirection::Receiving, 40, 1),
                line(TransactionDirection::Issuing, 15, 9),
            ],
        }
    }

    fn service(items: Vec<ItemWithTransactionLines>, fail: bool) -> StockSummaryService {
        StockSummaryService::new(
            Arc::new(MockStockSummaryRepository { items, fail }),
            chrono_tz::UTC,
        )
    }

    #[test]
    fn test_summary_as_of_through_repository() {
        let service = service(vec![stapler()], false);
        let viewer = AuthContext::new("viewer", Role::Viewer);
        let as_of = Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap();

        let buckets = service
            .get_stock_summary_as_of(&viewer, as_of, &MonthFilter::default())
            .unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].closing_stock, 25);
        assert_eq!(buckets[0].valuation, dec!(312.50));
        assert_eq!(buckets[1].opening_stock, 25);
        assert_eq!(buckets[1].month_name, MonthName::April);
    }

    #[test]
    fn test_current_summary_reaches_this_month() {
        let service = service(vec![stapler()], false);
        let staff = AuthContext::new("staff", Role::Staff);

        let buckets = service
            .get_stock_summary(&staff, &MonthFilter::default())
            .unwrap();
        let last = buckets.last().unwrap();
        let now = crate::utils::time_utils::reporting_month_from_utc(Utc::now(), chrono_tz::UTC);
        assert!(last.is_in(now));
        assert_eq!(last.closing_stock, 25);
    }

    #[test]
    fn test_monthly_totals_respect_filter() {
        let service = service(vec![stapler()], false);
        let admin = AuthContext::new("admin", Role::Admin);
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let filter = MonthFilter::new(Some(MonthName::May), Some(2024));

        let totals = service.get_monthly_totals(&admin, as_of, &filter).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].month, 5);
        assert_eq!(totals[0].closing_stock, 25);
        assert_eq!(totals[0].item_count, 1);
    }

    #[test]
    fn test_repository_errors_propagate() {
        let service = service(Vec::new(), true);
        let admin = AuthContext::new("admin", Role::Admin);

        let result = service.get_stock_summary(&admin, &MonthFilter::default());
        assert!(matches!(result, Err(Error::Database(_))));
    }
}
