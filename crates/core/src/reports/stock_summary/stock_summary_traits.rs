//! Repository and service traits for the monthly stock summary.

use chrono::{DateTime, Utc};

use super::{ItemWithTransactionLines, MonthBucket, MonthFilter, MonthlyTotal};
use crate::auth::AuthContext;
use crate::errors::Result;

/// Source of the aggregator's input.
pub trait StockSummaryRepositoryTrait: Send + Sync {
    /// Every item, each joined with all of its transaction lines.
    /// Items without transactions are included with an empty line list.
    fn load_items_with_transaction_lines(&self) -> Result<Vec<ItemWithTransactionLines>>;
}

pub trait StockSummaryServiceTrait: Send + Sync {
    /// Stock summary through the current month.
    fn get_stock_summary(&self, ctx: &AuthContext, filter: &MonthFilter)
        -> Result<Vec<MonthBucket>>;

    /// Stock summary through the month containing `as_of`.
    fn get_stock_summary_as_of(
        &self,
        ctx: &AuthContext,
        as_of: DateTime<Utc>,
        filter: &MonthFilter,
    ) -> Result<Vec<MonthBucket>>;

    /// Per-month totals across all items through the month containing `as_of`.
    fn get_monthly_totals(
        &self,
        ctx: &AuthContext,
        as_of: DateTime<Utc>,
        filter: &MonthFilter,
    ) -> Result<Vec<MonthlyTotal>>;
}
