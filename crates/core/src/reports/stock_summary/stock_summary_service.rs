use crate::auth::{AuthContext, Permission};
use crate::errors::Result;
use crate::reports::stock_summary::stock_summary_calculator::{
    summarize_monthly_totals, StockSummaryCalculator,
};
use crate::reports::stock_summary::stock_summary_model::{MonthBucket, MonthFilter, MonthlyTotal};
use crate::reports::stock_summary::stock_summary_traits::{
    StockSummaryRepositoryTrait, StockSummaryServiceTrait,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use std::sync::Arc;
use std::time::Instant;

pub struct StockSummaryService {
    repository: Arc<dyn StockSummaryRepositoryTrait>,
    calculator: StockSummaryCalculator,
}

impl StockSummaryService {
    pub fn new(repository: Arc<dyn StockSummaryRepositoryTrait>, reporting_tz: Tz) -> Self {
        Self {
            repository,
            calculator: StockSummaryCalculator::new(reporting_tz),
        }
    }
}

impl StockSummaryServiceTrait for StockSummaryService {
    fn get_stock_summary(
        &self,
        ctx: &AuthContext,
        filter: &MonthFilter,
    ) -> Result<Vec<MonthBucket>> {
        self.get_stock_summary_as_of(ctx, Utc::now(), filter)
    }

    fn get_stock_summary_as_of(
        &self,
        ctx: &AuthContext,
        as_of: DateTime<Utc>,
        filter: &MonthFilter,
    ) -> Result<Vec<MonthBucket>> {
        ctx.require(Permission::ViewReports)?;

        let start_time = Instant::now();
        let items = self.repository.load_items_with_transaction_lines()?;
        let buckets = self.calculator.aggregate(&items, as_of, filter);

        debug!(
            "Stock summary as of {} for {} items produced {} buckets in {:?}",
            as_of,
            items.len(),
            buckets.len(),
            start_time.elapsed()
        );
        Ok(buckets)
    }

    fn get_monthly_totals(
        &self,
        ctx: &AuthContext,
        as_of: DateTime<Utc>,
        filter: &MonthFilter,
    ) -> Result<Vec<MonthlyTotal>> {
        let buckets = self.get_stock_summary_as_of(ctx, as_of, filter)?;
        Ok(summarize_monthly_totals(&buckets))
    }
}
