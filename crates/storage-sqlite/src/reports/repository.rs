use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;

use stockroom_core::errors::Result;
use stockroom_core::reports::stock_summary::{
    ItemWithTransactionLines, StockSummaryRepositoryTrait, TransactionLine,
};
use stockroom_core::transactions::TransactionDirection;

use crate::catalog::ItemDB;
use crate::db::get_connection;
use crate::errors::IntoCore;
use crate::schema::{items, transaction_items, transactions};
use crate::utils::{parse_decimal, parse_ledger_timestamp};

/// Reads every item joined with its transaction lines for the stock summary.
pub struct StockSummaryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl StockSummaryRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        StockSummaryRepository { pool }
    }
}

impl StockSummaryRepositoryTrait for StockSummaryRepository {
    fn load_items_with_transaction_lines(&self) -> Result<Vec<ItemWithTransactionLines>> {
        let mut conn = get_connection(&self.pool)?;

        let item_rows = items::table
            .order((items::name.asc(), items::id.asc()))
            .select(ItemDB::as_select())
            .load::<ItemDB>(&mut conn)
            .into_core()?;

        // (item_id, direction, quantity, occurred_at)
        let line_rows = transaction_items::table
            .inner_join(transactions::table)
            .select((
                transaction_items::item_id,
                transactions::direction,
                transaction_items::quantity,
                transactions::occurred_at,
            ))
            .load::<(String, String, i64, String)>(&mut conn)
            .into_core()?;

        let mut lines_by_item: HashMap<String, Vec<(String, i64, String)>> = HashMap::new();
        for (item_id, direction, quantity, occurred_at) in line_rows {
            lines_by_item
                .entry(item_id)
                .or_default()
                .push((direction, quantity, occurred_at));
        }

        let result: Vec<ItemWithTransactionLines> = item_rows
            .into_iter()
            .map(|item| {
                let unit_price = parse_decimal(&item.unit_price, "unit_price");
                let lines = lines_by_item
                    .remove(&item.id)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|(direction, quantity, occurred_at)| {
                        // A line with no readable date has no month to land in.
                        let Some(occurred_at) =
                            parse_ledger_timestamp(&occurred_at, "occurred_at")
                        else {
                            error!(
                                "Dropping {} line of {} units for item '{}' from the stock summary",
                                direction, quantity, item.id
                            );
                            return None;
                        };
                        Some(TransactionLine {
                            item_id: item.id.clone(),
                            item_name: item.name.clone(),
                            unit_price,
                            direction: TransactionDirection::from_stored(&direction),
                            quantity,
                            occurred_at,
                        })
                    })
                    .collect();
                ItemWithTransactionLines {
                    item_id: item.id,
                    item_name: item.name,
                    unit_price,
                    lines,
                }
            })
            .collect();

        debug!(
            "Loaded {} items with {} transaction lines for the stock summary",
            result.len(),
            result.iter().map(|i| i.lines.len()).sum::<usize>()
        );
        Ok(result)
    }
}
