use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use stockroom_core::errors::{Error, Result};
use stockroom_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait,
};

use super::model::{TransactionDB, TransactionItemDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{transaction_items, transactions};
use crate::utils::chunk_for_sqlite;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }

    /// Loads the item lines of the given transactions, grouped by transaction id.
    fn load_lines(
        conn: &mut SqliteConnection,
        transaction_ids: &[String],
    ) -> Result<HashMap<String, Vec<TransactionItemDB>>> {
        let mut grouped: HashMap<String, Vec<TransactionItemDB>> = HashMap::new();
        for chunk in chunk_for_sqlite(transaction_ids) {
            let lines = transaction_items::table
                .filter(transaction_items::transaction_id.eq_any(chunk))
                .order(transaction_items::id.asc())
                .select(TransactionItemDB::as_select())
                .load::<TransactionItemDB>(conn)
                .map_err(StorageError::from)?;
            for line in lines {
                grouped
                    .entry(line.transaction_id.clone())
                    .or_default()
                    .push(line);
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let header = transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::NotFound(format!("Transaction '{}'", transaction_id)))?;

        let lines = transaction_items::table
            .filter(transaction_items::transaction_id.eq(transaction_id))
            .order(transaction_items::id.asc())
            .select(TransactionItemDB::as_select())
            .load::<TransactionItemDB>(&mut conn)
            .map_err(StorageError::from)?;

        header.into_domain(lines)
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .select(TransactionDB::as_select())
            .into_boxed();
        if let Some(direction) = filter.direction {
            query = query.filter(transactions::direction.eq(direction.as_str()));
        }
        if let Some(start) = filter.start {
            query = query.filter(transactions::occurred_at.ge(start.to_rfc3339()));
        }
        if let Some(end) = filter.end {
            query = query.filter(transactions::occurred_at.le(end.to_rfc3339()));
        }

        let headers = query
            .order((transactions::occurred_at.asc(), transactions::id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        let ids: Vec<String> = headers.iter().map(|h| h.id.clone()).collect();
        let mut lines = Self::load_lines(&mut conn, &ids)?;

        headers
            .into_iter()
            .map(|header| {
                let own = lines.remove(&header.id).unwrap_or_default();
                header.into_domain(own)
            })
            .collect()
    }

    async fn create_transaction(
        &self,
        new_transaction: NewTransaction,
        created_by: String,
    ) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let header = TransactionDB::from_new(&new_transaction, created_by);
                let lines: Vec<TransactionItemDB> = new_transaction
                    .items
                    .into_iter()
                    .map(|line| TransactionItemDB::from_new(&header.id, line))
                    .collect();

                diesel::insert_into(transactions::table)
                    .values(&header)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::insert_into(transaction_items::table)
                    .values(&lines)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                debug!(
                    "Stored transaction '{}' with {} lines",
                    header.id,
                    lines.len()
                );
                header.into_domain(lines)
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    transaction_items::table
                        .filter(transaction_items::transaction_id.eq(&transaction_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(diesel::delete(transactions::table.find(&transaction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
