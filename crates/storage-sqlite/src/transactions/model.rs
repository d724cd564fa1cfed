//! Database models for transactions.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{parse_ledger_timestamp, parse_timestamp};
use stockroom_core::errors::{DatabaseError, Error, Result};
use stockroom_core::transactions::{
    NewTransaction, NewTransactionItem, Transaction, TransactionDirection, TransactionItem,
};

/// Database model for transaction headers
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub direction: String,
    pub supplier_id: Option<String>,
    pub outlet_id: Option<String>,
    pub occurred_at: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

/// Database model for one item line of a transaction
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(TransactionDB, foreign_key = transaction_id))]
#[diesel(table_name = crate::schema::transaction_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionItemDB {
    pub id: String,
    pub transaction_id: String,
    pub item_id: String,
    pub quantity: i64,
}

impl TransactionDB {
    /// Builds the header row for a new transaction. Ids are generated
    /// when the caller did not supply one.
    pub fn from_new(new_transaction: &NewTransaction, created_by: String) -> Self {
        let id = new_transaction
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self {
            id,
            direction: new_transaction.direction.as_str().to_string(),
            supplier_id: new_transaction.supplier_id.clone(),
            outlet_id: new_transaction.outlet_id.clone(),
            occurred_at: new_transaction.occurred_at.to_rfc3339(),
            reference: new_transaction.reference.clone(),
            notes: new_transaction.notes.clone(),
            created_by,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Fails when `occurred_at` cannot be read; the ledger never guesses a date.
    pub fn into_domain(self, lines: Vec<TransactionItemDB>) -> Result<Transaction> {
        let occurred_at =
            parse_ledger_timestamp(&self.occurred_at, "occurred_at").ok_or_else(|| {
                Error::Database(DatabaseError::Internal(format!(
                    "Transaction '{}' has an unreadable occurred_at '{}'",
                    self.id, self.occurred_at
                )))
            })?;
        Ok(Transaction {
            direction: TransactionDirection::from_stored(&self.direction),
            occurred_at,
            created_at: parse_timestamp(&self.created_at, "created_at"),
            id: self.id,
            supplier_id: self.supplier_id,
            outlet_id: self.outlet_id,
            reference: self.reference,
            notes: self.notes,
            created_by: self.created_by,
            items: lines.into_iter().map(TransactionItem::from).collect(),
        })
    }
}

impl TransactionItemDB {
    pub fn from_new(transaction_id: &str, line: NewTransactionItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transaction_id: transaction_id.to_string(),
            item_id: line.item_id,
            quantity: line.quantity,
        }
    }
}

impl From<TransactionItemDB> for TransactionItem {
    fn from(db: TransactionItemDB) -> Self {
        Self {
            id: db.id,
            transaction_id: db.transaction_id,
            item_id: db.item_id,
            quantity: db.quantity,
        }
    }
}
