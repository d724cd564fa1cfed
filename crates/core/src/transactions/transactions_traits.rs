use crate::auth::AuthContext;
use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilter};
use async_trait::async_trait;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Transactions matching `filter`, oldest first, each with its item lines.
    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Stores the transaction and its lines atomically.
    async fn create_transaction(
        &self,
        new_transaction: NewTransaction,
        created_by: String,
    ) -> Result<Transaction>;

    /// Deletes the transaction and its lines.
    async fn delete_transaction(&self, transaction_id: String) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, ctx: &AuthContext, transaction_id: &str) -> Result<Transaction>;
    fn list_transactions(
        &self,
        ctx: &AuthContext,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        ctx: &AuthContext,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, ctx: &AuthContext, transaction_id: String)
        -> Result<usize>;
}
