use crate::auth::{AuthContext, Permission};
use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilter};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct TransactionService {
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repo: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { transaction_repo }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, ctx: &AuthContext, transaction_id: &str) -> Result<Transaction> {
        ctx.require(Permission::ViewTransactions)?;
        self.transaction_repo.get_transaction(transaction_id)
    }

    fn list_transactions(
        &self,
        ctx: &AuthContext,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        ctx.require(Permission::ViewTransactions)?;
        self.transaction_repo.list_transactions(filter)
    }

    async fn create_transaction(
        &self,
        ctx: &AuthContext,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        ctx.require(Permission::RecordTransactions)?;
        new_transaction.validate()?;
        debug!(
            "Recording {} transaction with {} lines for user '{}'",
            new_transaction.direction,
            new_transaction.items.len(),
            ctx.user_id
        );
        self.transaction_repo
            .create_transaction(new_transaction, ctx.user_id.clone())
            .await
    }

    async fn delete_transaction(
        &self,
        ctx: &AuthContext,
        transaction_id: String,
    ) -> Result<usize> {
        ctx.require(Permission::DeleteTransactions)?;
        self.transaction_repo.delete_transaction(transaction_id).await
    }
}
