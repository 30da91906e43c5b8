//! Unit of Work: repository access plus transaction lifecycle.
//!
//! [`Persistence`] hands out repositories bound to the pooled connection
//! for single-statement work, and runs closures against a
//! [`TransactionContext`] when several statements must commit or roll
//! back together (order creation, paginated list + count).

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use super::repositories::{
    BaseWeaponRepository, CatalogRepository, FeedbackRepository, OrderRepository, UserRepository,
    WeaponRepository,
};
use crate::errors::{AppError, AppResult};

/// Repository access within one database transaction.
///
/// Every repository obtained from this context shares the borrowed
/// transaction; nothing is visible outside it until commit.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> UserRepository<'_, DatabaseTransaction> {
        UserRepository::new(self.txn)
    }

    pub fn weapons(&self) -> WeaponRepository<'_, DatabaseTransaction> {
        WeaponRepository::new(self.txn)
    }

    pub fn base_weapons(&self) -> BaseWeaponRepository<'_, DatabaseTransaction> {
        BaseWeaponRepository::new(self.txn)
    }

    pub fn catalog(&self) -> CatalogRepository<'_, DatabaseTransaction> {
        CatalogRepository::new(self.txn)
    }

    pub fn orders(&self) -> OrderRepository<'_, DatabaseTransaction> {
        OrderRepository::new(self.txn)
    }

    pub fn feedback(&self) -> FeedbackRepository<'_, DatabaseTransaction> {
        FeedbackRepository::new(self.txn)
    }
}

/// Concrete persistence layer over the pooled connection.
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn users(&self) -> UserRepository<'_, DatabaseConnection> {
        UserRepository::new(&self.db)
    }

    pub fn weapons(&self) -> WeaponRepository<'_, DatabaseConnection> {
        WeaponRepository::new(&self.db)
    }

    pub fn base_weapons(&self) -> BaseWeaponRepository<'_, DatabaseConnection> {
        BaseWeaponRepository::new(&self.db)
    }

    pub fn catalog(&self) -> CatalogRepository<'_, DatabaseConnection> {
        CatalogRepository::new(&self.db)
    }

    pub fn orders(&self) -> OrderRepository<'_, DatabaseConnection> {
        OrderRepository::new(&self.db)
    }

    pub fn feedback(&self) -> FeedbackRepository<'_, DatabaseConnection> {
        FeedbackRepository::new(&self.db)
    }

    /// Run a closure in a ReadCommitted transaction, committing on success
    /// and rolling back on error.
    pub async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
