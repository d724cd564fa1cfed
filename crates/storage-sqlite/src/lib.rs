//! SQLite storage implementation for Stockroom.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `stockroom-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for the catalog, ledger, user accounts, audit log and reports
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.

pub mod audit;
pub mod catalog;
pub mod db;
pub mod errors;
pub mod reports;
pub mod schema;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle, DEFAULT_POOL_SIZE,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use audit::AuditRepository;
pub use catalog::{CategoryRepository, ItemRepository, OutletRepository, SupplierRepository};
pub use reports::StockSummaryRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from stockroom-core for convenience
pub use stockroom_core::errors::{DatabaseError, Error, Result};
