//! Stockroom Core - Domain entities, services, and traits.
//!
//! This crate contains the inventory business logic: the catalog, the
//! stock receiving/issuing ledger, the audit history and the monthly stock
//! summary, plus the user accounts that hold roles. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod audit;
pub mod auth;
pub mod catalog;
pub mod constants;
pub mod errors;
pub mod reports;
pub mod transactions;
pub mod users;
pub mod utils;

pub use auth::{AuthContext, Permission, Role};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
