//! Error types for the inventory domain.
//!
//! Everything here is database-agnostic. The storage crate converts Diesel,
//! r2d2 and SQLite failures into `DatabaseError` before they reach a service.

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The caller's role does not grant the permission an operation needs.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage failures, carried as text so this crate stays free of driver types.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// For example a second item with the same SKU.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A transaction line naming an unknown item, or deleting an item that
    /// transactions still reference.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Rejected input. Raised by services before anything is written.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Quantity for item '{item_id}' must not be negative (got {quantity})")]
    NegativeQuantity { item_id: String, quantity: i64 },

    #[error("Item '{0}' appears more than once in the transaction")]
    DuplicateItem(String),

    #[error("Unit price must not be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("Quantity for item '{item_id}' exceeds {max} (got {quantity})")]
    QuantityTooLarge {
        item_id: String,
        quantity: i64,
        max: i64,
    },

    #[error("Unit price exceeds {max} (got {price})")]
    PriceTooLarge { price: Decimal, max: Decimal },
}

impl Error {
    /// Shorthand for an `InvalidInput` validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    pub fn missing_field(field: &str) -> Self {
        Error::Validation(ValidationError::MissingField(field.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(format!("serialization failed: {}", err))
    }
}
