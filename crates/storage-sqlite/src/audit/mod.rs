//! SQLite storage implementation for the audit log.

mod model;
mod repository;

pub use model::AuditLogDB;
pub use repository::AuditRepository;
pub(crate) use repository::record_update;
