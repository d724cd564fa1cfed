//! Audit history - per-field change log for catalog entities and user accounts.

mod audit_diff;
mod audit_model;
mod audit_service;
mod audit_traits;

pub use audit_diff::diff_fields;
pub use audit_model::{AuditEntry, AuditStamp, FieldChange, NewAuditEntry};
pub use audit_service::AuditService;
pub use audit_traits::{AuditRepositoryTrait, AuditServiceTrait};
