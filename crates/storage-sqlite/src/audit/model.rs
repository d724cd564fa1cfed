//! Database models for the audit log.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::parse_timestamp;
use stockroom_core::audit::{AuditEntry, NewAuditEntry};

/// Database model for audit log rows
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
#[diesel(table_name = crate::schema::audit_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDB {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: String,
}

impl From<NewAuditEntry> for AuditLogDB {
    fn from(domain: NewAuditEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_type: domain.entity_type,
            entity_id: domain.entity_id,
            field: domain.field,
            old_value: domain.old_value,
            new_value: domain.new_value,
            changed_by: domain.changed_by,
            changed_at: domain.changed_at.to_rfc3339(),
        }
    }
}

impl From<AuditLogDB> for AuditEntry {
    fn from(db: AuditLogDB) -> Self {
        Self {
            changed_at: parse_timestamp(&db.changed_at, "changed_at"),
            id: db.id,
            entity_type: db.entity_type,
            entity_id: db.entity_id,
            field: db.field,
            old_value: db.old_value,
            new_value: db.new_value,
            changed_by: db.changed_by,
        }
    }
}
