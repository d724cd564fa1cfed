//! Audit history domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::audit_diff::diff_fields;
use crate::errors::Result;

/// One recorded change to one field of one entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

/// Input model for recording a change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditEntry {
    pub entity_type: String,
    pub entity_id: String,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

/// Who is changing an entity, and when.
///
/// Repositories take a stamp on every update so the new row and its audit
/// entries commit in the same database transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStamp {
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
}

impl AuditStamp {
    pub fn new(changed_by: impl Into<String>, changed_at: DateTime<Utc>) -> Self {
        Self {
            changed_by: changed_by.into(),
            changed_at,
        }
    }

    /// Stamp for a change made by `changed_by` right now.
    pub fn now(changed_by: impl Into<String>) -> Self {
        Self::new(changed_by, Utc::now())
    }
}

/// A field whose value differs between two snapshots of an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl NewAuditEntry {
    /// Expands a set of field changes into one audit entry per field.
    pub fn from_changes(
        entity_type: &str,
        entity_id: &str,
        changed_by: &str,
        changed_at: DateTime<Utc>,
        changes: Vec<FieldChange>,
    ) -> Vec<NewAuditEntry> {
        changes
            .into_iter()
            .map(|change| NewAuditEntry {
                entity_type: entity_type.to_string(),
                entity_id: entity_id.to_string(),
                field: change.field,
                old_value: change.old_value,
                new_value: change.new_value,
                changed_by: changed_by.to_string(),
                changed_at,
            })
            .collect()
    }

    /// One entry per field that differs between `before` and `after`.
    pub fn for_update<T: Serialize>(
        entity_type: &str,
        entity_id: &str,
        stamp: &AuditStamp,
        before: &T,
        after: &T,
    ) -> Result<Vec<NewAuditEntry>> {
        let changes = diff_fields(before, after)?;
        Ok(Self::from_changes(
            entity_type,
            entity_id,
            &stamp.changed_by,
            stamp.changed_at,
            changes,
        ))
    }
}
