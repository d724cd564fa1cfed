use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use serde::Serialize;
use std::sync::Arc;

use stockroom_core::audit::{AuditEntry, AuditRepositoryTrait, AuditStamp, NewAuditEntry};
use stockroom_core::errors::Result;

use super::model::AuditLogDB;
use crate::db::get_connection;
use crate::errors::{IntoCore, StorageError};
use crate::schema::audit_logs;

pub struct AuditRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl AuditRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        AuditRepository { pool }
    }
}

/// Appends entries to the audit log on `conn`, inside the caller's transaction.
pub(crate) fn insert_audit_entries(
    conn: &mut SqliteConnection,
    entries: Vec<NewAuditEntry>,
) -> Result<usize> {
    if entries.is_empty() {
        return Ok(0);
    }
    let rows: Vec<AuditLogDB> = entries.into_iter().map(AuditLogDB::from).collect();
    Ok(diesel::insert_into(audit_logs::table)
        .values(&rows)
        .execute(conn)
        .map_err(StorageError::from)?)
}

/// Diffs two snapshots of an entity and logs every changed field.
///
/// Called from inside a writer job right after the entity row is updated, so
/// a failed audit insert rolls the update back with it.
pub(crate) fn record_update<T: Serialize>(
    conn: &mut SqliteConnection,
    entity_type: &str,
    entity_id: &str,
    stamp: &AuditStamp,
    before: &T,
    after: &T,
) -> Result<usize> {
    let entries = NewAuditEntry::for_update(entity_type, entity_id, stamp, before, after)?;
    let written = insert_audit_entries(conn, entries)?;
    debug!(
        "Recorded {} audit entries for {} '{}' by '{}'",
        written, entity_type, entity_id, stamp.changed_by
    );
    Ok(written)
}

impl AuditRepositoryTrait for AuditRepository {
    fn get_entity_history(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = audit_logs::table
            .filter(audit_logs::entity_type.eq(entity_type))
            .filter(audit_logs::entity_id.eq(entity_id))
            .order((audit_logs::changed_at.desc(), audit_logs::field.asc()))
            .select(AuditLogDB::as_select())
            .load::<AuditLogDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(AuditEntry::from).collect())
    }
}
