use crate::audit::audit_model::AuditEntry;
use crate::auth::AuthContext;
use crate::errors::Result;

/// Trait for audit log repository operations.
///
/// Entries are written by the entity repositories inside their own update
/// transactions; this trait only reads them back.
pub trait AuditRepositoryTrait: Send + Sync {
    /// History of one entity, newest first.
    fn get_entity_history(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditEntry>>;
}

/// Trait for audit log service operations
pub trait AuditServiceTrait: Send + Sync {
    fn get_entity_history(
        &self,
        ctx: &AuthContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditEntry>>;
}
