use crate::audit::audit_model::AuditEntry;
use crate::audit::audit_traits::{AuditRepositoryTrait, AuditServiceTrait};
use crate::auth::{AuthContext, Permission};
use crate::errors::Result;
use std::sync::Arc;

pub struct AuditService {
    audit_repo: Arc<dyn AuditRepositoryTrait>,
}

impl AuditService {
    pub fn new(audit_repo: Arc<dyn AuditRepositoryTrait>) -> Self {
        AuditService { audit_repo }
    }
}

impl AuditServiceTrait for AuditService {
    fn get_entity_history(
        &self,
        ctx: &AuthContext,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditEntry>> {
        ctx.require(Permission::ViewAuditLog)?;
        self.audit_repo.get_entity_history(entity_type, entity_id)
    }
}
