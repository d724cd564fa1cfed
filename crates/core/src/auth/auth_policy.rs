use super::auth_model::{Permission, Role};

use super::auth_model::Permission::*;

const ADMIN_PERMISSIONS: &[Permission] = &[
    ViewCatalog,
    ManageCatalog,
    ViewTransactions,
    RecordTransactions,
    DeleteTransactions,
    ViewReports,
    ViewAuditLog,
    ManageUsers,
];

const MANAGER_PERMISSIONS: &[Permission] = &[
    ViewCatalog,
    ManageCatalog,
    ViewTransactions,
    RecordTransactions,
    DeleteTransactions,
    ViewReports,
    ViewAuditLog,
];

const STAFF_PERMISSIONS: &[Permission] = &[
    ViewCatalog,
    ViewTransactions,
    RecordTransactions,
    ViewReports,
];

const VIEWER_PERMISSIONS: &[Permission] = &[ViewCatalog, ViewTransactions, ViewReports];

/// The role-to-permission table. Every authorization decision goes through it.
pub const ROLE_PERMISSIONS: [(Role, &[Permission]); 4] = [
    (Role::Admin, ADMIN_PERMISSIONS),
    (Role::Manager, MANAGER_PERMISSIONS),
    (Role::Staff, STAFF_PERMISSIONS),
    (Role::Viewer, VIEWER_PERMISSIONS),
];

pub fn permissions_for(role: Role) -> &'static [Permission] {
    ROLE_PERMISSIONS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, permissions)| *permissions)
        .unwrap_or(&[])
}
