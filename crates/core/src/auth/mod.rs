//! Authorization - roles, permissions and the per-call auth context.

mod auth_model;
mod auth_policy;

pub use auth_model::{AuthContext, Permission, Role};
pub use auth_policy::{permissions_for, ROLE_PERMISSIONS};
