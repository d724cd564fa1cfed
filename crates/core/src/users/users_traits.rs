use crate::audit::AuditStamp;
use crate::auth::AuthContext;
use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserUpdate};
use async_trait::async_trait;

/// Trait for user repository operations.
///
/// `update_user` writes the row and its audit entries in one transaction.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn list_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, user_update: UserUpdate, stamp: AuditStamp) -> Result<User>;
    async fn delete_user(&self, user_id: String) -> Result<usize>;
}

/// Trait for user service operations. Every call needs `ManageUsers`.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_users(&self, ctx: &AuthContext) -> Result<Vec<User>>;
    fn get_user(&self, ctx: &AuthContext, user_id: &str) -> Result<User>;
    async fn create_user(&self, ctx: &AuthContext, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, ctx: &AuthContext, user_update: UserUpdate) -> Result<User>;
    async fn delete_user(&self, ctx: &AuthContext, user_id: String) -> Result<usize>;
}
