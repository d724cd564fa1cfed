use crate::audit::AuditStamp;
use crate::auth::{AuthContext, Permission, Role};
use crate::errors::{Error, Result};
use crate::users::users_model::{NewUser, User, UserUpdate};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }
}

/// An administrator may not lock themselves out of user management.
fn guard_own_account(ctx: &AuthContext, user_update: &UserUpdate) -> Result<()> {
    if user_update.id != ctx.user_id {
        return Ok(());
    }
    if user_update.role != Role::Admin || !user_update.is_active {
        return Err(Error::invalid_input(
            "an administrator cannot demote or deactivate their own account",
        ));
    }
    Ok(())
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_users(&self, ctx: &AuthContext) -> Result<Vec<User>> {
        ctx.require(Permission::ManageUsers)?;
        self.user_repo.list_users()
    }

    fn get_user(&self, ctx: &AuthContext, user_id: &str) -> Result<User> {
        ctx.require(Permission::ManageUsers)?;
        self.user_repo.get_user(user_id)
    }

    async fn create_user(&self, ctx: &AuthContext, new_user: NewUser) -> Result<User> {
        ctx.require(Permission::ManageUsers)?;
        new_user.validate()?;
        let user = self.user_repo.create_user(new_user).await?;
        info!(
            "User '{}' created account '{}' with role {}",
            ctx.user_id, user.username, user.role
        );
        Ok(user)
    }

    async fn update_user(&self, ctx: &AuthContext, user_update: UserUpdate) -> Result<User> {
        ctx.require(Permission::ManageUsers)?;
        user_update.validate()?;
        guard_own_account(ctx, &user_update)?;
        self.user_repo
            .update_user(user_update, AuditStamp::now(&ctx.user_id))
            .await
    }

    async fn delete_user(&self, ctx: &AuthContext, user_id: String) -> Result<usize> {
        ctx.require(Permission::ManageUsers)?;
        if user_id == ctx.user_id {
            return Err(Error::invalid_input(
                "an administrator cannot delete their own account",
            ));
        }
        self.user_repo.delete_user(user_id).await
    }
}
