//! Database model for user accounts.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::parse_timestamp;
use stockroom_core::auth::Role;
use stockroom_core::errors::{DatabaseError, Error};
use stockroom_core::users::{NewUser, User, UserUpdate};

/// Database model for users
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    // An unknown role must never be read as some default grant.
    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        let role = Role::from_str(&db.role).map_err(|_| {
            Error::Database(DatabaseError::Internal(format!(
                "User '{}' has an unknown role '{}'",
                db.id, db.role
            )))
        })?;
        Ok(Self {
            role,
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            username: db.username,
            display_name: db.display_name,
            is_active: db.is_active,
        })
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: domain
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            username: domain.username.trim().to_string(),
            display_name: domain.display_name,
            role: domain.role.as_str().to_string(),
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl UserDB {
    pub fn apply(&mut self, update: UserUpdate) {
        self.display_name = update.display_name;
        self.role = update.role.as_str().to_string();
        self.is_active = update.is_active;
        self.updated_at = Utc::now().to_rfc3339();
    }
}
