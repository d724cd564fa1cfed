//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::errors::{Error, Result};

fn require_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::missing_field("username"));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(Error::invalid_input(format!(
            "username '{}' must not contain whitespace",
            username
        )));
    }
    Ok(())
}

/// Domain model representing a user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Input model for updating a user account.
///
/// The username is fixed once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        require_username(&self.username)
    }
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::missing_field("id"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            id: None,
            username: username.to_string(),
            display_name: None,
            role: Role::Staff,
        }
    }

    #[test]
    fn test_username_is_required() {
        assert!(matches!(
            new_user("  ").validate(),
            Err(Error::Validation(ValidationError::MissingField(ref f))) if f == "username"
        ));
    }

    #[test]
    fn test_username_rejects_inner_whitespace() {
        assert!(new_user("jane doe").validate().is_err());
        assert!(new_user("jane.doe").validate().is_ok());
    }

    #[test]
    fn test_role_serializes_as_policy_name() {
        let json = serde_json::to_value(new_user("jane")).unwrap();
        assert_eq!(json["role"], "STAFF");
    }
}
