use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockroom_core::audit::AuditStamp;
use stockroom_core::constants::AUDIT_ENTITY_USER;
use stockroom_core::errors::{Error, Result};
use stockroom_core::users::{NewUser, User, UserRepositoryTrait, UserUpdate};

use super::model::UserDB;
use crate::audit::record_update;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

fn find_user(conn: &mut SqliteConnection, user_id: &str) -> Result<UserDB> {
    users::table
        .find(user_id)
        .first::<UserDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("User '{}'", user_id)))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .order(users::username.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        User::try_from(find_user(&mut conn, user_id)?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row: UserDB = new_user.into();
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                User::try_from(inserted)
            })
            .await
    }

    async fn update_user(&self, user_update: UserUpdate, stamp: AuditStamp) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut row = find_user(conn, &user_update.id)?;
                let before = User::try_from(row.clone())?;
                row.apply(user_update);
                let updated = diesel::update(users::table.find(row.id.clone()))
                    .set(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let after = User::try_from(updated)?;
                record_update(conn, AUDIT_ENTITY_USER, &after.id, &stamp, &before, &after)?;
                Ok(after)
            })
            .await
    }

    async fn delete_user(&self, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditRepository;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use diesel::connection::SimpleConnection;
    use stockroom_core::audit::AuditRepositoryTrait;
    use stockroom_core::auth::Role;
    use stockroom_core::errors::DatabaseError;
    use tempfile::tempdir;

    type DbPool = Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>;

    async fn setup() -> (UserRepository, DbPool, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy(), 4).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (UserRepository::new(Arc::clone(&pool), writer), pool, temp_dir)
    }

    fn new_user(id: &str, username: &str, role: Role) -> NewUser {
        NewUser {
            id: Some(id.to_string()),
            username: username.to_string(),
            display_name: None,
            role,
        }
    }

    #[tokio::test]
    async fn test_role_change_is_stored_and_audited() {
        let (repo, pool, _dir) = setup().await;
        let created = repo
            .create_user(new_user("u-1", "jane", Role::Staff))
            .await
            .unwrap();
        assert!(created.is_active);

        let updated = repo
            .update_user(
                UserUpdate {
                    id: "u-1".to_string(),
                    display_name: Some("Jane".to_string()),
                    role: Role::Manager,
                    is_active: true,
                },
                AuditStamp::now("root"),
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Manager);
        assert_eq!(repo.get_user("u-1").unwrap(), updated);

        let history = AuditRepository::new(pool)
            .get_entity_history(AUDIT_ENTITY_USER, "u-1")
            .unwrap();
        let mut fields: Vec<&str> = history.iter().map(|e| e.field.as_str()).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["displayName", "role"]);
        assert!(history.iter().all(|e| e.changed_by == "root"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let (repo, _pool, _dir) = setup().await;
        repo.create_user(new_user("u-1", "jane", Role::Staff))
            .await
            .unwrap();
        let result = repo
            .create_user(new_user("u-2", "jane", Role::Viewer))
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::UniqueViolation(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_stored_role_is_an_error() {
        let (repo, pool, _dir) = setup().await;
        get_connection(&pool)
            .unwrap()
            .batch_execute(
                "INSERT INTO users (id, username, role, is_active, created_at, updated_at) \
                 VALUES ('u-9', 'ghost', 'OWNER', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
            )
            .unwrap();

        assert!(matches!(
            repo.get_user("u-9"),
            Err(Error::Database(DatabaseError::Internal(_)))
        ));
        assert!(repo.list_users().is_err());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (repo, _pool, _dir) = setup().await;
        repo.create_user(new_user("u-1", "jane", Role::Staff))
            .await
            .unwrap();
        assert_eq!(repo.delete_user("u-1".to_string()).await.unwrap(), 1);
        assert!(matches!(repo.get_user("u-1"), Err(Error::NotFound(_))));
    }
}
