use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockroom_core::audit::AuditStamp;
use stockroom_core::catalog::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use stockroom_core::constants::AUDIT_ENTITY_CATEGORY;
use stockroom_core::errors::{Error, Result};

use super::model::CategoryDB;
use crate::audit::record_update;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

fn find_category(conn: &mut SqliteConnection, category_id: &str) -> Result<CategoryDB> {
    categories::table
        .find(category_id)
        .first::<CategoryDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Category '{}'", category_id)))
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        find_category(&mut conn, category_id).map(Category::from)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row: CategoryDB = new_category.into();
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(inserted))
            })
            .await
    }

    async fn update_category(
        &self,
        category_update: CategoryUpdate,
        stamp: AuditStamp,
    ) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut row = find_category(conn, &category_update.id)?;
                let before = Category::from(row.clone());
                row.apply(category_update);
                let updated = diesel::update(categories::table.find(row.id.clone()))
                    .set(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let after = Category::from(updated);
                record_update(conn, AUDIT_ENTITY_CATEGORY, &after.id, &stamp, &before, &after)?;
                Ok(after)
            })
            .await
    }

    async fn delete_category(&self, category_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
