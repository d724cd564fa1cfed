use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockroom_core::audit::AuditStamp;
use stockroom_core::catalog::{Item, ItemRepositoryTrait, ItemUpdate, NewItem};
use stockroom_core::constants::AUDIT_ENTITY_ITEM;
use stockroom_core::errors::{Error, Result};

use super::model::ItemDB;
use crate::audit::record_update;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::items;

pub struct ItemRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ItemRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ItemRepository { pool, writer }
    }
}

fn find_item(conn: &mut SqliteConnection, item_id: &str) -> Result<ItemDB> {
    items::table
        .find(item_id)
        .first::<ItemDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Item '{}'", item_id)))
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    fn list_items(&self) -> Result<Vec<Item>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = items::table
            .order((items::name.asc(), items::id.asc()))
            .load::<ItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    fn get_item(&self, item_id: &str) -> Result<Item> {
        let mut conn = get_connection(&self.pool)?;
        find_item(&mut conn, item_id).map(Item::from)
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let row: ItemDB = new_item.into();
                let inserted = diesel::insert_into(items::table)
                    .values(&row)
                    .returning(ItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Item::from(inserted))
            })
            .await
    }

    async fn update_item(&self, item_update: ItemUpdate, stamp: AuditStamp) -> Result<Item> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let mut row = find_item(conn, &item_update.id)?;
                let before = Item::from(row.clone());
                row.apply(item_update);
                let updated = diesel::update(items::table.find(row.id.clone()))
                    .set(&row)
                    .returning(ItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let after = Item::from(updated);
                record_update(conn, AUDIT_ENTITY_ITEM, &after.id, &stamp, &before, &after)?;
                Ok(after)
            })
            .await
    }

    async fn delete_item(&self, item_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(items::table.find(item_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
