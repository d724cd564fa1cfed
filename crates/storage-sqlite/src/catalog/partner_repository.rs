//! Repositories for suppliers and outlets.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use stockroom_core::audit::AuditStamp;
use stockroom_core::catalog::{
    NewPartner, Outlet, OutletRepositoryTrait, PartnerUpdate, Supplier, SupplierRepositoryTrait,
};
use stockroom_core::constants::{AUDIT_ENTITY_OUTLET, AUDIT_ENTITY_SUPPLIER};
use stockroom_core::errors::{Error, Result};

use super::model::{OutletDB, SupplierDB};
use crate::audit::record_update;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{outlets, suppliers};

pub struct SupplierRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SupplierRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SupplierRepository { pool, writer }
    }
}

fn find_supplier(conn: &mut SqliteConnection, supplier_id: &str) -> Result<SupplierDB> {
    suppliers::table
        .find(supplier_id)
        .first::<SupplierDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Supplier '{}'", supplier_id)))
}

#[async_trait]
impl SupplierRepositoryTrait for SupplierRepository {
    fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = suppliers::table
            .order(suppliers::name.asc())
            .load::<SupplierDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    fn get_supplier(&self, supplier_id: &str) -> Result<Supplier> {
        let mut conn = get_connection(&self.pool)?;
        find_supplier(&mut conn, supplier_id).map(Supplier::from)
    }

    async fn create_supplier(&self, new_supplier: NewPartner) -> Result<Supplier> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Supplier> {
                let row: SupplierDB = new_supplier.into();
                let inserted = diesel::insert_into(suppliers::table)
                    .values(&row)
                    .returning(SupplierDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Supplier::from(inserted))
            })
            .await
    }

    async fn update_supplier(
        &self,
        supplier_update: PartnerUpdate,
        stamp: AuditStamp,
    ) -> Result<Supplier> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Supplier> {
                let mut row = find_supplier(conn, &supplier_update.id)?;
                let before = Supplier::from(row.clone());
                row.apply(supplier_update);
                let updated = diesel::update(suppliers::table.find(row.id.clone()))
                    .set(&row)
                    .returning(SupplierDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let after = Supplier::from(updated);
                record_update(conn, AUDIT_ENTITY_SUPPLIER, &after.id, &stamp, &before, &after)?;
                Ok(after)
            })
            .await
    }

    async fn delete_supplier(&self, supplier_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(suppliers::table.find(supplier_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

pub struct OutletRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl OutletRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        OutletRepository { pool, writer }
    }
}

fn find_outlet(conn: &mut SqliteConnection, outlet_id: &str) -> Result<OutletDB> {
    outlets::table
        .find(outlet_id)
        .first::<OutletDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::NotFound(format!("Outlet '{}'", outlet_id)))
}

#[async_trait]
impl OutletRepositoryTrait for OutletRepository {
    fn list_outlets(&self) -> Result<Vec<Outlet>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = outlets::table
            .order(outlets::name.asc())
            .load::<OutletDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Outlet::from).collect())
    }

    fn get_outlet(&self, outlet_id: &str) -> Result<Outlet> {
        let mut conn = get_connection(&self.pool)?;
        find_outlet(&mut conn, outlet_id).map(Outlet::from)
    }

    async fn create_outlet(&self, new_outlet: NewPartner) -> Result<Outlet> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Outlet> {
                let row: OutletDB = new_outlet.into();
                let inserted = diesel::insert_into(outlets::table)
                    .values(&row)
                    .returning(OutletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Outlet::from(inserted))
            })
            .await
    }

    async fn update_outlet(
        &self,
        outlet_update: PartnerUpdate,
        stamp: AuditStamp,
    ) -> Result<Outlet> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Outlet> {
                let mut row = find_outlet(conn, &outlet_update.id)?;
                let before = Outlet::from(row.clone());
                row.apply(outlet_update);
                let updated = diesel::update(outlets::table.find(row.id.clone()))
                    .set(&row)
                    .returning(OutletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let after = Outlet::from(updated);
                record_update(conn, AUDIT_ENTITY_OUTLET, &after.id, &stamp, &before, &after)?;
                Ok(after)
            })
            .await
    }

    async fn delete_outlet(&self, outlet_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(outlets::table.find(outlet_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
