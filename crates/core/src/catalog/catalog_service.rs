use crate::audit::AuditStamp;
use crate::auth::{AuthContext, Permission};
use crate::catalog::catalog_model::{
    Category, CategoryUpdate, Item, ItemUpdate, NewCategory, NewItem, NewPartner, Outlet,
    PartnerUpdate, Supplier,
};
use crate::catalog::catalog_traits::{
    CatalogServiceTrait, CategoryRepositoryTrait, ItemRepositoryTrait, OutletRepositoryTrait,
    SupplierRepositoryTrait,
};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CatalogService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    item_repo: Arc<dyn ItemRepositoryTrait>,
    supplier_repo: Arc<dyn SupplierRepositoryTrait>,
    outlet_repo: Arc<dyn OutletRepositoryTrait>,
}

impl CatalogService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        item_repo: Arc<dyn ItemRepositoryTrait>,
        supplier_repo: Arc<dyn SupplierRepositoryTrait>,
        outlet_repo: Arc<dyn OutletRepositoryTrait>,
    ) -> Self {
        Self {
            category_repo,
            item_repo,
            supplier_repo,
            outlet_repo,
        }
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    fn get_categories(&self, ctx: &AuthContext) -> Result<Vec<Category>> {
        ctx.require(Permission::ViewCatalog)?;
        self.category_repo.list_categories()
    }

    fn get_category(&self, ctx: &AuthContext, category_id: &str) -> Result<Category> {
        ctx.require(Permission::ViewCatalog)?;
        self.category_repo.get_category(category_id)
    }

    async fn create_category(
        &self,
        ctx: &AuthContext,
        new_category: NewCategory,
    ) -> Result<Category> {
        ctx.require(Permission::ManageCatalog)?;
        new_category.validate()?;
        self.category_repo.create_category(new_category).await
    }

    async fn update_category(
        &self,
        ctx: &AuthContext,
        category_update: CategoryUpdate,
    ) -> Result<Category> {
        ctx.require(Permission::ManageCatalog)?;
        category_update.validate()?;
        self.category_repo
            .update_category(category_update, AuditStamp::now(&ctx.user_id))
            .await
    }

    async fn delete_category(&self, ctx: &AuthContext, category_id: String) -> Result<usize> {
        ctx.require(Permission::ManageCatalog)?;
        self.category_repo.delete_category(category_id).await
    }

    fn get_items(&self, ctx: &AuthContext) -> Result<Vec<Item>> {
        ctx.require(Permission::ViewCatalog)?;
        self.item_repo.list_items()
    }

    fn get_item(&self, ctx: &AuthContext, item_id: &str) -> Result<Item> {
        ctx.require(Permission::ViewCatalog)?;
        self.item_repo.get_item(item_id)
    }

    async fn create_item(&self, ctx: &AuthContext, new_item: NewItem) -> Result<Item> {
        ctx.require(Permission::ManageCatalog)?;
        new_item.validate()?;
        self.item_repo.create_item(new_item).await
    }

    async fn update_item(&self, ctx: &AuthContext, item_update: ItemUpdate) -> Result<Item> {
        ctx.require(Permission::ManageCatalog)?;
        item_update.validate()?;
        self.item_repo
            .update_item(item_update, AuditStamp::now(&ctx.user_id))
            .await
    }

    async fn delete_item(&self, ctx: &AuthContext, item_id: String) -> Result<usize> {
        ctx.require(Permission::ManageCatalog)?;
        self.item_repo.delete_item(item_id).await
    }

    fn get_suppliers(&self, ctx: &AuthContext) -> Result<Vec<Supplier>> {
        ctx.require(Permission::ViewCatalog)?;
        self.supplier_repo.list_suppliers()
    }

    fn get_supplier(&self, ctx: &AuthContext, supplier_id: &str) -> Result<Supplier> {
        ctx.require(Permission::ViewCatalog)?;
        self.supplier_repo.get_supplier(supplier_id)
    }

    async fn create_supplier(
        &self,
        ctx: &AuthContext,
        new_supplier: NewPartner,
    ) -> Result<Supplier> {
        ctx.require(Permission::ManageCatalog)?;
        new_supplier.validate()?;
        self.supplier_repo.create_supplier(new_supplier).await
    }

    async fn update_supplier(
        &self,
        ctx: &AuthContext,
        supplier_update: PartnerUpdate,
    ) -> Result<Supplier> {
        ctx.require(Permission::ManageCatalog)?;
        supplier_update.validate()?;
        self.supplier_repo
            .update_supplier(supplier_update, AuditStamp::now(&ctx.user_id))
            .await
    }

    async fn delete_supplier(&self, ctx: &AuthContext, supplier_id: String) -> Result<usize> {
        ctx.require(Permission::ManageCatalog)?;
        self.supplier_repo.delete_supplier(supplier_id).await
    }

    fn get_outlets(&self, ctx: &AuthContext) -> Result<Vec<Outlet>> {
        ctx.require(Permission::ViewCatalog)?;
        self.outlet_repo.list_outlets()
    }

    fn get_outlet(&self, ctx: &AuthContext, outlet_id: &str) -> Result<Outlet> {
        ctx.require(Permission::ViewCatalog)?;
        self.outlet_repo.get_outlet(outlet_id)
    }

    async fn create_outlet(&self, ctx: &AuthContext, new_outlet: NewPartner) -> Result<Outlet> {
        ctx.require(Permission::ManageCatalog)?;
        new_outlet.validate()?;
        self.outlet_repo.create_outlet(new_outlet).await
    }

    async fn update_outlet(
        &self,
        ctx: &AuthContext,
        outlet_update: PartnerUpdate,
    ) -> Result<Outlet> {
        ctx.require(Permission::ManageCatalog)?;
        outlet_update.validate()?;
        self.outlet_repo
            .update_outlet(outlet_update, AuditStamp::now(&ctx.user_id))
            .await
    }

    async fn delete_outlet(&self, ctx: &AuthContext, outlet_id: String) -> Result<usize> {
        ctx.require(Permission::ManageCatalog)?;
        self.outlet_repo.delete_outlet(outlet_id).await
    }
}
