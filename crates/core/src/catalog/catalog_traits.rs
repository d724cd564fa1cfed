use crate::audit::AuditStamp;
use crate::auth::AuthContext;
use crate::catalog::catalog_model::{
    Category, CategoryUpdate, Item, ItemUpdate, NewCategory, NewItem, NewPartner, Outlet,
    PartnerUpdate, Supplier,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations.
///
/// `update_*` methods on every catalog repository write the row and one audit
/// entry per changed field in a single transaction: either both land or
/// neither does.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, category_id: &str) -> Result<Category>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(
        &self,
        category_update: CategoryUpdate,
        stamp: AuditStamp,
    ) -> Result<Category>;
    async fn delete_category(&self, category_id: String) -> Result<usize>;
}

/// Trait for item repository operations
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    fn list_items(&self) -> Result<Vec<Item>>;
    fn get_item(&self, item_id: &str) -> Result<Item>;
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;
    async fn update_item(&self, item_update: ItemUpdate, stamp: AuditStamp) -> Result<Item>;
    async fn delete_item(&self, item_id: String) -> Result<usize>;
}

/// Trait for supplier repository operations
#[async_trait]
pub trait SupplierRepositoryTrait: Send + Sync {
    fn list_suppliers(&self) -> Result<Vec<Supplier>>;
    fn get_supplier(&self, supplier_id: &str) -> Result<Supplier>;
    async fn create_supplier(&self, new_supplier: NewPartner) -> Result<Supplier>;
    async fn update_supplier(
        &self,
        supplier_update: PartnerUpdate,
        stamp: AuditStamp,
    ) -> Result<Supplier>;
    async fn delete_supplier(&self, supplier_id: String) -> Result<usize>;
}

/// Trait for outlet repository operations
#[async_trait]
pub trait OutletRepositoryTrait: Send + Sync {
    fn list_outlets(&self) -> Result<Vec<Outlet>>;
    fn get_outlet(&self, outlet_id: &str) -> Result<Outlet>;
    async fn create_outlet(&self, new_outlet: NewPartner) -> Result<Outlet>;
    async fn update_outlet(
        &self,
        outlet_update: PartnerUpdate,
        stamp: AuditStamp,
    ) -> Result<Outlet>;
    async fn delete_outlet(&self, outlet_id: String) -> Result<usize>;
}

/// Trait for catalog service operations.
///
/// Every call takes the caller's `AuthContext`; reads need
/// `ViewCatalog`, writes need `ManageCatalog`.
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    fn get_categories(&self, ctx: &AuthContext) -> Result<Vec<Category>>;
    fn get_category(&self, ctx: &AuthContext, category_id: &str) -> Result<Category>;
    async fn create_category(&self, ctx: &AuthContext, new_category: NewCategory)
        -> Result<Category>;
    async fn update_category(
        &self,
        ctx: &AuthContext,
        category_update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, ctx: &AuthContext, category_id: String) -> Result<usize>;

    fn get_items(&self, ctx: &AuthContext) -> Result<Vec<Item>>;
    fn get_item(&self, ctx: &AuthContext, item_id: &str) -> Result<Item>;
    async fn create_item(&self, ctx: &AuthContext, new_item: NewItem) -> Result<Item>;
    async fn update_item(&self, ctx: &AuthContext, item_update: ItemUpdate) -> Result<Item>;
    async fn delete_item(&self, ctx: &AuthContext, item_id: String) -> Result<usize>;

    fn get_suppliers(&self, ctx: &AuthContext) -> Result<Vec<Supplier>>;
    fn get_supplier(&self, ctx: &AuthContext, supplier_id: &str) -> Result<Supplier>;
    async fn create_supplier(&self, ctx: &AuthContext, new_supplier: NewPartner)
        -> Result<Supplier>;
    async fn update_supplier(
        &self,
        ctx: &AuthContext,
        supplier_update: PartnerUpdate,
    ) -> Result<Supplier>;
    async fn delete_supplier(&self, ctx: &AuthContext, supplier_id: String) -> Result<usize>;

    fn get_outlets(&self, ctx: &AuthContext) -> Result<Vec<Outlet>>;
    fn get_outlet(&self, ctx: &AuthContext, outlet_id: &str) -> Result<Outlet>;
    async fn create_outlet(&self, ctx: &AuthContext, new_outlet: NewPartner) -> Result<Outlet>;
    async fn update_outlet(&self, ctx: &AuthContext, outlet_update: PartnerUpdate)
        -> Result<Outlet>;
    async fn delete_outlet(&self, ctx: &AuthContext, outlet_id: String) -> Result<usize>;
}
