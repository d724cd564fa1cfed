//! Catalog module - categories, items, suppliers and outlets.

mod catalog_model;
mod catalog_service;
mod catalog_traits;


pub use catalog_model::{
    Category, CategoryUpdate, Item, ItemUpdate, NewCategory, NewItem, NewPartner, Outlet,
    PartnerUpdate, Supplier,
};
pub use catalog_service::CatalogService;
pub use catalog_traits::{
    CatalogServiceTrait, CategoryRepositoryTrait, ItemRepositoryTrait, OutletRepositoryTrait,
    SupplierRepositoryTrait,
};
