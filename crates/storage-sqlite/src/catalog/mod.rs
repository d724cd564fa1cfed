//! SQLite storage implementation for the catalog.

mod category_repository;
mod item_repository;
mod model;
mod partner_repository;

pub use category_repository::CategoryRepository;
pub use item_repository::ItemRepository;
pub use model::{CategoryDB, ItemDB, OutletDB, SupplierDB};
pub use partner_repository::{OutletRepository, SupplierRepository};
