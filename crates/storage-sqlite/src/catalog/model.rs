//! Database models for the catalog.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::{parse_decimal, parse_timestamp};
use stockroom_core::catalog::{
    Category, CategoryUpdate, Item, ItemUpdate, NewCategory, NewItem, NewPartner, Outlet,
    PartnerUpdate, Supplier,
};

fn id_or_new(id: Option<String>) -> String {
    id.filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Database model for categories
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            name: db.name,
            description: db.description,
        }
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: id_or_new(domain.id),
            name: domain.name.trim().to_string(),
            description: domain.description,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl CategoryDB {
    pub fn apply(&mut self, update: CategoryUpdate) {
        self.name = update.name.trim().to_string();
        self.description = update.description;
        self.updated_at = Utc::now().to_rfc3339();
    }
}

/// Database model for items
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
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct ItemDB {
    pub id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub unit: Option<String>,
    pub unit_price: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ItemDB> for Item {
    fn from(db: ItemDB) -> Self {
        Self {
            unit_price: parse_decimal(&db.unit_price, "unit_price"),
            created_at: parse_timestamp(&db.created_at, "created_at"),
            updated_at: parse_timestamp(&db.updated_at, "updated_at"),
            id: db.id,
            category_id: db.category_id,
            name: db.name,
            sku: db.sku,
            unit: db.unit,
            is_active: db.is_active,
        }
    }
}

impl From<NewItem> for ItemDB {
    fn from(domain: NewItem) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: id_or_new(domain.id),
            category_id: domain.category_id,
            name: domain.name.trim().to_string(),
            sku: domain.sku,
            unit: domain.unit,
            unit_price: domain.unit_price.normalize().to_string(),
            is_active: domain.is_active,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl ItemDB {
    pub fn apply(&mut self, update: ItemUpdate) {
        self.category_id = update.category_id;
        self.name = update.name.trim().to_string();
        self.sku = update.sku;
        self.unit = update.unit;
        self.unit_price = update.unit_price.normalize().to_string();
        self.is_active = update.is_active;
        self.updated_at = Utc::now().to_rfc3339();
    }
}

/// Database model for suppliers
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
#[diesel(table_name = crate::schema::suppliers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDB {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for outlets
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
#[diesel(table_name = crate::schema::outlets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct OutletDB {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// Suppliers and outlets share one shape; this keeps their conversions in step.
macro_rules! partner_conversions {
    ($db:ident, $domain:ident) => {
        impl From<$db> for $domain {
            fn from(db: $db) -> Self {
                Self {
                    created_at: parse_timestamp(&db.created_at, "created_at"),
                    updated_at: parse_timestamp(&db.updated_at, "updated_at"),
                    id: db.id,
                    name: db.name,
                    contact_name: db.contact_name,
                    phone: db.phone,
                    address: db.address,
                }
            }
        }

        impl From<NewPartner> for $db {
            fn from(domain: NewPartner) -> Self {
                let now = Utc::now().to_rfc3339();
                Self {
                    id: id_or_new(domain.id),
                    name: domain.name.trim().to_string(),
                    contact_name: domain.contact_name,
                    phone: domain.phone,
                    address: domain.address,
                    created_at: now.clone(),
                    updated_at: now,
                }
            }
        }

        impl $db {
            pub fn apply(&mut self, update: PartnerUpdate) {
                self.name = update.name.trim().to_string();
                self.contact_name = update.contact_name;
                self.phone = update.phone;
                self.address = update.address;
                self.updated_at = Utc::now().to_rfc3339();
            }
        }
    };
}

partner_conversions!(SupplierDB, Supplier);
partner_conversions!(OutletDB, Outlet);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_item_gets_generated_id_and_price_text() {
        let db: ItemDB = NewItem {
            id: None,
            category_id: None,
            name: "  Laptop ".to_string(),
            sku: Some("LT-01".to_string()),
            unit: None,
            unit_price: dec!(1500000.00),
            is_active: true,
        }
        .into();

        assert!(Uuid::parse_str(&db.id).is_ok());
        assert_eq!(db.name, "Laptop");
        assert_eq!(db.unit_price, "1500000");
        assert_eq!(db.created_at, db.updated_at);

        let item = Item::from(db);
        assert_eq!(item.unit_price, dec!(1500000));
    }

    #[test]
    fn test_partner_update_clears_optional_fields() {
        let mut db: SupplierDB = NewPartner {
            id: Some("sup-1".to_string()),
            name: "Acme".to_string(),
            contact_name: Some("Rina".to_string()),
            phone: Some("555".to_string()),
            address: None,
        }
        .into();

        db.apply(PartnerUpdate {
            id: "sup-1".to_string(),
            name: "Acme Ltd".to_string(),
            contact_name: None,
            phone: Some("556".to_string()),
            address: None,
        });

        let supplier = Supplier::from(db);
        assert_eq!(supplier.id, "sup-1");
        assert_eq!(supplier.name, "Acme Ltd");
        assert_eq!(supplier.contact_name, None);
        assert_eq!(supplier.phone.as_deref(), Some("556"));
    }
}
