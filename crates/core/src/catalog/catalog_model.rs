//! Catalog domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_UNIT_PRICE;
use crate::errors::{Error, Result, ValidationError};

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::missing_field("name"));
    }
    Ok(())
}

fn require_valid_price(unit_price: Decimal) -> Result<()> {
    if unit_price.is_sign_negative() && !unit_price.is_zero() {
        return Err(Error::Validation(ValidationError::NegativePrice(unit_price)));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(Error::Validation(ValidationError::PriceTooLarge {
            price: unit_price,
            max: MAX_UNIT_PRICE,
        }));
    }
    Ok(())
}

/// Domain model representing an item category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

/// Input model for updating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)
    }
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)
    }
}

/// Domain model representing a stocked item.
///
/// `unit_price` is the current price; stock reports value every month at
/// this price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub id: Option<String>,
    pub category_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub is_active: bool,
}

/// Input model for updating an item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Decimal,
    pub is_active: bool,
}

impl NewItem {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_valid_price(self.unit_price)
    }
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_valid_price(self.unit_price)
    }
}

/// Domain model representing a supplier (source of received stock)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Domain model representing an outlet (destination of issued stock)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a supplier or an outlet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub id: Option<String>,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input model for updating a supplier or an outlet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUpdate {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewPartner {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)
    }
}

impl PartnerUpdate {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_item(name: &str, unit_price: Decimal) -> NewItem {
        NewItem {
            id: None,
            category_id: None,
            name: name.to_string(),
            sku: None,
            unit: Some("pcs".to_string()),
            unit_price,
            is_active: true,
        }
    }

    #[test]
    fn test_item_requires_name() {
        let err = new_item("   ", dec!(10)).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref f)) if f == "name"
        ));
    }

    #[test]
    fn test_item_rejects_negative_price() {
        assert!(new_item("Laptop", dec!(-0.01)).validate().is_err());
        assert!(new_item("Laptop", dec!(0)).validate().is_ok());
        assert!(new_item("Laptop", dec!(1500000)).validate().is_ok());
    }

    #[test]
    fn test_item_price_is_capped() {
        assert_eq!(MAX_UNIT_PRICE, dec!(1000000000000000));
        assert!(new_item("Laptop", MAX_UNIT_PRICE).validate().is_ok());
        assert!(matches!(
            new_item("Laptop", dec!(100000000000000000000)).validate(),
            Err(Error::Validation(ValidationError::PriceTooLarge { .. }))
        ));
    }

    #[test]
    fn test_partner_requires_name() {
        let partner = NewPartner {
            id: None,
            name: String::new(),
            contact_name: None,
            phone: None,
            address: None,
        };
        assert!(partner.validate().is_err());
    }
}
