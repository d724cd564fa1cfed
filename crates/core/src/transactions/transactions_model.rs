//! Transaction ledger domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_LINE_QUANTITY;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::transactions_constants::*;

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionDirection {
    Receiving,
    Issuing,
    Unknown, // Stored value not recognized; contributes no stock movement
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionDirection::Receiving => DIRECTION_RECEIVING,
            TransactionDirection::Issuing => DIRECTION_ISSUING,
            TransactionDirection::Unknown => DIRECTION_UNKNOWN,
        }
    }

    /// Parses a stored direction, mapping anything unrecognized to `Unknown`.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_else(|e| {
            log::warn!("{}; treating as {}", e, DIRECTION_UNKNOWN);
            TransactionDirection::Unknown
        })
    }
}

impl FromStr for TransactionDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            s if s == DIRECTION_RECEIVING => Ok(TransactionDirection::Receiving),
            s if s == DIRECTION_ISSUING => Ok(TransactionDirection::Issuing),
            s if s == DIRECTION_UNKNOWN => Ok(TransactionDirection::Unknown),
            _ => Err(format!("Unknown transaction direction: {}", s)),
        }
    }
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a stock movement with its item lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub direction: TransactionDirection,
    pub supplier_id: Option<String>,
    pub outlet_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<TransactionItem>,
}

/// One item's quantity within a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    pub item_id: String,
    pub quantity: i64,
}

/// Input model for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub direction: TransactionDirection,
    pub supplier_id: Option<String>,
    pub outlet_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewTransactionItem>,
}

/// Input model for one line of a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionItem {
    pub item_id: String,
    pub quantity: i64,
}

/// Criteria for listing transactions. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub direction: Option<TransactionDirection>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Checks the rules a transaction must satisfy before it is stored.
    ///
    /// Stock levels are not checked: issuing more than is on hand is allowed
    /// and shows up as negative stock in reports.
    pub fn validate(&self) -> Result<()> {
        match self.direction {
            TransactionDirection::Receiving => {
                if self.supplier_id.is_none() {
                    return Err(Error::missing_field("supplierId"));
                }
                if self.outlet_id.is_some() {
                    return Err(Error::invalid_input(
                        "a receiving transaction cannot reference an outlet",
                    ));
                }
            }
            TransactionDirection::Issuing => {
                if self.outlet_id.is_none() {
                    return Err(Error::missing_field("outletId"));
                }
                if self.supplier_id.is_some() {
                    return Err(Error::invalid_input(
                        "an issuing transaction cannot reference a supplier",
                    ));
                }
            }
            TransactionDirection::Unknown => {
                return Err(Error::invalid_input(
                    "transaction direction must be RECEIVING or ISSUING",
                ));
            }
        }

        if self.items.is_empty() {
            return Err(Error::missing_field("items"));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for line in &self.items {
            if line.quantity < 0 {
                return Err(Error::Validation(ValidationError::NegativeQuantity {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                }));
            }
            if line.quantity > MAX_LINE_QUANTITY {
                return Err(Error::Validation(ValidationError::QuantityTooLarge {
                    item_id: line.item_id.clone(),
                    quantity: line.quantity,
                    max: MAX_LINE_QUANTITY,
                }));
            }
            if !seen.insert(line.item_id.as_str()) {
                return Err(Error::Validation(ValidationError::DuplicateItem(
                    line.item_id.clone(),
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receiving(items: Vec<NewTransactionItem>) -> NewTransaction {
        NewTransaction {
            id: None,
            direction: TransactionDirection::Receiving,
            supplier_id: Some("sup-1".to_string()),
            outlet_id: None,
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            reference: Some("PO-001".to_string()),
            notes: None,
            items,
        }
    }

    fn line(item_id: &str, quantity: i64) -> NewTransactionItem {
        NewTransactionItem {
            item_id: item_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_valid_receiving_transaction() {
        assert!(receiving(vec![line("a", 10), line("b", 0)]).validate().is_ok());
    }

    #[test]
    fn test_receiving_requires_supplier() {
        let mut tx = receiving(vec![line("a", 1)]);
        tx.supplier_id = None;
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::MissingField(ref f))) if f == "supplierId"
        ));
    }

    #[test]
    fn test_issuing_requires_outlet_and_no_supplier() {
        let mut tx = receiving(vec![line("a", 1)]);
        tx.direction = TransactionDirection::Issuing;
        assert!(tx.validate().is_err());

        tx.outlet_id = Some("out-1".to_string());
        assert!(tx.validate().is_err());

        tx.supplier_id = None;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let mut tx = receiving(vec![line("a", 1)]);
        tx.direction = TransactionDirection::Unknown;
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_negative_and_duplicate_lines() {
        assert!(receiving(vec![]).validate().is_err());
        assert!(matches!(
            receiving(vec![line("a", -1)]).validate(),
            Err(Error::Validation(ValidationError::NegativeQuantity { quantity: -1, .. }))
        ));
        assert!(matches!(
            receiving(vec![line("a", 1), line("a", 2)]).validate(),
            Err(Error::Validation(ValidationError::DuplicateItem(ref id))) if id == "a"
        ));
    }

    #[test]
    fn test_line_quantity_is_capped() {
        assert!(receiving(vec![line("a", MAX_LINE_QUANTITY)]).validate().is_ok());
        assert!(matches!(
            receiving(vec![line("a", 10_000_000_000_000)]).validate(),
            Err(Error::Validation(ValidationError::QuantityTooLarge { ref item_id, .. }))
                if item_id == "a"
        ));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(
            "RECEIVING".parse::<TransactionDirection>(),
            Ok(TransactionDirection::Receiving)
        );
        assert!("receiving".parse::<TransactionDirection>().is_err());
        assert_eq!(
            TransactionDirection::from_stored("TRANSFER"),
            TransactionDirection::Unknown
        );
        assert_eq!(
            TransactionDirection::from_stored(DIRECTION_ISSUING),
            TransactionDirection::Issuing
        );
    }
}
