use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::audit::audit_model::FieldChange;
use crate::constants::AUDIT_IGNORED_FIELDS;
use crate::errors::{Error, Result};

/// Compares two snapshots of the same entity field by field.
///
/// Both values must serialize to JSON objects. Only top-level fields are
/// compared; nested values are compared whole and rendered as JSON text.
/// Changes come back sorted by field name.
pub fn diff_fields<T: Serialize>(before: &T, after: &T) -> Result<Vec<FieldChange>> {
    let before = serde_json::to_value(before)?;
    let after = serde_json::to_value(after)?;

    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return Err(Error::invalid_input(
            "audit snapshots must serialize to JSON objects",
        ));
    };

    let fields: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    let changes = fields
        .into_iter()
        .filter(|field| !AUDIT_IGNORED_FIELDS.contains(&field.as_str()))
        .filter_map(|field| {
            let old = before.get(field).unwrap_or(&Value::Null);
            let new = after.get(field).unwrap_or(&Value::Null);
            (old != new).then(|| FieldChange {
                field: field.clone(),
                old_value: render(old),
                new_value: render(new),
            })
        })
        .collect();

    Ok(changes)
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Snapshot {
        name: String,
        unit_price: f64,
        description: Option<String>,
        updated_at: String,
    }

    fn snapshot(name: &str, price: f64, description: Option<&str>, updated_at: &str) -> Snapshot {
        Snapshot {
            name: name.to_string(),
            unit_price: price,
            description: description.map(str::to_string),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_changes() {
        let a = snapshot("Laptop", 1500.0, None, "t1");
        let b = snapshot("Laptop", 1500.0, None, "t1");
        assert!(diff_fields(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_timestamps_are_ignored() {
        let a = snapshot("Laptop", 1500.0, None, "t1");
        let b = snapshot("Laptop", 1500.0, None, "t2");
        assert!(diff_fields(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_changed_fields_sorted_by_name() {
        let a = snapshot("Laptop", 1500.0, None, "t1");
        let b = snapshot("Notebook", 1750.5, Some("14 inch"), "t2");
        let changes = diff_fields(&a, &b).unwrap();

        assert_eq!(
            changes,
            vec![
                FieldChange {
                    field: "description".to_string(),
                    old_value: None,
                    new_value: Some("14 inch".to_string()),
                },
                FieldChange {
                    field: "name".to_string(),
                    old_value: Some("Laptop".to_string()),
                    new_value: Some("Notebook".to_string()),
                },
                FieldChange {
                    field: "unitPrice".to_string(),
                    old_value: Some("1500.0".to_string()),
                    new_value: Some("1750.5".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_non_object_snapshots_are_rejected() {
        assert!(diff_fields(&1, &2).is_err());
    }
}
