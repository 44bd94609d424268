//! Declarative field renaming between flat schemas.
//!
//! The remote card and address schemas differ from the normalized
//! vocabulary only in field names. Rather than hand-written per-field
//! assignment, each translation is an ordered table of
//! `(source, destination)` pairs applied by [`map_fields`], keeping the
//! schemas testable in isolation.

use serde_json::{Map, Value};

/// Ordered `(source, destination)` rename pairs.
pub type FieldSchema = &'static [(&'static str, &'static str)];

/// Renames from the normalized instrument vocabulary to the remote
/// credit-card schema.
pub const CARD_SCHEMA: FieldSchema = &[
    ("number", "number"),
    ("expiration_month", "expire_month"),
    ("expiration_year", "expire_year"),
    ("cvv", "cvv2"),
    ("billing_first_name", "first_name"),
    ("billing_last_name", "last_name"),
];

/// Renames from the prospect's billing-prefixed fields to the remote
/// billing-address schema.
pub const BILLING_ADDRESS_SCHEMA: FieldSchema = &[
    ("billing_phone", "phone"),
    ("billing_address1", "line1"),
    ("billing_address2", "line2"),
    ("billing_city", "city"),
    ("billing_state", "state"),
    ("billing_postal_code", "postal_code"),
    ("billing_country", "country_code"),
];

/// Projects `source` through a rename schema.
///
/// Only keys named by the schema appear in the output; source fields
/// that are absent or null are left out entirely rather than defaulted.
#[must_use]
pub fn map_fields(source: &Map<String, Value>, schema: FieldSchema) -> Map<String, Value> {
    let mut mapped = Map::new();
    for (from, to) in schema {
        if let Some(value) = source.get(*from) {
            if !value.is_null() {
                mapped.insert((*to).to_owned(), value.clone());
            }
        }
    }
    mapped
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn as_map(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            unreachable!("test fixture is an object");
        };
        map
    }

    #[test]
    fn test_map_fields_renames_keys() {
        let source = as_map(json!({
            "expiration_month": "08",
            "expiration_year": "2030",
        }));
        let mapped = map_fields(&source, CARD_SCHEMA);
        assert_eq!(mapped.get("expire_month"), Some(&json!("08")));
        assert_eq!(mapped.get("expire_year"), Some(&json!("2030")));
        assert!(!mapped.contains_key("expiration_month"));
    }

    #[test]
    fn test_map_fields_omits_absent_sources() {
        let source = as_map(json!({"billing_city": "Lyon"}));
        let mapped = map_fields(&source, BILLING_ADDRESS_SCHEMA);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get("city"), Some(&json!("Lyon")));
        assert!(!mapped.contains_key("line1"));
    }

    #[test]
    fn test_map_fields_omits_null_sources() {
        let source = as_map(json!({"billing_city": null, "billing_state": "NY"}));
        let mapped = map_fields(&source, BILLING_ADDRESS_SCHEMA);
        assert!(!mapped.contains_key("city"));
        assert_eq!(mapped.get("state"), Some(&json!("NY")));
    }

    #[test]
    fn test_map_fields_drops_unmapped_keys() {
        let source = as_map(json!({
            "number": "4111111111111111",
            "shipping_city": "Nice",
        }));
        let mapped = map_fields(&source, CARD_SCHEMA);
        assert_eq!(mapped.len(), 1);
        assert!(mapped.contains_key("number"));
        assert!(!mapped.contains_key("shipping_city"));
    }

    #[test]
    fn test_map_fields_empty_source() {
        let mapped = map_fields(&Map::new(), BILLING_ADDRESS_SCHEMA);
        assert!(mapped.is_empty());
    }

    #[test]
    fn test_card_schema_covers_remote_vocabulary() {
        let destinations: Vec<&str> = CARD_SCHEMA.iter().map(|(_, to)| *to).collect();
        assert_eq!(
            destinations,
            vec!["number", "expire_month", "expire_year", "cvv2", "first_name", "last_name"]
        );
    }

    #[test]
    fn test_billing_address_schema_covers_remote_vocabulary() {
        let destinations: Vec<&str> = BILLING_ADDRESS_SCHEMA.iter().map(|(_, to)| *to).collect();
        assert_eq!(
            destinations,
            vec!["phone", "line1", "line2", "city", "state", "postal_code", "country_code"]
        );
    }
}
