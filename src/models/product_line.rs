use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::utils::{
    coerce::{number_or_zero, to_integer_id, to_text},
    keys::{
        KEYS_NAME, KEYS_PRODUCT_ID, KEYS_QUANTITY, KEYS_SUBTOTAL, KEYS_UNIT_PRICE, resolve_key,
    },
};

/// Canonical order line. Serializes with the camelCase keys the normalizer
/// also reads, so a serialized sequence normalizes back to itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProductLine {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precioUnitario")]
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(rename = "productoId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

impl ProductLine {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            name: resolve_key(raw, KEYS_NAME).map(to_text).unwrap_or_default(),
            quantity: numeric_field(raw, KEYS_QUANTITY),
            unit_price: numeric_field(raw, KEYS_UNIT_PRICE),
            subtotal: numeric_field(raw, KEYS_SUBTOTAL),
            product_id: resolve_key(raw, KEYS_PRODUCT_ID).and_then(to_integer_id),
        }
    }
}

fn numeric_field(raw: &Value, keys: &[&str]) -> f64 {
    resolve_key(raw, keys).map_or(0.0, number_or_zero)
}

/// Normalizes a product payload that may be a JSON array, a JSON-encoded
/// string holding an array, or anything else (no products).
pub fn normalize_products(raw: &Value) -> Vec<ProductLine> {
    match raw {
        Value::String(encoded) => decode_array(encoded)
            .map(|items| items.iter().map(ProductLine::from_raw).collect())
            .unwrap_or_default(),
        Value::Array(items) => items.iter().map(ProductLine::from_raw).collect(),
        _ => Vec::new(),
    }
}

/// Decodes a JSON-encoded array. Decode failures and non-array values are
/// `None`.
pub fn decode_array(encoded: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(encoded) {
        Ok(Value::Array(items)) => Some(items),
        Ok(other) => {
            debug!("Product payload is not an array: {other}");
            None
        }
        Err(err) => {
            debug!("Product payload is not valid JSON: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_uppercase_keys() {
        let lines = normalize_products(&json!([
            {"NOMBRE": "A", "CANTIDAD": "2", "PRECIO": "5", "SUBTOTAL": "10", "PK_ID_PRODUCTO": 1}
        ]));
        assert_eq!(
            lines,
            vec![ProductLine {
                name: "A".to_string(),
                quantity: 2.0,
                unit_price: 5.0,
                subtotal: 10.0,
                product_id: Some(1),
            }]
        );
    }

    #[test]
    fn decodes_json_strings_with_camel_case_keys() {
        let lines = normalize_products(&json!(
            r#"[{"nombre":"B","cantidad":"3","precioUnitario":"2"}]"#
        ));
        assert_eq!(
            lines,
            vec![ProductLine {
                name: "B".to_string(),
                quantity: 3.0,
                unit_price: 2.0,
                subtotal: 0.0,
                product_id: None,
            }]
        );
    }

    #[test]
    fn prefers_unit_price_over_plain_price() {
        let lines = normalize_products(&json!([
            {"NOMBRE": "Z", "CANTIDAD": "1", "PRECIO_UNITARIO": "7", "PRECIO": "99", "subtotal": "9", "PK_ID_PRODUCTO": 5}
        ]));
        assert_eq!(lines[0].unit_price, 7.0);
        assert_eq!(lines[0].subtotal, 9.0);
        assert_eq!(lines[0].product_id, Some(5));
    }

    #[test]
    fn malformed_payloads_yield_no_lines() {
        assert!(normalize_products(&Value::Null).is_empty());
        assert!(normalize_products(&json!("{invalid")).is_empty());
        assert!(normalize_products(&json!(r#"{"a":1}"#)).is_empty());
        assert!(normalize_products(&json!(42)).is_empty());
        assert!(normalize_products(&json!({"NOMBRE": "A"})).is_empty());
    }

    #[test]
    fn missing_keys_default_to_zero_values() {
        let lines = normalize_products(&json!([{}]));
        assert_eq!(lines, vec![ProductLine::default()]);
    }

    #[test]
    fn non_numeric_fields_become_zero() {
        let lines = normalize_products(&json!([{"CANTIDAD": "dos", "PRECIO": {"v": 1}}]));
        assert_eq!(lines[0].quantity, 0.0);
        assert_eq!(lines[0].unit_price, 0.0);
    }

    #[test]
    fn zero_product_id_is_preserved() {
        let lines = normalize_products(&json!([{"productoId": 0}]));
        assert_eq!(lines[0].product_id, Some(0));
    }

    #[test]
    fn non_object_elements_degrade_to_defaults() {
        let lines = normalize_products(&json!([7, null]));
        assert_eq!(lines, vec![ProductLine::default(), ProductLine::default()]);
    }

    #[test]
    fn canonical_lines_renormalize_to_themselves() {
        let lines = vec![
            ProductLine {
                name: "Bandeja paisa".to_string(),
                quantity: 2.0,
                unit_price: 18000.0,
                subtotal: 36000.0,
                product_id: Some(0),
            },
            ProductLine {
                name: "Limonada".to_string(),
                quantity: 1.0,
                unit_price: 4500.5,
                subtotal: 4500.5,
                product_id: None,
            },
        ];
        let native = serde_json::to_value(&lines).unwrap();
        assert_eq!(normalize_products(&native), lines);
    }
}
