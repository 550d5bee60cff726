use serde_json::Value;

pub const KEYS_NAME: &[&str] = &["NOMBRE", "nombre"];
pub const KEYS_QUANTITY: &[&str] = &["CANTIDAD", "cantidad"];
pub const KEYS_UNIT_PRICE: &[&str] = &["PRECIO_UNITARIO", "precioUnitario", "PRECIO"];
pub const KEYS_SUBTOTAL: &[&str] = &["SUBTOTAL", "subtotal"];
pub const KEYS_PRODUCT_ID: &[&str] = &["PK_ID_PRODUCTO", "productoId"];

pub const KEYS_PRODUCTS: &[&str] = &["productos", "PRODUCTOS"];
pub const KEYS_TOTAL: &[&str] = &["total", "TOTAL"];
pub const KEYS_PAYMENT_METHOD: &[&str] = &["metodoPago", "METODO_PAGO"];
pub const KEYS_NOTE: &[&str] = &["observaciones", "OBSERVACIONES"];

/// Returns the value of the first key in `keys` that is present and not
/// `null`. Non-object records resolve nothing.
pub fn resolve_key<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = record.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

pub fn resolve_str<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    resolve_key(record, keys).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_key_wins() {
        let record = json!({"precioUnitario": 3, "PRECIO": 9});
        assert_eq!(resolve_key(&record, KEYS_UNIT_PRICE), Some(&json!(3)));
    }

    #[test]
    fn null_counts_as_absent() {
        let record = json!({"CANTIDAD": null, "cantidad": 2});
        assert_eq!(resolve_key(&record, KEYS_QUANTITY), Some(&json!(2)));
    }

    #[test]
    fn zero_is_present() {
        let record = json!({"PK_ID_PRODUCTO": 0, "productoId": 5});
        assert_eq!(resolve_key(&record, KEYS_PRODUCT_ID), Some(&json!(0)));
    }

    #[test]
    fn non_objects_resolve_nothing() {
        assert_eq!(resolve_key(&json!(4), KEYS_NAME), None);
        assert_eq!(resolve_key(&json!(["NOMBRE"]), KEYS_NAME), None);
    }
}
