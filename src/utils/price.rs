use serde_json::Value;

use super::{
    coerce::to_number,
    keys::{KEYS_QUANTITY, KEYS_SUBTOTAL, resolve_key},
};

const KEYS_LINE_PRICE: &[&str] = &["PRECIO_UNITARIO", "precio"];

/// Amount a raw line contributes to an order card: its subtotal when
/// numeric, otherwise unit price times quantity (quantity defaults to one).
pub fn line_amount(line: &Value) -> f64 {
    if let Some(subtotal) = resolve_key(line, KEYS_SUBTOTAL).and_then(to_number) {
        return subtotal;
    }

    let unit_price = resolve_key(line, KEYS_LINE_PRICE).map_or(Some(0.0), to_number);
    let quantity = resolve_key(line, KEYS_QUANTITY).map_or(Some(1.0), to_number);

    match (unit_price, quantity) {
        (Some(price), Some(count)) => calculate_total_price(price, count),
        _ => 0.0,
    }
}

pub fn calculate_total_price(unit_price: f64, quantity: f64) -> f64 {
    let total = unit_price * quantity;
    if total.is_nan() { 0.0 } else { total }
}

pub fn sum_subtotals<'a>(subtotals: impl IntoIterator<Item = &'a f64>) -> f64 {
    subtotals
        .into_iter()
        .map(|s| if s.is_nan() { 0.0 } else { *s })
        .sum()
}

pub fn sum_line_amounts(lines: &[Value]) -> f64 {
    lines.iter().map(line_amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subtotal_is_preferred() {
        let line = json!({"SUBTOTAL": "12", "PRECIO_UNITARIO": 5, "CANTIDAD": 3});
        assert_eq!(line_amount(&line), 12.0);
    }

    #[test]
    fn falls_back_to_price_times_quantity() {
        let line = json!({"PRECIO_UNITARIO": "5", "CANTIDAD": 3});
        assert_eq!(line_amount(&line), 15.0);

        let lowercase = json!({"precio": 4, "cantidad": "2"});
        assert_eq!(line_amount(&lowercase), 8.0);
    }

    #[test]
    fn detail_only_price_keys_are_not_read() {
        assert_eq!(line_amount(&json!({"PRECIO": 9000, "CANTIDAD": 2})), 0.0);
        assert_eq!(line_amount(&json!({"precioUnitario": 9000})), 0.0);
        assert_eq!(
            line_amount(&json!({"PRECIO": 9000, "precio": 3000, "CANTIDAD": 2})),
            6000.0
        );
    }

    #[test]
    fn non_numeric_subtotal_uses_fallback() {
        let line = json!({"subtotal": "n/a", "precio": 2, "cantidad": 2});
        assert_eq!(line_amount(&line), 4.0);
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(line_amount(&json!({"precio": 7})), 7.0);
        assert_eq!(line_amount(&json!({})), 0.0);
    }

    #[test]
    fn invalid_price_contributes_nothing() {
        assert_eq!(line_amount(&json!({"precio": "abc", "cantidad": 2})), 0.0);
    }

    #[test]
    fn sums_line_amounts() {
        let lines = vec![json!({"SUBTOTAL": 10}), json!({"precio": 2, "cantidad": 3})];
        assert_eq!(sum_line_amounts(&lines), 16.0);
    }
}
