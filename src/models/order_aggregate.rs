use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::utils::{
    coerce::to_number,
    keys::{KEYS_NOTE, KEYS_PAYMENT_METHOD, KEYS_PRODUCTS, KEYS_TOTAL, resolve_key, resolve_str},
    price::sum_subtotals,
    text::non_blank,
};

use super::{
    payment_note::parse_payment_note,
    product_line::{ProductLine, normalize_products},
};

const MERGED_KEYS: &[&str] = &["paymentMethod", "products", "total", "itemCount"];

/// Order detail payload merged with its normalized lines and totals. The
/// remaining payload fields are kept verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    #[serde(flatten)]
    pub base: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub products: Vec<ProductLine>,
    pub total: f64,
    pub item_count: usize,
}

impl OrderAggregate {
    pub fn from_detail(detail: &Value) -> Self {
        let mut base = detail.as_object().cloned().unwrap_or_default();
        for key in KEYS_PRODUCTS.iter().chain(KEYS_TOTAL).chain(MERGED_KEYS) {
            base.remove(*key);
        }

        let products = normalize_products(resolve_key(detail, KEYS_PRODUCTS).unwrap_or(&Value::Null));
        let total = compute_total(resolve_key(detail, KEYS_TOTAL), &products);

        Self {
            base,
            payment_method: resolve_payment_method(detail),
            item_count: products.len(),
            products,
            total,
        }
    }
}

/// Structured payment method when present, otherwise the one written in the
/// order note.
fn resolve_payment_method(detail: &Value) -> Option<String> {
    if let Some(method) = non_blank(resolve_str(detail, KEYS_PAYMENT_METHOD)) {
        return Some(method.trim().to_string());
    }

    let note = resolve_str(detail, KEYS_NOTE)?;
    let parsed = parse_payment_note(note);
    if parsed.method.is_empty() {
        None
    } else {
        debug!("Payment method taken from order note: {}", parsed.method);
        Some(parsed.method)
    }
}

/// Order total: the explicit total when it is a valid number (including
/// `0`), otherwise the sum of line subtotals.
pub fn compute_total(total_raw: Option<&Value>, products: &[ProductLine]) -> f64 {
    let provided = total_raw
        .filter(|raw| !raw.is_null())
        .and_then(to_number);

    match provided {
        Some(total) => total,
        None => sum_subtotals(products.iter().map(|p| &p.subtotal)),
    }
}
