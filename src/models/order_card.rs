use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::utils::{
    date::order_timestamp,
    keys::{KEYS_PAYMENT_METHOD, KEYS_PRODUCTS, resolve_key, resolve_str},
    price::sum_line_amounts,
    text::non_blank,
};

/// List-view summary of one order: the base order merged with whatever its
/// detail payload could provide.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCard {
    #[serde(flatten)]
    pub base: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productos: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl OrderCard {
    pub fn merge(order: &Value, detail: Option<&Value>) -> Self {
        let mut base = order.as_object().cloned().unwrap_or_default();
        let base_delivery = base.remove("delivery").and_then(|v| v.as_bool());
        for key in ["paymentMethod", "productos", "total", "items"] {
            base.remove(key);
        }

        let Some(detail) = detail.filter(|d| !d.is_null()) else {
            return Self {
                base,
                delivery: base_delivery,
                payment_method: None,
                productos: None,
                total: None,
                items: None,
            };
        };

        let productos = detail_lines(detail);

        Self {
            base,
            delivery: resolve_key(detail, &["delivery"])
                .and_then(Value::as_bool)
                .or(base_delivery),
            payment_method: non_blank(resolve_str(detail, KEYS_PAYMENT_METHOD))
                .map(str::to_string),
            total: productos.as_deref().map(sum_line_amounts),
            items: productos.as_ref().map(Vec::len),
            productos,
        }
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        order_timestamp(
            self.base.get("fechaPedido").and_then(Value::as_str),
            self.base.get("horaPedido").and_then(Value::as_str),
        )
    }
}

/// Raw lines of a detail payload. A missing payload is an empty list; an
/// encoded payload that fails to decode is unknown.
fn detail_lines(detail: &Value) -> Option<Vec<Value>> {
    match resolve_key(detail, KEYS_PRODUCTS) {
        None => Some(Vec::new()),
        Some(Value::String(encoded)) if encoded.is_empty() => Some(Vec::new()),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => Some(items),
            Ok(_) => Some(Vec::new()),
            Err(err) => {
                debug!("Order detail products are not valid JSON: {err}");
                None
            }
        },
        Some(Value::Array(items)) => Some(items.clone()),
        Some(_) => Some(Vec::new()),
    }
}

/// Sorts cards newest first by order date and time. Ties keep their input
/// order.
pub fn sort_newest_first(cards: &mut [OrderCard]) {
    cards.sort_by_key(|card| std::cmp::Reverse(card.placed_at()));
}
