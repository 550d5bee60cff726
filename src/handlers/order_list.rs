use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::models::order_card::{OrderCard, sort_newest_first};

use super::{CommandError, to_json_output};

/// One entry of the order list input: a base order and its detail payload,
/// `null` when the detail request failed.
#[derive(Debug, Deserialize)]
pub struct OrderListEntry {
    pub order: Value,
    #[serde(default)]
    pub detail: Option<Value>,
}

pub fn handle_order_list(input: Value) -> Result<String, CommandError> {
    let entries: Vec<OrderListEntry> = serde_json::from_value(input)?;

    let mut cards: Vec<OrderCard> = entries
        .iter()
        .map(|entry| OrderCard::merge(&entry.order, entry.detail.as_ref()))
        .collect();
    sort_newest_first(&mut cards);

    info!("Order list built: {} cards", cards.len());

    to_json_output(&cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_sorted_cards() {
        let input = json!([
            {"order": {"pedidoId": 1, "fechaPedido": "01-01-2024"}, "detail": null},
            {"order": {"pedidoId": 2, "fechaPedido": "02-01-2024"}, "detail": {"productos": "[{\"SUBTOTAL\": 5}]"}}
        ]);
        let output = handle_order_list(input).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["pedidoId"], json!(2));
        assert_eq!(value[0]["total"], json!(5.0));
        assert_eq!(value[0]["items"], json!(1));
        assert!(value[1].get("total").is_none());
    }

    #[test]
    fn rejects_entries_without_order() {
        assert!(matches!(
            handle_order_list(json!([{"detail": {}}])),
            Err(CommandError::ParseInput(_))
        ));
    }
}
