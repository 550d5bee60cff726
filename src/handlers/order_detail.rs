use serde_json::Value;
use tracing::info;

use crate::models::order_aggregate::OrderAggregate;

use super::{CommandError, to_json_output};

pub fn handle_order_detail(detail: &Value) -> Result<String, CommandError> {
    if !detail.is_object() {
        return Err(CommandError::InputShape(
            "order detail must be a JSON object".to_string(),
        ));
    }

    let aggregate = OrderAggregate::from_detail(detail);

    info!(
        "Order detail aggregated: {} lines, total {}",
        aggregate.item_count, aggregate.total
    );

    to_json_output(&aggregate)
}
