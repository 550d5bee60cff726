use serde_json::Value;
use tracing::info;

use crate::{
    config::Settings,
    models::delivery_route::{DeliveryRoute, DeliveryRouteParams},
};

use super::{CommandError, to_json_output};

pub fn handle_delivery_route(
    settings: &Settings,
    delivery: &Value,
    params: &DeliveryRouteParams,
) -> Result<String, CommandError> {
    if !delivery.is_object() && !delivery.is_null() {
        return Err(CommandError::InputShape(
            "delivery payload must be a JSON object".to_string(),
        ));
    }

    let route = DeliveryRoute::build(settings, delivery, params);

    info!(
        "Delivery route built for delivery {} (order {})",
        route.delivery_id, route.order_id
    );

    to_json_output(&route)
}
