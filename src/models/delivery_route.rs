use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::Settings,
    utils::{
        coerce::number_or_zero,
        keys::{KEYS_PRODUCTS, KEYS_TOTAL, resolve_key, resolve_str},
        text::join_name,
    },
};

use super::{
    order_aggregate::compute_total,
    payment_method::{PaymentMethod, default_payment_method},
    payment_note::parse_payment_note,
    product_line::{ProductLine, normalize_products},
};

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
const EMBED_DIRECTIONS_URL: &str = "https://www.google.com/maps/embed/v1/directions";

/// Values the courier screen receives alongside the delivery id.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DeliveryRouteParams {
    pub id: Option<u64>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub observaciones: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRoute {
    pub delivery_id: u64,
    pub order_id: i64,
    pub client_name: String,
    pub address: String,
    pub phone: String,
    pub raw_note: String,
    pub payment_text: String,
    pub observations: String,
    pub suggested_method: Option<PaymentMethod>,
    pub products: Vec<ProductLine>,
    pub total: f64,
    pub directions_url: Option<String>,
    pub embed_url: Option<String>,
}

impl DeliveryRoute {
    pub fn build(settings: &Settings, delivery: &Value, params: &DeliveryRouteParams) -> Self {
        let client = delivery.get("cliente").filter(|c| c.is_object());
        let client_name = client
            .map(|c| join_name(resolve_str(c, &["nombre"]), resolve_str(c, &["apellido"])))
            .unwrap_or_default();

        let order = delivery.get("pedido").unwrap_or(&Value::Null);
        let products = normalize_products(resolve_key(order, KEYS_PRODUCTS).unwrap_or(&Value::Null));
        let total = compute_total(resolve_key(order, KEYS_TOTAL), &products);
        let order_id = resolve_key(order, &["pedidoId"]).map_or(0.0, number_or_zero) as i64;

        let address = or_default(params.direccion.as_deref(), &settings.default_address);
        let phone = or_default(params.telefono.as_deref(), &settings.default_phone);
        let raw_note = or_default(params.observaciones.as_deref(), &settings.default_note);

        let note = parse_payment_note(&raw_note);
        let suggested_method = default_payment_method(&note.method);

        let (directions_url, embed_url) =
            if should_generate_map_link(params.direccion.as_deref(), &address) {
                (
                    Some(directions_url(&settings.restaurant_address, &address)),
                    settings
                        .maps_api_key
                        .as_deref()
                        .map(|key| embed_url(key, &settings.restaurant_address, &address)),
                )
            } else {
                (None, None)
            };

        Self {
            delivery_id: params.id.unwrap_or_default(),
            order_id,
            client_name,
            address,
            phone,
            raw_note,
            payment_text: note.method,
            observations: note.observations,
            suggested_method,
            products,
            total,
            directions_url,
            embed_url,
        }
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Without an address parameter the route always gets map links; with one,
/// only when the resolved address is non-empty.
pub fn should_generate_map_link(address_param: Option<&str>, final_address: &str) -> bool {
    match address_param {
        None => true,
        Some(_) => !final_address.is_empty(),
    }
}

pub fn directions_url(origin: &str, destination: &str) -> String {
    format!(
        "{DIRECTIONS_URL}&origin={}&destination={}",
        urlencoding::encode(origin),
        urlencoding::encode(destination)
    )
}

pub fn embed_url(api_key: &str, origin: &str, destination: &str) -> String {
    format!(
        "{EMBED_DIRECTIONS_URL}?key={api_key}&origin={}&destination={}&mode=driving&avoid=tolls|highways",
        urlencoding::encode(origin),
        urlencoding::encode(destination)
    )
}
