pub mod config;
pub mod handlers;
pub mod models;
pub mod utils;

pub use models::{
    delivery_route::{DeliveryRoute, DeliveryRouteParams, should_generate_map_link},
    order_aggregate::{OrderAggregate, compute_total},
    order_card::{OrderCard, sort_newest_first},
    payment_method::{PaymentMethod, default_payment_method},
    payment_note::{ParsedNote, parse_payment_note},
    product_line::{ProductLine, normalize_products},
};
pub use utils::date::format_date;
