pub mod delivery_route;
pub mod order_aggregate;
pub mod order_card;
pub mod payment_method;
pub mod payment_note;
pub mod product_line;
