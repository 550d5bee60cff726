pub mod coerce;
pub mod date;
pub mod keys;
pub mod price;
pub mod text;
