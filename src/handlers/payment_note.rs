use serde::Serialize;
use tracing::info;

use crate::models::{
    payment_method::{PaymentMethod, default_payment_method},
    payment_note::parse_payment_note,
};

use super::{CommandError, to_json_output};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNoteResult {
    pub method: String,
    pub observations: String,
    pub suggested_method: Option<PaymentMethod>,
    pub suggested_method_id: Option<u32>,
}

pub fn handle_payment_note(note: &str) -> Result<String, CommandError> {
    let parsed = parse_payment_note(note);
    let suggested_method = default_payment_method(&parsed.method);

    info!("Payment note parsed, suggested method: {suggested_method:?}");

    to_json_output(&PaymentNoteResult {
        method: parsed.method,
        observations: parsed.observations,
        suggested_method,
        suggested_method_id: suggested_method.map(|m| m.id()),
    })
}
