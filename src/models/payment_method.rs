use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::utils::text::fold_alphanumeric;

#[derive(Debug, Error)]
pub enum PaymentMethodError {
    #[error("Invalid payment method: {0}")]
    InvalidMethod(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Nequi,
    Daviplata,
    Efectivo,
    Tarjeta,
}

impl PaymentMethod {
    /// Backend payment method id.
    pub fn id(&self) -> u32 {
        match self {
            PaymentMethod::Nequi => 1,
            PaymentMethod::Daviplata => 2,
            PaymentMethod::Efectivo => 3,
            PaymentMethod::Tarjeta => 4,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method_str = match self {
            PaymentMethod::Nequi => "NEQUI",
            PaymentMethod::Daviplata => "DAVIPLATA",
            PaymentMethod::Efectivo => "EFECTIVO",
            PaymentMethod::Tarjeta => "TARJETA",
        };
        write!(f, "{method_str}")
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEQUI" => Ok(PaymentMethod::Nequi),
            "DAVIPLATA" => Ok(PaymentMethod::Daviplata),
            "EFECTIVO" => Ok(PaymentMethod::Efectivo),
            "TARJETA" => Ok(PaymentMethod::Tarjeta),
            other => Err(PaymentMethodError::InvalidMethod(other.to_string())),
        }
    }
}

/// Maps free-text payment method wording (accents, spacing and punctuation
/// ignored) onto the methods a courier can collect.
pub fn default_payment_method(text: &str) -> Option<PaymentMethod> {
    let folded = fold_alphanumeric(text);
    if folded.is_empty() {
        return None;
    }

    if folded.contains("NEQUI") {
        Some(PaymentMethod::Nequi)
    } else if folded.contains("DAVIPLATA") || folded.contains("DAVI") {
        Some(PaymentMethod::Daviplata)
    } else if folded.contains("EFECTIVO") || folded == "CASH" {
        Some(PaymentMethod::Efectivo)
    } else {
        None
    }
}
