pub mod delivery_route;
pub mod order_detail;
pub mod order_list;
pub mod payment_note;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to read input {source_name}: {source}")]
    ReadInput {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("Input is not valid JSON: {0}")]
    ParseInput(#[from] serde_json::Error),

    #[error("Unexpected input shape: {0}")]
    InputShape(String),
}

/// Reads a JSON document from `path`, or from stdin when no path is given.
pub fn read_json_input(path: Option<&Path>) -> Result<Value, CommandError> {
    let raw = match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CommandError::ReadInput {
            source_name: path.display().to_string(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CommandError::ReadInput {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            buf
        }
    };

    Ok(serde_json::from_str(&raw)?)
}

pub fn to_json_output<T: Serialize>(value: &T) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(value)?)
}
