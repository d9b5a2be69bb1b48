//! X-Content-Type-Options.

use serde::Deserialize;
use serde_json::Value;

use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "X-Content-Type-Options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum NosniffOption {
    Disabled,
    Nosniff,
}

impl TryFrom<Value> for NosniffOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(false) => Ok(Self::Disabled),
            Value::String(s) if s == "nosniff" => Ok(Self::Nosniff),
            other => Err(SecureHeadersError::invalid_option(HEADER_NAME, other)),
        }
    }
}

pub fn create_header_value(option: Option<&NosniffOption>) -> Result<Option<String>> {
    match option {
        None | Some(NosniffOption::Nosniff) => Ok(Some("nosniff".to_string())),
        Some(NosniffOption::Disabled) => Ok(None),
    }
}

pub fn create_header(option: Option<&NosniffOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
