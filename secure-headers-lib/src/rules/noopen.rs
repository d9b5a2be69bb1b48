//! X-Download-Options.

use serde::Deserialize;
use serde_json::Value;

use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "X-Download-Options";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum NoopenOption {
    Disabled,
    Noopen,
}

impl TryFrom<Value> for NoopenOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(false) => Ok(Self::Disabled),
            Value::String(s) if s == "noopen" => Ok(Self::Noopen),
            other => Err(SecureHeadersError::invalid_option(HEADER_NAME, other)),
        }
    }
}

pub fn create_header_value(option: Option<&NoopenOption>) -> Result<Option<String>> {
    match option {
        None | Some(NoopenOption::Noopen) => Ok(Some("noopen".to_string())),
        Some(NoopenOption::Disabled) => Ok(None),
    }
}

pub fn create_header(option: Option<&NoopenOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
