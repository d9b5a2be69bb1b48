//! X-Frame-Options.

use serde::Deserialize;
use serde_json::Value;

use super::shared::value::{known_keys, required_string_field, split_tuple};
use super::shared::{StrictUriEncoder, UriEncoder};
use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "X-Frame-Options";

/// Frame guard option: `false`, `"deny"`, `"sameorigin"` or `["allow-from", { uri }]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum FrameGuardOption {
    Disabled,
    Deny,
    SameOrigin,
    AllowFrom { uri: String },
}

impl TryFrom<Value> for FrameGuardOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        match &value {
            Value::Bool(false) => return Ok(Self::Disabled),
            Value::String(s) if s == "deny" => return Ok(Self::Deny),
            Value::String(s) if s == "sameorigin" => return Ok(Self::SameOrigin),
            _ => {}
        }

        if let Some((Value::String(kind), options)) = split_tuple(HEADER_NAME, &value)? {
            if kind == "allow-from" {
                known_keys(HEADER_NAME, options, &["uri"])?;
                let uri = required_string_field(HEADER_NAME, options, "uri")?;
                return Ok(Self::AllowFrom { uri });
            }
        }

        Err(SecureHeadersError::invalid_option(HEADER_NAME, &value))
    }
}

pub fn create_header_value(option: Option<&FrameGuardOption>) -> Result<Option<String>> {
    create_header_value_with(option, &StrictUriEncoder)
}

/// Build the X-Frame-Options value using `encoder` for `allow-from` URIs
pub fn create_header_value_with(
    option: Option<&FrameGuardOption>,
    encoder: &dyn UriEncoder,
) -> Result<Option<String>> {
    match option {
        None | Some(FrameGuardOption::Deny) => Ok(Some("deny".to_string())),
        Some(FrameGuardOption::Disabled) => Ok(None),
        Some(FrameGuardOption::SameOrigin) => Ok(Some("sameorigin".to_string())),
        Some(FrameGuardOption::AllowFrom { uri }) => {
            Ok(Some(format!("allow-from {}", encoder.encode(uri)?)))
        }
    }
}

pub fn create_header(option: Option<&FrameGuardOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
