//! X-XSS-Protection.

use serde::Deserialize;
use serde_json::Value;

use super::shared::value::{known_keys, required_string_field, split_tuple};
use super::shared::{StrictUriEncoder, UriEncoder};
use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "X-XSS-Protection";

/// XSS filter option: `false`, `"sanitize"`, `"block-rendering"` or `["report", { uri }]`
///
/// Unlike the other rules, `false` still emits a header: it turns the browser filter off (`0`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum XssProtectionOption {
    Disabled,
    Sanitize,
    BlockRendering,
    Report { uri: String },
}

impl TryFrom<Value> for XssProtectionOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        match &value {
            Value::Bool(false) => return Ok(Self::Disabled),
            Value::String(s) if s == "sanitize" => return Ok(Self::Sanitize),
            Value::String(s) if s == "block-rendering" => return Ok(Self::BlockRendering),
            _ => {}
        }

        if let Some((Value::String(kind), options)) = split_tuple(HEADER_NAME, &value)? {
            if kind == "report" {
                known_keys(HEADER_NAME, options, &["uri"])?;
                let uri = required_string_field(HEADER_NAME, options, "uri")?;
                return Ok(Self::Report { uri });
            }
        }

        Err(SecureHeadersError::invalid_option(HEADER_NAME, &value))
    }
}

pub fn create_header_value(option: Option<&XssProtectionOption>) -> Result<Option<String>> {
    create_header_value_with(option, &StrictUriEncoder)
}

pub fn create_header_value_with(
    option: Option<&XssProtectionOption>,
    encoder: &dyn UriEncoder,
) -> Result<Option<String>> {
    let value = match option {
        None | Some(XssProtectionOption::Sanitize) => "1".to_string(),
        Some(XssProtectionOption::Disabled) => "0".to_string(),
        Some(XssProtectionOption::BlockRendering) => "1; mode=block".to_string(),
        Some(XssProtectionOption::Report { uri }) => format!("1; report={}", encoder.encode(uri)?),
    };
    Ok(Some(value))
}

pub fn create_header(option: Option<&XssProtectionOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
