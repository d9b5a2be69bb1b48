//! Expect-CT.

use serde::Deserialize;
use serde_json::Value;

use super::shared::value::{bool_field, known_keys, number_field, split_tuple, string_field};
use super::shared::{StrictUriEncoder, UriEncoder};
use super::{format_seconds, ResponseHeader};
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "Expect-CT";

/// One day, in seconds
pub const DEFAULT_MAX_AGE: f64 = 60.0 * 60.0 * 24.0;

/// Expect-CT option: `true`, `false` or `[true, { maxAge, enforce, reportURI }]`
///
/// The header is only sent when explicitly enabled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ExpectCtOption {
    Disabled,
    Enabled,
    Custom { max_age: Option<f64>, enforce: bool, report_uri: Option<String> },
}

impl TryFrom<Value> for ExpectCtOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(true) => return Ok(Self::Enabled),
            Value::Bool(false) => return Ok(Self::Disabled),
            _ => {}
        }

        let Some((primary, options)) = split_tuple(HEADER_NAME, &value)? else {
            return Err(SecureHeadersError::invalid_option(HEADER_NAME, &value));
        };
        if primary != &Value::Bool(true) {
            return Err(SecureHeadersError::invalid_option(
                HEADER_NAME,
                format!("first option {primary}"),
            ));
        }
        known_keys(HEADER_NAME, options, &["maxAge", "enforce", "reportURI"])?;

        Ok(Self::Custom {
            max_age: number_field(HEADER_NAME, options, "maxAge")?,
            enforce: bool_field(HEADER_NAME, options, "enforce")?,
            report_uri: string_field(HEADER_NAME, options, "reportURI")?,
        })
    }
}

pub fn create_header_value(option: Option<&ExpectCtOption>) -> Result<Option<String>> {
    create_header_value_with(option, &StrictUriEncoder)
}

/// Build the Expect-CT value; clauses are joined with `", "` as max-age, enforce, report-uri
pub fn create_header_value_with(
    option: Option<&ExpectCtOption>,
    encoder: &dyn UriEncoder,
) -> Result<Option<String>> {
    let (max_age, enforce, report_uri) = match option {
        None | Some(ExpectCtOption::Disabled) => return Ok(None),
        Some(ExpectCtOption::Enabled) => (DEFAULT_MAX_AGE, false, None),
        Some(ExpectCtOption::Custom { max_age, enforce, report_uri }) => {
            (max_age.unwrap_or(DEFAULT_MAX_AGE), *enforce, report_uri.as_deref())
        }
    };

    if !max_age.is_finite() {
        return Err(SecureHeadersError::invalid_option(HEADER_NAME, format!("maxAge={max_age}")));
    }

    let mut parts = vec![format!("max-age={}", format_seconds(max_age))];

    if enforce {
        parts.push("enforce".to_string());
    }

    if let Some(uri) = report_uri {
        parts.push(format!("report-uri={}", encoder.encode(uri)?));
    }

    Ok(Some(parts.join(", ")))
}

pub fn create_header(option: Option<&ExpectCtOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
