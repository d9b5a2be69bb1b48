//! Strict-Transport-Security.
//!
//! Reference: RFC 6797 - https://tools.ietf.org/html/rfc6797

use serde::Deserialize;
use serde_json::Value;

use super::shared::value::{bool_field, known_keys, number_field, split_tuple};
use super::{format_seconds, ResponseHeader};
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "Strict-Transport-Security";

/// Two years, in seconds
pub const DEFAULT_MAX_AGE: f64 = 60.0 * 60.0 * 24.0 * 365.0 * 2.0;

/// HSTS option
///
/// Accepted configuration shapes:
/// - `true` / `false`
/// - `[seconds]` or `[seconds, { includeSubDomains, preload }]`
/// - `[true, { maxAge, includeSubDomains, preload }]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ForceHttpsRedirectOption {
    /// No header
    Disabled,
    /// `max-age` with the default duration
    Enabled,
    /// `max_age` of `None` falls back to [`DEFAULT_MAX_AGE`]
    Custom { max_age: Option<f64>, include_sub_domains: bool, preload: bool },
}

impl TryFrom<Value> for ForceHttpsRedirectOption {
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
        known_keys(HEADER_NAME, options, &["maxAge", "includeSubDomains", "preload"])?;

        // A numeric first element takes precedence over the `maxAge` sub-option
        let max_age = match primary {
            Value::Bool(true) => number_field(HEADER_NAME, options, "maxAge")?,
            Value::Number(n) => Some(n.as_f64().ok_or_else(|| {
                SecureHeadersError::invalid_option(HEADER_NAME, format!("first option {n}"))
            })?),
            other => {
                return Err(SecureHeadersError::invalid_option(
                    HEADER_NAME,
                    format!("first option {other}"),
                ))
            }
        };

        Ok(Self::Custom {
            max_age,
            include_sub_domains: bool_field(HEADER_NAME, options, "includeSubDomains")?,
            preload: bool_field(HEADER_NAME, options, "preload")?,
        })
    }
}

/// Build the HSTS header value
///
/// Returns `None` when the header is disabled. A non-finite `max_age` is rejected.
pub fn create_header_value(option: Option<&ForceHttpsRedirectOption>) -> Result<Option<String>> {
    let (max_age, include_sub_domains, preload) = match option {
        None | Some(ForceHttpsRedirectOption::Enabled) => (DEFAULT_MAX_AGE, false, false),
        Some(ForceHttpsRedirectOption::Disabled) => return Ok(None),
        Some(ForceHttpsRedirectOption::Custom { max_age, include_sub_domains, preload }) => {
            (max_age.unwrap_or(DEFAULT_MAX_AGE), *include_sub_domains, *preload)
        }
    };

    if !max_age.is_finite() {
        return Err(SecureHeadersError::invalid_option(HEADER_NAME, format!("maxAge={max_age}")));
    }

    let mut parts = vec![format!("max-age={}", format_seconds(max_age))];

    if include_sub_domains {
        parts.push("includeSubDomains".to_string());
    }

    if preload {
        parts.push("preload".to_string());
    }

    Ok(Some(parts.join("; ")))
}

pub fn create_header(option: Option<&ForceHttpsRedirectOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
