//! Referrer-Policy.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::shared::wrap_array;
use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "Referrer-Policy";

/// Supported policy values
///
/// `unsafe-url` is deliberately not representable and is rejected on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferrerPolicy {
    NoReferrer,
    NoReferrerWhenDowngrade,
    Origin,
    OriginWhenCrossOrigin,
    SameOrigin,
    StrictOrigin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    pub const ALL: [ReferrerPolicy; 7] = [
        Self::NoReferrer,
        Self::NoReferrerWhenDowngrade,
        Self::Origin,
        Self::OriginWhenCrossOrigin,
        Self::SameOrigin,
        Self::StrictOrigin,
        Self::StrictOriginWhenCrossOrigin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            Self::Origin => "origin",
            Self::OriginWhenCrossOrigin => "origin-when-cross-origin",
            Self::SameOrigin => "same-origin",
            Self::StrictOrigin => "strict-origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

impl fmt::Display for ReferrerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferrerPolicy {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "unsafe-url" {
            return Err(SecureHeadersError::UnsafeValue {
                header: HEADER_NAME,
                value: s.to_string(),
            });
        }
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| SecureHeadersError::invalid_option(HEADER_NAME, s))
    }
}

/// Referrer-Policy option: `false`, a single policy or a fallback chain of policies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ReferrerPolicyOption {
    Disabled,
    Policies(Vec<ReferrerPolicy>),
}

impl TryFrom<Value> for ReferrerPolicyOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        if value == Value::Bool(false) {
            return Ok(Self::Disabled);
        }

        wrap_array(value)
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s.parse(),
                other => Err(SecureHeadersError::invalid_option(HEADER_NAME, other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Policies)
    }
}

impl From<ReferrerPolicy> for ReferrerPolicyOption {
    fn from(policy: ReferrerPolicy) -> Self {
        Self::Policies(vec![policy])
    }
}

/// Join the configured policies with `", "`, keeping their order for legacy browser fallback
pub fn create_header_value(option: Option<&ReferrerPolicyOption>) -> Result<Option<String>> {
    match option {
        None | Some(ReferrerPolicyOption::Disabled) => Ok(None),
        Some(ReferrerPolicyOption::Policies(policies)) => Ok(Some(
            policies.iter().map(ReferrerPolicy::as_str).collect::<Vec<_>>().join(", "),
        )),
    }
}

pub fn create_header(option: Option<&ReferrerPolicyOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
