//! Feature-Policy.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "Feature-Policy";

macro_rules! feature_policy_directives {
    ($($variant:ident => $name:literal,)+) => {
        /// Supported Feature-Policy directives
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum FeaturePolicyDirective {
            $($variant,)+
        }

        impl FeaturePolicyDirective {
            pub const ALL: &'static [FeaturePolicyDirective] = &[$(Self::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

feature_policy_directives! {
    Accelerometer => "accelerometer",
    AmbientLightSensor => "ambient-light-sensor",
    Autoplay => "autoplay",
    Battery => "battery",
    Camera => "camera",
    DisplayCapture => "display-capture",
    DocumentDomain => "document-domain",
    EncryptedMedia => "encrypted-media",
    ExecutionWhileNotRendered => "execution-while-not-rendered",
    ExecutionWhileOutOfViewport => "execution-while-out-of-viewport",
    Fullscreen => "fullscreen",
    Geolocation => "geolocation",
    Gyroscope => "gyroscope",
    LayoutAnimations => "layout-animations",
    LegacyImageFormats => "legacy-image-formats",
    Magnetometer => "magnetometer",
    Microphone => "microphone",
    Midi => "midi",
    NavigationOverride => "navigation-override",
    OversizedImages => "oversized-images",
    Payment => "payment",
    PictureInPicture => "picture-in-picture",
    PublickeyCredentialsGet => "publickey-credentials-get",
    SyncXhr => "sync-xhr",
    Usb => "usb",
    Vr => "vr",
    WakeLock => "wake-lock",
    ScreenWakeLock => "screen-wake-lock",
    WebShare => "web-share",
    XrSpatialTracking => "xr-spatial-tracking",
}

impl fmt::Display for FeaturePolicyDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeaturePolicyDirective {
    type Err = SecureHeadersError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.iter().copied().find(|directive| directive.as_str() == s).ok_or_else(|| {
            SecureHeadersError::InvalidDirective { header: HEADER_NAME, directive: s.to_string() }
        })
    }
}

/// Allow-list for one directive
///
/// Flags are not combined: `none` wins over `all`, which wins over `self` and `origins`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeaturePolicyDirectiveParameters {
    #[serde(default)]
    pub none: bool,
    #[serde(default)]
    pub all: bool,
    #[serde(default, rename = "self")]
    pub self_origin: bool,
    #[serde(default)]
    pub origins: Vec<String>,
}

/// Feature-Policy option: `false` or a map of directive name to parameters
///
/// Directives keep the order they were configured in. A directive mapped to `None`
/// (e.g. `null` in a configuration file) is rejected when the header is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum FeaturePolicyOption {
    Disabled,
    Directives(Vec<(FeaturePolicyDirective, Option<FeaturePolicyDirectiveParameters>)>),
}

impl TryFrom<Value> for FeaturePolicyOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        let map = match value {
            Value::Bool(false) => return Ok(Self::Disabled),
            Value::Object(map) => map,
            other => return Err(SecureHeadersError::invalid_option(HEADER_NAME, other)),
        };

        map.into_iter()
            .map(|(name, parameters)| {
                let directive: FeaturePolicyDirective = name.parse()?;
                let parameters = match parameters {
                    Value::Null => None,
                    other => Some(serde_json::from_value(other).map_err(|_| {
                        SecureHeadersError::InvalidDirectiveParameters {
                            header: HEADER_NAME,
                            directive: name.clone(),
                        }
                    })?),
                };
                Ok((directive, parameters))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Directives)
    }
}

fn create_directive_value(
    directive: FeaturePolicyDirective,
    parameters: Option<&FeaturePolicyDirectiveParameters>,
) -> Result<String> {
    let invalid_parameters = || SecureHeadersError::InvalidDirectiveParameters {
        header: HEADER_NAME,
        directive: directive.to_string(),
    };
    let parameters = parameters.ok_or_else(invalid_parameters)?;

    if parameters.none {
        return Ok(format!("{directive} 'none';"));
    }
    if parameters.all {
        return Ok(format!("{directive} *;"));
    }
    if !parameters.self_origin && parameters.origins.is_empty() {
        return Err(invalid_parameters());
    }

    let mut value = directive.to_string();
    if parameters.self_origin {
        value.push_str(" 'self'");
    }
    if !parameters.origins.is_empty() {
        value.push(' ');
        value.push_str(&parameters.origins.join(" "));
    }
    value.push(';');

    Ok(value)
}

pub fn create_header_value(option: Option<&FeaturePolicyOption>) -> Result<Option<String>> {
    let directives = match option {
        None | Some(FeaturePolicyOption::Disabled) => return Ok(None),
        Some(FeaturePolicyOption::Directives(directives)) => directives,
    };

    let clauses = directives
        .iter()
        .map(|(directive, parameters)| create_directive_value(*directive, parameters.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(clauses.join(" ")))
}

pub fn create_header(option: Option<&FeaturePolicyOption>) -> Result<ResponseHeader> {
    Ok(ResponseHeader::new(HEADER_NAME, create_header_value(option)?))
}
