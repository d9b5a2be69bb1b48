//! Content-Security-Policy.
//!
//! Directives are grouped into three families (fetch, document and reporting). Each
//! family is rendered independently and the non-empty results are joined with `"; "`.
//! Directive keys may be written in camelCase (`scriptSrc`) or kebab-case (`script-src`);
//! both spellings map to the same directive. When both are present the camelCase one wins.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::shared::value::string_list;
use super::shared::{StrictUriEncoder, UriEncoder};
use super::ResponseHeader;
use crate::error::{Result, SecureHeadersError};

pub const HEADER_NAME: &str = "Content-Security-Policy";
pub const REPORT_ONLY_HEADER_NAME: &str = "Content-Security-Policy-Report-Only";

const DIRECTIVE_VALUE_SEPARATOR: &str = "; ";

/// Tokens accepted by the `sandbox` directive
pub const SANDBOX_TOKENS: &[&str] = &[
    "allow-downloads-without-user-activation",
    "allow-forms",
    "allow-modals",
    "allow-orientation-lock",
    "allow-pointer-lock",
    "allow-popups",
    "allow-popups-to-escape-sandbox",
    "allow-presentation",
    "allow-same-origin",
    "allow-scripts",
    "allow-storage-access-by-user-activation",
    "allow-top-navigation",
    "allow-top-navigation-by-user-activation",
];

/// Fetch directives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchDirective {
    ChildSrc,
    ConnectSrc,
    DefaultSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ManifestSrc,
    MediaSrc,
    PrefetchSrc,
    ObjectSrc,
    ScriptSrc,
    ScriptSrcElem,
    ScriptSrcAttr,
    StyleSrc,
    StyleSrcElem,
    StyleSrcAttr,
    WorkerSrc,
}

impl FetchDirective {
    pub const ALL: [FetchDirective; 17] = [
        Self::ChildSrc,
        Self::ConnectSrc,
        Self::DefaultSrc,
        Self::FontSrc,
        Self::FrameSrc,
        Self::ImgSrc,
        Self::ManifestSrc,
        Self::MediaSrc,
        Self::PrefetchSrc,
        Self::ObjectSrc,
        Self::ScriptSrc,
        Self::ScriptSrcElem,
        Self::ScriptSrcAttr,
        Self::StyleSrc,
        Self::StyleSrcElem,
        Self::StyleSrcAttr,
        Self::WorkerSrc,
    ];

    /// Directive name as written in the header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChildSrc => "child-src",
            Self::ConnectSrc => "connect-src",
            Self::DefaultSrc => "default-src",
            Self::FontSrc => "font-src",
            Self::FrameSrc => "frame-src",
            Self::ImgSrc => "img-src",
            Self::ManifestSrc => "manifest-src",
            Self::MediaSrc => "media-src",
            Self::PrefetchSrc => "prefetch-src",
            Self::ObjectSrc => "object-src",
            Self::ScriptSrc => "script-src",
            Self::ScriptSrcElem => "script-src-elem",
            Self::ScriptSrcAttr => "script-src-attr",
            Self::StyleSrc => "style-src",
            Self::StyleSrcElem => "style-src-elem",
            Self::StyleSrcAttr => "style-src-attr",
            Self::WorkerSrc => "worker-src",
        }
    }

    pub fn camel_case(&self) -> &'static str {
        match self {
            Self::ChildSrc => "childSrc",
            Self::ConnectSrc => "connectSrc",
            Self::DefaultSrc => "defaultSrc",
            Self::FontSrc => "fontSrc",
            Self::FrameSrc => "frameSrc",
            Self::ImgSrc => "imgSrc",
            Self::ManifestSrc => "manifestSrc",
            Self::MediaSrc => "mediaSrc",
            Self::PrefetchSrc => "prefetchSrc",
            Self::ObjectSrc => "objectSrc",
            Self::ScriptSrc => "scriptSrc",
            Self::ScriptSrcElem => "scriptSrcElem",
            Self::ScriptSrcAttr => "scriptSrcAttr",
            Self::StyleSrc => "styleSrc",
            Self::StyleSrcElem => "styleSrcElem",
            Self::StyleSrcAttr => "styleSrcAttr",
            Self::WorkerSrc => "workerSrc",
        }
    }

    /// Look up a directive by either spelling
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == key || d.camel_case() == key)
    }
}

/// Value of the `sandbox` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sandbox {
    /// Bare `sandbox`, every restriction applied
    Enabled,
    Tokens(Vec<String>),
}

/// Normalized CSP directives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspDirectives {
    /// Fetch directives in the order they were configured
    pub fetch: Vec<(FetchDirective, Vec<String>)>,
    pub base_uri: Option<Vec<String>>,
    pub plugin_types: Option<Vec<String>>,
    pub sandbox: Option<Sandbox>,
    pub navigate_to: Option<Vec<String>>,
    /// Encoded with the strict URI encoder when rendered
    pub report_uri: Option<Vec<String>>,
    /// Reporting endpoint name
    pub report_to: Option<String>,
}

const DOCUMENT_AND_REPORTING_KEYS: &[&str] = &[
    "baseURI",
    "base-uri",
    "pluginTypes",
    "plugin-types",
    "sandbox",
    "navigateTo",
    "navigate-to",
    "reportURI",
    "report-uri",
    "reportTo",
    "report-to",
];

/// First non-null value of the camelCase then kebab-case spelling
fn pick<'a>(map: &'a Map<String, Value>, camel: &str, kebab: &str) -> Option<&'a Value> {
    [camel, kebab].into_iter().filter_map(|key| map.get(key)).find(|value| !value.is_null())
}

fn invalid(detail: impl ToString) -> SecureHeadersError {
    SecureHeadersError::invalid_option(HEADER_NAME, detail)
}

fn pick_list(map: &Map<String, Value>, camel: &str, kebab: &str) -> Result<Option<Vec<String>>> {
    pick(map, camel, kebab).map(|value| string_list(HEADER_NAME, value)).transpose()
}

fn parse_sandbox(value: &Value) -> Result<Option<Sandbox>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some(Sandbox::Enabled)),
        other => {
            let tokens = string_list(HEADER_NAME, other)?;
            if let Some(token) = tokens.iter().find(|t| !SANDBOX_TOKENS.contains(&t.as_str())) {
                return Err(invalid(format!("sandbox {token}")));
            }
            Ok(Some(Sandbox::Tokens(tokens)))
        }
    }
}

impl TryFrom<&Map<String, Value>> for CspDirectives {
    type Error = SecureHeadersError;

    fn try_from(map: &Map<String, Value>) -> Result<Self> {
        let mut directives = CspDirectives::default();

        for (key, value) in map {
            if let Some(directive) = FetchDirective::from_key(key) {
                if value.is_null() {
                    continue;
                }
                let values = string_list(HEADER_NAME, value)?;
                let is_camel_case = key == directive.camel_case();
                match directives.fetch.iter_mut().find(|(d, _)| *d == directive) {
                    Some(existing) if is_camel_case => existing.1 = values,
                    Some(_) => {}
                    None => directives.fetch.push((directive, values)),
                }
            } else if !DOCUMENT_AND_REPORTING_KEYS.contains(&key.as_str()) {
                tracing::debug!(directive = %key, "Ignoring unsupported CSP directive");
            }
        }

        directives.base_uri = pick_list(map, "baseURI", "base-uri")?;
        directives.plugin_types = pick_list(map, "pluginTypes", "plugin-types")?;
        directives.sandbox = match map.get("sandbox") {
            Some(value) => parse_sandbox(value)?,
            None => None,
        };
        directives.navigate_to = pick_list(map, "navigateTo", "navigate-to")?;
        directives.report_uri = pick_list(map, "reportURI", "report-uri")?;
        directives.report_to = match pick(map, "reportTo", "report-to") {
            None => None,
            Some(Value::String(endpoint)) => Some(endpoint.clone()),
            Some(other) => return Err(invalid(format!("reportTo={other}"))),
        };

        Ok(directives)
    }
}

/// A configured policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    pub directives: CspDirectives,
    /// Send as `Content-Security-Policy-Report-Only`
    pub report_only: bool,
}

/// CSP option: `false` or `{ directives: { ... }, reportOnly }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ContentSecurityPolicyOption {
    Disabled,
    Policy(ContentSecurityPolicy),
}

impl TryFrom<Value> for ContentSecurityPolicyOption {
    type Error = SecureHeadersError;

    fn try_from(value: Value) -> Result<Self> {
        let map = match value {
            Value::Bool(false) => return Ok(Self::Disabled),
            Value::Object(map) => map,
            other => return Err(SecureHeadersError::invalid_option(HEADER_NAME, other)),
        };

        if let Some(key) = map.keys().find(|k| !matches!(k.as_str(), "directives" | "reportOnly")) {
            return Err(invalid(format!("unknown key \"{key}\"")));
        }

        let directives = match map.get("directives") {
            None | Some(Value::Null) => CspDirectives::default(),
            Some(Value::Object(directives)) => CspDirectives::try_from(directives)?,
            Some(other) => return Err(invalid(format!("directives={other}"))),
        };
        let report_only = match map.get("reportOnly") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => return Err(invalid(format!("reportOnly={other}"))),
        };

        Ok(Self::Policy(ContentSecurityPolicy { directives, report_only }))
    }
}

impl From<ContentSecurityPolicy> for ContentSecurityPolicyOption {
    fn from(policy: ContentSecurityPolicy) -> Self {
        Self::Policy(policy)
    }
}

pub fn header_name(report_only: bool) -> &'static str {
    if report_only {
        REPORT_ONLY_HEADER_NAME
    } else {
        HEADER_NAME
    }
}

/// `"<name> <values...>"`, or just the name when there are no values
pub fn create_directive_value<S: AsRef<str>>(name: &str, values: &[S]) -> String {
    let mut value = name.to_string();
    for v in values {
        value.push(' ');
        value.push_str(v.as_ref());
    }
    value
}

/// Render the fetch family
pub fn convert_fetch_directives(directives: &CspDirectives) -> String {
    directives
        .fetch
        .iter()
        .map(|(directive, values)| create_directive_value(directive.as_str(), values))
        .collect::<Vec<_>>()
        .join(DIRECTIVE_VALUE_SEPARATOR)
}

/// Render the document family: `base-uri`, `plugin-types`, `sandbox`
pub fn convert_document_directives(directives: &CspDirectives) -> String {
    let mut strings = Vec::new();

    if let Some(base_uri) = &directives.base_uri {
        strings.push(create_directive_value("base-uri", base_uri));
    }
    if let Some(plugin_types) = &directives.plugin_types {
        strings.push(create_directive_value("plugin-types", plugin_types));
    }
    match &directives.sandbox {
        Some(Sandbox::Enabled) => strings.push("sandbox".to_string()),
        Some(Sandbox::Tokens(tokens)) => strings.push(create_directive_value("sandbox", tokens)),
        None => {}
    }

    strings.join(DIRECTIVE_VALUE_SEPARATOR)
}

/// Render the reporting family: `navigate-to`, `report-uri`, `report-to`
pub fn convert_reporting_directives(
    directives: &CspDirectives,
    encoder: &dyn UriEncoder,
) -> Result<String> {
    let mut strings = Vec::new();

    if let Some(navigate_to) = &directives.navigate_to {
        strings.push(create_directive_value("navigate-to", navigate_to));
    }
    if let Some(report_uri) = &directives.report_uri {
        let encoded =
            report_uri.iter().map(|uri| encoder.encode(uri)).collect::<Result<Vec<_>>>()?;
        strings.push(create_directive_value("report-uri", &encoded));
    }
    if let Some(report_to) = &directives.report_to {
        strings.push(create_directive_value("report-to", &[report_to]));
    }

    Ok(strings.join(DIRECTIVE_VALUE_SEPARATOR))
}

/// Renders each directive family of a policy
pub trait DirectiveConverter {
    fn fetch(&self, directives: &CspDirectives) -> Result<String>;
    fn document(&self, directives: &CspDirectives) -> Result<String>;
    fn reporting(&self, directives: &CspDirectives) -> Result<String>;
}

/// Converter used by [`create_header_value`]
pub struct StandardDirectiveConverter<'a> {
    encoder: &'a dyn UriEncoder,
}

impl<'a> StandardDirectiveConverter<'a> {
    pub fn new(encoder: &'a dyn UriEncoder) -> Self {
        Self { encoder }
    }
}

impl Default for StandardDirectiveConverter<'static> {
    fn default() -> Self {
        Self { encoder: &StrictUriEncoder }
    }
}

impl DirectiveConverter for StandardDirectiveConverter<'_> {
    fn fetch(&self, directives: &CspDirectives) -> Result<String> {
        Ok(convert_fetch_directives(directives))
    }

    fn document(&self, directives: &CspDirectives) -> Result<String> {
        Ok(convert_document_directives(directives))
    }

    fn reporting(&self, directives: &CspDirectives) -> Result<String> {
        convert_reporting_directives(directives, self.encoder)
    }
}

pub fn create_header_value(option: Option<&ContentSecurityPolicyOption>) -> Result<Option<String>> {
    create_header_value_with(option, &StandardDirectiveConverter::default())
}

pub fn create_header_value_with(
    option: Option<&ContentSecurityPolicyOption>,
    converter: &dyn DirectiveConverter,
) -> Result<Option<String>> {
    let policy = match option {
        None | Some(ContentSecurityPolicyOption::Disabled) => return Ok(None),
        Some(ContentSecurityPolicyOption::Policy(policy)) => policy,
    };

    let families = [
        converter.fetch(&policy.directives)?,
        converter.document(&policy.directives)?,
        converter.reporting(&policy.directives)?,
    ];

    Ok(Some(
        families
            .into_iter()
            .filter(|family| !family.is_empty())
            .collect::<Vec<_>>()
            .join(DIRECTIVE_VALUE_SEPARATOR),
    ))
}

pub fn create_header(option: Option<&ContentSecurityPolicyOption>) -> Result<ResponseHeader> {
    let report_only = match option {
        Some(ContentSecurityPolicyOption::Policy(policy)) => policy.report_only,
        _ => false,
    };
    Ok(ResponseHeader::new(header_name(report_only), create_header_value(option)?))
}
