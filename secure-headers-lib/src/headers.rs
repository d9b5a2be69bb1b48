//! Builds the full set of security headers from one options object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::{
    content_security_policy, expect_ct, feature_policy, force_https_redirect, frame_guard, noopen,
    nosniff, referrer_policy, xss_protection, ContentSecurityPolicyOption, ExpectCtOption,
    FeaturePolicyOption, ForceHttpsRedirectOption, FrameGuardOption, NoopenOption, NosniffOption,
    ReferrerPolicyOption, ResponseHeader, XssProtectionOption,
};

/// Options for every supported header
///
/// A field left as `None` falls back to the rule's default, which for some headers
/// (Strict-Transport-Security, X-Frame-Options, X-Download-Options,
/// X-Content-Type-Options, X-XSS-Protection) still emits a header.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecureHeadersOptions {
    #[serde(rename = "contentSecurityPolicy", alias = "content_security_policy")]
    pub content_security_policy: Option<ContentSecurityPolicyOption>,
    #[serde(rename = "expectCT", alias = "expect_ct")]
    pub expect_ct: Option<ExpectCtOption>,
    #[serde(rename = "featurePolicy", alias = "feature_policy")]
    pub feature_policy: Option<FeaturePolicyOption>,
    #[serde(rename = "forceHTTPSRedirect", alias = "force_https_redirect")]
    pub force_https_redirect: Option<ForceHttpsRedirectOption>,
    #[serde(rename = "frameGuard", alias = "frame_guard")]
    pub frame_guard: Option<FrameGuardOption>,
    pub noopen: Option<NoopenOption>,
    pub nosniff: Option<NosniffOption>,
    #[serde(rename = "referrerPolicy", alias = "referrer_policy")]
    pub referrer_policy: Option<ReferrerPolicyOption>,
    #[serde(rename = "xssProtection", alias = "xss_protection")]
    pub xss_protection: Option<XssProtectionOption>,
}

/// A header in the list form used by framework header configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecureHeader {
    pub key: String,
    pub value: String,
}

/// Run every rule in output order and keep only the headers that have a value
fn build_headers(options: &SecureHeadersOptions) -> Result<Vec<(&'static str, String)>> {
    let headers: [ResponseHeader; 9] = [
        content_security_policy::create_header(options.content_security_policy.as_ref())?,
        expect_ct::create_header(options.expect_ct.as_ref())?,
        feature_policy::create_header(options.feature_policy.as_ref())?,
        force_https_redirect::create_header(options.force_https_redirect.as_ref())?,
        frame_guard::create_header(options.frame_guard.as_ref())?,
        noopen::create_header(options.noopen.as_ref())?,
        nosniff::create_header(options.nosniff.as_ref())?,
        referrer_policy::create_header(options.referrer_policy.as_ref())?,
        xss_protection::create_header(options.xss_protection.as_ref())?,
    ];

    Ok(headers
        .into_iter()
        .filter_map(|header| header.value.map(|value| (header.name, value)))
        .collect())
}

/// Build a name to value map of all headers that should be sent
///
/// # Example
/// ```
/// use secure_headers_lib::{create_headers_object, SecureHeadersOptions};
///
/// let headers = create_headers_object(&SecureHeadersOptions::default()).unwrap();
/// assert_eq!(headers.get("X-Frame-Options").map(String::as_str), Some("deny"));
/// ```
pub fn create_headers_object(
    options: &SecureHeadersOptions,
) -> Result<BTreeMap<&'static str, String>> {
    Ok(build_headers(options)?.into_iter().collect())
}

/// Build the ordered `{ key, value }` list of all headers that should be sent
pub fn create_secure_headers(options: &SecureHeadersOptions) -> Result<Vec<SecureHeader>> {
    Ok(build_headers(options)?
        .into_iter()
        .map(|(key, value)| SecureHeader { key: key.to_string(), value })
        .collect())
}
