//! Header rules.
//!
//! Each rule turns one option into a [`ResponseHeader`]. A header whose value is
//! `None` must not be emitted.

pub mod content_security_policy;
pub mod expect_ct;
pub mod feature_policy;
pub mod force_https_redirect;
pub mod frame_guard;
pub mod noopen;
pub mod nosniff;
pub mod referrer_policy;
pub mod shared;
pub mod xss_protection;

pub use content_security_policy::ContentSecurityPolicyOption;
pub use expect_ct::ExpectCtOption;
pub use feature_policy::FeaturePolicyOption;
pub use force_https_redirect::ForceHttpsRedirectOption;
pub use frame_guard::FrameGuardOption;
pub use noopen::NoopenOption;
pub use nosniff::NosniffOption;
pub use referrer_policy::ReferrerPolicyOption;
pub use xss_protection::XssProtectionOption;

/// A candidate response header produced by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub name: &'static str,
    pub value: Option<String>,
}

impl ResponseHeader {
    pub fn new(name: &'static str, value: Option<String>) -> Self {
        Self { name, value }
    }
}

/// Render a number of seconds the way it appears in `max-age=` clauses.
pub(crate) fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 && seconds.abs() < 1e15 {
        format!("{}", seconds as i64)
    } else {
        format!("{seconds}")
    }
}
