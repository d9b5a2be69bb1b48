use serde::Deserialize;

use crate::headers::SecureHeadersOptions;

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Show module path (target) in log messages
    /// Default: false
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: false }
    }
}

/// Root configuration
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [headers]
/// frameGuard = "sameorigin"
/// referrerPolicy = ["no-referrer", "strict-origin-when-cross-origin"]
/// ```
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Security header options, keyed like the library options
    /// (`frameGuard`, `forceHTTPSRedirect`, ...)
    #[serde(default)]
    pub headers: SecureHeadersOptions,
}

fn default_log_level() -> String {
    "info".to_string()
}
