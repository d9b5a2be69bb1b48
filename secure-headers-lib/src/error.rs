use thiserror::Error;

/// Errors that can occur while building security headers
#[derive(Error, Debug)]
pub enum SecureHeadersError {
    #[error("Invalid value for {header}: {value}")]
    InvalidOption { header: &'static str, value: String },

    #[error("Invalid URI: {uri}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Cannot specify a dangerous value for {header}: {value}")]
    UnsafeValue { header: &'static str, value: String },

    #[error("Invalid directive for {header}: {directive}")]
    InvalidDirective { header: &'static str, directive: String },

    #[error("Invalid directive parameters for {header}: {directive}")]
    InvalidDirectiveParameters { header: &'static str, directive: String },

    #[error("Invalid header value for {name}: {value}")]
    InvalidHeaderValue { name: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SecureHeadersError {
    pub(crate) fn invalid_option(header: &'static str, value: impl ToString) -> Self {
        Self::InvalidOption { header, value: value.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, SecureHeadersError>;
