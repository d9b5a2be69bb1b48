#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod headers;
pub mod rules;
pub mod security;
pub mod telemetry;

pub use config::{load_from_path, Config, LoggingConfig};
pub use error::{Result, SecureHeadersError};
pub use headers::{create_headers_object, create_secure_headers, SecureHeader, SecureHeadersOptions};
pub use rules::shared::{encode_strict_uri, wrap_array, StrictUriEncoder, UriEncoder};
pub use rules::ResponseHeader;
pub use security::{apply_security_headers, HeaderSink, SecureHeaders};
