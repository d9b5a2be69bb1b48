pub mod headers;

pub use headers::{apply_security_headers, HeaderSink, SecureHeaders};
