use http::{HeaderMap, HeaderName, HeaderValue, Response};
use tracing::{debug, trace};

use crate::error::{Result, SecureHeadersError};
use crate::headers::{create_secure_headers, SecureHeadersOptions};

/// Anything security headers can be written onto
pub trait HeaderSink {
    /// Whether the response head has already gone out. Nothing is written when it has.
    fn headers_sent(&self) -> bool {
        false
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue);
}

impl<B> HeaderSink for Response<B> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }
}

impl HeaderSink for HeaderMap {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.insert(name, value);
    }
}

/// Precomputed, validated security headers
///
/// Build once from the configuration and apply to every response.
#[derive(Debug, Clone, Default)]
pub struct SecureHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl SecureHeaders {
    /// Synthesize the headers for `options` and convert them into HTTP header types
    ///
    /// # Errors
    /// Any rule error, or [`SecureHeadersError::InvalidHeaderValue`] when a value
    /// contains characters that are not allowed in an HTTP header.
    pub fn new(options: &SecureHeadersOptions) -> Result<Self> {
        let headers = create_secure_headers(options)?
            .into_iter()
            .map(|header| {
                let invalid = || SecureHeadersError::InvalidHeaderValue {
                    name: header.key.clone(),
                    value: header.value.clone(),
                };
                let name = HeaderName::from_bytes(header.key.as_bytes()).map_err(|_| invalid())?;
                let value = HeaderValue::from_str(&header.value).map_err(|_| invalid())?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { headers })
    }

    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Write every header onto `sink`, replacing existing values with the same name
    ///
    /// Returns the number of headers written, which is zero when the sink reports
    /// its headers as already sent.
    pub fn apply<S: HeaderSink + ?Sized>(&self, sink: &mut S) -> usize {
        if sink.headers_sent() {
            debug!("Headers already sent, skipping security headers");
            return 0;
        }

        for (name, value) in &self.headers {
            trace!(header = %name, ?value, "Setting security header");
            sink.set_header(name.clone(), value.clone());
        }

        self.headers.len()
    }
}

/// Apply security headers to an HTTP response
///
/// Synthesizes the headers on every call. Prefer [`SecureHeaders`] when the same
/// options are applied to many responses.
///
/// # Arguments
/// * `sink` - Mutable reference to the response (or header map)
/// * `options` - Security headers configuration
pub fn apply_security_headers<S: HeaderSink + ?Sized>(
    sink: &mut S,
    options: &SecureHeadersOptions,
) -> Result<usize> {
    Ok(SecureHeaders::new(options)?.apply(sink))
}
