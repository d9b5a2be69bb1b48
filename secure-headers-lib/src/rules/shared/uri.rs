use url::Url;

use crate::error::{Result, SecureHeadersError};

/// Strategy for turning a user supplied URI into the form written into a header
pub trait UriEncoder {
    fn encode(&self, uri: &str) -> Result<String>;
}

/// Default encoder backed by [`encode_strict_uri`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictUriEncoder;

impl UriEncoder for StrictUriEncoder {
    fn encode(&self, uri: &str) -> Result<String> {
        encode_strict_uri(uri)
    }
}

/// Parse an absolute URI and re-serialize it in canonical ASCII form
///
/// Internationalized hosts are converted to punycode, non-ASCII path segments are
/// percent-encoded and an empty path becomes `/`. Relative or malformed input is
/// rejected. Encoding an already encoded URI returns it unchanged.
///
/// # Example
/// ```
/// use secure_headers_lib::rules::shared::encode_strict_uri;
///
/// let encoded = encode_strict_uri("https://example.com").unwrap();
/// assert_eq!(encoded, "https://example.com/");
/// ```
pub fn encode_strict_uri(input: impl AsRef<str>) -> Result<String> {
    let input = input.as_ref();
    let url = Url::parse(input)
        .map_err(|source| SecureHeadersError::InvalidUri { uri: input.to_string(), source })?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

    #[test]
    fn test_encode_plain_uris() -> TestResult {
        assert_eq!(encode_strict_uri("https://example.com")?, "https://example.com/");
        assert_eq!(encode_strict_uri("https://example.com/")?, "https://example.com/");
        assert_eq!(
            encode_strict_uri("https://example.com/foo-bar")?,
            "https://example.com/foo-bar"
        );
        assert_eq!(
            encode_strict_uri("https://example.com/foo-bar/")?,
            "https://example.com/foo-bar/"
        );
        Ok(())
    }

    #[test]
    fn test_encode_internationalized_uris() -> TestResult {
        assert_eq!(encode_strict_uri("https://日本語.com")?, "https://xn--wgv71a119e.com/");
        assert_eq!(encode_strict_uri("https://日本語.com/")?, "https://xn--wgv71a119e.com/");
        assert_eq!(
            encode_strict_uri("https://日本語.com/ほげ")?,
            "https://xn--wgv71a119e.com/%E3%81%BB%E3%81%92"
        );
        assert_eq!(
            encode_strict_uri("https://日本語.com/ほげ/")?,
            "https://xn--wgv71a119e.com/%E3%81%BB%E3%81%92/"
        );
        Ok(())
    }

    #[test]
    fn test_encode_url_object() -> TestResult {
        let url = Url::parse("https://日本語.com/ほげ/")?;
        assert_eq!(encode_strict_uri(&url)?, "https://xn--wgv71a119e.com/%E3%81%BB%E3%81%92/");
        Ok(())
    }

    #[test]
    fn test_encode_is_idempotent() -> TestResult {
        for input in ["https://example.com", "https://日本語.com/ほげ", "http://a.b/c d?q=1#f"] {
            let once = encode_strict_uri(input)?;
            assert_eq!(encode_strict_uri(&once)?, once);
        }
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_uris() {
        for input in ["example.com", "foo-bar", "ふがほげ"] {
            let result = encode_strict_uri(input);
            assert!(
                matches!(
                    result,
                    Err(SecureHeadersError::InvalidUri { ref uri, .. }) if uri == input
                ),
                "expected InvalidUri for {input}"
            );
        }
    }
}
