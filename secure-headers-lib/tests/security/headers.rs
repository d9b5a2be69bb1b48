use http::{HeaderMap, HeaderName, HeaderValue, Response};
use secure_headers_lib::rules::{ExpectCtOption, FrameGuardOption, NoopenOption};
use secure_headers_lib::{apply_security_headers, HeaderSink, SecureHeaders, SecureHeadersOptions};

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Response stand-in that records whether its head was flushed
#[derive(Default)]
struct StreamingResponse {
    headers: HeaderMap,
    flushed: bool,
}

impl HeaderSink for StreamingResponse {
    fn headers_sent(&self) -> bool {
        self.flushed
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}

fn header<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Result<Option<&'a str>, http::header::ToStrError> {
    headers.get(name).map(HeaderValue::to_str).transpose()
}

#[test]
fn test_same_headers_on_every_response() -> TestResult {
    let options = SecureHeadersOptions {
        expect_ct: Some(ExpectCtOption::Enabled),
        frame_guard: Some(FrameGuardOption::SameOrigin),
        ..Default::default()
    };
    let secure_headers = SecureHeaders::new(&options)?;

    for body in ["first", "second"] {
        let mut response = Response::new(body);
        assert_eq!(secure_headers.apply(&mut response), secure_headers.len());
        assert_eq!(header(response.headers(), "expect-ct")?, Some("max-age=86400"));
        assert_eq!(header(response.headers(), "x-frame-options")?, Some("sameorigin"));
    }
    Ok(())
}

#[test]
fn test_headers_sent_is_respected() -> TestResult {
    let secure_headers = SecureHeaders::new(&SecureHeadersOptions::default())?;

    let mut flushed = StreamingResponse { flushed: true, ..Default::default() };
    assert_eq!(secure_headers.apply(&mut flushed), 0);
    assert!(flushed.headers.is_empty());

    let mut pending = StreamingResponse::default();
    assert_eq!(secure_headers.apply(&mut pending), 5);
    assert_eq!(header(&pending.headers, "x-download-options")?, Some("noopen"));
    Ok(())
}

#[test]
fn test_apply_to_header_map() -> TestResult {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("text/html"));

    let options =
        SecureHeadersOptions { noopen: Some(NoopenOption::Disabled), ..Default::default() };
    let written = apply_security_headers(&mut headers, &options)?;

    assert_eq!(written, 4);
    assert_eq!(header(&headers, "content-type")?, Some("text/html"));
    assert!(headers.get("x-download-options").is_none());
    assert_eq!(header(&headers, "x-xss-protection")?, Some("1"));
    Ok(())
}

#[test]
fn test_precomputed_header_types() -> TestResult {
    let secure_headers = SecureHeaders::new(&SecureHeadersOptions::default())?;
    let names: Vec<&str> = secure_headers.headers().iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "strict-transport-security",
            "x-frame-options",
            "x-download-options",
            "x-content-type-options",
            "x-xss-protection",
        ]
    );
    assert!(!secure_headers.is_empty());
    Ok(())
}
