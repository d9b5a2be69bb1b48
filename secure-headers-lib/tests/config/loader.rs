use std::fs;
use std::path::PathBuf;

use secure_headers_lib::config::load_from_path;
use secure_headers_lib::{create_headers_object, create_secure_headers, SecureHeadersError};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, std::io::Error> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn loads_toml_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_config(
        &dir,
        "headers.toml",
        r#"
[logging]
level = "debug"
show_target = true

[headers]
forceHTTPSRedirect = [true, { maxAge = 345600, includeSubDomains = true }]
frameGuard = "sameorigin"
referrerPolicy = ["no-referrer", "strict-origin-when-cross-origin"]
xssProtection = false

[headers.contentSecurityPolicy.directives]
defaultSrc = "'self'"
styleSrc = ["'self'", "https://stackpath.bootstrapcdn.com"]

[headers.featurePolicy]
camera = { none = true }
geolocation = { self = true, origins = ["https://maps.example.com"] }
"#,
    )?;

    let cfg = load_from_path(&path)?;
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.show_target);

    let headers = create_headers_object(&cfg.headers)?;
    assert_eq!(
        headers.get("Content-Security-Policy").map(String::as_str),
        Some("default-src 'self'; style-src 'self' https://stackpath.bootstrapcdn.com")
    );
    assert_eq!(
        headers.get("Feature-Policy").map(String::as_str),
        Some("camera 'none'; geolocation 'self' https://maps.example.com;")
    );
    assert_eq!(
        headers.get("Strict-Transport-Security").map(String::as_str),
        Some("max-age=345600; includeSubDomains")
    );
    assert_eq!(headers.get("X-Frame-Options").map(String::as_str), Some("sameorigin"));
    assert_eq!(
        headers.get("Referrer-Policy").map(String::as_str),
        Some("no-referrer, strict-origin-when-cross-origin")
    );
    assert_eq!(headers.get("X-XSS-Protection").map(String::as_str), Some("0"));
    Ok(())
}

#[test]
fn loads_json_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = write_config(
        &dir,
        "headers.json",
        r#"{
  "headers": {
    "contentSecurityPolicy": { "directives": { "default-src": "'none'" }, "reportOnly": true },
    "expect_ct": [true, { "reportURI": "https://example.com/ct" }],
    "nosniff": false
  }
}"#,
    )?;

    let cfg = load_from_path(&path)?;
    assert_eq!(cfg.logging.level, "info");

    let keys: Vec<String> =
        create_secure_headers(&cfg.headers)?.into_iter().map(|h| h.key).collect();
    assert_eq!(
        keys,
        vec![
            "Content-Security-Policy-Report-Only",
            "Expect-CT",
            "Strict-Transport-Security",
            "X-Frame-Options",
            "X-Download-Options",
            "X-XSS-Protection",
        ]
    );
    Ok(())
}

#[test]
fn rejects_invalid_header_options() -> TestResult {
    let dir = tempfile::tempdir()?;

    let unknown_value =
        write_config(&dir, "unknown.toml", "[headers]\nframeGuard = \"allow-all\"\n")?;
    assert!(matches!(load_from_path(&unknown_value), Err(SecureHeadersError::Config(_))));

    let unsafe_value =
        write_config(&dir, "unsafe.toml", "[headers]\nreferrerPolicy = \"unsafe-url\"\n")?;
    assert!(matches!(
        load_from_path(&unsafe_value),
        Err(SecureHeadersError::Config(msg)) if msg.contains("dangerous")
    ));

    let bad_uri = write_config(
        &dir,
        "bad-uri.toml",
        "[headers]\nxssProtection = [\"report\", { uri = \"/xss\" }]\n",
    )?;
    assert!(matches!(
        load_from_path(&bad_uri),
        Err(SecureHeadersError::Config(msg)) if msg.contains("Invalid URI")
    ));
    Ok(())
}

#[test]
fn rejects_unknown_keys() -> TestResult {
    let dir = tempfile::tempdir()?;

    for (name, contents) in [
        ("option.toml", "[headers]\nframeguard = false\n"),
        ("section.toml", "[header]\nframeGuard = false\n"),
        ("logging.toml", "[logging]\nlvl = \"debug\"\n"),
        (
            "sub-option.toml",
            "[headers]\nforceHTTPSRedirect = [true, { includeSubdomains = true }]\n",
        ),
    ] {
        let path = write_config(&dir, name, contents)?;
        assert!(
            matches!(load_from_path(&path), Err(SecureHeadersError::Config(_))),
            "expected a config error for {name}"
        );
    }
    Ok(())
}

#[test]
fn rejects_missing_file() {
    let missing = PathBuf::from("/nonexistent/secure-headers.toml");
    assert!(matches!(load_from_path(missing), Err(SecureHeadersError::Config(_))));
}

fn demo_config(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos/config").join(name)
}

#[test]
fn loads_demo_config() -> TestResult {
    let cfg = load_from_path(demo_config("basic.toml"))?;
    let headers = create_headers_object(&cfg.headers)?;
    assert_eq!(headers.get("Referrer-Policy").map(String::as_str), Some("same-origin"));
    assert_eq!(
        headers.get("Strict-Transport-Security").map(String::as_str),
        Some("max-age=345600; includeSubDomains")
    );
    Ok(())
}

#[test]
fn loads_full_demo_config() -> TestResult {
    let cfg = load_from_path(demo_config("full.json"))?;
    assert_eq!(cfg.logging.level, "debug");

    let headers = create_secure_headers(&cfg.headers)?;
    let pairs: Vec<(&str, &str)> =
        headers.iter().map(|h| (h.key.as_str(), h.value.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            (
                "Content-Security-Policy-Report-Only",
                "default-src 'self'; script-src 'self' https://cdn.example.com; base-uri 'self'; \
                 sandbox allow-forms allow-scripts; report-uri https://example.com/csp-report; \
                 report-to csp-endpoint",
            ),
            (
                "Expect-CT",
                "max-age=3600, enforce, report-uri=https://example.com/ct-report",
            ),
            (
                "Feature-Policy",
                "camera 'none'; geolocation 'self' https://maps.example.com; fullscreen *;",
            ),
            ("Strict-Transport-Security", "max-age=63072000; includeSubDomains; preload"),
            ("X-Frame-Options", "allow-from https://example.com/"),
            ("X-Download-Options", "noopen"),
            ("X-Content-Type-Options", "nosniff"),
            ("Referrer-Policy", "no-referrer, strict-origin-when-cross-origin"),
            ("X-XSS-Protection", "1; report=https://example.com/xss-report"),
        ]
    );
    Ok(())
}
