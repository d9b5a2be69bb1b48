//! Shape checks for options read from dynamic configuration values.

use serde_json::{Map, Value};

use super::wrap_array;
use crate::error::{Result, SecureHeadersError};

pub(crate) type SubOptions = Map<String, Value>;

/// Split a `[primary]` or `[primary, { ... }]` tuple. Returns `None` when `value` is not an array.
pub(crate) fn split_tuple<'a>(
    header: &'static str,
    value: &'a Value,
) -> Result<Option<(&'a Value, Option<&'a SubOptions>)>> {
    let Value::Array(items) = value else {
        return Ok(None);
    };

    match items.as_slice() {
        [primary] => Ok(Some((primary, None))),
        [primary, Value::Null] => Ok(Some((primary, None))),
        [primary, Value::Object(options)] => Ok(Some((primary, Some(options)))),
        _ => Err(SecureHeadersError::invalid_option(header, value)),
    }
}

/// Reject sub-option keys outside `allowed`, so a misspelled flag is not silently dropped.
pub(crate) fn known_keys(
    header: &'static str,
    options: Option<&SubOptions>,
    allowed: &[&str],
) -> Result<()> {
    match options.and_then(|o| o.keys().find(|key| !allowed.contains(&key.as_str()))) {
        Some(key) => {
            Err(SecureHeadersError::invalid_option(header, format!("unknown key \"{key}\"")))
        }
        None => Ok(()),
    }
}

pub(crate) fn bool_field(
    header: &'static str,
    options: Option<&SubOptions>,
    key: &str,
) -> Result<bool> {
    match options.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(SecureHeadersError::invalid_option(header, format!("{key}={other}"))),
    }
}

pub(crate) fn number_field(
    header: &'static str,
    options: Option<&SubOptions>,
    key: &str,
) -> Result<Option<f64>> {
    match options.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| SecureHeadersError::invalid_option(header, format!("{key}={n}"))),
        Some(other) => Err(SecureHeadersError::invalid_option(header, format!("{key}={other}"))),
    }
}

pub(crate) fn string_field(
    header: &'static str,
    options: Option<&SubOptions>,
    key: &str,
) -> Result<Option<String>> {
    match options.and_then(|o| o.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SecureHeadersError::invalid_option(header, format!("{key}={other}"))),
    }
}

/// Read a required string sub-option, e.g. `uri` in `["allow-from", { uri }]`.
pub(crate) fn required_string_field(
    header: &'static str,
    options: Option<&SubOptions>,
    key: &str,
) -> Result<String> {
    string_field(header, options, key)?
        .ok_or_else(|| SecureHeadersError::invalid_option(header, format!("missing \"{key}\"")))
}

/// Read a string or list of strings.
pub(crate) fn string_list(header: &'static str, value: &Value) -> Result<Vec<String>> {
    wrap_array(value.clone())
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(SecureHeadersError::invalid_option(header, other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

    #[test]
    fn test_split_tuple_shapes() -> TestResult {
        assert!(split_tuple("X", &json!("deny"))?.is_none());

        let value = json!([true]);
        assert_eq!(split_tuple("X", &value)?, Some((&json!(true), None)));

        let value = json!([true, { "preload": true }]);
        let (primary, options) = split_tuple("X", &value)?.ok_or("expected a tuple")?;
        assert_eq!(primary, &json!(true));
        assert!(bool_field("X", options, "preload")?);
        Ok(())
    }

    #[test]
    fn test_split_tuple_rejects_malformed() {
        assert!(split_tuple("X", &json!([])).is_err());
        assert!(split_tuple("X", &json!([true, 1])).is_err());
        assert!(split_tuple("X", &json!([true, {}, {}])).is_err());
    }

    #[test]
    fn test_field_type_checks() {
        let value = json!({ "flag": "yes", "age": "1", "uri": 3 });
        let options = value.as_object();
        assert!(bool_field("X", options, "flag").is_err());
        assert!(number_field("X", options, "age").is_err());
        assert!(string_field("X", options, "uri").is_err());
        assert!(matches!(bool_field("X", options, "missing"), Ok(false)));
        assert!(matches!(
            required_string_field("X", None, "uri"),
            Err(SecureHeadersError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_known_keys() {
        let value = json!({ "includeSubdomains": true });
        let options = value.as_object();
        assert!(known_keys("X", None, &["preload"]).is_ok());
        assert!(known_keys("X", options, &["includeSubdomains"]).is_ok());
        assert!(matches!(
            known_keys("X", options, &["includeSubDomains", "preload"]),
            Err(SecureHeadersError::InvalidOption { ref value, .. })
                if value.contains("includeSubdomains")
        ));
    }

    #[test]
    fn test_string_list() {
        assert!(matches!(string_list("X", &json!("a")), Ok(v) if v == vec!["a".to_string()]));
        assert!(matches!(string_list("X", &json!(["a", "b"])), Ok(v) if v.len() == 2));
        assert!(string_list("X", &json!(["a", 1])).is_err());
    }
}
