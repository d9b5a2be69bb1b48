use serde_json::Value;

/// Normalize a "one or many" value into a list
///
/// Arrays are returned element by element; any other value becomes a single-element list.
pub fn wrap_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(values) => values,
        other => vec![other],
    }
}
