use serde_json::Value;

/// Walk `path` into a nested payload.
///
/// Any missing segment, non-object intermediate, or explicit `null` leaf
/// yields `None` rather than an error.
pub fn get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = current.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Like [`get`], but stringifies the leaf. Numbers are rendered in plain
/// decimal form so numeric ids survive as strings.
pub fn get_str(value: &Value, path: &[&str]) -> Option<String> {
    match get(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
