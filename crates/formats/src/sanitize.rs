use serde_json::{Map, Value};

/// Collapses literal `{{` to `{` and `}}` to `}` in a single left-to-right
/// pass per pattern. Template engines downstream treat doubled braces as
/// expression delimiters.
pub fn collapse_braces(text: &str) -> String {
    if !text.contains("{{") && !text.contains("}}") {
        return text.to_string();
    }
    text.replace("{{", "{").replace("}}", "}")
}

/// Applies [`collapse_braces`] to every string inside `value`, descending
/// into arrays and objects. Object keys are left alone.
pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains("{{") || s.contains("}}") {
                *s = collapse_braces(s);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => sanitize_properties(map),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

pub fn sanitize_properties(properties: &mut Map<String, Value>) {
    for value in properties.values_mut() {
        sanitize_value(value);
    }
}
