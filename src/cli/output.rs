//! Pretty-printing of response bodies.

use serde::Serialize;
use serde_json::Value;

/// Render a JSON value with 4-space indentation, trailing newline included.
pub fn to_pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut serializer).is_err() {
        return format!("{value}\n");
    }
    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    out
}

/// Print a response body as pretty JSON, or as YAML when requested
/// (more compact for deeply nested wallet objects).
pub fn print_body(value: &Value, yaml: bool) {
    if yaml {
        match serde_yaml::to_string(value) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                tracing::error!("failed to render response as YAML: {e}");
                print!("{}", to_pretty_json(value));
            }
        }
    } else {
        print!("{}", to_pretty_json(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_indents_with_four_spaces() {
        let rendered = to_pretty_json(&json!({"a": [1, 2]}));
        assert_eq!(rendered, "{\n    \"a\": [\n        1,\n        2\n    ]\n}\n");
    }
}
