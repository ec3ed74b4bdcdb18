//! A width-aware JSON pretty printer: values whose compact form fits the
//! wrap width are inlined, everything else expands with 2-space indents.
//! Mapgen files conventionally keep row strings and short zone objects on
//! one line, which plain pretty printing would scatter.

use serde_json::Value;

const INDENT: usize = 2;

/// Renders `value` with the given wrap width (in columns).
pub fn to_pretty(value: &Value, width: usize) -> String {
    let mut out = String::new();
    write_value(value, 0, width, &mut out);
    out
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn write_value(value: &Value, indent: usize, width: usize, out: &mut String) {
    let compact = value.to_string();
    if is_scalar(value) || is_empty_container(value) || indent + compact.len() <= width {
        out.push_str(&compact);
        return;
    }
    match value {
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(indent + INDENT, out);
                write_value(item, indent + INDENT, width, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(indent, out);
            out.push(']');
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(indent + INDENT, out);
                let key_json = Value::String(key.clone()).to_string();
                out.push_str(&key_json);
                out.push_str(": ");
                write_value(item, indent + INDENT + key_json.len() + 2, width, out);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(indent, out);
            out.push('}');
        }
        _ => unreachable!("scalars are handled above"),
    }
}

fn push_indent(indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push(' ');
    }
}
