//! Writing [Value]s back as notation.
//!
//! Numbers use four decimals with trailing zeros (and a trailing point)
//! stripped. Strings cannot contain the reserved characters literally, so they
//! are split around them and glued back with `&` and named constants.

use crate::value::{Map, Scalar, Value};

/// The text `PI` turns into when it is concatenated into a string.
pub const PI_TEXT: &str = "3.1416";

const RESERVED: &[(&str, &str)] = &[
    ("\"", "QUOTE"),
    ("\t", "TAB"),
    ("\r", "RETURN"),
    ("\n", "NEWLINE"),
    ("\u{8}", "BACKSPACE"),
    (PI_TEXT, "PI"),
];

pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

pub fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Scalar(scalar) => write_scalar(out, scalar),
        Value::List(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Map(map) => write_map(out, map),
    }
}

fn write_map(out: &mut String, map: &Map) {
    if map.is_empty() {
        out.push_str("[:]");
        return;
    }

    out.push('[');
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        if is_symbol(key) {
            out.push('#');
            out.push_str(key);
        } else {
            write_str(out, key);
        }
        out.push_str(": ");
        write_value(out, value);
    }
    out.push(']');
}

/// Same character rule as the lexer uses after `#`.
fn is_symbol(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn write_scalar(out: &mut String, scalar: &Scalar) {
    match scalar {
        Scalar::Int(i) => out.push_str(&i.to_string()),
        Scalar::Float(f) => out.push_str(&format_number(*f)),
        Scalar::Str(s) => write_str(out, s),
        Scalar::Point(p) => {
            out.push_str(&format!(
                "point({}, {})",
                format_number(p.x),
                format_number(p.y)
            ));
        }
        Scalar::Color(c) => {
            let [r, g, b] = c.to_rgb255();
            out.push_str(&format!(
                "color({}, {}, {})",
                format_number(r),
                format_number(g),
                format_number(b)
            ));
        }
        Scalar::Rect(r) => {
            out.push_str(&format!(
                "rect({}, {}, {}, {})",
                format_number(r.min.x),
                format_number(r.min.y),
                format_number(r.max.x),
                format_number(r.max.y)
            ));
        }
    }
}

/// Formats a float with four decimals, dropping trailing zeros and the point
/// when nothing is left after it.
pub fn format_number(f: f64) -> String {
    if !f.is_finite() {
        return "0".to_string();
    }
    let text = format!("{f:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        _ => text.to_string(),
    }
}

fn write_str(out: &mut String, s: &str) {
    let mut pieces = Vec::new();
    let mut rest = s;
    loop {
        let next = RESERVED
            .iter()
            .filter_map(|(pat, name)| rest.find(pat).map(|at| (at, *pat, *name)))
            .min_by_key(|(at, _, _)| *at);
        let Some((at, pat, name)) = next else {
            break;
        };
        if at > 0 {
            pieces.push(format!("\"{}\"", &rest[..at]));
        }
        pieces.push(name.to_string());
        rest = &rest[at + pat.len()..];
    }
    if !rest.is_empty() || pieces.is_empty() {
        pieces.push(format!("\"{rest}\""));
    }
    // A lone PI would read back as a number.
    if pieces == ["PI"] {
        pieces.insert(0, "\"\"".to_string());
    }
    out.push_str(&pieces.join(" & "));
}

/// The text a value contributes to a `&` concatenation.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Scalar(Scalar::Str(s)) => s.clone(),
        Value::Scalar(Scalar::Int(i)) => i.to_string(),
        Value::Scalar(Scalar::Float(f)) => format_number(*f),
        other => to_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(2.123456), "2.1235");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn strings_escape_reserved() {
        assert_eq!(to_string(&Value::from("")), "\"\"");
        assert_eq!(to_string(&Value::from("a\"b")), "\"a\" & QUOTE & \"b\"");
        assert_eq!(to_string(&Value::from("\t")), "TAB");
        assert_eq!(
            to_string(&Value::from("x3.1416\r\n")),
            "\"x\" & PI & RETURN & NEWLINE"
        );
    }

    #[test]
    fn maps() {
        let mut map = Map::new();
        assert_eq!(to_string(&Value::Map(map.clone())), "[:]");
        map.set("nm", "Test");
        map.set("two words", 1);
        assert_eq!(
            to_string(&Value::Map(map)),
            "[#nm: \"Test\", \"two words\": 1]"
        );
    }
}
