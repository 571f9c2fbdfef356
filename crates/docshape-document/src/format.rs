//! Canonical text form of documents
//!
//! Output is relaxed JSON with spaced separators, e.g.
//! `{ "name" : 1, "_id" : 0 }`, and parses back through
//! [`crate::parse_document`].

use crate::{Document, Value};
use std::fmt;

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write_string(f, key)?;
            write!(f, " : {}", value)?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Double(d) if d.is_nan() => write!(f, "NaN"),
            Value::Double(d) if d.is_infinite() => {
                write!(f, "{}", if *d > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Debug keeps the fractional part so doubles stay doubles on re-parse
            Value::Double(d) => write!(f, "{:?}", d),
            Value::String(s) => write_string(f, s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Document(doc) => write!(f, "{}", doc),
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            '\r' => write!(f, "\\r")?,
            '\u{8}' => write!(f, "\\b")?,
            '\u{c}' => write!(f, "\\f")?,
            c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_flat() {
        let doc = Document::new().with("name", 1).with("_id", 0);
        assert_eq!(doc.to_string(), r#"{ "name" : 1, "_id" : 0 }"#);
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Document::new().to_string(), "{ }");
    }

    #[test]
    fn test_display_non_finite_and_control() {
        let doc = Document::new()
            .with("a", f64::INFINITY)
            .with("b", f64::NEG_INFINITY)
            .with("c", f64::NAN)
            .with("d", "x\u{8}\u{1}y");
        assert_eq!(
            doc.to_string(),
            r#"{ "a" : Infinity, "b" : -Infinity, "c" : NaN, "d" : "x\b\u0001y" }"#
        );
    }

    #[test]
    fn test_display_nested_and_escaped() {
        let doc = Document::new()
            .with("tags", vec!["a\"b", "c"])
            .with("score", Document::new().with("$meta", "textScore"))
            .with("ratio", 2.0);
        assert_eq!(
            doc.to_string(),
            r#"{ "tags" : ["a\"b", "c"], "score" : { "$meta" : "textScore" }, "ratio" : 2.0 }"#
        );
    }
}
