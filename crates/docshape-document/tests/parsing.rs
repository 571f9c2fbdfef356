//! Tests for parsing document text
//!
//! Covers:
//! - Shell-style relaxed syntax (bare keys, single quotes)
//! - Nested documents and arrays
//! - String escapes and non-finite numbers
//! - Malformed input and error offsets
//! - Canonical text re-parsing

use docshape_document::{parse_document, Document, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn test_projection_shape() {
    let doc = parse_document(r#"{"name": 1, "_id": 0}"#).unwrap();
    assert_eq!(doc, Document::new().with("name", 1).with("_id", 0));
}

#[test]
fn test_bare_keys_and_single_quotes() {
    let doc = parse_document("{ score: { $meta: 'textScore' }, 'tags': { $slice: [2, 5] } }").unwrap();

    let expected = Document::new()
        .with("score", Document::new().with("$meta", "textScore"))
        .with("tags", Document::new().with("$slice", vec![2, 5]));
    assert_eq!(doc, expected);
}

#[test]
fn test_dotted_bare_key() {
    let doc = parse_document("{address.city: 1}").unwrap();
    assert_eq!(doc.get("address.city"), Some(&Value::Int32(1)));
}

#[test]
fn test_scalar_kinds() {
    let doc = parse_document(
        r#"{ a: null, b: true, c: false, d: -7, e: 9000000000, f: 1.25, g: "x\ty", h: [] }"#,
    )
    .unwrap();

    assert_eq!(doc.get("a"), Some(&Value::Null));
    assert_eq!(doc.get("b"), Some(&Value::Boolean(true)));
    assert_eq!(doc.get("c"), Some(&Value::Boolean(false)));
    assert_eq!(doc.get("d"), Some(&Value::Int32(-7)));
    assert_eq!(doc.get("e"), Some(&Value::Int64(9_000_000_000)));
    assert_eq!(doc.get("f"), Some(&Value::Double(1.25)));
    assert_eq!(doc.get("g"), Some(&Value::from("x\ty")));
    assert_eq!(doc.get("h"), Some(&Value::Array(vec![])));
}

#[test]
fn test_trailing_commas() {
    let doc = parse_document("{ a: [1, 2,], b: 2, }").unwrap();
    assert_eq!(doc, Document::new().with("a", vec![1, 2]).with("b", 2));
}

#[test]
fn test_duplicate_key_keeps_last() {
    let doc = parse_document("{ a: 1, b: 2, a: 3 }").unwrap();
    assert_eq!(doc, Document::new().with("a", 3).with("b", 2));
}

#[test]
fn test_empty_document_with_whitespace() {
    let doc = parse_document("  \n{ }\t ").unwrap();
    assert!(doc.is_empty());
}

#[test]
fn test_from_str() {
    let doc: Document = "{x: 1}".parse().unwrap();
    assert_eq!(doc, Document::new().with("x", 1));
}

#[rstest]
#[case::unterminated("{not json")]
#[case::empty("")]
#[case::blank("   ")]
#[case::missing_colon("{ a 1 }")]
#[case::missing_value("{ a: }")]
#[case::unclosed_string("{ a: 'x }")]
#[case::top_level_array("[1, 2]")]
#[case::trailing_input("{ a: 1 } extra")]
#[case::lone_comma("{ , }")]
#[case::bad_literal("{ a: maybe }")]
fn test_malformed_text(#[case] text: &str) {
    assert!(
        parse_document(text).is_err(),
        "expected '{}' to be rejected",
        text
    );
}

#[rstest]
#[case::newline(r#""a\nb""#, "a\nb")]
#[case::tab(r#""a\tb""#, "a\tb")]
#[case::carriage_return(r#""a\rb""#, "a\rb")]
#[case::backspace(r#""x\by""#, "x\u{8}y")]
#[case::form_feed(r#""x\fy""#, "x\u{c}y")]
#[case::nul(r#""x\0y""#, "x\0y")]
#[case::solidus(r#""a\/b""#, "a/b")]
#[case::backslash(r#""a\\b""#, "a\\b")]
#[case::double_quote(r#""a\"b""#, "a\"b")]
#[case::single_quote(r#"'a\'b'"#, "a'b")]
#[case::unicode(r#""\u0041""#, "A")]
#[case::unicode_lowercase_hex(r#""\u00e9""#, "\u{e9}")]
#[case::surrogate_pair(r#""\ud83d\ude00""#, "\u{1F600}")]
fn test_string_escapes(#[case] literal: &str, #[case] expected: &str) {
    let doc = parse_document(&format!("{{ n: {} }}", literal)).unwrap();
    assert_eq!(doc.get("n"), Some(&Value::from(expected)));
}

#[rstest]
#[case::unknown_escape(r#"{ n: "\q" }"#)]
#[case::short_unicode(r#"{ n: "\u00" }"#)]
#[case::non_hex_unicode(r#"{ n: "\u00zz" }"#)]
#[case::lone_high_surrogate(r#"{ n: "\ud83d" }"#)]
#[case::lone_low_surrogate(r#"{ n: "\ude00" }"#)]
#[case::bad_low_surrogate(r#"{ n: "\ud83dA" }"#)]
fn test_invalid_escapes(#[case] text: &str) {
    assert!(
        parse_document(text).is_err(),
        "expected '{}' to be rejected",
        text
    );
}

#[test]
fn test_escaped_text_renders_back() {
    let doc = parse_document(r#"{ "k\u0001" : "x\by\fz" }"#).unwrap();
    assert_eq!(parse_document(&doc.to_string()).unwrap(), doc);
}

#[test]
fn test_non_finite_doubles() {
    let doc = parse_document("{ a: Infinity, b: -Infinity, c: NaN }").unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Double(f64::INFINITY)));
    assert_eq!(doc.get("b"), Some(&Value::Double(f64::NEG_INFINITY)));
    assert!(doc.get("c").and_then(Value::as_f64).is_some_and(f64::is_nan));

    let written = Document::new()
        .with("a", f64::INFINITY)
        .with("b", f64::NEG_INFINITY);
    assert_eq!(parse_document(&written.to_string()).unwrap(), written);
}

#[test]
fn test_integer_past_i64_becomes_double() {
    let doc = parse_document("{a: 18446744073709551616}").unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Double(18_446_744_073_709_551_616.0)));
}

#[test]
fn test_error_offset_points_past_valid_prefix() {
    let err = parse_document("{ a: 1, b 2 }").unwrap_err();
    assert!(err.offset >= "{ a: 1, b".len(), "offset was {}", err.offset);
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i32>().prop_map(Value::Int32),
        (i64::from(i32::MAX) + 1..i64::MAX).prop_map(Value::Int64),
        "[a-zA-Z0-9 '\"\\\\]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z_$][a-z0-9_.]{0,6}", inner), 0..4)
                .prop_map(|entries| Value::Document(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn canonical_text_parses_back(
        entries in prop::collection::vec(("[a-z_$][a-z0-9_]{0,8}", arb_value()), 0..6)
    ) {
        let doc: Document = entries.into_iter().collect();
        let reparsed = parse_document(&doc.to_string()).unwrap();
        prop_assert_eq!(reparsed, doc);
    }
}
