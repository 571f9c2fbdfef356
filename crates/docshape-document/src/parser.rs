//! Relaxed JSON document parser using winnow
//!
//! Accepts the shell flavour of JSON used to write query shapes by hand:
//! - bare keys (`{name: 1}`) as well as quoted ones
//! - single- or double-quoted strings with JSON backslash escapes,
//!   including `\uXXXX` and surrogate pairs
//! - Int32/Int64/Double numbers, `Infinity`, `-Infinity`, `NaN`,
//!   `true`, `false`, `null`
//! - trailing commas inside documents and arrays

use crate::{Document, ParseError, Value};
use std::str::FromStr;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, cut_err, fail, opt, separated};
use winnow::error::{ContextError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

type Input<'a> = &'a str;

/// Parse document text into a [`Document`]
///
/// The top-level value must be a document and nothing but whitespace may
/// follow it.
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    top_level
        .parse(text)
        .map_err(|e| ParseError::new(e.offset(), describe(e.inner())))
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_document(s)
    }
}

fn describe(error: &ContextError) -> String {
    let message = error.to_string();
    if message.is_empty() {
        "unexpected input".to_string()
    } else {
        message
    }
}

fn top_level<'a>(input: &mut Input<'a>) -> ModalResult<Document> {
    ws(input)?;
    let doc = document(input)?;
    ws(input)?;
    Ok(doc)
}

fn ws<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn lit<'a>(mut expected: char) -> impl FnMut(&mut Input<'a>) -> ModalResult<char> {
    move |input: &mut Input<'a>| expected.parse_next(input)
}

fn closing<'a>(expected: char) -> impl FnMut(&mut Input<'a>) -> ModalResult<char> {
    move |input: &mut Input<'a>| {
        cut_err(lit(expected))
            .context(StrContext::Expected(StrContextValue::CharLiteral(expected)))
            .parse_next(input)
    }
}

fn comma<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    ws(input)?;
    lit(',').parse_next(input)?;
    ws(input)
}

fn document<'a>(input: &mut Input<'a>) -> ModalResult<Document> {
    lit('{').parse_next(input)?;
    ws(input)?;

    let entries: Vec<(String, Value)> = separated(0.., entry, comma).parse_next(input)?;

    ws(input)?;
    if !entries.is_empty() {
        opt(lit(',')).parse_next(input)?;
        ws(input)?;
    }
    closing('}').parse_next(input)?;

    Ok(entries.into_iter().collect())
}

fn entry<'a>(input: &mut Input<'a>) -> ModalResult<(String, Value)> {
    let key = alt((string_literal, bare_key)).parse_next(input)?;
    ws(input)?;
    cut_err(lit(':'))
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    ws(input)?;
    let parsed = cut_err(value).parse_next(input)?;
    Ok((key, parsed))
}

fn bare_key<'a>(input: &mut Input<'a>) -> ModalResult<String> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '-')
    })
    .map(String::from)
    .context(StrContext::Label("key"))
    .parse_next(input)
}

fn value<'a>(input: &mut Input<'a>) -> ModalResult<Value> {
    alt((
        document.map(Value::Document),
        array,
        string_literal.map(Value::String),
        number,
        keyword,
    ))
    .context(StrContext::Label("value"))
    .parse_next(input)
}

fn array<'a>(input: &mut Input<'a>) -> ModalResult<Value> {
    lit('[').parse_next(input)?;
    ws(input)?;

    let items: Vec<Value> = separated(0.., value, comma).parse_next(input)?;

    ws(input)?;
    if !items.is_empty() {
        opt(lit(',')).parse_next(input)?;
        ws(input)?;
    }
    closing(']').parse_next(input)?;

    Ok(Value::Array(items))
}

fn next_char<'a>(input: &mut Input<'a>) -> ModalResult<char> {
    any.parse_next(input)
}

fn quote<'a>(input: &mut Input<'a>) -> ModalResult<char> {
    one_of(['"', '\'']).parse_next(input)
}

fn string_literal<'a>(input: &mut Input<'a>) -> ModalResult<String> {
    let delimiter = quote(input)?;
    let mut text = String::new();
    loop {
        let c = cut_err(next_char)
            .context(StrContext::Expected(StrContextValue::CharLiteral(delimiter)))
            .parse_next(input)?;
        match c {
            c if c == delimiter => return Ok(text),
            '\\' => {
                let escaped = cut_err(escape)
                    .context(StrContext::Expected(StrContextValue::Description(
                        "escape sequence",
                    )))
                    .parse_next(input)?;
                text.push(escaped);
            }
            c => text.push(c),
        }
    }
}

fn escape<'a>(input: &mut Input<'a>) -> ModalResult<char> {
    match next_char(input)? {
        'n' => Ok('\n'),
        't' => Ok('\t'),
        'r' => Ok('\r'),
        'b' => Ok('\u{8}'),
        'f' => Ok('\u{c}'),
        '0' => Ok('\0'),
        c @ ('"' | '\'' | '\\' | '/') => Ok(c),
        'u' => unicode_escape(input),
        _ => fail(input),
    }
}

/// The `XXXX` of `\uXXXX`, joined with a following low surrogate if needed
fn unicode_escape<'a>(input: &mut Input<'a>) -> ModalResult<char> {
    let high = hex4(input)?;
    let code = if (0xD800..0xDC00).contains(&high) {
        unicode_prefix(input)?;
        let low = hex4
            .verify(|low: &u32| (0xDC00..0xE000).contains(low))
            .parse_next(input)?;
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else {
        high
    };
    match char::from_u32(code) {
        Some(c) => Ok(c),
        None => fail(input),
    }
}

fn unicode_prefix<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    "\\u".void().parse_next(input)
}

fn hex4<'a>(input: &mut Input<'a>) -> ModalResult<u32> {
    take_while(4, |c: char| c.is_ascii_hexdigit())
        .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok())
        .parse_next(input)
}

fn number<'a>(input: &mut Input<'a>) -> ModalResult<Value> {
    take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
    })
    .verify_map(number_value)
    .parse_next(input)
}

fn number_value(text: &str) -> Option<Value> {
    if !text.contains(['.', 'e', 'E']) {
        if let Ok(n) = text.parse::<i64>() {
            return Some(i32::try_from(n).map_or(Value::Int64(n), Value::Int32));
        }
    }
    // Integers past the i64 range fall back to doubles
    text.parse::<f64>().ok().map(Value::Double)
}

fn keyword<'a>(input: &mut Input<'a>) -> ModalResult<Value> {
    alt((
        "true".value(Value::Boolean(true)),
        "false".value(Value::Boolean(false)),
        "null".value(Value::Null),
        "Infinity".value(Value::Double(f64::INFINITY)),
        "-Infinity".value(Value::Double(f64::NEG_INFINITY)),
        "NaN".value(Value::Double(f64::NAN)),
    ))
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_classification() {
        assert_eq!(number_value("1"), Some(Value::Int32(1)));
        assert_eq!(number_value("-2147483649"), Some(Value::Int64(-2147483649)));
        assert_eq!(number_value("1.5"), Some(Value::Double(1.5)));
        assert_eq!(number_value("2e3"), Some(Value::Double(2000.0)));
        assert_eq!(number_value("--1"), None);
    }

    #[test]
    fn test_number_overflow_becomes_double() {
        assert_eq!(
            number_value("18446744073709551616"),
            Some(Value::Double(18446744073709551616.0))
        );
    }

    #[test]
    fn test_escape() {
        let mut input = "u0041";
        assert_eq!(escape(&mut input), Ok('A'));
        let mut input = "ud83d\\ude00";
        assert_eq!(escape(&mut input), Ok('\u{1F600}'));
        let mut input = "q";
        assert!(escape(&mut input).is_err());
    }
}
