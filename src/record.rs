//! Composite record (row) literal parsing and formatting.
//!
//! A record literal is one parenthesized, comma-separated, double-quoted
//! line: `("a","NULL","b,c")`. This module provides [`parse_record`] and
//! [`format_record`] for that format. The [coercer](crate::coerce) also
//! reuses [`parse_record`] to split the body of a bracketed array literal
//! into element fragments; that shared splitting strategy is deliberate and
//! is distinct from the quoting/escaping rules of
//! [`parse_array`](crate::parse_array).
//!
//! ## Quoting rules
//!
//! - Fields containing the delimiter, a quote, or a newline must be quoted.
//! - A literal quote inside a quoted field is written doubled (`""`).
//! - A backslash escapes the following character, inside or outside quotes.
//! - An unterminated quoted region is a hard [`Error::UnterminatedQuote`].
//!
//! ## Null lossiness
//!
//! `format_record` writes a stored null as the bare text `NULL`; parsing
//! that back yields the four-character string, not a null. The codec cannot
//! tell them apart unless the text was quoted. This asymmetry is a
//! documented limitation of the format, not a defect.
//!
//! ```rust
//! use pg_literal::{format_record, parse_record, Value};
//!
//! let line = format_record(&[Value::from("a"), Value::Null, Value::from("b,c")]);
//! let fields = parse_record(&line).unwrap();
//! assert_eq!(fields, vec!["a", "NULL", "b,c"]);
//! ```

use crate::error::{Error, Result};
use crate::value::Value;

/// Parses a record literal into its raw field strings.
///
/// Empty input yields an empty sequence. A single wrapping `(...)` pair is
/// stripped before splitting, so the output of [`format_record`] parses
/// directly; bare field lists (as handed over by the coercer for array
/// bodies) parse unchanged.
///
/// # Errors
///
/// Returns [`Error::UnterminatedQuote`] when a quoted region never closes.
///
/// # Examples
///
/// ```rust
/// use pg_literal::parse_record;
///
/// assert_eq!(parse_record("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_record("a,b").unwrap(), vec!["a", "b"]);
/// assert_eq!(parse_record("(\"a\",\"b,c\")").unwrap(), vec!["a", "b,c"]);
/// ```
pub fn parse_record(text: &str) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let (inner, offset) = strip_parens(text);
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let chars: Vec<char> = inner.chars().collect();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_open = 0;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '\\' {
            // escape consumes the next character as a literal
            i += 1;
            if i < chars.len() {
                field.push(chars[i]);
            }
        } else if in_quotes {
            if ch == '"' {
                if chars.get(i + 1) == Some(&'"') {
                    // doubled quote inside a quoted field
                    field.push('"');
                    i += 1;
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' {
            // whitespace between a delimiter and an opening quote is dropped
            if field.chars().all(char::is_whitespace) {
                field.clear();
            }
            in_quotes = true;
            quote_open = offset + i;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
        i += 1;
    }

    if in_quotes {
        return Err(Error::unterminated_quote(quote_open));
    }
    fields.push(field);
    Ok(fields)
}

/// Formats values as a parenthesized record literal.
///
/// Null values render as the bare text `NULL`; every other value uses its
/// `Display` text. Every field is quoted, embedded quotes are doubled and
/// backslashes escaped, so [`parse_record`] recovers each field verbatim —
/// except that a null comes back as the literal string `"NULL"`.
///
/// # Examples
///
/// ```rust
/// use pg_literal::{format_record, Value};
///
/// let line = format_record(&[Value::Int(1), Value::Null]);
/// assert_eq!(line, "(\"1\",\"NULL\")");
/// ```
#[must_use]
pub fn format_record(values: &[Value]) -> String {
    let mut line = String::with_capacity(values.len() * 8);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push('"');
        // Value::Null displays as NULL
        for ch in value.to_string().chars() {
            match ch {
                '"' => line.push_str("\"\""),
                '\\' => line.push_str("\\\\"),
                _ => line.push(ch),
            }
        }
        line.push('"');
    }
    format!("({})", line.trim_end())
}

fn strip_parens(text: &str) -> (&str, usize) {
    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        (&text[1..text.len() - 1], 1)
    } else {
        (text, 0)
    }
}
