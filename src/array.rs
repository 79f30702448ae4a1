//! PostgreSQL array-literal parsing.
//!
//! This module provides [`parse_array`], a tolerant single-pass scanner for
//! the brace-delimited array text format (`{1,2,3}`, `{{1,2},{3,4}}`,
//! `{a,"b,c",NULL}`), and [`ArrayNode`], the raw parse tree it produces.
//!
//! ## Overview
//!
//! - **Single-pass parsing**: O(n) left-to-right scan with no backtracking
//! - **Raw output**: elements stay text; typed interpretation is the
//!   [coercer](crate::coerce)'s job
//! - **Tolerant**: malformed input never errors — unmatched braces are
//!   absorbed, extra closing braces are ignored
//! - **Null sentinel**: unquoted `NULL` is the null marker; quoted `"NULL"`
//!   is the three-character string
//!
//! Dimension-bound headers (`[0:3]={...}`) are recognized only to be
//! skipped; custom lower bounds are discarded.
//!
//! ## Usage
//!
//! ```rust
//! use pg_literal::{parse_array, ArrayNode};
//!
//! let nodes = parse_array("{1,NULL,3}", ',');
//! assert_eq!(
//!     nodes,
//!     vec![
//!         ArrayNode::Scalar("1".to_string()),
//!         ArrayNode::Null,
//!         ArrayNode::Scalar("3".to_string()),
//!     ]
//! );
//! ```

use std::fmt;

/// One node of a raw array parse tree.
///
/// Scalars are always raw text at this layer; no numeric or boolean
/// interpretation happens here.
///
/// # Examples
///
/// ```rust
/// use pg_literal::{parse_array, ArrayNode};
///
/// let nodes = parse_array("{{1,2},{3,4}}", ',');
/// assert!(nodes[0].is_array());
/// assert_eq!(nodes[0].as_array().unwrap()[0].as_str(), Some("1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayNode {
    /// The unquoted `NULL` sentinel.
    Null,
    /// A raw element, quotes and escapes already resolved.
    Scalar(String),
    /// A nested array.
    Array(Vec<ArrayNode>),
}

impl ArrayNode {
    /// Returns `true` if the node is the null sentinel.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, ArrayNode::Null)
    }

    /// Returns `true` if the node is a nested array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, ArrayNode::Array(_))
    }

    /// If the node is a scalar, returns its text. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArrayNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// If the node is a nested array, returns its elements. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<ArrayNode>> {
        match self {
            ArrayNode::Array(nodes) => Some(nodes),
            _ => None,
        }
    }

    fn needs_quotes(s: &str) -> bool {
        s.is_empty()
            || s == "NULL"
            || s.chars().any(|c| {
                c == ',' || c == '{' || c == '}' || c == '"' || c == '\\' || c.is_whitespace()
            })
    }
}

impl fmt::Display for ArrayNode {
    /// Renders the node back as comma-delimited array literal text.
    ///
    /// Scalars that contain structural characters (or that collide with the
    /// `NULL` sentinel) are quoted with `\`-escaping, so the output reparses
    /// to the same tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayNode::Null => write!(f, "NULL"),
            ArrayNode::Scalar(s) => {
                if Self::needs_quotes(s) {
                    f.write_str("\"")?;
                    for ch in s.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", ch)?;
                    }
                    f.write_str("\"")
                } else {
                    f.write_str(s)
                }
            }
            ArrayNode::Array(nodes) => {
                write!(
                    f,
                    "{{{}}}",
                    nodes
                        .iter()
                        .map(|n| n.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}

/// Joins top-level nodes back into a complete array literal.
///
/// # Examples
///
/// ```rust
/// use pg_literal::{parse_array, array_to_literal};
///
/// let nodes = parse_array("{1,NULL,\"a b\"}", ',');
/// assert_eq!(array_to_literal(&nodes), "{1,NULL,\"a b\"}");
/// ```
#[must_use]
pub fn array_to_literal(nodes: &[ArrayNode]) -> String {
    format!(
        "{{{}}}",
        nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",")
    )
}

/// Parses a PostgreSQL array literal into a tree of raw nodes.
///
/// The scan is best-effort and never fails: unmatched `{` leaves the frame
/// attached where it was opened, extra `}` is ignored, and a `\` escape
/// copies the following character verbatim regardless of quote state. Empty
/// input yields an empty sequence.
///
/// `delimiter` is the element separator, comma for every built-in type
/// except `box`.
///
/// # Examples
///
/// ```rust
/// use pg_literal::{parse_array, ArrayNode};
///
/// assert_eq!(parse_array("", ','), vec![]);
///
/// let nodes = parse_array("{\"NULL\"}", ',');
/// assert_eq!(nodes, vec![ArrayNode::Scalar("NULL".to_string())]);
/// ```
#[must_use]
pub fn parse_array(text: &str, delimiter: char) -> Vec<ArrayNode> {
    let mut root: Vec<ArrayNode> = Vec::new();
    if text.is_empty() {
        return root;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut buffer: Option<String> = None;
    let mut inside_quote = false;
    // distinguishes the NULL sentinel from the quoted string "NULL"
    let mut was_quoted = false;
    // Open frames. `None` marks the frame backed by the root sequence;
    // owned frames are attached to their parent when they close, and
    // still-open frames are attached at end of input.
    let mut frames: Vec<Option<Vec<ArrayNode>>> = Vec::new();

    let mut i = 0;
    if chars[0] == '[' {
        // Non-default bounds arrive as "[0:3]={...}". The bounds are
        // discarded; only the body after '=' is parsed.
        while i < chars.len() && chars[i] != '=' {
            i += 1;
        }
        if i < chars.len() {
            i += 1;
        }
    }

    while i < chars.len() {
        let ch = chars[i];
        if ch == '\\' {
            // escape consumes the next character as a literal
            i += 1;
            if i < chars.len() {
                if let Some(buf) = buffer.as_mut() {
                    buf.push(chars[i]);
                }
            }
        } else if !inside_quote && ch == '{' {
            if frames.is_empty() {
                trace_dimensions(&chars, i);
            }
            frames.push(if frames.is_empty() {
                None
            } else {
                Some(Vec::new())
            });
            buffer = Some(String::new());
        } else if ch == '"' {
            inside_quote = !inside_quote;
            was_quoted = true;
        } else if !inside_quote && ch.is_whitespace() {
            // skipped outside quotes
        } else if (!inside_quote && (ch == delimiter || ch == '}')) || i == chars.len() - 1 {
            // element end, array end, or end of input
            if ch != '"' && ch != '}' && ch != delimiter {
                if let Some(buf) = buffer.as_mut() {
                    buf.push(ch);
                }
            }

            if let Some(buf) = buffer.take() {
                if !buf.is_empty() || was_quoted {
                    let node = if !was_quoted && buf == "NULL" {
                        ArrayNode::Null
                    } else {
                        ArrayNode::Scalar(buf)
                    };
                    push_element(&mut root, &mut frames, node);
                }
            }

            was_quoted = false;
            buffer = Some(String::new());

            if ch == '}' {
                close_frame(&mut root, &mut frames);
                buffer = None;
            }
        } else if let Some(buf) = buffer.as_mut() {
            buf.push(ch);
        }
        i += 1;
    }

    // Unterminated frames keep the elements collected so far.
    while !frames.is_empty() {
        close_frame(&mut root, &mut frames);
    }

    root
}

fn push_element(root: &mut Vec<ArrayNode>, frames: &mut [Option<Vec<ArrayNode>>], node: ArrayNode) {
    match frames.last_mut() {
        Some(Some(frame)) => frame.push(node),
        _ => root.push(node),
    }
}

fn close_frame(root: &mut Vec<ArrayNode>, frames: &mut Vec<Option<Vec<ArrayNode>>>) {
    // popping with no open frame is a tolerated extra '}'
    if let Some(Some(items)) = frames.pop() {
        push_element(root, frames, ArrayNode::Array(items));
    }
}

/// Counts the run of opening braces past whitespace at the start of the
/// literal. The count is nominal dimensionality and is reported only through
/// the trace log; nothing downstream consumes it.
fn trace_dimensions(chars: &[char], open: usize) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    let mut dimensions = 1;
    let mut t = open + 1;
    while t < chars.len() {
        if chars[t].is_whitespace() {
            t += 1;
        } else if chars[t] == '{' {
            dimensions += 1;
            t += 1;
        } else {
            break;
        }
    }
    log::trace!("array literal opens {} nominal dimension(s)", dimensions);
}
