//! Error and diagnostic types for literal parsing and value coercion.
//!
//! The subsystem is deliberately tolerant: most malformed input degrades to a
//! documented fallback value rather than failing. The types here split the
//! remaining failure surface in two:
//!
//! - [`Error`]: hard failures that are returned to the caller — malformed
//!   composite-record quoting and irrecoverable handler/extraction failures.
//! - [`Diagnostic`]: "log and continue" events — the coercer emits one of
//!   these, mirrors it to the [`log`] facade, and keeps going with a null
//!   result instead of raising.
//!
//! ## Examples
//!
//! ```rust
//! use pg_literal::{parse_record, Error};
//!
//! let result = parse_record("\"unterminated");
//! assert!(matches!(result, Err(Error::UnterminatedQuote { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all hard failures of the literal codec and coercer.
///
/// Tolerated conditions (unmatched braces, unparseable numbers, failed
/// component-type lookups) never surface here; see [`Diagnostic`].
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A quoted region in a composite-record literal was never closed.
    #[error("unterminated quote in record literal at offset {position}")]
    UnterminatedQuote { position: usize },

    /// Splitting the element text of an array literal failed.
    #[error("error extracting array '{type_name}' items: {source}")]
    ArrayExtraction {
        type_name: String,
        #[source]
        source: Box<Error>,
    },

    /// An external value handler failed to convert text into a typed value.
    #[error("conversion failed for type '{type_name}': {msg}")]
    Conversion { type_name: String, msg: String },

    /// Custom error.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unterminated-quote error at the given character offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pg_literal::Error;
    ///
    /// let err = Error::unterminated_quote(7);
    /// assert!(err.to_string().contains("offset 7"));
    /// ```
    pub fn unterminated_quote(position: usize) -> Self {
        Error::UnterminatedQuote { position }
    }

    /// Wraps a record-codec failure that aborted array element extraction.
    pub fn array_extraction(type_name: &str, source: Error) -> Self {
        Error::ArrayExtraction {
            type_name: type_name.to_string(),
            source: Box::new(source),
        }
    }

    /// Creates a conversion error for a failed value-handler call.
    pub fn conversion(type_name: &str, msg: &str) -> Self {
        Error::Conversion {
            type_name: type_name.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pg_literal::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable condition the coercer reports without failing.
///
/// Each emitted diagnostic corresponds to a `null` result; the caller can
/// observe them on [`Coercer::diagnostics`](crate::Coercer::diagnostics).
/// They are also mirrored to the [`log`] facade at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Component-type resolution for an array type failed.
    ComponentTypeLookup { type_name: String, detail: String },

    /// Array-typed text did not have the `{...}` shape.
    MalformedArray { text: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ComponentTypeLookup { type_name, detail } => {
                write!(
                    f,
                    "can't get component type from array '{}': {}",
                    type_name, detail
                )
            }
            Diagnostic::MalformedArray { text } => {
                write!(f, "unsupported array string: '{}'", text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unterminated_quote(3);
        assert_eq!(
            err.to_string(),
            "unterminated quote in record literal at offset 3"
        );

        let wrapped = Error::array_extraction("int4[]", Error::unterminated_quote(0));
        assert!(wrapped.to_string().contains("int4[]"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::MalformedArray {
            text: "42".to_string(),
        };
        assert_eq!(diag.to_string(), "unsupported array string: '42'");
    }
}
