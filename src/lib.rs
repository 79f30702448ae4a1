//! # pg_literal
//!
//! Parser/serializer for PostgreSQL's array and composite-row text literals,
//! coupled with type-directed scalar coercion.
//!
//! ## What it does
//!
//! PostgreSQL transmits arrays and composite rows as text literals with a
//! context-sensitive grammar: nested braces, double-quoting, backslash
//! escaping, a `NULL` sentinel that is ambiguous with the literal text
//! `"NULL"`, and optional dimension-bound headers. This crate tokenizes
//! that grammar and converts the raw fragments into typed values by
//! consulting an injected type/value-handler system.
//!
//! ## Key Features
//!
//! - **Tolerant array parsing**: [`parse_array`] is a best-effort O(n)
//!   scanner that never errors on malformed input
//! - **Record codec**: [`parse_record`] / [`format_record`] handle the
//!   parenthesized, quote-escaped row format, including the documented
//!   null → `"NULL"` round-trip lossiness
//! - **Type-directed coercion**: [`coerce`] walks array structure
//!   recursively and parses known scalar kinds, delegating everything
//!   else to external value handlers
//! - **Observable degradation**: tolerated failures surface as
//!   [`Diagnostic`] events on [`Coercer`] and on the [`log`] facade, never
//!   as panics
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use pg_literal::{parse_array, ArrayNode};
//!
//! let nodes = parse_array("{1,NULL,\"a,b\"}", ',');
//! assert_eq!(
//!     nodes,
//!     vec![
//!         ArrayNode::Scalar("1".to_string()),
//!         ArrayNode::Null,
//!         ArrayNode::Scalar("a,b".to_string()),
//!     ]
//! );
//! ```
//!
//! ### Coercing against a type system
//!
//! The coercer reads type structure through two narrow capabilities:
//! [`TypeDescriptor`] (data kind, scalar kind, component type) and
//! [`HandlerResolver`] (value handlers for types it does not parse
//! itself). An opaque context token is forwarded to both, never
//! inspected.
//!
//! ```rust
//! use pg_literal::{coerce, DataKind, NoHandlers, ScalarKind, TypeDescriptor, Value};
//!
//! struct Bool;
//!
//! impl TypeDescriptor for Bool {
//!     fn data_kind(&self) -> DataKind {
//!         DataKind::Scalar
//!     }
//!     fn scalar_kind(&self) -> ScalarKind {
//!         ScalarKind::Bool
//!     }
//!     fn full_name(&self) -> &str {
//!         "bool"
//!     }
//! }
//!
//! assert_eq!(coerce(&(), &NoHandlers, &Bool, "t", false).unwrap(), Value::Bool(true));
//! ```
//!
//! ## Known limitations
//!
//! These are verified behaviors of the format this crate reproduces, not
//! defects to fix:
//!
//! - Array element splitting in the coercer uses the record codec's rules,
//!   so multidimensional and structured array text is not fully supported;
//!   dimension-bound headers are recognized only to be discarded.
//! - The record codec cannot distinguish a formatted null from the literal
//!   text `NULL` unless the latter was quoted.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - Pure functions over immutable input; safe to call concurrently,
//!   with one [`Coercer`] per thread

pub mod array;
pub mod coerce;
pub mod error;
pub mod macros;
pub mod record;
pub mod value;

pub use array::{array_to_literal, parse_array, ArrayNode};
pub use coerce::{
    coerce, Coercer, DataKind, HandlerResolver, NoHandlers, ScalarKind, TypeDescriptor,
    ValueConverter,
};
pub use error::{Diagnostic, Error, Result};
pub use record::{format_record, parse_record};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_parse_and_rejoin() {
        let nodes = parse_array("{1,2,3}", ',');
        assert_eq!(array_to_literal(&nodes), "{1,2,3}");
    }

    #[test]
    fn test_record_round_trip() {
        let line = format_record(&[Value::Int(1), Value::Null]);
        let fields = parse_record(&line).unwrap();
        assert_eq!(fields, vec!["1", "NULL"]);
    }
}
