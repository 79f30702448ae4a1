//! Type-directed coercion of literal text into typed values.
//!
//! Given a [`TypeDescriptor`] and raw text, [`Coercer::coerce`] recursively
//! converts the text into a [`Value`]: array types are split and their
//! elements coerced against the resolved component type, known scalar kinds
//! are parsed directly, and everything else is delegated to an external
//! value-handler registry through the [`HandlerResolver`] capability.
//!
//! ## Tolerance
//!
//! The coercer degrades rather than fails wherever the original format
//! allows it:
//!
//! - a failed numeric or boolean parse returns the raw text untouched
//! - a failed component-type lookup or array text without braces yields
//!   `Value::Null` plus an observable [`Diagnostic`]
//!
//! Hard errors are limited to malformed record quoting inside an array body
//! and failures raised by a resolved value handler.
//!
//! ## Usage
//!
//! ```rust
//! use pg_literal::{coerce, DataKind, NoHandlers, ScalarKind, TypeDescriptor, Value};
//!
//! struct Int4;
//!
//! impl TypeDescriptor for Int4 {
//!     fn data_kind(&self) -> DataKind {
//!         DataKind::Scalar
//!     }
//!     fn scalar_kind(&self) -> ScalarKind {
//!         ScalarKind::Int
//!     }
//!     fn full_name(&self) -> &str {
//!         "int4"
//!     }
//! }
//!
//! let value = coerce(&(), &NoHandlers, &Int4, "42", false).unwrap();
//! assert_eq!(value, Value::Int(42));
//!
//! // parse failures fall back to the untouched raw text
//! let value = coerce(&(), &NoHandlers, &Int4, "abc", false).unwrap();
//! assert_eq!(value, Value::Text("abc".to_string()));
//! ```
//!
//! Note on multidimensional arrays: array element splitting reuses the
//! record codec rather than [`parse_array`](crate::parse_array), so nested
//! brace structure inside an array body is not understood here. Structured
//! and multidimensional array text is outside what this path supports.

use crate::error::{Diagnostic, Error, Result};
use crate::record::parse_record;
use crate::value::Value;

/// Classification of a type that selects the coercion path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    Scalar,
    Array,
}

/// The scalar kinds the coercer parses directly.
///
/// Anything mapped to [`ScalarKind::Other`] is delegated to the external
/// value-handler registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Other,
}

/// Describes a type to the coercer.
///
/// Descriptors are owned and supplied by the external type system; the
/// coercer only reads them. [`TypeDescriptor::component_type`] may perform
/// catalog I/O and is invoked as a single synchronous attempt per array
/// level, never retried.
pub trait TypeDescriptor {
    /// Whether this type is coerced as a scalar or as an array.
    fn data_kind(&self) -> DataKind;

    /// The scalar kind driving direct parsing.
    fn scalar_kind(&self) -> ScalarKind;

    /// Full type name, used in diagnostics only.
    fn full_name(&self) -> &str;

    /// Resolves the element type of an array type.
    ///
    /// The default implementation fails, which is correct for scalar types.
    fn component_type(&self) -> Result<Box<dyn TypeDescriptor>> {
        Err(Error::custom(format!(
            "type '{}' has no component type",
            self.full_name()
        )))
    }
}

/// Converts raw text into a typed value for one specific type.
///
/// `C` is the opaque context token the caller threads through the whole
/// coercion; the core never inspects it. The `unescape` flag rides along
/// unchanged from the top-level call.
pub trait ValueConverter<C> {
    fn from_text(
        &self,
        cx: &C,
        ty: &dyn TypeDescriptor,
        text: &str,
        unescape: bool,
    ) -> Result<Value>;
}

/// Looks up a value-handler capability for a `(context, type)` pair.
///
/// Returning `None` is not an error; the coercer then keeps the raw text.
pub trait HandlerResolver<C> {
    fn resolve(&self, cx: &C, ty: &dyn TypeDescriptor) -> Option<&dyn ValueConverter<C>>;
}

/// A resolver with no registered handlers.
///
/// Useful when only the built-in scalar parsing is wanted; every fallback
/// then returns the raw text unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHandlers;

impl<C> HandlerResolver<C> for NoHandlers {
    fn resolve(&self, _cx: &C, _ty: &dyn TypeDescriptor) -> Option<&dyn ValueConverter<C>> {
        None
    }
}

/// Drives coercion and collects the diagnostics it emits.
///
/// Each tolerated failure (component-type lookup, malformed array text)
/// pushes one [`Diagnostic`], observable afterwards via
/// [`diagnostics`](Coercer::diagnostics). One `Coercer` is single-threaded
/// state; use one per thread, or the free [`coerce`] function when the
/// diagnostics are only needed in the log.
///
/// # Examples
///
/// ```rust
/// use pg_literal::{Coercer, DataKind, NoHandlers, ScalarKind, TypeDescriptor, Value};
///
/// struct Int4Array;
///
/// impl TypeDescriptor for Int4Array {
///     fn data_kind(&self) -> DataKind {
///         DataKind::Array
///     }
///     fn scalar_kind(&self) -> ScalarKind {
///         ScalarKind::Other
///     }
///     fn full_name(&self) -> &str {
///         "int4[]"
///     }
/// }
///
/// let mut coercer = Coercer::new(&NoHandlers);
/// // no braces: degrades to null and records a diagnostic
/// let value = coercer.coerce(&(), &Int4Array, "42", false).unwrap();
/// assert_eq!(value, Value::Null);
/// assert_eq!(coercer.diagnostics().len(), 1);
/// ```
pub struct Coercer<'a, C> {
    resolver: &'a dyn HandlerResolver<C>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, C> Coercer<'a, C> {
    /// Creates a coercer over the given handler resolver.
    pub fn new(resolver: &'a dyn HandlerResolver<C>) -> Self {
        Coercer {
            resolver,
            diagnostics: Vec::new(),
        }
    }

    /// Coerces literal text against a type descriptor.
    ///
    /// `unescape` is forwarded unchanged to every recursive level and to
    /// resolved value handlers.
    ///
    /// # Errors
    ///
    /// Fails only when record splitting inside an array body is malformed
    /// ([`Error::ArrayExtraction`]) or a resolved value handler fails.
    pub fn coerce(
        &mut self,
        cx: &C,
        ty: &dyn TypeDescriptor,
        text: &str,
        unescape: bool,
    ) -> Result<Value> {
        match ty.data_kind() {
            DataKind::Array => self.coerce_array(cx, ty, text, unescape),
            DataKind::Scalar => self.coerce_scalar(cx, ty, text, unescape),
        }
    }

    /// Returns the diagnostics emitted so far, in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains and returns the collected diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn coerce_array(
        &mut self,
        cx: &C,
        ty: &dyn TypeDescriptor,
        text: &str,
        unescape: bool,
    ) -> Result<Value> {
        if text.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        if text.starts_with('{') && text.ends_with('}') {
            let component = match ty.component_type() {
                Ok(component) => component,
                Err(err) => {
                    self.report(Diagnostic::ComponentTypeLookup {
                        type_name: ty.full_name().to_string(),
                        detail: err.to_string(),
                    });
                    return Ok(Value::Null);
                }
            };
            let body = &text[1..text.len() - 1];
            let fragments =
                parse_record(body).map_err(|err| Error::array_extraction(ty.full_name(), err))?;
            let mut items = Vec::with_capacity(fragments.len());
            for fragment in &fragments {
                items.push(self.coerce(cx, component.as_ref(), fragment, unescape)?);
            }
            Ok(Value::Array(items))
        } else {
            self.report(Diagnostic::MalformedArray {
                text: text.to_string(),
            });
            Ok(Value::Null)
        }
    }

    fn coerce_scalar(
        &mut self,
        cx: &C,
        ty: &dyn TypeDescriptor,
        text: &str,
        unescape: bool,
    ) -> Result<Value> {
        if text.is_empty() {
            return self.fallback(cx, ty, text, unescape);
        }
        let parsed = match ty.scalar_kind() {
            ScalarKind::Bool => {
                // only the first character decides; "true"/"t"/"TRUE" all pass
                let truthy = text
                    .chars()
                    .next()
                    .is_some_and(|c| c.eq_ignore_ascii_case(&'t'));
                return Ok(Value::Bool(truthy));
            }
            ScalarKind::TinyInt => text.parse::<i8>().map(Value::TinyInt).map_err(drop),
            ScalarKind::SmallInt => text.parse::<i16>().map(Value::SmallInt).map_err(drop),
            ScalarKind::Int => text.parse::<i32>().map(Value::Int).map_err(drop),
            ScalarKind::BigInt => text.parse::<i64>().map(Value::BigInt).map_err(drop),
            ScalarKind::Real => text.parse::<f32>().map(Value::Real).map_err(drop),
            ScalarKind::Double => text.parse::<f64>().map(Value::Double).map_err(drop),
            ScalarKind::Other => return self.fallback(cx, ty, text, unescape),
        };
        // a failed numeric parse keeps the raw text, never errors
        Ok(parsed.unwrap_or_else(|_| Value::Text(text.to_string())))
    }

    fn fallback(
        &mut self,
        cx: &C,
        ty: &dyn TypeDescriptor,
        text: &str,
        unescape: bool,
    ) -> Result<Value> {
        match self.resolver.resolve(cx, ty) {
            Some(converter) => converter.from_text(cx, ty, text, unescape),
            None => Ok(Value::Text(text.to_string())),
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// Coerces literal text against a type descriptor, discarding diagnostics.
///
/// Tolerated failures still reach the [`log`] facade at `warn` level; use
/// [`Coercer`] directly to observe them programmatically.
///
/// # Errors
///
/// Same surface as [`Coercer::coerce`].
pub fn coerce<C>(
    cx: &C,
    resolver: &dyn HandlerResolver<C>,
    ty: &dyn TypeDescriptor,
    text: &str,
    unescape: bool,
) -> Result<Value> {
    Coercer::new(resolver).coerce(cx, ty, text, unescape)
}
