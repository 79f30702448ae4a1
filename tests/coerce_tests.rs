use pg_literal::{
    coerce, Coercer, DataKind, Diagnostic, Error, HandlerResolver, NoHandlers, Result, ScalarKind,
    TypeDescriptor, Value, ValueConverter,
};

#[derive(Clone)]
struct ScalarType {
    kind: ScalarKind,
    name: &'static str,
}

impl TypeDescriptor for ScalarType {
    fn data_kind(&self) -> DataKind {
        DataKind::Scalar
    }
    fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
    fn full_name(&self) -> &str {
        self.name
    }
}

struct ArrayType {
    name: &'static str,
    component: ScalarType,
}

impl TypeDescriptor for ArrayType {
    fn data_kind(&self) -> DataKind {
        DataKind::Array
    }
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::Other
    }
    fn full_name(&self) -> &str {
        self.name
    }
    fn component_type(&self) -> Result<Box<dyn TypeDescriptor>> {
        Ok(Box::new(self.component.clone()))
    }
}

/// An array type whose catalog lookup always fails.
struct OrphanArrayType;

impl TypeDescriptor for OrphanArrayType {
    fn data_kind(&self) -> DataKind {
        DataKind::Array
    }
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::Other
    }
    fn full_name(&self) -> &str {
        "orphan[]"
    }
    fn component_type(&self) -> Result<Box<dyn TypeDescriptor>> {
        Err(Error::custom("catalog unavailable"))
    }
}

fn int4() -> ScalarType {
    ScalarType {
        kind: ScalarKind::Int,
        name: "int4",
    }
}

fn int4_array() -> ArrayType {
    ArrayType {
        name: "int4[]",
        component: int4(),
    }
}

#[test]
fn test_integer_coercion_and_fallback() {
    assert_eq!(
        coerce(&(), &NoHandlers, &int4(), "42", false).unwrap(),
        Value::Int(42)
    );
    // parse failure is not an error; the raw text comes back untouched
    assert_eq!(
        coerce(&(), &NoHandlers, &int4(), "abc", false).unwrap(),
        Value::Text("abc".to_string())
    );
}

#[test]
fn test_boolean_first_character() {
    let ty = ScalarType {
        kind: ScalarKind::Bool,
        name: "bool",
    };
    assert_eq!(
        coerce(&(), &NoHandlers, &ty, "t", false).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        coerce(&(), &NoHandlers, &ty, "f", false).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        coerce(&(), &NoHandlers, &ty, "True", false).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_empty_array_text() {
    assert_eq!(
        coerce(&(), &NoHandlers, &int4_array(), "", false).unwrap(),
        Value::Array(vec![])
    );
}

#[test]
fn test_array_elements_coerced_against_component_type() {
    let value = coerce(&(), &NoHandlers, &int4_array(), "{1,2,3}", false).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn test_array_null_fragment_stays_raw_text() {
    // element splitting uses the record codec, which has no null sentinel;
    // the fragment "NULL" reaches the scalar path and falls back to text
    let value = coerce(&(), &NoHandlers, &int4_array(), "{1,NULL,3}", false).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Int(1),
            Value::Text("NULL".to_string()),
            Value::Int(3)
        ])
    );
}

#[test]
fn test_nested_array_text_is_not_understood() {
    // record-codec splitting does not track brace nesting; this is the
    // documented multidimensional-array limitation
    let value = coerce(&(), &NoHandlers, &int4_array(), "{{1,2},{3,4}}", false).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::Text("{1".to_string()),
            Value::Text("2}".to_string()),
            Value::Text("{3".to_string()),
            Value::Text("4}".to_string()),
        ])
    );
}

#[test]
fn test_braceless_array_text_degrades_to_null_with_diagnostic() {
    let mut coercer = Coercer::new(&NoHandlers);
    let value = coercer.coerce(&(), &int4_array(), "42", false).unwrap();
    assert_eq!(value, Value::Null);
    assert_eq!(
        coercer.diagnostics(),
        &[Diagnostic::MalformedArray {
            text: "42".to_string()
        }]
    );
}

#[test]
fn test_component_lookup_failure_degrades_to_null_with_diagnostic() {
    let mut coercer = Coercer::new(&NoHandlers);
    let value = coercer.coerce(&(), &OrphanArrayType, "{1,2}", false).unwrap();
    assert_eq!(value, Value::Null);

    let diagnostics = coercer.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        &diagnostics[0],
        Diagnostic::ComponentTypeLookup { type_name, .. } if type_name == "orphan[]"
    ));
    assert!(coercer.diagnostics().is_empty());
}

#[test]
fn test_malformed_record_quoting_inside_array_is_an_error() {
    let result = coerce(&(), &NoHandlers, &int4_array(), "{\"unterminated}", false);
    assert!(matches!(result, Err(Error::ArrayExtraction { .. })));
}

struct UppercaseConverter;

impl ValueConverter<()> for UppercaseConverter {
    fn from_text(
        &self,
        _cx: &(),
        _ty: &dyn TypeDescriptor,
        text: &str,
        _unescape: bool,
    ) -> Result<Value> {
        Ok(Value::Text(text.to_uppercase()))
    }
}

/// Echoes the unescape flag back, to observe forwarding.
struct FlagEcho;

impl ValueConverter<()> for FlagEcho {
    fn from_text(
        &self,
        _cx: &(),
        _ty: &dyn TypeDescriptor,
        _text: &str,
        unescape: bool,
    ) -> Result<Value> {
        Ok(Value::Bool(unescape))
    }
}

struct Registry {
    upper: UppercaseConverter,
    echo: FlagEcho,
}

impl HandlerResolver<()> for Registry {
    fn resolve(&self, _cx: &(), ty: &dyn TypeDescriptor) -> Option<&dyn ValueConverter<()>> {
        match ty.full_name() {
            "citext" => Some(&self.upper),
            "echo" => Some(&self.echo),
            _ => None,
        }
    }
}

fn registry() -> Registry {
    Registry {
        upper: UppercaseConverter,
        echo: FlagEcho,
    }
}

#[test]
fn test_other_kind_delegates_to_resolved_handler() {
    let ty = ScalarType {
        kind: ScalarKind::Other,
        name: "citext",
    };
    assert_eq!(
        coerce(&(), &registry(), &ty, "abc", false).unwrap(),
        Value::Text("ABC".to_string())
    );
}

#[test]
fn test_other_kind_without_handler_keeps_raw_text() {
    let ty = ScalarType {
        kind: ScalarKind::Other,
        name: "uuid",
    };
    assert_eq!(
        coerce(&(), &registry(), &ty, "abc", false).unwrap(),
        Value::Text("abc".to_string())
    );
}

#[test]
fn test_empty_scalar_text_goes_to_fallback() {
    let ty = ScalarType {
        kind: ScalarKind::Other,
        name: "citext",
    };
    assert_eq!(
        coerce(&(), &registry(), &ty, "", false).unwrap(),
        Value::Text("".to_string())
    );
    // numeric kinds with empty text also take the fallback path
    assert_eq!(
        coerce(&(), &registry(), &int4(), "", false).unwrap(),
        Value::Text("".to_string())
    );
}

#[test]
fn test_unescape_flag_reaches_handlers_through_recursion() {
    let ty = ArrayType {
        name: "echo[]",
        component: ScalarType {
            kind: ScalarKind::Other,
            name: "echo",
        },
    };
    assert_eq!(
        coerce(&(), &registry(), &ty, "{x,y}", true).unwrap(),
        Value::Array(vec![Value::Bool(true), Value::Bool(true)])
    );
    assert_eq!(
        coerce(&(), &registry(), &ty, "{x}", false).unwrap(),
        Value::Array(vec![Value::Bool(false)])
    );
}
