/// Builds a [`Value`](crate::Value) tree from literal syntax.
///
/// Handy for tests and for assembling expected coercion results: `null`
/// maps to `Value::Null`, brackets nest, and everything else goes through
/// `Value::from`.
///
/// ```rust
/// use pg_literal::{pg_value, Value};
///
/// assert_eq!(pg_value!(null), Value::Null);
/// assert_eq!(pg_value!(42), Value::Int(42));
/// assert_eq!(
///     pg_value!([1, null, "x"]),
///     Value::Array(vec![Value::Int(1), Value::Null, Value::from("x")])
/// );
/// ```
#[macro_export]
macro_rules! pg_value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::pg_value!($elem)),*])
    };

    // Fallback for any other expression
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::Value;

    #[test]
    fn test_pg_value_primitives() {
        assert_eq!(pg_value!(null), Value::Null);
        assert_eq!(pg_value!(true), Value::Bool(true));
        assert_eq!(pg_value!(false), Value::Bool(false));
        assert_eq!(pg_value!(42), Value::Int(42));
        assert_eq!(pg_value!(3.5), Value::Double(3.5));
        assert_eq!(pg_value!("hello"), Value::Text("hello".to_string()));
    }

    #[test]
    fn test_pg_value_arrays() {
        assert_eq!(pg_value!([]), Value::Array(vec![]));

        let arr = pg_value!([1, [2, null], "x"]);
        match arr {
            Value::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::Int(1));
                assert_eq!(
                    items[1],
                    Value::Array(vec![Value::Int(2), Value::Null])
                );
                assert_eq!(items[2], Value::Text("x".to_string()));
            }
            _ => panic!("Expected array"),
        }
    }
}
