#[macro_export]
macro_rules! value {
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
        $crate::Value::Array(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression with a `Value` conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_arrays() {
        assert_eq!(value!([]), Value::Array(vec![]));

        let arr = value!([1, 2, 3]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Number(Number::Integer(1)));
                assert_eq!(vec[1], Value::Number(Number::Integer(2)));
                assert_eq!(vec[2], Value::Number(Number::Integer(3)));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_value_macro_objects() {
        assert_eq!(value!({}), Value::Object(Map::new()));

        let obj = value!({
            "name": "Alice",
            "age": 30
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Number(Number::Integer(30))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_value_macro_nesting() {
        let tree = value!({
            "a": { "b": [1, { "c": null }] }
        });
        let inner = tree
            .as_object()
            .and_then(|m| m.get("a"))
            .and_then(|v| v.as_object())
            .and_then(|m| m.get("b"))
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(inner[0], Value::Number(Number::Integer(1)));
        assert_eq!(
            inner[1].as_object().and_then(|m| m.get("c")),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_value_macro_expression_fallback() {
        let existing = Value::Bool(true);
        assert_eq!(value!((existing)), Value::Bool(true));
        assert_eq!(value!((1 + 1)), Value::Number(Number::Integer(2)));
    }
}
