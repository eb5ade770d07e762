//! The flatten engine: nested tree to single-level flat map.
//!
//! Traversal is depth-first pre-order, driven by an explicit worklist rather
//! than the call stack, so deeply nested inputs cannot overflow the stack.
//! Output order matches traversal order thanks to [`Map`]'s insertion
//! ordering.
//!
//! ## Usage
//!
//! Most users should use the crate-root functions:
//!
//! ```rust
//! use flatkey::{flatten, value};
//!
//! let tree = value!({ "a": { "b": 1, "c": [true, false] } });
//! let flat = flatten(tree).unwrap();
//!
//! let obj = flat.as_object().unwrap();
//! assert_eq!(obj.get("a.b").and_then(|v| v.as_i64()), Some(1));
//! assert_eq!(obj.get("a.c.0").and_then(|v| v.as_bool()), Some(true));
//! ```
//!
//! ## Direct Engine Usage
//!
//! ```rust
//! use flatkey::{Flattener, FlattenOptions, value};
//!
//! let flattener = Flattener::new(FlattenOptions::new().with_delimiter("/"));
//! let flat = flattener.flatten(value!({ "a": { "b": 2 } })).unwrap();
//! assert_eq!(flat.as_object().unwrap().get("a/b").and_then(|v| v.as_i64()), Some(2));
//! ```

use crate::{path, FlattenOptions, Map, Result, Value};

/// The flatten engine.
///
/// Holds an immutable [`FlattenOptions`] and exposes a single operation.
/// Construction is cheap; a `Flattener` can be reused across calls.
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    /// Creates an engine with the given options.
    #[must_use]
    pub fn new(options: FlattenOptions) -> Self {
        Flattener { options }
    }

    /// Flattens a nested value into a single-level flat map.
    ///
    /// Each leaf of the input becomes one entry whose key is the
    /// delimiter-joined path to it. Leaves are scalars, opaque values,
    /// empty containers, sequences under the `safe` option, and any value
    /// sitting at the configured depth limit.
    ///
    /// A root that is itself a leaf is returned unchanged rather than
    /// wrapped. A root that is an empty container yields an empty flat map;
    /// consequently an empty sequence in root position comes back from a
    /// round trip as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`](crate::Error::InvalidOption) if the
    /// options fail validation. Data never causes an error.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn flatten(&self, value: Value) -> Result<Value> {
        self.options.validate()?;

        if self.root_is_leaf(&value) {
            return Ok(value);
        }

        let mut flat = Map::new();
        let mut stack: Vec<(String, usize, Value)> = Vec::new();
        self.push_children(&mut stack, None, 0, value);

        while let Some((key, depth, value)) = stack.pop() {
            if self.decomposable(&value, depth) {
                self.push_children(&mut stack, Some(&key), depth, value);
            } else {
                flat.insert(key, value);
            }
        }

        Ok(Value::Object(flat))
    }

    fn root_is_leaf(&self, value: &Value) -> bool {
        match value {
            Value::Array(_) => self.options.safe,
            Value::Object(_) => false,
            _ => true,
        }
    }

    /// A value is decomposed when it is a non-empty container, is not held
    /// opaque by the `safe` option, and the depth limit has not been reached.
    fn decomposable(&self, value: &Value, depth: usize) -> bool {
        if self.options.max_depth.is_some_and(|max| depth >= max) {
            return false;
        }
        match value {
            Value::Object(map) => !map.is_empty(),
            Value::Array(arr) => !self.options.safe && !arr.is_empty(),
            _ => false,
        }
    }

    /// Pushes the children of a container in reverse, so the LIFO worklist
    /// pops them in original order and the output keeps pre-order.
    fn push_children(
        &self,
        stack: &mut Vec<(String, usize, Value)>,
        prefix: Option<&str>,
        depth: usize,
        value: Value,
    ) {
        let mark = stack.len();
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    stack.push((self.child_key(prefix, &key), depth + 1, child));
                }
            }
            Value::Array(arr) => {
                for (index, child) in arr.into_iter().enumerate() {
                    stack.push((self.child_key(prefix, &index.to_string()), depth + 1, child));
                }
            }
            _ => {}
        }
        stack[mark..].reverse();
    }

    fn child_key(&self, prefix: Option<&str>, segment: &str) -> String {
        let transformed = match self.options.transform_key {
            Some(transform) => transform(segment),
            None => segment.to_string(),
        };
        let encoded = if self.options.escape {
            path::escape(&transformed, &self.options.delimiter)
        } else {
            transformed
        };
        path::join(prefix, &encoded, &self.options.delimiter)
    }
}
