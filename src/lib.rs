//! # flatkey
//!
//! Flatten nested data structures into single-level maps keyed by
//! delimiter-joined paths, and unflatten them back.
//!
//! ## What does that mean?
//!
//! A nested tree like `{"a": {"b": [1, 2]}}` becomes the flat map
//! `{"a.b.0": 1, "a.b.1": 2}`, and the reverse transformation rebuilds the
//! original tree. Flat maps are handy wherever nested structures are
//! awkward: form fields, environment-style configuration, CSV columns,
//! key-value stores, diffing.
//!
//! ## Key Features
//!
//! - **Mutual inverses**: `unflatten(flatten(tree)) == tree` for trees whose
//!   keys are free of the delimiter (and for all trees with escaping on)
//! - **Array inference**: numeric path segments rebuild sequences, with an
//!   `object` switch to force mappings everywhere
//! - **Deterministic**: insertion-ordered maps keep output order stable
//! - **Opaque leaves**: dates, big integers, and byte buffers pass through
//!   both directions as atomic values
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! flatkey = "0.1"
//! ```
//!
//! ### Flattening and Unflattening
//!
//! ```rust
//! use flatkey::{flatten, unflatten, value};
//!
//! let tree = value!({
//!     "user": {
//!         "name": "Alice",
//!         "roles": ["admin", "dev"]
//!     }
//! });
//!
//! let flat = flatten(tree.clone()).unwrap();
//! assert_eq!(flat, value!({
//!     "user.name": "Alice",
//!     "user.roles.0": "admin",
//!     "user.roles.1": "dev"
//! }));
//!
//! let back = unflatten(flat).unwrap();
//! assert_eq!(back, tree);
//! ```
//!
//! ### Options
//!
//! ```rust
//! use flatkey::{flatten_with_options, unflatten_with_options, value};
//! use flatkey::{FlattenOptions, UnflattenOptions};
//!
//! // Keep arrays intact and stop after two levels.
//! let options = FlattenOptions::new().with_safe(true).with_max_depth(2);
//! let flat = flatten_with_options(value!({ "a": { "b": { "deep": [1] } } }), options).unwrap();
//! assert_eq!(flat, value!({ "a.b": { "deep": [1] } }));
//!
//! // Later keys win conflicts.
//! let options = UnflattenOptions::new().with_overwrite(true);
//! let tree = unflatten_with_options(value!({ "a": 1, "a.b": 2 }), options).unwrap();
//! assert_eq!(tree, value!({ "a": { "b": 2 } }));
//! ```
//!
//! ### Flattening Rust Types
//!
//! Anything implementing `serde::Serialize` converts to a [`Value`] first:
//!
//! ```rust
//! use flatkey::{flatten, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server {
//!     host: String,
//!     ports: Vec<u16>,
//! }
//!
//! let server = Server { host: "db1".to_string(), ports: vec![5432, 5433] };
//! let flat = flatten(to_value(&server).unwrap()).unwrap();
//!
//! let obj = flat.as_object().unwrap();
//! assert_eq!(obj.get("host").and_then(|v| v.as_str()), Some("db1"));
//! assert_eq!(obj.get("ports.1").and_then(|v| v.as_i64()), Some(5433));
//! ```
//!
//! ## Known Limitation
//!
//! By default no escaping is performed, so a key that itself contains the
//! delimiter is indistinguishable from a nesting boundary and will not
//! round-trip. Enable escaping on both sides
//! ([`FlattenOptions::with_escaping`], [`UnflattenOptions::with_escaping`])
//! when keys may contain the delimiter.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Inputs are never mutated; they are consumed and rebuilt
//! - Traversal uses an explicit worklist, so deep nesting cannot overflow
//!   the call stack during flattening
//! - Proper error propagation with `Result` types; invalid options fail
//!   fast before any work happens

pub mod error;
pub mod flatten;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod unflatten;
pub mod value;

pub use error::{Error, Result};
pub use flatten::Flattener;
pub use map::Map;
pub use options::{FlattenOptions, UnflattenOptions};
pub use ser::ValueSerializer;
pub use unflatten::Unflattener;
pub use value::{Number, Value};

use serde::Serialize;

/// Flattens a nested value into a single-level flat map with default options.
///
/// # Examples
///
/// ```rust
/// use flatkey::{flatten, value};
///
/// let flat = flatten(value!({ "a": { "b": 1 } })).unwrap();
/// assert_eq!(flat, value!({ "a.b": 1 }));
/// ```
///
/// # Errors
///
/// Never fails with default options; the `Result` is shared with
/// [`flatten_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten(value: Value) -> Result<Value> {
    flatten_with_options(value, FlattenOptions::default())
}

/// Flattens a nested value with custom options.
///
/// # Examples
///
/// ```rust
/// use flatkey::{flatten_with_options, FlattenOptions, value};
///
/// let options = FlattenOptions::new().with_delimiter("/");
/// let flat = flatten_with_options(value!({ "a": { "b": 1 } }), options).unwrap();
/// assert_eq!(flat, value!({ "a/b": 1 }));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] if the options fail validation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten_with_options(value: Value, options: FlattenOptions) -> Result<Value> {
    Flattener::new(options).flatten(value)
}

/// Rebuilds a nested tree from a flat map with default options.
///
/// # Examples
///
/// ```rust
/// use flatkey::{unflatten, value};
///
/// let tree = unflatten(value!({ "a.b": 1 })).unwrap();
/// assert_eq!(tree, value!({ "a": { "b": 1 } }));
/// ```
///
/// # Errors
///
/// Never fails with default options; the `Result` is shared with
/// [`unflatten_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unflatten(value: Value) -> Result<Value> {
    unflatten_with_options(value, UnflattenOptions::default())
}

/// Rebuilds a nested tree from a flat map with custom options.
///
/// # Examples
///
/// ```rust
/// use flatkey::{unflatten_with_options, UnflattenOptions, value};
///
/// let options = UnflattenOptions::new().with_shallow(true);
/// let tree = unflatten_with_options(value!({ "a.b.c": 1 }), options).unwrap();
/// assert_eq!(tree, value!({ "a": { "b.c": 1 } }));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOption`] if the options fail validation, and
/// [`Error::ConflictingType`] in strict mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unflatten_with_options(value: Value, options: UnflattenOptions) -> Result<Value> {
    Unflattener::new(options).unflatten(value)
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// Useful for flattening data whose structure is known at compile time.
///
/// # Examples
///
/// ```rust
/// use flatkey::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. enum variants
/// with payloads, non-string map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_unflatten_roundtrip() {
        let tree = value!({
            "id": 7,
            "tags": ["a", "b"],
            "nested": { "deep": { "flag": true } }
        });
        let flat = flatten(tree.clone()).unwrap();
        assert_eq!(unflatten(flat).unwrap(), tree);
    }

    #[test]
    fn test_already_flat_is_fixed_point() {
        let flat = value!({ "foo": "bar" });
        assert_eq!(flatten(unflatten(flat.clone()).unwrap()).unwrap(), flat);
        assert_eq!(unflatten(flatten(flat.clone()).unwrap()).unwrap(), flat);
    }

    #[test]
    fn test_matching_custom_delimiters_roundtrip() {
        let tree = value!({ "a": { "b": [1] } });
        let flat = flatten_with_options(
            tree.clone(),
            FlattenOptions::new().with_delimiter(":"),
        )
        .unwrap();
        assert_eq!(flat, value!({ "a:b:0": 1 }));
        let back = unflatten_with_options(flat, UnflattenOptions::new().with_delimiter(":"))
            .unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_to_value_then_flatten() {
        #[derive(serde::Serialize)]
        struct User {
            name: &'static str,
            scores: Vec<i32>,
        }

        let value = to_value(&User { name: "Alice", scores: vec![10, 20] }).unwrap();
        let flat = flatten(value).unwrap();
        assert_eq!(flat, value!({ "name": "Alice", "scores.0": 10, "scores.1": 20 }));
    }
}
