//! Error types for the flatten and unflatten operations.
//!
//! Configuration problems are detected eagerly at call entry and reported
//! before any work is done. Data-shape ambiguities (delimiter collisions,
//! container-kind coercions) are resolved deterministically by the engines
//! and only surface as errors when strict mode is enabled.
//!
//! ## Examples
//!
//! ```rust
//! use flatkey::{flatten_with_options, Error, FlattenOptions, Value};
//!
//! let options = FlattenOptions::new().with_delimiter("");
//! let result = flatten_with_options(Value::Null, options);
//!
//! assert!(matches!(result, Err(Error::InvalidOption { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An option value is semantically invalid (empty delimiter, zero depth).
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// Two flat-map keys require different container kinds at the same path.
    ///
    /// Only raised in strict mode; the default policy resolves the conflict
    /// silently in favor of the first write.
    #[error("conflicting container kinds at `{path}`: existing {existing}, required {required}")]
    ConflictingType {
        path: String,
        existing: &'static str,
        required: &'static str,
    },

    /// A Rust value has no representation in the [`Value`](crate::Value) model.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised through the serde trait plumbing.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid-option error for a named option.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatkey::Error;
    ///
    /// let err = Error::invalid_option("delimiter", "must not be empty");
    /// assert!(err.to_string().contains("delimiter"));
    /// ```
    pub fn invalid_option(option: &'static str, reason: &str) -> Self {
        Error::InvalidOption {
            option,
            reason: reason.to_string(),
        }
    }

    /// Creates a strict-mode container-kind conflict error.
    pub fn conflicting_type(path: &str, existing: &'static str, required: &'static str) -> Self {
        Error::ConflictingType {
            path: path.to_string(),
            existing,
            required,
        }
    }

    /// Creates an unsupported-type error for values the model cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
