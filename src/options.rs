//! Configuration options for the flatten and unflatten engines.
//!
//! Both option structs are immutable per-call configuration: build one with
//! the `with_*` methods, pass it to the engine, done. Nothing is shared or
//! mutated across calls, and validation happens eagerly when the engine is
//! invoked.
//!
//! ## Examples
//!
//! ```rust
//! use flatkey::{flatten_with_options, value, FlattenOptions};
//!
//! let tree = value!({ "a": { "b": [1, 2] } });
//!
//! let options = FlattenOptions::new().with_delimiter("/").with_safe(true);
//! let flat = flatten_with_options(tree, options).unwrap();
//!
//! let obj = flat.as_object().unwrap();
//! assert!(obj.contains_key("a/b"));
//! ```

use crate::{Error, Result};

/// Options for the flatten transformation.
///
/// # Examples
///
/// ```rust
/// use flatkey::FlattenOptions;
///
/// // Defaults: "." delimiter, arrays decomposed, unlimited depth.
/// let options = FlattenOptions::new();
///
/// // Custom configuration.
/// let options = FlattenOptions::new()
///     .with_delimiter(":")
///     .with_max_depth(2)
///     .with_safe(true);
/// ```
#[derive(Clone, Debug)]
pub struct FlattenOptions {
    /// Separator placed between path segments. Default `"."`.
    pub delimiter: String,
    /// When true, sequences are opaque leaves and are never decomposed
    /// into indexed entries. Default false.
    pub safe: bool,
    /// Maximum number of nesting levels to descend; sub-structure below the
    /// limit is kept intact as a leaf value. `None` means unlimited; `Some(0)`
    /// is rejected by validation.
    pub max_depth: Option<usize>,
    /// Applied to each path segment before joining, allowing key remapping.
    pub transform_key: Option<fn(&str) -> String>,
    /// When true, backslash-escape the delimiter (and backslashes) inside
    /// segments so that splitting is exactly invertible. Default false: a
    /// segment containing the delimiter is indistinguishable from a segment
    /// boundary.
    pub escape: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            delimiter: ".".to_string(),
            safe: false,
            max_depth: None,
            transform_key: None,
            escape: false,
        }
    }
}

impl FlattenOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatkey::FlattenOptions;
    ///
    /// let options = FlattenOptions::new();
    /// assert_eq!(options.delimiter, ".");
    /// assert!(!options.safe);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path segment delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Treats sequences as opaque leaves when set.
    #[must_use]
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Limits traversal to `max_depth` nesting levels.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets a segment transformation applied before joining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatkey::FlattenOptions;
    ///
    /// let options = FlattenOptions::new().with_key_transform(|s| s.to_uppercase());
    /// ```
    #[must_use]
    pub fn with_key_transform(mut self, transform: fn(&str) -> String) -> Self {
        self.transform_key = Some(transform);
        self
    }

    /// Enables backslash-escaping of delimiters inside segments.
    #[must_use]
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Checks the options for semantic validity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for an empty delimiter or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_option("delimiter", "must not be empty"));
        }
        if self.max_depth == Some(0) {
            return Err(Error::invalid_option("max_depth", "must be at least 1"));
        }
        Ok(())
    }
}

/// Options for the unflatten transformation.
///
/// The delimiter must match the one used to produce the flat map for the
/// transformations to be mutual inverses.
///
/// # Examples
///
/// ```rust
/// use flatkey::UnflattenOptions;
///
/// let options = UnflattenOptions::new()
///     .with_object(true)
///     .with_overwrite(true);
/// ```
#[derive(Clone, Debug)]
pub struct UnflattenOptions {
    /// Separator used to split keys into path segments. Default `"."`.
    pub delimiter: String,
    /// When true, every level is materialized as a mapping even if the
    /// segment looks like an array index. Default false.
    pub object: bool,
    /// When true, a later key wins conflicts; otherwise the first write
    /// governs a slot and later conflicting writes are dropped. Default false.
    pub overwrite: bool,
    /// When true, only the first path segment of each key is consumed; the
    /// remainder becomes a verbatim leaf key and the value is moved without
    /// decomposition. Default false.
    pub shallow: bool,
    /// Maximum number of segments to split a key into; the remainder is
    /// folded verbatim into the final segment. `None` means unlimited;
    /// `Some(0)` is rejected by validation.
    pub max_depth: Option<usize>,
    /// Honors backslash escapes produced by a flatten call with escaping
    /// enabled. Default false.
    pub escape: bool,
    /// When true, container-kind conflicts raise
    /// [`Error::ConflictingType`] instead of being resolved silently. Only
    /// meaningful while `overwrite` is off. Default false.
    pub strict: bool,
}

impl Default for UnflattenOptions {
    fn default() -> Self {
        UnflattenOptions {
            delimiter: ".".to_string(),
            object: false,
            overwrite: false,
            shallow: false,
            max_depth: None,
            escape: false,
            strict: false,
        }
    }
}

impl UnflattenOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path segment delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Forces every level to be a mapping when set.
    #[must_use]
    pub fn with_object(mut self, object: bool) -> Self {
        self.object = object;
        self
    }

    /// Lets later keys win conflicts when set.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Enables shallow (single-segment) mode when set.
    #[must_use]
    pub fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// Limits key splitting to `max_depth` segments.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Honors backslash escapes in keys when set.
    #[must_use]
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Raises errors on container-kind conflicts when set.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Checks the options for semantic validity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for an empty delimiter or a zero
    /// depth limit.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_option("delimiter", "must not be empty"));
        }
        if self.max_depth == Some(0) {
            return Err(Error::invalid_option("max_depth", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_defaults() {
        let options = FlattenOptions::new();
        assert_eq!(options.delimiter, ".");
        assert!(!options.safe);
        assert_eq!(options.max_depth, None);
        assert!(options.transform_key.is_none());
        assert!(!options.escape);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_unflatten_defaults() {
        let options = UnflattenOptions::new();
        assert_eq!(options.delimiter, ".");
        assert!(!options.object);
        assert!(!options.overwrite);
        assert!(!options.shallow);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let options = FlattenOptions::new()
            .with_delimiter("/")
            .with_safe(true)
            .with_max_depth(3)
            .with_escaping(true);
        assert_eq!(options.delimiter, "/");
        assert!(options.safe);
        assert_eq!(options.max_depth, Some(3));
        assert!(options.escape);

        let options = UnflattenOptions::new()
            .with_object(true)
            .with_overwrite(true)
            .with_shallow(true)
            .with_strict(true);
        assert!(options.object && options.overwrite && options.shallow && options.strict);
    }

    #[test]
    fn test_validation_rejects_empty_delimiter() {
        let err = FlattenOptions::new().with_delimiter("").validate();
        assert!(matches!(err, Err(Error::InvalidOption { option, .. }) if option == "delimiter"));

        let err = UnflattenOptions::new().with_delimiter("").validate();
        assert!(matches!(err, Err(Error::InvalidOption { option, .. }) if option == "delimiter"));
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let err = FlattenOptions::new().with_max_depth(0).validate();
        assert!(matches!(err, Err(Error::InvalidOption { option, .. }) if option == "max_depth"));

        let err = UnflattenOptions::new().with_max_depth(0).validate();
        assert!(matches!(err, Err(Error::InvalidOption { option, .. }) if option == "max_depth"));
    }
}
