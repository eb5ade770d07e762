//! The unflatten engine: flat map back to nested tree.
//!
//! Keys are split through the path codec and containers are rebuilt from the
//! root, inferring sequence-vs-mapping from whether the upcoming segment is
//! an array index. The engine carries the merge policy: the first write to a
//! slot governs its container kind, later writes merge into it, and the
//! `overwrite`/`strict` options change how conflicts are settled.
//!
//! ## Usage
//!
//! ```rust
//! use flatkey::{unflatten, value};
//!
//! let flat = value!({ "a.b": 1, "a.c.0": true });
//! let tree = unflatten(flat).unwrap();
//!
//! assert_eq!(tree, value!({ "a": { "b": 1, "c": [true] } }));
//! ```
//!
//! ## Direct Engine Usage
//!
//! ```rust
//! use flatkey::{Unflattener, UnflattenOptions, value};
//!
//! let unflattener = Unflattener::new(UnflattenOptions::new().with_object(true));
//! let tree = unflattener.unflatten(value!({ "a.0": "x" })).unwrap();
//! assert_eq!(tree, value!({ "a": { "0": "x" } }));
//! ```

use crate::{path, Error, FlattenOptions, Flattener, Map, Result, UnflattenOptions, Value};
use indexmap::map::Entry;

/// Container kind required at a slot, inferred from the upcoming segment.
#[derive(Clone, Copy, PartialEq, Debug)]
enum ContainerKind {
    Mapping,
    Sequence,
}

impl ContainerKind {
    fn empty(self) -> Value {
        match self {
            ContainerKind::Mapping => Value::Object(Map::new()),
            ContainerKind::Sequence => Value::Array(Vec::new()),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            ContainerKind::Mapping => "mapping",
            ContainerKind::Sequence => "sequence",
        }
    }
}

/// The unflatten engine.
///
/// Holds an immutable [`UnflattenOptions`] and exposes a single operation.
/// The delimiter must match the one the flat map was produced with.
pub struct Unflattener {
    options: UnflattenOptions,
}

impl Unflattener {
    /// Creates an engine with the given options.
    #[must_use]
    pub fn new(options: UnflattenOptions) -> Self {
        Unflattener { options }
    }

    /// Rebuilds a nested tree from a flat map.
    ///
    /// A non-mapping input is returned unchanged: scalars and opaque leaves
    /// have no keys to split, and a sequence is not a flat map.
    ///
    /// Values that are themselves non-empty containers are decomposed first
    /// so their contents merge with sibling keys; shallow mode skips that
    /// and moves each value into the output untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`](crate::Error::InvalidOption) if the
    /// options fail validation, and [`Error::ConflictingType`] in strict
    /// mode when two keys require different container kinds at one path.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn unflatten(&self, value: Value) -> Result<Value> {
        self.options.validate()?;

        let map = match value {
            Value::Object(map) => map,
            other => return Ok(other),
        };

        if self.options.shallow {
            return self.unflatten_shallow(map);
        }

        let flat = self.normalize(map)?;
        let mut root = Value::Object(Map::new());
        for (key, value) in flat {
            self.insert_path(&mut root, &key, value)?;
        }
        Ok(root)
    }

    /// Decomposes entries whose value is a non-empty container into compound
    /// keys, so nested values found inside a flat map participate in merging
    /// with their sibling keys.
    ///
    /// Under `max_depth`, the segments a key already consumes count against
    /// the limit: a value only decomposes into the depth budget its key
    /// leaves, and structure below the limit stays embedded — the mirror
    /// image of a depth-limited flatten.
    fn normalize(&self, map: Map) -> Result<Map> {
        let mut flat = Map::new();
        for (key, value) in map {
            if !value.is_container() || value.is_empty_container() {
                flat.insert(key, value);
                continue;
            }

            let remaining = match self.options.max_depth {
                Some(max) => {
                    let consumed = path::split(
                        &key,
                        &self.options.delimiter,
                        self.options.escape,
                        Some(max),
                    )
                    .len();
                    if consumed >= max {
                        flat.insert(key, value);
                        continue;
                    }
                    Some(max - consumed)
                }
                None => None,
            };

            let mut options = FlattenOptions::new()
                .with_delimiter(self.options.delimiter.clone())
                .with_escaping(self.options.escape);
            if let Some(remaining) = remaining {
                options = options.with_max_depth(remaining);
            }
            match Flattener::new(options).flatten(value)? {
                Value::Object(entries) => {
                    for (sub, nested) in entries {
                        let compound = path::join(Some(&key), &sub, &self.options.delimiter);
                        flat.insert(compound, nested);
                    }
                }
                other => {
                    flat.insert(key, other);
                }
            }
        }
        Ok(flat)
    }

    fn insert_path(&self, root: &mut Value, key: &str, value: Value) -> Result<()> {
        let segments = path::split(
            key,
            &self.options.delimiter,
            self.options.escape,
            self.options.max_depth,
        );
        let (last, walk) = match segments.split_last() {
            Some(pair) => pair,
            None => return Ok(()),
        };

        let mut current = root;
        let mut consumed = String::new();
        for (i, segment) in walk.iter().enumerate() {
            if !consumed.is_empty() {
                consumed.push_str(&self.options.delimiter);
            }
            consumed.push_str(segment);

            let next = walk.get(i + 1).unwrap_or(last);
            let required = if !self.options.object && path::array_index(next).is_some() {
                ContainerKind::Sequence
            } else {
                ContainerKind::Mapping
            };
            current = match self.descend(current, segment, required, &consumed)? {
                Some(child) => child,
                // The slot is held by an earlier write; this key is dropped.
                None => return Ok(()),
            };
        }

        if !consumed.is_empty() {
            consumed.push_str(&self.options.delimiter);
        }
        consumed.push_str(last);
        self.assign(current, last, value, &consumed)
    }

    /// Walks one level into `parent`, creating the required container at
    /// `segment` if the slot is free. `Ok(None)` means the key loses a
    /// conflict under the keep-first policy.
    fn descend<'a>(
        &self,
        parent: &'a mut Value,
        segment: &str,
        required: ContainerKind,
        consumed: &str,
    ) -> Result<Option<&'a mut Value>> {
        match parent {
            Value::Object(map) => {
                if !map.contains_key(segment) {
                    map.insert(segment.to_string(), required.empty());
                    return Ok(map.get_mut(segment));
                }
                match map.get_mut(segment) {
                    Some(slot) => self.enter(slot, required, consumed),
                    None => Ok(None),
                }
            }
            Value::Array(arr) => {
                let index = match path::array_index(segment) {
                    Some(index) => index,
                    None => return Ok(None),
                };
                if arr.len() <= index {
                    arr.resize(index + 1, Value::Null);
                }
                let slot = &mut arr[index];
                // Null fills gaps left by sparse indices and counts as a
                // free slot.
                if matches!(slot, Value::Null) {
                    *slot = required.empty();
                    return Ok(Some(slot));
                }
                self.enter(slot, required, consumed)
            }
            _ => Ok(None),
        }
    }

    /// Checks an occupied slot against the required container kind. An index
    /// segment merges into an established mapping as a string key, so any
    /// mapping slot is enterable; a sequence slot only accepts index
    /// segments.
    fn enter<'a>(
        &self,
        slot: &'a mut Value,
        required: ContainerKind,
        consumed: &str,
    ) -> Result<Option<&'a mut Value>> {
        let enterable = matches!(slot, Value::Object(_))
            || (required == ContainerKind::Sequence && matches!(slot, Value::Array(_)));
        if enterable {
            return Ok(Some(slot));
        }
        self.reoccupy(slot, required, consumed)
    }

    /// Settles a conflict where the default policy would drop the later key:
    /// `overwrite` re-creates the slot, `strict` raises, otherwise the first
    /// write stands.
    fn reoccupy<'a>(
        &self,
        slot: &'a mut Value,
        required: ContainerKind,
        consumed: &str,
    ) -> Result<Option<&'a mut Value>> {
        if self.options.overwrite {
            *slot = required.empty();
            return Ok(Some(slot));
        }
        if self.options.strict {
            return Err(Error::conflicting_type(consumed, slot.kind(), required.name()));
        }
        Ok(None)
    }

    /// Places a value at the final segment of its path.
    fn assign(&self, parent: &mut Value, segment: &str, value: Value, consumed: &str) -> Result<()> {
        match parent {
            Value::Object(map) => match map.entry(segment.to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                    Ok(())
                }
                Entry::Occupied(entry) => self.resolve(entry.into_mut(), value, consumed),
            },
            Value::Array(arr) => {
                let index = match path::array_index(segment) {
                    Some(index) => index,
                    None => return Ok(()),
                };
                if arr.len() <= index {
                    arr.resize(index + 1, Value::Null);
                }
                let slot = &mut arr[index];
                if matches!(slot, Value::Null) {
                    *slot = value;
                    return Ok(());
                }
                self.resolve(slot, value, consumed)
            }
            _ => Ok(()),
        }
    }

    /// Settles a collision at a leaf slot. Containers deep-merge; otherwise
    /// the earlier value stands unless `overwrite` is set.
    fn resolve(&self, existing: &mut Value, incoming: Value, consumed: &str) -> Result<()> {
        if self.options.overwrite {
            *existing = incoming;
            return Ok(());
        }
        if existing.is_container() && incoming.is_container() {
            merge(existing, incoming);
            return Ok(());
        }
        if self.options.strict && (existing.is_container() || incoming.is_container()) {
            return Err(Error::conflicting_type(consumed, existing.kind(), incoming.kind()));
        }
        Ok(())
    }

    /// Shallow mode: one split per key, the remainder is a verbatim leaf key
    /// and the value is moved into place without decomposition.
    fn unflatten_shallow(&self, map: Map) -> Result<Value> {
        let mut root = Map::new();
        for (key, value) in map {
            let (first, rest) =
                path::split_first(&key, &self.options.delimiter, self.options.escape);
            let rest = match rest {
                Some(rest) => rest,
                None => {
                    match root.entry(first) {
                        Entry::Vacant(entry) => {
                            entry.insert(value);
                        }
                        Entry::Occupied(entry) => self.resolve(entry.into_mut(), value, &key)?,
                    }
                    continue;
                }
            };

            let slot = match root.entry(first) {
                Entry::Vacant(entry) => entry.insert(Value::Object(Map::new())),
                Entry::Occupied(entry) => entry.into_mut(),
            };
            let slot = match slot {
                Value::Object(_) => slot,
                other => match self.reoccupy(other, ContainerKind::Mapping, &key)? {
                    Some(slot) => slot,
                    None => continue,
                },
            };
            if let Value::Object(inner) = slot {
                match inner.entry(rest) {
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                    Entry::Occupied(entry) => self.resolve(entry.into_mut(), value, &key)?,
                }
            }
        }
        Ok(Value::Object(root))
    }
}

/// Deep-merges an incoming container into an established one of the same
/// kind: mappings key-wise, sequences by index. Scalar collisions keep the
/// earlier value; differing kinds keep the established container.
fn merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                    Entry::Occupied(entry) => {
                        let slot = entry.into_mut();
                        if slot.is_container() && value.is_container() {
                            merge(slot, value);
                        }
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(incoming)) => {
            for (index, value) in incoming.into_iter().enumerate() {
                if index < existing.len() {
                    let slot = &mut existing[index];
                    if matches!(slot, Value::Null) {
                        *slot = value;
                    } else if slot.is_container() && value.is_container() {
                        merge(slot, value);
                    }
                } else {
                    existing.push(value);
                }
            }
        }
        _ => {}
    }
}
