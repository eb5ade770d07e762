//! Path codec: building and splitting delimiter-joined key strings.
//!
//! Both engines go through this module, so a key produced by joining is
//! guaranteed to split back into the same segments — with one documented
//! exception: in the default mode no escaping is performed, so a segment
//! that itself contains the delimiter is indistinguishable from a segment
//! boundary. Callers that need exact invertibility opt into the
//! backslash-escaping scheme on both sides.
//!
//! ## Examples
//!
//! ```rust
//! use flatkey::path;
//!
//! assert_eq!(path::join(Some("a.b"), "c", "."), "a.b.c");
//! assert_eq!(path::split("a.b.c", ".", false, None), vec!["a", "b", "c"]);
//!
//! assert!(path::is_array_index("42"));
//! assert!(!path::is_array_index("-1"));
//! assert!(!path::is_array_index("1e3"));
//! ```

/// Returns `true` iff the segment is a non-negative integer literal composed
/// only of decimal digits.
///
/// This is the test the unflatten engine uses to decide whether a container
/// level is materialized as a sequence or a mapping. No sign, no whitespace,
/// no exponent; the empty string is not an index.
///
/// # Examples
///
/// ```rust
/// use flatkey::path::is_array_index;
///
/// assert!(is_array_index("0"));
/// assert!(is_array_index("007"));
/// assert!(!is_array_index(""));
/// assert!(!is_array_index("+1"));
/// assert!(!is_array_index("1.5"));
/// ```
#[must_use]
pub fn is_array_index(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a segment as an array index.
///
/// Returns `None` for non-digit segments and for digit strings that overflow
/// `usize` (those are treated as ordinary mapping keys).
#[must_use]
pub fn array_index(segment: &str) -> Option<usize> {
    if is_array_index(segment) {
        segment.parse().ok()
    } else {
        None
    }
}

/// Joins a segment onto an existing key prefix.
///
/// With no prefix the segment itself is the key. No escaping is applied
/// here; the caller escapes the segment first when escaping is enabled.
#[must_use]
pub fn join(prefix: Option<&str>, segment: &str, delimiter: &str) -> String {
    match prefix {
        Some(prefix) => {
            let mut key = String::with_capacity(prefix.len() + delimiter.len() + segment.len());
            key.push_str(prefix);
            key.push_str(delimiter);
            key.push_str(segment);
            key
        }
        None => segment.to_string(),
    }
}

/// Backslash-escapes backslashes and delimiter occurrences inside a segment.
///
/// # Examples
///
/// ```rust
/// use flatkey::path;
///
/// assert_eq!(path::escape("a.b", "."), "a\\.b");
/// assert_eq!(path::escape("back\\slash", "."), "back\\\\slash");
/// ```
#[must_use]
pub fn escape(segment: &str, delimiter: &str) -> String {
    let escaped = segment.replace('\\', "\\\\");
    if delimiter.is_empty() {
        return escaped;
    }
    let mut marked = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();
    while let Some(i) = rest.find(delimiter) {
        marked.push_str(&rest[..i]);
        marked.push('\\');
        marked.push_str(delimiter);
        rest = &rest[i + delimiter.len()..];
    }
    marked.push_str(rest);
    marked
}

/// Reverses [`escape`]: every backslash-prefixed character is taken verbatim.
///
/// A trailing lone backslash is kept as-is.
#[must_use]
pub fn unescape(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Byte offset of the first delimiter occurrence at or after `from` that is
/// not preceded by a backslash escape.
fn find_unescaped(key: &str, from: usize, delimiter: &str) -> Option<usize> {
    let mut i = from;
    while i < key.len() {
        let rest = &key[i..];
        if rest.starts_with('\\') {
            i += 1;
            if let Some(c) = key[i..].chars().next() {
                i += c.len_utf8();
            }
        } else if rest.starts_with(delimiter) {
            return Some(i);
        } else if let Some(c) = rest.chars().next() {
            i += c.len_utf8();
        } else {
            break;
        }
    }
    None
}

/// Splits a key into path segments.
///
/// With `limit = Some(n)` at most `n` segments are produced: the first
/// `n - 1` are split off normally and the remainder of the key is folded
/// verbatim into the final segment. With `escape` set, backslash escapes are
/// honored and each produced segment is unescaped (folded remainders stay
/// raw so they can be re-split later).
///
/// Splitting the empty string yields a single empty segment, which the
/// engines treat as an ordinary mapping key.
///
/// # Examples
///
/// ```rust
/// use flatkey::path;
///
/// assert_eq!(path::split("a.b.c", ".", false, Some(2)), vec!["a", "b.c"]);
/// assert_eq!(path::split("a\\.b.c", ".", true, None), vec!["a.b", "c"]);
/// ```
#[must_use]
pub fn split(key: &str, delimiter: &str, escape: bool, limit: Option<usize>) -> Vec<String> {
    if !escape {
        return match limit {
            Some(n) => key.splitn(n, delimiter).map(str::to_string).collect(),
            None => key.split(delimiter).map(str::to_string).collect(),
        };
    }

    let mut segments = Vec::new();
    let mut pos = 0;
    loop {
        if limit.is_some_and(|n| segments.len() + 1 == n) {
            segments.push(key[pos..].to_string());
            return segments;
        }
        match find_unescaped(key, pos, delimiter) {
            Some(hit) => {
                segments.push(unescape(&key[pos..hit]));
                pos = hit + delimiter.len();
            }
            None => {
                segments.push(unescape(&key[pos..]));
                return segments;
            }
        }
    }
}

/// Splits off the first path segment, returning it together with the
/// verbatim remainder of the key (if any delimiter was present).
///
/// This is the shallow-mode split: the remainder is never decomposed
/// further.
#[must_use]
pub fn split_first(key: &str, delimiter: &str, escape: bool) -> (String, Option<String>) {
    if !escape {
        return match key.find(delimiter) {
            Some(i) => (
                key[..i].to_string(),
                Some(key[i + delimiter.len()..].to_string()),
            ),
            None => (key.to_string(), None),
        };
    }
    match find_unescaped(key, 0, delimiter) {
        Some(i) => (
            unescape(&key[..i]),
            Some(key[i + delimiter.len()..].to_string()),
        ),
        None => (unescape(key), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_array_index() {
        assert!(is_array_index("0"));
        assert!(is_array_index("12"));
        assert!(is_array_index("007"));
        assert!(!is_array_index(""));
        assert!(!is_array_index("-1"));
        assert!(!is_array_index("+1"));
        assert!(!is_array_index("1.0"));
        assert!(!is_array_index("1e3"));
        assert!(!is_array_index("a1"));
        assert!(!is_array_index(" 1"));
    }

    #[test]
    fn test_array_index_overflow() {
        assert_eq!(array_index("3"), Some(3));
        assert_eq!(array_index("007"), Some(7));
        // 40 digits cannot fit in usize, so the segment is a mapping key.
        assert_eq!(array_index("9999999999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(None, "a", "."), "a");
        assert_eq!(join(Some("a"), "b", "."), "a.b");
        assert_eq!(join(Some("a.b"), "0", "."), "a.b.0");
        assert_eq!(join(Some("a"), "b", "::"), "a::b");
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(split("a.b.c", ".", false, None), vec!["a", "b", "c"]);
        assert_eq!(split("abc", ".", false, None), vec!["abc"]);
        assert_eq!(split("", ".", false, None), vec![""]);
        assert_eq!(split("a.", ".", false, None), vec!["a", ""]);
        assert_eq!(split(".a", ".", false, None), vec!["", "a"]);
        assert_eq!(split("a::b::c", "::", false, None), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_with_limit() {
        assert_eq!(split("a.b.c.d", ".", false, Some(2)), vec!["a", "b.c.d"]);
        assert_eq!(split("a.b.c.d", ".", false, Some(3)), vec!["a", "b", "c.d"]);
        assert_eq!(split("a.b", ".", false, Some(5)), vec!["a", "b"]);
        assert_eq!(split("a.b", ".", false, Some(1)), vec!["a.b"]);
    }

    #[test]
    fn test_escape_roundtrip() {
        for segment in ["plain", "a.b", "a..b", "trailing.", "back\\slash", "\\."] {
            let escaped = escape(segment, ".");
            assert_eq!(split(&escaped, ".", true, None), vec![segment.to_string()]);
        }
    }

    #[test]
    fn test_split_escaped() {
        assert_eq!(split("a\\.b.c", ".", true, None), vec!["a.b", "c"]);
        assert_eq!(split("a\\\\.b", ".", true, None), vec!["a\\", "b"]);
        assert_eq!(split("x\\::y::z", "::", true, None), vec!["x::y", "z"]);
    }

    #[test]
    fn test_split_escaped_with_limit() {
        assert_eq!(
            split("a\\.x.b.c", ".", true, Some(2)),
            vec!["a.x".to_string(), "b.c".to_string()]
        );
    }

    #[test]
    fn test_split_first() {
        assert_eq!(split_first("a.b.c", ".", false), ("a".into(), Some("b.c".into())));
        assert_eq!(split_first("abc", ".", false), ("abc".into(), None));
        assert_eq!(split_first("a.", ".", false), ("a".into(), Some("".into())));
        assert_eq!(
            split_first("a\\.b.c.d", ".", true),
            ("a.b".into(), Some("c.d".into()))
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a\\.b"), "a.b");
        assert_eq!(unescape("a\\\\b"), "a\\b");
        assert_eq!(unescape("dangling\\"), "dangling\\");
    }
}
