//! Dotted field paths and the path resolver.

use serde::{Deserialize, Serialize};

use crate::value::{Record, Value};

/// A dot-separated sequence of keys addressing a field anywhere in a
/// record's nesting (`"request.headers.host"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a path from its dotted text.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The dotted text of the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Extend the path with one more segment.
    pub fn child(&self, key: &str) -> FieldPath {
        if self.0.is_empty() {
            FieldPath::new(key)
        } else {
            FieldPath(format!("{}.{}", self.0, key))
        }
    }

    /// Resolve this path against a record.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        resolve(record, &self.0)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath(path)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a dotted path against a record.
///
/// Returns `None` as soon as a segment is missing or the current value is not
/// a container. Absence is an ordinary result, never an error.
///
/// Each segment matches a key exactly, falling back to an ASCII
/// case-insensitive match. A numeric segment indexes into an array.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.get_ignore_case(first)?;

    for segment in segments {
        current = match current {
            Value::Object(nested) => nested.get_ignore_case(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Record {
        Record::new()
            .with_field("a", Record::new().with_field("b", 3))
            .with_field("tags", vec!["x", "y"])
            .with_field("Status", "active")
    }

    #[test]
    fn test_resolve_nested() {
        let record = nested();
        assert_eq!(resolve(&record, "a.b"), Some(&Value::Int(3)));
        assert!(resolve(&record, "a").unwrap().is_object());
    }

    #[test]
    fn test_resolve_missing() {
        let record = nested();
        assert_eq!(resolve(&record, "a.c"), None);
        assert_eq!(resolve(&record, "missing"), None);
        assert_eq!(resolve(&record, ""), None);
        assert_eq!(resolve(&record, "a.b.c"), None);
    }

    #[test]
    fn test_resolve_through_scalar_is_undefined() {
        let record = Record::new().with_field("a", 3);
        assert_eq!(resolve(&record, "a.b"), None);
    }

    #[test]
    fn test_resolve_array_index() {
        let record = nested();
        assert_eq!(resolve(&record, "tags.1"), Some(&Value::from("y")));
        assert_eq!(resolve(&record, "tags.2"), None);
        assert_eq!(resolve(&record, "tags.first"), None);
    }

    #[test]
    fn test_resolve_case_fallback() {
        let record = nested();
        assert_eq!(resolve(&record, "status"), Some(&Value::from("active")));
        assert_eq!(resolve(&record, "Status"), Some(&Value::from("active")));
    }

    #[test]
    fn test_field_path() {
        let path = FieldPath::new("request");
        let child = path.child("host");
        assert_eq!(child.as_str(), "request.host");
        assert_eq!(child.segments().collect::<Vec<_>>(), vec!["request", "host"]);
        assert_eq!(FieldPath::new("").child("a").as_str(), "a");

        let record = Record::new().with_field("request", Record::new().with_field("host", "h"));
        assert_eq!(child.resolve(&record), Some(&Value::from("h")));
    }
}
