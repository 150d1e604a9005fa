//! Distinct values per field path.
//!
//! The catalogue feeds filter suggestions: for every leaf path seen in the
//! dataset it lists the distinct values found there.

use std::collections::{HashMap, HashSet};

use logsieve_proto::{Record, Value};

/// Distinct values seen at one path, in first-seen order.
#[derive(Debug, Clone, Default)]
struct FacetValues {
    values: Vec<Value>,
    seen: HashSet<String>,
}

impl FacetValues {
    fn insert(&mut self, value: &Value) {
        // Canonical JSON text distinguishes `1` from `"1"`
        let key = value.to_json().to_string();
        if self.seen.insert(key) {
            self.values.push(value.clone());
        }
    }
}

/// Map from dotted leaf path to its distinct values.
///
/// Paths are listed in the order they were first seen.
#[derive(Debug, Clone, Default)]
pub struct FacetCatalogue {
    paths: Vec<String>,
    facets: HashMap<String, FacetValues>,
}

impl FacetCatalogue {
    /// Build the catalogue for a dataset.
    pub fn extract(records: &[Record]) -> Self {
        let mut catalogue = Self::default();
        for record in records {
            catalogue.add_record(record);
        }
        catalogue
    }

    /// Add the leaves of one record.
    pub fn add_record(&mut self, record: &Record) {
        for (key, value) in record.iter() {
            self.add_value(key.to_string(), value);
        }
    }

    fn add_value(&mut self, path: String, value: &Value) {
        match value {
            Value::Object(nested) => {
                for (key, child) in nested.iter() {
                    self.add_value(format!("{}.{}", path, key), child);
                }
            }
            leaf => {
                if !self.facets.contains_key(&path) {
                    self.paths.push(path.clone());
                }
                self.facets.entry(path).or_default().insert(leaf);
            }
        }
    }

    /// Leaf paths in first-seen order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Distinct values at `path`, in first-seen order.
    pub fn values(&self, path: &str) -> Option<&[Value]> {
        self.facets.get(path).map(|f| f.values.as_slice())
    }

    /// Distinct values at `path`, ordered by their text form.
    pub fn sorted_values(&self, path: &str) -> Vec<Value> {
        let mut values = self.values(path).map(<[Value]>::to_vec).unwrap_or_default();
        values.sort_by_key(|v| v.to_text());
        values
    }

    /// Check if a path was seen.
    pub fn contains(&self, path: &str) -> bool {
        self.facets.contains_key(path)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the catalogue has no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> Record {
        Record::from_json(json).unwrap()
    }

    #[test]
    fn test_nested_paths_deduplicated() {
        let records = vec![
            record(serde_json::json!({"a": {"b": 1}})),
            record(serde_json::json!({"a": {"b": 2}})),
            record(serde_json::json!({"a": {"b": 1}})),
        ];
        let catalogue = FacetCatalogue::extract(&records);
        assert_eq!(catalogue.paths().collect::<Vec<_>>(), vec!["a.b"]);
        assert_eq!(catalogue.values("a.b"), Some(&[Value::Int(1), Value::Int(2)][..]));
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            record(serde_json::json!({"level": "warn", "host": "b"})),
            record(serde_json::json!({"extra": true, "level": "error"})),
            record(serde_json::json!({"level": "warn"})),
        ];
        let catalogue = FacetCatalogue::extract(&records);
        assert_eq!(catalogue.paths().collect::<Vec<_>>(), vec!["level", "host", "extra"]);
        assert_eq!(
            catalogue.values("level"),
            Some(&[Value::from("warn"), Value::from("error")][..])
        );
        assert_eq!(
            catalogue.sorted_values("level"),
            vec![Value::from("error"), Value::from("warn")]
        );
    }

    #[test]
    fn test_arrays_and_null_are_leaves() {
        let records = vec![
            record(serde_json::json!({"tags": ["a", "b"], "gone": null})),
            record(serde_json::json!({"tags": ["a", "b"], "gone": null})),
        ];
        let catalogue = FacetCatalogue::extract(&records);
        assert_eq!(catalogue.values("tags").map(<[Value]>::len), Some(1));
        assert_eq!(catalogue.values("gone"), Some(&[Value::Null][..]));
    }

    #[test]
    fn test_number_and_numeric_text_kept_apart() {
        let records = vec![
            record(serde_json::json!({"code": 1})),
            record(serde_json::json!({"code": "1"})),
        ];
        let catalogue = FacetCatalogue::extract(&records);
        assert_eq!(catalogue.values("code").map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_empty() {
        let catalogue = FacetCatalogue::extract(&[]);
        assert!(catalogue.is_empty());
        assert_eq!(catalogue.values("a"), None);
        assert!(catalogue.sorted_values("a").is_empty());
    }
}
