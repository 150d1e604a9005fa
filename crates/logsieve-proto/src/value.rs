//! Loosely-typed record values.

use serde::{Deserialize, Serialize};

/// A value stored under a record field.
///
/// Records arrive from providers as schemaless documents, so a field may hold
/// any scalar, an array, or another record. `Object` is the only container
/// the facet extractor descends into; every other variant is a leaf.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Non-integral (or out of `i64` range) number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Array, treated as the field's literal value.
    Array(Vec<Value>),
    /// Nested record.
    Object(Record),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a nested record.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if this value is a leaf (anything but a nested record).
    pub fn is_scalar(&self) -> bool {
        !self.is_object()
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as nested record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Short type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Canonical text form of the value.
    ///
    /// Text comparisons and generated filter clauses use this form: integral
    /// numbers have no fractional part, arrays join their elements with `,`
    /// (null elements render empty) and nested records collapse to
    /// `[object Object]`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Numeric reading of the value, if it has one.
    ///
    /// Numbers read as themselves; strings and arrays read through their text
    /// form with [`numeric_text`]. Booleans, null and records never read as
    /// numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => numeric_text(s),
            Value::Array(_) => numeric_text(&self.to_text()),
            Value::Null | Value::Bool(_) | Value::Object(_) => None,
        }
    }

    /// Numeric reading used when the other side of a comparison is a number.
    ///
    /// Like [`Value::as_number`], but booleans read as `1`/`0` and blank
    /// strings or arrays read as `0`.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(_) | Value::Array(_) => coerce_text(&self.to_text()),
            other => other.as_number(),
        }
    }
}

/// Like [`numeric_text`], but blank text reads as `0`.
pub fn coerce_text(text: &str) -> Option<f64> {
    if text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty() {
        return Some(0.0);
    }
    numeric_text(text)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        f.to_string()
    }
}

/// Read `text` as a number using JavaScript number-literal syntax.
///
/// Accepts optionally signed decimals with fraction and exponent (`-1.5e3`,
/// `.5`, `7.`), unsigned `0x`/`0o`/`0b` integers and `Infinity`. Surrounding
/// whitespace is ignored. Blank text is not a number.
pub fn numeric_text(text: &str) -> Option<f64> {
    let s = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return None;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return Some(
            digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * radix as f64 + d as f64),
        );
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }
    unsigned.parse::<f64>().ok().map(|n| sign * n)
}

/// `digits [. digits?] [exp] | . digits [exp]`, with `exp = (e|E) [+-] digits`.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// An ordered mapping from field name to value.
///
/// Field order is the order the provider delivered; the first record's keys
/// become the session's column list, so order is part of the contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field, replacing the value in place if the name exists.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field value by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a field value, falling back to an ASCII case-insensitive match.
    pub fn get_ignore_case(&self, name: &str) -> Option<&Value> {
        self.get(name).or_else(|| {
            self.fields
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

// Conversion implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Int(42).as_f64(), Some(42.0)); // Widening conversion
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));

        let nested = Value::Object(Record::new().with_field("b", 1));
        assert!(nested.is_object());
        assert!(!nested.is_scalar());
        assert!(Value::Array(vec![]).is_scalar());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "null");
        assert_eq!(Value::Int(-7).to_text(), "-7");
        assert_eq!(Value::Float(3.0).to_text(), "3");
        assert_eq!(Value::Float(2.5).to_text(), "2.5");
        assert_eq!(Value::Float(f64::INFINITY).to_text(), "Infinity");
        assert_eq!(
            Value::from(vec![Value::Int(1), Value::Null, Value::from("x")]).to_text(),
            "1,,x"
        );
        assert_eq!(
            Value::Object(Record::new().with_field("a", 1)).to_text(),
            "[object Object]"
        );
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(numeric_text("42"), Some(42.0));
        assert_eq!(numeric_text("  -1.5e2 "), Some(-150.0));
        assert_eq!(numeric_text(".5"), Some(0.5));
        assert_eq!(numeric_text("7."), Some(7.0));
        assert_eq!(numeric_text("0x1F"), Some(31.0));
        assert_eq!(numeric_text("0b101"), Some(5.0));
        assert_eq!(numeric_text("-Infinity"), Some(f64::NEG_INFINITY));

        assert_eq!(numeric_text(""), None);
        assert_eq!(numeric_text("   "), None);
        assert_eq!(numeric_text("inf"), None);
        assert_eq!(numeric_text("NaN"), None);
        assert_eq!(numeric_text("1e"), None);
        assert_eq!(numeric_text("."), None);
        assert_eq!(numeric_text("12abc"), None);
        assert_eq!(numeric_text("-0x10"), None);
        assert_eq!(numeric_text("active"), None);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::from("3").as_number(), Some(3.0));
        assert_eq!(Value::Int(3).as_number(), Some(3.0));
        assert_eq!(Value::from(vec![5]).as_number(), Some(5.0));
        assert_eq!(Value::Bool(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(Value::Bool(true).coerce_number(), Some(1.0));
        assert_eq!(Value::Bool(false).coerce_number(), Some(0.0));
        assert_eq!(Value::from("").coerce_number(), Some(0.0));
        assert_eq!(Value::from("  ").coerce_number(), Some(0.0));
        assert_eq!(Value::Array(vec![]).coerce_number(), Some(0.0));
        assert_eq!(Value::from("7").coerce_number(), Some(7.0));
        assert_eq!(Value::from("abc").coerce_number(), None);
        assert_eq!(Value::Null.coerce_number(), None);
        assert_eq!(coerce_text(""), Some(0.0));
        assert_eq!(coerce_text("x"), None);
    }

    #[test]
    fn test_record_order_and_lookup() {
        let mut record = Record::new()
            .with_field("Status", "active")
            .with_field("level", 3);
        record.insert("Status", "down");

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Status", "level"]);
        assert_eq!(record.get("Status"), Some(&Value::from("down")));
        assert_eq!(record.get("status"), None);
        assert_eq!(record.get_ignore_case("status"), Some(&Value::from("down")));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_value_conversions() {
        let v: Value = None::<i64>.into();
        assert_eq!(v, Value::Null);

        let v: Value = Some("x").into();
        assert_eq!(v, Value::String("x".into()));

        let record: Record = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(record.get("b"), Some(&Value::Int(2)));
    }
}
