//! Conversion between record values and `serde_json` documents.
//!
//! Providers hand over JSON; the engine works on [`Value`]/[`Record`]. Key
//! order survives the round trip because `serde_json` is built with
//! `preserve_order`.

use serde_json::{Map, Number};

use crate::error::Error;
use crate::value::{Record, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(map_to_record(map)),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(record) => record.into(),
        }
    }
}

impl From<Record> for serde_json::Value {
    fn from(record: Record) -> Self {
        let map: Map<String, serde_json::Value> = record
            .into_iter()
            .map(|(name, value)| (name, value.into()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Record::from_json(json)
    }
}

impl Record {
    /// Build a record from a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self, Error> {
        match json {
            serde_json::Value::Object(map) => Ok(map_to_record(map)),
            other => Err(Error::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Convert the record into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        self.clone().into()
    }
}

impl Value {
    /// Convert the value into JSON.
    pub fn to_json(&self) -> serde_json::Value {
        self.clone().into()
    }
}

/// Build records from the elements of a JSON array.
///
/// Every element must be an object; the first offender fails the batch.
pub fn records_from_json(items: Vec<serde_json::Value>) -> Result<Vec<Record>, Error> {
    items.into_iter().map(Record::from_json).collect()
}

fn map_to_record(map: Map<String, serde_json::Value>) -> Record {
    map.into_iter()
        .map(|(name, value)| (name, Value::from(value)))
        .collect()
}

fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let record = Record::from_json(json!({
            "zeta": 1,
            "alpha": {"inner": true},
            "mid": [1, 2]
        }))
        .unwrap();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert!(record.get("alpha").unwrap().is_object());
        assert_eq!(record.get("mid"), Some(&Value::from(vec![1, 2])));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(2.5)), Value::Float(2.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_not_an_object() {
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { found: "array" }));

        let err = records_from_json(vec![json!({"a": 1}), json!("x")]).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { found: "string" }));
    }

    #[test]
    fn test_serde_through_json() {
        let record: Record = serde_json::from_str(r#"{"a":{"b":3},"c":"x"}"#).unwrap();
        assert_eq!(
            record.get("a").and_then(Value::as_record).and_then(|r| r.get("b")),
            Some(&Value::Int(3))
        );

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"a":{"b":3},"c":"x"}"#);

        assert!(serde_json::from_str::<Record>("[1]").is_err());
    }
}
