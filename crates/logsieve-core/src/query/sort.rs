//! Record ordering.

use std::cmp::Ordering;

use logsieve_proto::{resolve, Record, SortConfig, SortDirection, Value};

/// A resolved sort key.
///
/// Keys rank missing/null first, then numbers, then text. Within a rank,
/// numbers compare with [`f64::total_cmp`] and text compares bytewise, which
/// keeps the comparator a total order.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => SortKey::Missing,
            Some(value) => match value.as_number() {
                // total_cmp ranks -0.0 below 0.0
                Some(n) if n == 0.0 => SortKey::Number(0.0),
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(value.to_text()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two records on `path`, ascending.
pub fn compare_records(a: &Record, b: &Record, path: &str) -> Ordering {
    SortKey::of(resolve(a, path)).compare(&SortKey::of(resolve(b, path)))
}

/// Sort record indices in place.
///
/// Keys are resolved once per record. Equal keys keep their relative order in
/// both directions.
pub fn sort_indices(records: &[Record], indices: &mut [usize], config: &SortConfig) {
    let Some(key) = &config.key else {
        return;
    };

    let mut keyed: Vec<(SortKey, usize)> = indices
        .iter()
        .map(|&i| (SortKey::of(resolve(&records[i], key.as_str())), i))
        .collect();

    match config.direction {
        SortDirection::Asc => keyed.sort_by(|(a, _), (b, _)| a.compare(b)),
        SortDirection::Desc => keyed.sort_by(|(a, _), (b, _)| b.compare(a)),
    }

    for (slot, (_, i)) in indices.iter_mut().zip(keyed) {
        *slot = i;
    }
}

/// A sorted copy of `records`. The input is untouched.
pub fn sort_records(records: &[Record], config: &SortConfig) -> Vec<Record> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    sort_indices(records, &mut indices, config);
    indices.into_iter().map(|i| records[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Record::new().with_field("id", i as i64).with_field("k", v))
            .collect()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get("id").and_then(Value::as_i64).unwrap_or(-1))
            .collect()
    }

    #[test]
    fn test_unsorted_is_identity() {
        let input = records(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        let sorted = sort_records(&input, &SortConfig::unsorted());
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_numeric_ascending_and_descending() {
        let input = records(vec![Value::Int(10), Value::Int(9), Value::Float(9.5)]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![1, 2, 0]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::desc("k"))), vec![0, 2, 1]);
    }

    #[test]
    fn test_signed_zeros_sort_equal() {
        let input = records(vec![Value::Float(-0.0), Value::Int(0), Value::Float(-0.0), Value::Float(0.0)]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![0, 1, 2, 3]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::desc("k"))), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_numeric_text_sorts_as_number() {
        let input = records(vec![Value::from("10"), Value::from("9")]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![1, 0]);
    }

    #[test]
    fn test_text_lexicographic() {
        let input = records(vec![Value::from("beta"), Value::from("Alpha"), Value::from("alpha")]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![1, 2, 0]);
    }

    #[test]
    fn test_mixed_ranks() {
        let input = records(vec![
            Value::from("text"),
            Value::Null,
            Value::Int(5),
            Value::Bool(false),
        ]);
        // null, number, then text ("false" < "text")
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![1, 2, 3, 0]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::desc("k"))), vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_missing_key_sorts_first() {
        let mut input = records(vec![Value::Int(2), Value::Int(1)]);
        input.push(Record::new().with_field("id", 2i64));
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![2, 1, 0]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let input = records(vec![Value::Int(1), Value::Int(0), Value::Int(1), Value::Int(0)]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::asc("k"))), vec![1, 3, 0, 2]);
        assert_eq!(ids(&sort_records(&input, &SortConfig::desc("k"))), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_nan_does_not_break_order() {
        let input = records(vec![Value::Float(f64::NAN), Value::Int(1), Value::Float(-0.5)]);
        let sorted = sort_records(&input, &SortConfig::asc("k"));
        assert_eq!(sorted.len(), 3);
        assert_eq!(ids(&sorted)[0], 2);
    }

    #[test]
    fn test_compare_records() {
        let a = Record::new().with_field("n", 1);
        let b = Record::new().with_field("n", 2);
        assert_eq!(compare_records(&a, &b, "n"), Ordering::Less);
        assert_eq!(compare_records(&a, &a, "n"), Ordering::Equal);
    }
}
