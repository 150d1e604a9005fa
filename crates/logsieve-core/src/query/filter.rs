//! Filter evaluation.
//!
//! Predicates fold left to right into a single boolean per record. There is
//! no precedence: `a OR b AND c` reads as `(a OR b) AND c`.

use std::cmp::Ordering;

use logsieve_proto::{numeric_text, resolve, CompareOp, JoinOp, Predicate, Record, Value};

/// Evaluates parsed predicates against records.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Check whether a record passes the predicate list.
    ///
    /// An empty list passes everything. Otherwise the fold is seeded with
    /// `true` when the first predicate joins with `AND` and `false` for any
    /// other join. A field that is missing or null forces the result to
    /// `false` under `AND` and is skipped under the other joins.
    pub fn matches(record: &Record, predicates: &[Predicate]) -> bool {
        let Some(first) = predicates.first() else {
            return true;
        };

        let mut result = first.join.seed();
        for predicate in predicates {
            match resolve(record, predicate.field.as_str()) {
                None | Some(Value::Null) => {
                    if predicate.join == JoinOp::And {
                        result = false;
                    }
                }
                Some(value) => {
                    let cond = Self::compare(value, predicate.operator, &predicate.literal);
                    result = predicate.join.apply(result, cond);
                }
            }
        }
        result
    }

    /// Compare a record value against a literal.
    ///
    /// A numeric literal compares numerically against any value with a
    /// numeric reading: booleans read as `1`/`0` and blank text as `0`.
    /// Everything else compares as case-sensitive text.
    pub fn compare(value: &Value, op: CompareOp, literal: &str) -> bool {
        if let (Some(b), Some(a)) = (numeric_text(literal), value.coerce_number()) {
            return match op {
                CompareOp::Eq => a == b,
                CompareOp::Ne => a != b,
                CompareOp::Gt => a > b,
                CompareOp::Lt => a < b,
            };
        }

        let ordering = value.to_text().as_str().cmp(literal);
        match op {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Lt => ordering == Ordering::Less,
        }
    }

    /// Records passing the predicates, in input order.
    pub fn filter(records: &[Record], predicates: &[Predicate]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| Self::matches(r, predicates))
            .cloned()
            .collect()
    }

    /// Indices of the records passing the predicates, in input order.
    pub fn filter_indices(records: &[Record], predicates: &[Predicate]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| Self::matches(r, predicates))
            .map(|(i, _)| i)
            .collect()
    }
}
