//! Turning predicates back into filter text.

use logsieve_proto::{Predicate, Value};

/// Render predicates as filter text that parses back to the same list.
///
/// The first predicate is written without a keyword, so its join does not
/// survive rendering. Literals containing a whitespace-delimited join keyword
/// or surrounding whitespace do not round-trip either.
pub fn render(predicates: &[Predicate]) -> String {
    let mut text = String::new();
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            text.push(' ');
            text.push_str(predicate.join.as_str());
            text.push(' ');
        }
        text.push_str(&predicate.clause_text());
    }
    text
}

/// Equality clauses selecting `value` at `field`.
///
/// Objects expand to one clause per leaf, with nested keys appended to the
/// path. Every other value yields a single `field == value` clause.
pub fn clauses_for_value(field: &str, value: &Value) -> Vec<String> {
    let mut clauses = Vec::new();
    collect_clauses(field, value, &mut clauses);
    clauses
}

fn collect_clauses(field: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(record) => {
            for (key, nested) in record.iter() {
                collect_clauses(&format!("{}.{}", field, key), nested, out);
            }
        }
        _ => out.push(format!("{} == {}", field, value.to_text())),
    }
}

/// Append clauses to filter text, joining everything with `AND`.
///
/// Blank text is replaced outright.
pub fn append_clauses(text: &str, clauses: &[String]) -> String {
    if clauses.is_empty() {
        return text.to_string();
    }
    let addition = clauses.join(" AND ");
    if text.trim().is_empty() {
        addition
    } else {
        format!("{} AND {}", text, addition)
    }
}
