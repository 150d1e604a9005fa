//! Parsed filter predicates.
//!
//! A filter is an ordered list of [`Predicate`]s folded left to right. Each
//! predicate carries the join operator that combines its own outcome with the
//! running result; there is no precedence and no grouping.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::path::FieldPath;

/// Comparison operator of a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl CompareOp {
    /// All operators, in the order a filter builder offers them.
    pub const ALL: [CompareOp; 4] = [CompareOp::Eq, CompareOp::Ne, CompareOp::Gt, CompareOp::Lt];

    /// Operator text as written in filter expressions.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::Ne),
            ">" => Ok(CompareOp::Gt),
            "<" => Ok(CompareOp::Lt),
            other => Err(Error::UnknownOperator(other.to_string())),
        }
    }
}

/// Operator folding a clause outcome into the running result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoinOp {
    /// `result && cond`
    #[default]
    And,
    /// `result || cond`
    Or,
    /// `result ^ cond`
    Xor,
    /// `!(result && cond)`
    Nand,
}

impl JoinOp {
    /// All join operators.
    pub const ALL: [JoinOp; 4] = [JoinOp::And, JoinOp::Or, JoinOp::Xor, JoinOp::Nand];

    /// Upper-case keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            JoinOp::And => "AND",
            JoinOp::Or => "OR",
            JoinOp::Xor => "XOR",
            JoinOp::Nand => "NAND",
        }
    }

    /// Initial accumulator when this operator belongs to the first predicate.
    pub fn seed(self) -> bool {
        self == JoinOp::And
    }

    /// Fold a clause outcome into the running result.
    pub fn apply(self, result: bool, cond: bool) -> bool {
        match self {
            JoinOp::And => result && cond,
            JoinOp::Or => result || cond,
            JoinOp::Xor => result ^ cond,
            JoinOp::Nand => !(result && cond),
        }
    }
}

impl std::fmt::Display for JoinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        JoinOp::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))
    }
}

/// A single `field op literal` clause plus the join applied to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    /// Field to resolve on each record.
    pub field: FieldPath,
    /// Comparison operator.
    pub operator: CompareOp,
    /// Literal as typed, trimmed.
    pub literal: String,
    /// Join folding this clause into the running result.
    pub join: JoinOp,
}

impl Predicate {
    /// Create a predicate joined with `AND`.
    pub fn new(field: impl Into<FieldPath>, operator: CompareOp, literal: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            literal: literal.into(),
            join: JoinOp::And,
        }
    }

    /// Set the join operator.
    pub fn with_join(mut self, join: JoinOp) -> Self {
        self.join = join;
        self
    }

    /// Shorthand for an `==` predicate.
    pub fn eq(field: impl Into<FieldPath>, literal: impl Into<String>) -> Self {
        Self::new(field, CompareOp::Eq, literal)
    }

    /// Clause text without the join keyword (`field op literal`).
    pub fn clause_text(&self) -> String {
        format!("{} {} {}", self.field, self.operator, self.literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        let and: Vec<bool> = cases.iter().map(|&(r, c)| JoinOp::And.apply(r, c)).collect();
        let or: Vec<bool> = cases.iter().map(|&(r, c)| JoinOp::Or.apply(r, c)).collect();
        let xor: Vec<bool> = cases.iter().map(|&(r, c)| JoinOp::Xor.apply(r, c)).collect();
        let nand: Vec<bool> = cases.iter().map(|&(r, c)| JoinOp::Nand.apply(r, c)).collect();

        assert_eq!(and, vec![false, false, false, true]);
        assert_eq!(or, vec![false, true, true, true]);
        assert_eq!(xor, vec![false, true, true, false]);
        assert_eq!(nand, vec![true, true, true, false]);
    }

    #[test]
    fn test_seed() {
        assert!(JoinOp::And.seed());
        assert!(!JoinOp::Or.seed());
        assert!(!JoinOp::Xor.seed());
        assert!(!JoinOp::Nand.seed());
    }

    #[test]
    fn test_parse_operators() {
        assert_eq!("nand".parse::<JoinOp>().unwrap(), JoinOp::Nand);
        assert_eq!(" Or ".parse::<JoinOp>().unwrap(), JoinOp::Or);
        assert!("andor".parse::<JoinOp>().is_err());

        assert_eq!("!=".parse::<CompareOp>().unwrap(), CompareOp::Ne);
        assert!(matches!("=".parse::<CompareOp>(), Err(Error::UnknownOperator(_))));
    }

    #[test]
    fn test_clause_text() {
        let p = Predicate::new("level", CompareOp::Gt, "2").with_join(JoinOp::Or);
        assert_eq!(p.clause_text(), "level > 2");
        assert_eq!(p.join, JoinOp::Or);
    }
}
