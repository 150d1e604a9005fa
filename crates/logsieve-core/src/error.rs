//! Core error types.

use thiserror::Error;

/// Query session errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A structured edit named a clause that does not exist.
    #[error("no filter clause at index {index} (filter has {len})")]
    PredicateIndex { index: usize, len: usize },

    /// The first clause has no join keyword to edit.
    #[error("the first filter clause has no join operator")]
    LeadingJoin,

    /// Filter text was rejected.
    #[error("filter error: {0}")]
    Lang(#[from] logsieve_lang::LangError),
}
