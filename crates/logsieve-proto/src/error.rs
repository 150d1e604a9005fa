//! Data model error types.

use thiserror::Error;

/// Errors raised while building records from external documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A record must be a JSON object.
    #[error("expected a JSON object for a record, found {found}")]
    NotAnObject { found: &'static str },

    /// Unknown comparison or join operator text.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}
