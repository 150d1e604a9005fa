//! Client error types.

use thiserror::Error;

/// Errors raised while fetching a dataset.
#[derive(Debug, Error)]
pub enum Error {
    /// The token source had nothing to offer.
    #[error("No token available")]
    NoToken,

    /// The record provider failed.
    #[error("provider error: {0}")]
    Provider(String),

    /// The source file is larger than allowed.
    #[error("source is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    /// Reading the source failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source holds something other than records.
    #[error("protocol error: {0}")]
    Proto(#[from] logsieve_proto::Error),
}
