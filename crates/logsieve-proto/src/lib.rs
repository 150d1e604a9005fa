//! logsieve data model.
//!
//! This crate defines the types shared by the filter language, the query
//! engine and the record providers.
//!
//! # Modules
//!
//! - [`value`] - Loosely-typed record values and the ordered [`Record`] mapping
//! - [`path`] - Dotted field paths and the path resolver
//! - [`filter`] - Parsed filter predicates and their operators
//! - [`sort`] - Column sort configuration
//! - [`json`] - Conversion from and to `serde_json` documents
//! - [`error`] - Data model error types
//!
//! # Example
//!
//! ```rust
//! use logsieve_proto::{resolve, Record, Value};
//!
//! let record = Record::from_json(serde_json::json!({"a": {"b": 3}})).unwrap();
//! assert_eq!(resolve(&record, "a.b"), Some(&Value::Int(3)));
//! assert_eq!(resolve(&record, "a.c"), None);
//! ```

pub mod error;
pub mod filter;
pub mod json;
pub mod path;
pub mod sort;
pub mod value;

pub use error::Error;

// Re-export commonly used types at crate root
pub use filter::{CompareOp, JoinOp, Predicate};
pub use path::{resolve, FieldPath};
pub use sort::{SortConfig, SortDirection};
pub use value::{coerce_text, numeric_text, Record, Value};
