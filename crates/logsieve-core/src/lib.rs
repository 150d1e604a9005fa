//! logsieve core - filtering, sorting and facets over loaded records.
//!
//! This crate evaluates parsed filter predicates against records, orders the
//! result by a column and collects the distinct values per field path. A
//! [`QuerySession`] ties these together over one dataset.
//!
//! # Example
//!
//! ```rust
//! use logsieve_core::QuerySession;
//! use logsieve_proto::Record;
//!
//! let mut session = QuerySession::with_records(vec![
//!     Record::new().with_field("status", "active").with_field("level", 3),
//!     Record::new().with_field("status", "inactive").with_field("level", 5),
//! ]);
//! session.set_filter_text("status == active AND level > 2");
//! assert_eq!(session.visible_len(), 1);
//! ```

pub mod error;
pub mod facet;
pub mod query;
pub mod schema;
pub mod session;

pub use error::CoreError;
pub use facet::FacetCatalogue;
pub use query::{sort_records, FilterEvaluator};
pub use schema::Schema;
pub use session::{PredicateEdit, QuerySession, SessionStats};
