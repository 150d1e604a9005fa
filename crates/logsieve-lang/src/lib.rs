//! logsieve filter language.
//!
//! Filter text is a flat list of comparison clauses separated by join
//! keywords. There is no grouping and no precedence: clauses are folded left
//! to right by the query engine.
//!
//! # Syntax
//!
//! ```text
//! status == active
//! level > 2 AND service != auth
//! req.host == db-1 or req.host == db-2
//! code < 500 XOR retry == true NAND region == eu
//! ```
//!
//! - A clause is `path op value`. The path is letters, digits, `_` and `.`,
//!   and is lower-cased; the value is the rest of the clause, trimmed.
//! - Operators are `==`, `!=`, `>` and `<`.
//! - Join keywords (`AND`, `OR`, `XOR`, `NAND`, any case) need whitespace on
//!   both sides. A keyword applies to every following clause until the next
//!   keyword; the first clause joins with `AND`.
//! - Clauses that do not match are skipped by [`parse`]. Use
//!   [`parse_strict`] or [`diagnose`] to see them.
//!
//! # Example
//!
//! ```rust
//! use logsieve_lang::parse;
//! use logsieve_proto::{CompareOp, JoinOp};
//!
//! let predicates = parse("status == active AND level > 2");
//! assert_eq!(predicates.len(), 2);
//! assert_eq!(predicates[1].field.as_str(), "level");
//! assert_eq!(predicates[1].operator, CompareOp::Gt);
//! assert_eq!(predicates[1].join, JoinOp::And);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod span;

pub use error::{LangError, ParseError};
pub use parser::{diagnose, parse, parse_strict, ParseOutcome, Parser, Segment};
pub use render::{append_clauses, clauses_for_value, render};
pub use span::{Span, Spanned};
