//! Parser for filter text.
//!
//! Parsing runs in two passes. The splitter cuts the text at join keywords
//! surrounded by whitespace, then each clause between two keywords is matched
//! against `path op value`. A clause that does not match is rejected and
//! parsing carries on with the next one.

use crate::error::ParseError;
use crate::lexer::{tokenize_clause, tokenize_split, ClauseToken, SplitToken};
use crate::span::{Span, Spanned};
use logsieve_proto::{JoinOp, Predicate};

const CLAUSE_HINT: &str = "a clause looks like `field == value`; operators are ==, !=, > and <";

/// A piece of split filter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Clause text between two join keywords.
    Clause(Span),
    /// A join keyword.
    Join(JoinOp, Span),
}

/// Result of a permissive parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Accepted predicates, in source order.
    pub clauses: Vec<Spanned<Predicate>>,
    /// Clauses that were dropped.
    pub rejected: Vec<ParseError>,
}

impl ParseOutcome {
    /// The accepted predicates without spans.
    pub fn predicates(&self) -> Vec<Predicate> {
        self.clauses.iter().map(|c| c.value.clone()).collect()
    }

    /// Consume the outcome, keeping the accepted predicates.
    pub fn into_predicates(self) -> Vec<Predicate> {
        self.clauses.into_iter().map(|c| c.value).collect()
    }

    /// Check if every clause was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parser for filter text.
pub struct Parser<'source> {
    source: &'source str,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self { source }
    }

    /// Parse every clause, collecting rejected clauses instead of failing.
    pub fn parse(&self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        if self.source.trim().is_empty() {
            return outcome;
        }

        // The join before a clause sticks until the next keyword
        let mut join = JoinOp::And;
        let mut after_join: Option<Span> = None;
        for segment in self.split() {
            match segment {
                Segment::Join(op, span) => {
                    join = op;
                    after_join = Some(span);
                }
                Segment::Clause(span) => match self.parse_clause(span, after_join) {
                    Ok(predicate) => outcome
                        .clauses
                        .push(Spanned::new(predicate.with_join(join), span)),
                    Err(err) => outcome.rejected.push(err),
                },
            }
        }

        outcome
    }

    /// Split the source at join keywords.
    ///
    /// A keyword separates clauses only when whitespace sits on both sides of
    /// it and the whitespace before it was not already taken by the previous
    /// keyword. `a AND OR b` therefore splits once, leaving `OR b` as a
    /// clause.
    pub fn split(&self) -> Vec<Segment> {
        let tokens = tokenize_split(self.source);
        let mut segments = Vec::new();
        let mut clause_start = 0;
        let mut consumed: Option<usize> = None;

        for i in 1..tokens.len().saturating_sub(1) {
            let Some(op) = tokens[i].token.join_op() else {
                continue;
            };
            let (before, after) = (&tokens[i - 1], &tokens[i + 1]);
            if before.token != SplitToken::Whitespace
                || after.token != SplitToken::Whitespace
                || consumed == Some(i - 1)
            {
                continue;
            }

            segments.push(Segment::Clause(Span::new(clause_start, before.span.start)));
            segments.push(Segment::Join(op, tokens[i].span));
            clause_start = after.span.end;
            consumed = Some(i + 1);
        }

        segments.push(Segment::Clause(Span::new(clause_start, self.source.len())));
        segments
    }

    /// Match one clause against `path op value`.
    ///
    /// The first path token followed by an operator wins, whatever precedes
    /// it. The value is the rest of the clause, trimmed; the field is
    /// lower-cased.
    fn parse_clause(&self, span: Span, after_join: Option<Span>) -> Result<Predicate, ParseError> {
        let text = span.slice(self.source);
        if text.trim().is_empty() {
            let at = after_join.unwrap_or(span);
            return Err(ParseError::new("missing clause", span.merge(at))
                .with_hint("remove the dangling join operator or add a clause after it"));
        }

        let tokens = tokenize_clause(text);
        for (i, path) in tokens.iter().enumerate() {
            if path.token != ClauseToken::Path {
                continue;
            }
            let op_index = tokens[i + 1..]
                .iter()
                .position(|t| t.token != ClauseToken::Whitespace)
                .map(|p| i + 1 + p);
            let Some((op_index, op)) = op_index
                .and_then(|j| tokens[j].token.compare_op().map(|op| (j, op)))
            else {
                continue;
            };

            let field = path.span.slice(text).to_lowercase();
            let literal = text[tokens[op_index].span.end..].trim();
            return Ok(Predicate::new(field, op, literal));
        }

        match tokens.iter().find(|t| t.token.compare_op().is_some()) {
            Some(op) => Err(ParseError::new(
                format!("expected a field name before `{}`", op.span.slice(text)),
                op.span.shift(span.start),
            )
            .with_hint("field names use letters, digits, `_` and `.`")),
            None => Err(ParseError::new(
                "expected a comparison operator (==, !=, >, <)",
                trimmed_span(text, span),
            )
            .with_hint(CLAUSE_HINT)),
        }
    }
}

/// `span` narrowed to its non-whitespace content.
fn trimmed_span(text: &str, span: Span) -> Span {
    let start = span.start + (text.len() - text.trim_start().len());
    Span::new(start, start + text.trim().len())
}

/// Parse filter text, dropping clauses that do not match `path op value`.
pub fn parse(source: &str) -> Vec<Predicate> {
    Parser::new(source).parse().into_predicates()
}

/// Parse filter text, failing on the first rejected clause.
pub fn parse_strict(source: &str) -> Result<Vec<Predicate>, ParseError> {
    let outcome = Parser::new(source).parse();
    match outcome.rejected.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(outcome.clauses.into_iter().map(|c| c.value).collect()),
    }
}

/// Parse filter text, keeping spans and rejected clauses.
pub fn diagnose(source: &str) -> ParseOutcome {
    Parser::new(source).parse()
}
