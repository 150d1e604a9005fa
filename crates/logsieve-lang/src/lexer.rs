//! Lexers for filter text, built on logos.
//!
//! Filter text is lexed twice. [`SplitToken`] finds the join keywords that
//! separate clauses; [`ClauseToken`] then scans each clause for the
//! `path op value` shape.

use crate::span::Span;
use logos::Logos;
use logsieve_proto::{CompareOp, JoinOp};

/// Tokens that split filter text at join keywords.
///
/// A keyword only lexes as such when it is the whole whitespace-delimited
/// word: `android` or `AND==` lex as [`SplitToken::Word`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitToken {
    #[regex(r"\s+")]
    Whitespace,

    // Join keywords, any case
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("xor", ignore(ascii_case))]
    Xor,
    #[token("nand", ignore(ascii_case))]
    Nand,

    #[regex(r"[^\s]+")]
    Word,
}

impl SplitToken {
    /// The join operator this token spells, if it is a keyword.
    pub fn join_op(self) -> Option<JoinOp> {
        match self {
            SplitToken::And => Some(JoinOp::And),
            SplitToken::Or => Some(JoinOp::Or),
            SplitToken::Xor => Some(JoinOp::Xor),
            SplitToken::Nand => Some(JoinOp::Nand),
            SplitToken::Whitespace | SplitToken::Word => None,
        }
    }
}

/// Tokens inside a single clause.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseToken {
    /// A maximal run of identifier characters and dots.
    #[regex(r"[a-zA-Z0-9_.]+")]
    Path,

    #[regex(r"\s+")]
    Whitespace,

    // Comparison operators
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,

    /// Anything else, including a lone `=` or `!`.
    #[token("=")]
    #[token("!")]
    #[regex(r"[^a-zA-Z0-9_.\s=!<>]+")]
    Other,
}

impl ClauseToken {
    /// The comparison operator this token spells, if any.
    pub fn compare_op(self) -> Option<CompareOp> {
        match self {
            ClauseToken::Eq => Some(CompareOp::Eq),
            ClauseToken::Ne => Some(CompareOp::Ne),
            ClauseToken::Gt => Some(CompareOp::Gt),
            ClauseToken::Lt => Some(CompareOp::Lt),
            ClauseToken::Path | ClauseToken::Whitespace | ClauseToken::Other => None,
        }
    }
}

/// A token with its span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<T> {
    pub token: T,
    pub span: Span,
}

/// Lex `source` into split tokens.
pub fn tokenize_split(source: &str) -> Vec<SpannedToken<SplitToken>> {
    tokenize_with(source, SplitToken::Word)
}

/// Lex a single clause into clause tokens.
pub fn tokenize_clause(source: &str) -> Vec<SpannedToken<ClauseToken>> {
    tokenize_with(source, ClauseToken::Other)
}

/// Run a logos lexer to completion, mapping lexer errors to `fallback`.
fn tokenize_with<'source, T>(source: &'source str, fallback: T) -> Vec<SpannedToken<T>>
where
    T: Logos<'source, Source = str, Extras = ()> + Copy,
{
    let mut lexer = T::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        tokens.push(SpannedToken {
            token: result.unwrap_or(fallback),
            span: lexer.span().into(),
        });
    }
    tokens
}
