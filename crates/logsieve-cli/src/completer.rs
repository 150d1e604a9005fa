//! Tab completion for the REPL.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper completing dot-commands, field paths and join keywords.
pub struct SieveHelper {
    /// Known field paths, from the facet catalogue.
    pub fields: Vec<String>,
}

impl SieveHelper {
    /// Create a new helper with no known fields.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Update the field list.
    pub fn set_fields(&mut self, fields: Vec<String>) {
        self.fields = fields;
    }
}

impl Default for SieveHelper {
    fn default() -> Self {
        Self::new()
    }
}

/// Dot-commands for completion.
const DOT_COMMANDS: &[&str] = &[
    ".sort", ".clear", ".facets", ".add", ".rm", ".filters", ".columns", ".format", ".reload",
    ".help", ".exit", ".quit",
];

/// Commands whose first argument is a field path.
const FIELD_COMMANDS: &[&str] = &[".sort", ".facets", ".add"];

/// Join keywords.
const JOIN_KEYWORDS: &[&str] = &["AND", "OR", "XOR", "NAND"];

impl SieveHelper {
    fn candidates(&self, line_to_cursor: &str, word: &str, word_start: usize) -> Vec<Pair> {
        let pair = |s: &str| Pair {
            display: s.to_string(),
            replacement: s.to_string(),
        };

        // Dot commands at start of line
        if line_to_cursor.trim_start().starts_with('.') && !line_to_cursor.trim_start().contains(' ') {
            return DOT_COMMANDS
                .iter()
                .copied()
                .filter(|cmd| cmd.starts_with(line_to_cursor.trim()))
                .map(pair)
                .collect();
        }

        if word.is_empty() {
            return Vec::new();
        }

        let lower = word.to_lowercase();
        let mut completions: Vec<Pair> = self
            .fields
            .iter()
            .filter(|f| f.to_lowercase().starts_with(&lower))
            .map(|f| pair(f.as_str()))
            .collect();

        // Keywords only make sense inside filter text, after the first clause
        let is_command = line_to_cursor.trim_start().starts_with('.');
        if !is_command && word_start > 0 {
            completions.extend(
                JOIN_KEYWORDS
                    .iter()
                    .copied()
                    .filter(|kw| kw.to_lowercase().starts_with(&lower))
                    .map(pair),
            );
        }

        if is_command {
            let command = line_to_cursor.split_whitespace().next().unwrap_or_default();
            let first_arg = line_to_cursor[..word_start].split_whitespace().count() == 1;
            if !FIELD_COMMANDS.contains(&command) || !first_arg {
                return Vec::new();
            }
        }

        completions
    }
}

impl Completer for SieveHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];

        // Find the start of the current word
        let word_start = line_to_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &line_to_cursor[word_start..];

        if line_to_cursor.trim_start().starts_with('.') && !line_to_cursor.trim_start().contains(' ') {
            return Ok((0, self.candidates(line_to_cursor, word, word_start)));
        }

        Ok((word_start, self.candidates(line_to_cursor, word, word_start)))
    }
}

impl Hinter for SieveHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for SieveHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: rustyline::highlight::CmdKind) -> bool {
        false
    }
}

impl Validator for SieveHelper {}

impl Helper for SieveHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> SieveHelper {
        let mut helper = SieveHelper::new();
        helper.set_fields(vec![
            "level".to_string(),
            "req.host".to_string(),
            "req.ms".to_string(),
        ]);
        helper
    }

    fn complete(helper: &SieveHelper, line: &str) -> Vec<String> {
        let word_start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
        helper
            .candidates(line, &line[word_start..], word_start)
            .into_iter()
            .map(|p| p.replacement)
            .collect()
    }

    #[test]
    fn test_dot_commands() {
        assert_eq!(complete(&helper(), ".fa"), vec![".facets"]);
        assert_eq!(complete(&helper(), ".f"), vec![".facets", ".filters", ".format"]);
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(complete(&helper(), "re"), vec!["req.host", "req.ms"]);
        assert_eq!(complete(&helper(), "level == error AND req.h"), vec!["req.host"]);
    }

    #[test]
    fn test_join_keywords() {
        assert_eq!(complete(&helper(), "level == error o"), vec!["OR"]);
        assert_eq!(complete(&helper(), "level == error n"), vec!["NAND"]);
    }

    #[test]
    fn test_command_arguments() {
        assert_eq!(complete(&helper(), ".sort le"), vec!["level"]);
        assert!(complete(&helper(), ".format le").is_empty());
        assert!(complete(&helper(), ".add level le").is_empty());
    }
}
