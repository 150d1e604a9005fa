//! REPL dot-command handling.

use crate::formatter::{create_formatter, OutputFormat};
use logsieve_core::QuerySession;
use logsieve_proto::Value;

/// Result of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Exit the REPL.
    Exit,
    /// Output to display.
    Output(String),
    /// The filter or sort changed; show the rows again.
    Refresh,
    /// Change the output format.
    SetFormat(OutputFormat),
    /// Fetch the dataset again.
    Reload,
}

/// Parse and execute a dot-command against the session.
pub fn handle_command(line: &str, session: &mut QuerySession, format: OutputFormat) -> CommandResult {
    let line = line.trim();
    let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
    let command = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());
    let formatter = create_formatter(format);

    match command.as_str() {
        ".exit" | ".quit" | ".q" => CommandResult::Exit,

        ".help" | ".h" | ".?" => CommandResult::Output(get_help()),

        ".sort" => match arg {
            Some(column) => {
                session.set_sort(column);
                CommandResult::Refresh
            }
            None => {
                let config = session.sort_config();
                match &config.key {
                    Some(key) => CommandResult::Output(format!("Sorted by {} {}", key, config.direction)),
                    None => CommandResult::Output("Not sorted".to_string()),
                }
            }
        },

        ".clear" => {
            session.clear_filters();
            CommandResult::Refresh
        }

        ".facets" => CommandResult::Output(formatter.format_facets(session.facets(), arg)),

        ".add" => {
            let Some((field, value)) = arg.and_then(|a| a.split_once(char::is_whitespace)) else {
                return CommandResult::Output("Usage: .add <field> <json-value>".to_string());
            };
            session.append_filter_from_value(field, &parse_value(value.trim()));
            CommandResult::Refresh
        }

        ".rm" => {
            let Some(index) = arg.and_then(|a| a.parse::<usize>().ok()) else {
                return CommandResult::Output("Usage: .rm <n>".to_string());
            };
            match session.remove_predicate(index) {
                Ok(()) => CommandResult::Refresh,
                Err(e) => CommandResult::Output(format!("Error: {}", e)),
            }
        }

        ".filters" => {
            let mut output = formatter.format_predicates(&session.predicates());
            for rejected in session.rejected_clauses() {
                output.push('\n');
                output.push_str(&rejected.format_with_source(session.filter_text()));
            }
            CommandResult::Output(output)
        }

        ".columns" => CommandResult::Output(session.columns().join("\n")),

        ".format" => {
            if let Some(fmt) = arg {
                match fmt.to_lowercase().as_str() {
                    "table" => CommandResult::SetFormat(OutputFormat::Table),
                    "json" => CommandResult::SetFormat(OutputFormat::Json),
                    "csv" => CommandResult::SetFormat(OutputFormat::Csv),
                    _ => CommandResult::Output(format!(
                        "Unknown format '{}'. Use: table, json, csv",
                        fmt
                    )),
                }
            } else {
                CommandResult::Output(format!("Current format: {}", format))
            }
        }

        ".reload" => CommandResult::Reload,

        _ => CommandResult::Output(format!("Unknown command: {}", command)),
    }
}

/// Read a cell value typed by the user: JSON when it parses, text otherwise.
fn parse_value(text: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Check if a line is a dot-command.
pub fn is_command(line: &str) -> bool {
    line.trim().starts_with('.')
}

/// Get help text for REPL commands.
fn get_help() -> String {
    r#"REPL Commands
=============

.sort [column]            Sort by a column; repeat to flip the direction
.clear                    Remove every filter clause
.facets [path]            List distinct values per field, or for one path
.add <field> <value>      Add `field == value` clauses (JSON objects add one per leaf)
.rm <n>                   Remove filter clause n
.filters                  Show the parsed filter and any skipped clauses
.columns                  List the columns
.format [type]            Get or set output format (table, json, csv)
.reload                   Fetch the records again
.help                     Show this help message
.exit / .quit             Exit the REPL

Filter Syntax
=============
Any other line replaces the filter. Clauses are `field op value` with
op one of ==, !=, > or <, joined by AND, OR, XOR or NAND (any case).
Joins fold left to right with no precedence.

Examples:
  level == error
  service == api AND req.ms > 250
  req.host == db-1 OR req.host == db-2
"#
    .to_string()
}
