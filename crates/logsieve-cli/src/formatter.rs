//! Output formatters for rows and facets.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use logsieve_core::FacetCatalogue;
use logsieve_proto::{resolve, Predicate, Record, Value};

/// Number of sample values shown per path in the facet overview.
const FACET_SAMPLES: usize = 5;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format visible rows under the given columns.
    fn format_rows(&self, columns: &[String], rows: &[&Record]) -> String;

    /// Format the facet catalogue, or the values of one path.
    fn format_facets(&self, facets: &FacetCatalogue, path: Option<&str>) -> String;

    /// Format the accepted filter clauses.
    fn format_predicates(&self, predicates: &[Predicate]) -> String;

    /// Format a simple message.
    fn format_message(&self, message: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_rows(&self, columns: &[String], rows: &[&Record]) -> String {
        if rows.is_empty() {
            return "No results".to_string();
        }

        let mut table = Table::new();
        table.set_header(columns.iter().map(Cell::new).collect::<Vec<_>>());
        for record in rows {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| Cell::new(format_cell(resolve(record, column))))
                .collect();
            table.add_row(cells);
        }

        format!("{}\n{} row(s)", table, rows.len())
    }

    fn format_facets(&self, facets: &FacetCatalogue, path: Option<&str>) -> String {
        let mut table = Table::new();
        match path {
            Some(path) => {
                if !facets.contains(path) {
                    return format!("No values for '{}'", path);
                }
                table.set_header(vec![path]);
                for value in facets.sorted_values(path) {
                    table.add_row(vec![format_cell(Some(&value))]);
                }
            }
            None => {
                table.set_header(vec!["Path", "Distinct", "Values"]);
                for path in facets.paths() {
                    let values = facets.values(path).unwrap_or_default();
                    let mut sample: Vec<String> = values
                        .iter()
                        .take(FACET_SAMPLES)
                        .map(|v| format_cell(Some(v)))
                        .collect();
                    if values.len() > FACET_SAMPLES {
                        sample.push("...".to_string());
                    }
                    table.add_row(vec![
                        path.to_string(),
                        values.len().to_string(),
                        sample.join(", "),
                    ]);
                }
            }
        }
        table.to_string()
    }

    fn format_predicates(&self, predicates: &[Predicate]) -> String {
        if predicates.is_empty() {
            return "No filters".to_string();
        }

        let mut table = Table::new();
        table.set_header(vec!["#", "Join", "Field", "Op", "Value"]);
        for (i, predicate) in predicates.iter().enumerate() {
            let join = if i == 0 {
                String::new()
            } else {
                predicate.join.to_string()
            };
            table.add_row(vec![
                i.to_string(),
                join,
                predicate.field.to_string(),
                predicate.operator.to_string(),
                predicate.literal.clone(),
            ]);
        }
        table.to_string()
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_rows(&self, _columns: &[String], rows: &[&Record]) -> String {
        let rows: Vec<serde_json::Value> = rows.iter().map(|r| r.to_json()).collect();
        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_facets(&self, facets: &FacetCatalogue, path: Option<&str>) -> String {
        let json = match path {
            Some(path) => serde_json::Value::Array(
                facets.sorted_values(path).iter().map(Value::to_json).collect(),
            ),
            None => {
                let mut obj = serde_json::Map::new();
                for path in facets.paths() {
                    let values = facets.values(path).unwrap_or_default();
                    obj.insert(
                        path.to_string(),
                        serde_json::Value::Array(values.iter().map(Value::to_json).collect()),
                    );
                }
                serde_json::Value::Object(obj)
            }
        };
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_predicates(&self, predicates: &[Predicate]) -> String {
        serde_json::to_string_pretty(predicates).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({
            "message": message
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_rows(&self, columns: &[String], rows: &[&Record]) -> String {
        let mut output = String::new();

        let headers: Vec<String> = columns.iter().map(|c| quote_csv(c)).collect();
        output.push_str(&headers.join(","));
        output.push('\n');

        for record in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| format_value_csv(resolve(record, column)))
                .collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    fn format_facets(&self, facets: &FacetCatalogue, path: Option<&str>) -> String {
        let mut output = String::from("path,value\n");
        let paths: Vec<&str> = match path {
            Some(path) => vec![path],
            None => facets.paths().collect(),
        };
        for path in paths {
            for value in facets.sorted_values(path) {
                output.push_str(&format!("{},{}\n", quote_csv(path), format_value_csv(Some(&value))));
            }
        }
        output
    }

    fn format_predicates(&self, predicates: &[Predicate]) -> String {
        let mut output = String::from("index,join,field,operator,value\n");
        for (i, predicate) in predicates.iter().enumerate() {
            output.push_str(&format!(
                "{},{},{},{},{}\n",
                i,
                predicate.join,
                quote_csv(predicate.field.as_str()),
                predicate.operator,
                quote_csv(&predicate.literal)
            ));
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// Format a resolved value for display.
fn format_cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Null) => "null".to_string(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => value.to_json().to_string(),
        Some(value) => value.to_text(),
    }
}

/// Format a resolved value for CSV output.
fn format_value_csv(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => quote_csv(s),
        Some(value @ (Value::Object(_) | Value::Array(_))) => quote_csv(&value.to_json().to_string()),
        Some(value) => value.to_text(),
    }
}

/// Quote a field for CSV.
fn quote_csv(s: &str) -> String {
    format!("\"{}\"", escape_csv(s))
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
