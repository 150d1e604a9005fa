//! logsieve command-line log browser
//!
//! Loads a JSON record set and filters, sorts and inspects it, either once
//! from the command line or in an interactive shell.

mod commands;
mod completer;
mod formatter;
mod repl;

use clap::Parser;
use formatter::OutputFormat;
use logsieve_client::{ClientConfig, DatasetLoader, JsonFileProvider, LoadOutcome, StaticToken};
use logsieve_core::QuerySession;
use logsieve_proto::{SortConfig, SortDirection};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// logsieve command-line log browser
#[derive(Parser, Debug)]
#[command(name = "logsieve")]
#[command(version, about = "Filter, sort and inspect JSON log records")]
pub struct Args {
    /// JSON file holding the records
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// JSON pointer to the record array (e.g. /logs/logs)
    #[arg(long)]
    pub records_at: Option<String>,

    /// Access token handed to the record provider
    #[arg(long)]
    pub token: Option<String>,

    /// Apply a filter, print the rows and exit
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Print the facet catalogue instead of rows (with -c)
    #[arg(long)]
    pub facets: bool,

    /// Maximum source file size in MB
    #[arg(long, default_value_t = 64)]
    pub max_source_mb: u64,
}

impl Args {
    /// Client configuration for these arguments.
    pub fn to_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.file)
            .with_max_source_size(self.max_source_mb.saturating_mul(1024 * 1024));
        if let Some(pointer) = &self.records_at {
            config = config.with_records_pointer(pointer);
        }
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        config
    }

    /// Initial sort configuration.
    pub fn sort_config(&self) -> SortConfig {
        match &self.sort {
            Some(key) => SortConfig {
                key: Some(key.as_str().into()),
                direction: if self.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            },
            None => SortConfig::unsorted(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("logsieve_cli=info")),
        )
        .init();

    let args = Args::parse();

    let result = run(args).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config();
    let loader = DatasetLoader::new(
        JsonFileProvider::from_config(&config),
        StaticToken::from(config.token.clone()),
    );

    let outcome = loader.auto_load().await;
    tracing::info!(source = %config.source.display(), outcome = ?outcome, "Initial load");

    let mut session = QuerySession::with_records(loader.state().records);
    session.set_sort_config(args.sort_config());

    // Determine which mode to run in
    if let Some(command) = &args.command {
        // Command mode: filter once and exit
        if let LoadOutcome::Failed(message) = outcome {
            return Err(format!("Error fetching records: {}", message).into());
        }
        run_command_mode(&mut session, command, args.facets, args.format);
        Ok(())
    } else {
        // REPL mode: interactive shell
        if let LoadOutcome::Failed(message) = &outcome {
            println!("Warning: Error fetching records: {}", message);
            println!("Use .reload to try again.\n");
        }
        repl::run(loader, session, args.format).await
    }
}

/// Apply a filter and print the result.
fn run_command_mode(session: &mut QuerySession, filter: &str, facets: bool, format: OutputFormat) {
    session.set_filter_text(filter);
    if facets {
        let formatter = formatter::create_formatter(format);
        println!("{}", formatter.format_facets(session.facets(), None));
    } else {
        repl::print_rows(session, format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from([
            "logsieve",
            "--file",
            "logs.json",
            "--records-at",
            "/data",
            "--token",
            "abc",
            "--max-source-mb",
            "1",
        ]);
        let config = args.to_config();
        assert_eq!(config.source, PathBuf::from("logs.json"));
        assert_eq!(config.records_pointer.as_deref(), Some("/data"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.max_source_size, 1024 * 1024);
    }

    #[test]
    fn test_default_token_and_sort() {
        let args = Args::parse_from(["logsieve", "-f", "logs.json", "--sort", "time", "--desc"]);
        assert_eq!(args.to_config().token.as_deref(), Some("anonymous"));
        assert_eq!(args.sort_config(), SortConfig::desc("time"));
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn test_max_source_size_saturates() {
        let args = Args::parse_from([
            "logsieve",
            "-f",
            "logs.json",
            "--max-source-mb",
            "18446744073709551615",
        ]);
        assert_eq!(args.to_config().max_source_size, u64::MAX);
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Args::try_parse_from(["logsieve", "-f", "x.json", "--desc"]).is_err());
    }
}
