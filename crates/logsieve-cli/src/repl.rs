//! Interactive REPL implementation.

use crate::commands::{self, CommandResult};
use crate::completer::SieveHelper;
use crate::formatter::{self, OutputFormat};
use logsieve_client::{DatasetLoader, LoadOutcome, RecordProvider, TokenSource};
use logsieve_core::QuerySession;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// Get the history file path.
fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".logsieve_history")
}

/// Field paths offered for completion.
fn completion_fields(session: &QuerySession) -> Vec<String> {
    session.facets().paths().map(str::to_string).collect()
}

/// Print the visible rows in the current format.
pub fn print_rows(session: &QuerySession, format: OutputFormat) {
    let formatter = formatter::create_formatter(format);
    let rows: Vec<_> = session.rows().collect();
    println!("{}", formatter.format_rows(session.columns(), &rows));
    for rejected in session.rejected_clauses() {
        eprint!("{}", rejected.format_with_source(session.filter_text()));
    }
}

/// Run the interactive REPL.
pub async fn run<P, T>(
    loader: DatasetLoader<P, T>,
    mut session: QuerySession,
    initial_format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>>
where
    P: RecordProvider,
    T: TokenSource,
{
    let mut format = initial_format;

    // Set up rustyline
    let rl_config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();

    let mut helper = SieveHelper::new();
    helper.set_fields(completion_fields(&session));
    let mut rl: Editor<SieveHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    // Load history
    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    println!(
        "logsieve - {} records, {} columns. Type .help for commands, .exit to quit\n",
        session.total_len(),
        session.columns().len()
    );

    // Main REPL loop
    loop {
        let prompt = format!("logsieve [{}/{}]> ", session.visible_len(), session.total_len());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                // Handle dot-commands
                if commands::is_command(line) {
                    match commands::handle_command(line, &mut session, format) {
                        CommandResult::Exit => {
                            println!("Goodbye!");
                            break;
                        }
                        CommandResult::Output(msg) => {
                            println!("{}", msg);
                        }
                        CommandResult::Refresh => {
                            println!("Filter: {}", session.filter_text());
                            print_rows(&session, format);
                        }
                        CommandResult::SetFormat(fmt) => {
                            format = fmt;
                            println!("Output format set to {}", format);
                        }
                        CommandResult::Reload => {
                            let formatter = formatter::create_formatter(format);
                            let message = match loader.reload().await {
                                LoadOutcome::Loaded { records } => {
                                    session.load(loader.state().records);
                                    if let Some(helper) = rl.helper_mut() {
                                        helper.set_fields(completion_fields(&session));
                                    }
                                    format!("Reloaded {} records", records)
                                }
                                LoadOutcome::Failed(message) => {
                                    session.load(Vec::new());
                                    format!("Error fetching records: {}", message)
                                }
                                LoadOutcome::AlreadyLoading => "A fetch is already running".to_string(),
                                LoadOutcome::AlreadyFetched => "Records already loaded".to_string(),
                            };
                            println!("{}", formatter.format_message(&message));
                        }
                    }
                    continue;
                }

                // Anything else is filter text
                session.set_filter_text(line);
                print_rows(&session, format);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&hist_path);

    Ok(())
}
