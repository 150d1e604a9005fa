//! logsieve client - fetching record sets.
//!
//! A [`DatasetLoader`] asks a [`TokenSource`] for a token and a
//! [`RecordProvider`] for the records, one fetch at a time. The
//! [`JsonFileProvider`] serves records from a JSON file.
//!
//! # Quick Start
//!
//! ```no_run
//! use logsieve_client::{ClientConfig, DatasetLoader, JsonFileProvider, LoadOutcome, StaticToken};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClientConfig::new("logs.json").with_records_pointer("/logs/logs");
//!     let loader = DatasetLoader::new(
//!         JsonFileProvider::from_config(&config),
//!         StaticToken::from(config.token.clone()),
//!     );
//!
//!     match loader.auto_load().await {
//!         LoadOutcome::Loaded { records } => println!("Loaded {} records", records),
//!         other => println!("{:?}", other),
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod loader;
pub mod provider;

pub use config::ClientConfig;
pub use error::Error;
pub use file::{extract_records, JsonFileProvider};
pub use loader::{DatasetLoader, LoadOutcome, LoadState};
pub use provider::{Credential, MemoryProvider, RecordProvider, StaticToken, TokenSource};
