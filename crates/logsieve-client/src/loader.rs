//! Dataset loading.
//!
//! A [`DatasetLoader`] fetches a token, then the records, and publishes the
//! result as a [`LoadState`] snapshot. Only one fetch runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use logsieve_core::Schema;
use logsieve_proto::Record;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::provider::{Credential, RecordProvider, TokenSource};

/// Snapshot of a loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadState {
    /// A fetch is running.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Records of the last successful fetch.
    pub records: Vec<Record>,
    /// Columns inferred from `records`.
    pub columns: Vec<String>,
    /// A fetch has succeeded at least once.
    pub fetched: bool,
}

/// What a load request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were fetched.
    Loaded { records: usize },
    /// Another fetch was running; nothing was done.
    AlreadyLoading,
    /// An automatic load was skipped because data was fetched before.
    AlreadyFetched,
    /// The fetch failed with this message.
    Failed(String),
}

/// Clears the in-flight flag when a fetch ends, even if it is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Single-flight loader over a record provider and a token source.
pub struct DatasetLoader<P, T> {
    provider: P,
    tokens: T,
    in_flight: AtomicBool,
    fetched: AtomicBool,
    state: Mutex<LoadState>,
}

impl<P: RecordProvider, T: TokenSource> DatasetLoader<P, T> {
    /// Create a loader. Nothing is fetched until asked.
    pub fn new(provider: P, tokens: T) -> Self {
        Self {
            provider,
            tokens,
            in_flight: AtomicBool::new(false),
            fetched: AtomicBool::new(false),
            state: Mutex::new(LoadState::default()),
        }
    }

    /// Load once. After the first success this does nothing.
    pub async fn auto_load(&self) -> LoadOutcome {
        if self.fetched.load(Ordering::Acquire) {
            return LoadOutcome::AlreadyFetched;
        }
        self.run().await
    }

    /// Load again, whether or not data was fetched before.
    pub async fn reload(&self) -> LoadOutcome {
        self.run().await
    }

    /// Current state.
    pub fn state(&self) -> LoadState {
        self.state.lock().clone()
    }

    /// Check if a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    async fn run(&self) -> LoadOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Fetch already running");
            return LoadOutcome::AlreadyLoading;
        }
        let _guard = InFlight(&self.in_flight);

        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }

        let result = self.fetch().await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(records) => {
                let count = records.len();
                state.columns = Schema::infer(&records).columns().to_vec();
                state.records = records;
                state.fetched = true;
                self.fetched.store(true, Ordering::Release);
                info!(records = count, columns = state.columns.len(), "Dataset loaded");
                LoadOutcome::Loaded { records: count }
            }
            Err(e) => {
                error!(error = %e, "Error fetching records");
                let message = e.to_string();
                state.error = Some(message.clone());
                state.records.clear();
                state.columns.clear();
                LoadOutcome::Failed(message)
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Record>, Error> {
        let token = self.tokens.fetch_token().await?.ok_or(Error::NoToken)?;
        self.provider.fetch(&Credential::new(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MemoryProvider, StaticToken};
    use async_trait::async_trait;

    struct FailingProvider;

    #[async_trait]
    impl RecordProvider for FailingProvider {
        async fn fetch(&self, _credential: &Credential) -> Result<Vec<Record>, Error> {
            Err(Error::Provider("upstream returned 500".to_string()))
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new().with_field("time", 1).with_field("msg", "up"),
            Record::new().with_field("time", 2).with_field("msg", "down"),
        ]
    }

    #[tokio::test]
    async fn test_auto_load_latches() {
        let loader = DatasetLoader::new(MemoryProvider::new(sample()), StaticToken::new("t"));
        assert_eq!(loader.auto_load().await, LoadOutcome::Loaded { records: 2 });
        assert_eq!(loader.auto_load().await, LoadOutcome::AlreadyFetched);

        let state = loader.state();
        assert!(state.fetched);
        assert!(!state.loading);
        assert_eq!(state.columns, vec!["time".to_string(), "msg".to_string()]);
    }

    #[tokio::test]
    async fn test_reload_ignores_latch() {
        let loader = DatasetLoader::new(MemoryProvider::new(sample()), StaticToken::new("t"));
        loader.auto_load().await;
        assert_eq!(loader.reload().await, LoadOutcome::Loaded { records: 2 });
    }

    #[tokio::test]
    async fn test_missing_token() {
        let loader = DatasetLoader::new(MemoryProvider::new(sample()), StaticToken::none());
        assert_eq!(
            loader.auto_load().await,
            LoadOutcome::Failed("No token available".to_string())
        );

        let state = loader.state();
        assert_eq!(state.error.as_deref(), Some("No token available"));
        assert!(state.records.is_empty());
        assert!(!state.fetched);
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_failure_empties_dataset() {
        let loader = DatasetLoader::new(FailingProvider, StaticToken::new("t"));
        let outcome = loader.reload().await;
        assert_eq!(
            outcome,
            LoadOutcome::Failed("provider error: upstream returned 500".to_string())
        );
        assert!(loader.state().columns.is_empty());
    }
}
