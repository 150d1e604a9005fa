//! Records from a JSON document on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use logsieve_proto::json::records_from_json;
use logsieve_proto::Record;
use tracing::debug;

use crate::config::{ClientConfig, DEFAULT_MAX_SOURCE_SIZE, DEFAULT_RECORD_POINTERS};
use crate::error::Error;
use crate::provider::{Credential, RecordProvider};

/// Reads records from a JSON file.
///
/// The file holds either an array of objects or an envelope with the array
/// nested inside it. The credential is not used.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
    pointer: Option<String>,
    max_size: u64,
}

impl JsonFileProvider {
    /// Read records from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pointer: None,
            max_size: DEFAULT_MAX_SOURCE_SIZE,
        }
    }

    /// Build a provider from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            path: config.source.clone(),
            pointer: config.records_pointer.clone(),
            max_size: config.max_source_size,
        }
    }

    /// Look the record array up at a JSON pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Set the file size limit.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<serde_json::Value, Error> {
        let size = tokio::fs::metadata(&self.path).await?.len();
        if size > self.max_size {
            return Err(Error::TooLarge {
                size,
                limit: self.max_size,
            });
        }
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl RecordProvider for JsonFileProvider {
    async fn fetch(&self, _credential: &Credential) -> Result<Vec<Record>, Error> {
        let document = self.read_document().await?;
        let records = extract_records(document, self.pointer.as_deref())?;
        debug!(path = %self.path.display(), records = records.len(), "Read source file");
        Ok(records)
    }
}

/// Pull the record array out of a JSON document.
///
/// With a pointer, the array is taken from there. Without one, a root array
/// is used as is; otherwise [`DEFAULT_RECORD_POINTERS`] are tried in order.
/// A missing target, or one that is not an array, gives no records. Every
/// array element must be an object.
pub fn extract_records(
    mut document: serde_json::Value,
    pointer: Option<&str>,
) -> Result<Vec<Record>, Error> {
    let target = match pointer {
        Some(pointer) => document.pointer_mut(pointer).map(serde_json::Value::take),
        None if document.is_array() => Some(document),
        None => DEFAULT_RECORD_POINTERS.iter().find_map(|pointer| {
            document
                .pointer_mut(pointer)
                .filter(|v| v.is_array())
                .map(serde_json::Value::take)
        }),
    };

    match target {
        Some(serde_json::Value::Array(items)) => Ok(records_from_json(items)?),
        _ => Ok(Vec::new()),
    }
}
