//! Client configuration.

use std::path::PathBuf;

/// Default size limit for a source document (64 MB).
pub const DEFAULT_MAX_SOURCE_SIZE: u64 = 64 * 1024 * 1024;

/// Places a record array is looked up in a JSON envelope, in order.
pub const DEFAULT_RECORD_POINTERS: &[&str] = &["/logs/logs", "/data"];

/// Token used when none is configured.
pub const DEFAULT_TOKEN: &str = "anonymous";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// JSON document holding the records.
    pub source: PathBuf,

    /// JSON pointer (RFC 6901) to the record array. `None` accepts a root
    /// array or tries [`DEFAULT_RECORD_POINTERS`].
    pub records_pointer: Option<String>,

    /// Largest source document accepted, in bytes.
    pub max_source_size: u64,

    /// Bearer token handed to the provider.
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a configuration reading `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            records_pointer: None,
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
            token: Some(DEFAULT_TOKEN.to_string()),
        }
    }

    /// Set the pointer to the record array.
    pub fn with_records_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.records_pointer = Some(pointer.into());
        self
    }

    /// Set the source size limit.
    pub fn with_max_source_size(mut self, size: u64) -> Self {
        self.max_source_size = size;
        self
    }

    /// Set the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Run without a token; every load then fails with "No token available".
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("logs.json")
            .with_records_pointer("/data")
            .with_max_source_size(1024)
            .with_token("secret");
        assert_eq!(config.source, PathBuf::from("logs.json"));
        assert_eq!(config.records_pointer.as_deref(), Some("/data"));
        assert_eq!(config.max_source_size, 1024);
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("logs.json");
        assert_eq!(config.max_source_size, DEFAULT_MAX_SOURCE_SIZE);
        assert_eq!(config.token.as_deref(), Some(DEFAULT_TOKEN));
        assert!(ClientConfig::new("x").without_token().token.is_none());
    }
}
