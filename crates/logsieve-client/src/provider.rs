//! Seams between the loader and the outside world.

use async_trait::async_trait;
use logsieve_proto::Record;

use crate::error::Error;

/// A bearer token for a record provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("token", &"<redacted>").finish()
    }
}

/// Something that can hand out an access token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch the current token, or `None` if the user has none.
    async fn fetch_token(&self) -> Result<Option<String>, Error>;
}

/// A fixed token.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// A source that always returns `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A source that never has a token.
    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for StaticToken {
    fn from(token: Option<String>) -> Self {
        Self(token)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn fetch_token(&self) -> Result<Option<String>, Error> {
        Ok(self.0.clone())
    }
}

/// Something that can fetch the full record set.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Fetch every record.
    async fn fetch(&self, credential: &Credential) -> Result<Vec<Record>, Error>;
}

/// A provider serving a fixed record set.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Vec<Record>,
}

impl MemoryProvider {
    /// Serve `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordProvider for MemoryProvider {
    async fn fetch(&self, _credential: &Credential) -> Result<Vec<Record>, Error> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_redacts() {
        let credential = Credential::new("s3cret");
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("s3cret"));
        assert_eq!(credential.token(), "s3cret");
    }

    #[tokio::test]
    async fn test_static_token() {
        assert_eq!(
            StaticToken::new("abc").fetch_token().await.unwrap(),
            Some("abc".to_string())
        );
        assert_eq!(StaticToken::none().fetch_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_provider() {
        let provider = MemoryProvider::new(vec![Record::new().with_field("a", 1)]);
        let records = provider.fetch(&Credential::new("t")).await.unwrap();
        assert_eq!(records.len(), 1);
    }
}
