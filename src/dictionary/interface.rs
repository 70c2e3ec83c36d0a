use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no entry for '{0}'")]
    NotFound(String),

    #[error("dictionary upstream failure: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Upstream(err.to_string())
    }
}

/// Word-definition lookup. The payload is relayed to callers untouched.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<Value, LookupError>;
}
