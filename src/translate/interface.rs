use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single translation attempt handed to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Body accepted by `POST /translate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
}

/// Body returned by `POST /translate` on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// A third-party translation service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Name used in configuration and logs
    fn name(&self) -> &str;

    /// Translate `request.text`. An `Ok` holding an empty string is treated
    /// as a failure by the fallback chain.
    async fn translate(&self, request: &TranslateRequest) -> Result<String, anyhow::Error>;
}
