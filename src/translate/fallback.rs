use std::sync::Arc;
use tracing::{debug, warn};

use super::interface::{TranslateRequest, TranslationProvider};
use crate::error::ProxyError;

pub const TRANSLATION_UNAVAILABLE: &str = "Translation service unavailable.";

/// Ordered list of providers tried one after another until one of them
/// yields a non-empty translation. No retries, no parallel attempts.
pub struct FallbackTranslator {
    providers: Vec<Arc<dyn TranslationProvider>>,
    source_lang: String,
    target_lang: String,
}

impl FallbackTranslator {
    pub fn new(
        providers: Vec<Arc<dyn TranslationProvider>>,
        source_lang: String,
        target_lang: String,
    ) -> Self {
        Self {
            providers,
            source_lang,
            target_lang,
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn translate(&self, text: &str) -> Result<String, ProxyError> {
        let request = TranslateRequest {
            text: text.to_string(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
        };

        for provider in &self.providers {
            match provider.translate(&request).await {
                Ok(translated) if !translated.is_empty() => {
                    debug!("Translation served by {}", provider.name());
                    return Ok(translated);
                }
                Ok(_) => warn!("{} returned an empty translation", provider.name()),
                Err(e) => warn!("{} error: {}", provider.name(), e),
            }
        }

        Err(ProxyError::ServiceUnavailable(TRANSLATION_UNAVAILABLE.to_string()))
    }
}
