use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use reqwest::Client;
use tracing::info;

use super::fallback::FallbackTranslator;
use super::google::GoogleTranslateProvider;
use super::interface::TranslationProvider;
use super::libre::LibreTranslateProvider;
use crate::config::ProvidersConfig;

pub const LIBRE_TRANSLATE: &str = "libre_translate";
pub const GOOGLE_TRANSLATE: &str = "google_translate";

/// Factory for building translation providers from configuration
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn is_known(name: &str) -> bool {
        matches!(name, LIBRE_TRANSLATE | GOOGLE_TRANSLATE)
    }

    /// Shared HTTP client for every outbound provider call, with the
    /// configured per-request timeout.
    pub fn http_client(config: &ProvidersConfig) -> Result<Client> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?)
    }

    pub fn create_provider(
        name: &str,
        config: &ProvidersConfig,
        client: Client,
    ) -> Result<Arc<dyn TranslationProvider>> {
        match name {
            LIBRE_TRANSLATE => Ok(Arc::new(LibreTranslateProvider::new(
                client,
                config.libre_translate_url.clone(),
            ))),
            GOOGLE_TRANSLATE => Ok(Arc::new(GoogleTranslateProvider::new(
                client,
                config.google_translate_url.clone(),
            ))),
            _ => Err(anyhow::anyhow!("Unsupported translation provider: {}", name)),
        }
    }

    /// Build the fallback chain in the order given by `translation_chain`.
    pub fn create_chain(config: &ProvidersConfig, client: Client) -> Result<FallbackTranslator> {
        let providers = config
            .translation_chain
            .iter()
            .map(|name| Self::create_provider(name, config, client.clone()))
            .collect::<Result<Vec<_>>>()?;

        info!("Translation chain: {}", config.translation_chain.join(" -> "));
        Ok(FallbackTranslator::new(
            providers,
            config.source_lang.clone(),
            config.target_lang.clone(),
        ))
    }
}
