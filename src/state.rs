use std::sync::Arc;

use crate::config::Config;
use crate::dictionary::{DictionaryProvider, FreeDictionaryClient};
use crate::translate::{FallbackTranslator, TranslatorFactory};

/// Handles shared by every request. Nothing in here is mutated after
/// startup, so requests stay independent of each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<FallbackTranslator>,
    pub dictionary: Arc<dyn DictionaryProvider>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = TranslatorFactory::http_client(&config.providers)?;
        let translator = TranslatorFactory::create_chain(&config.providers, client.clone())?;
        let dictionary = Arc::new(FreeDictionaryClient::new(
            client,
            config.providers.dictionary_url.clone(),
        ));

        Ok(Self::with_services(config, translator, dictionary))
    }

    pub fn with_services(
        config: Config,
        translator: FallbackTranslator,
        dictionary: Arc<dyn DictionaryProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
            dictionary,
        }
    }
}
