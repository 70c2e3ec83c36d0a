use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Upstream translation and dictionary providers used by the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Provider names tried in order until one returns a translation.
    #[serde(default = "default_translation_chain")]
    pub translation_chain: Vec<String>,
    #[serde(default = "default_libre_translate_url")]
    pub libre_translate_url: String,
    #[serde(default = "default_google_translate_url")]
    pub google_translate_url: String,
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_lang")]
    pub lang: String,
    #[serde(default = "default_query")]
    pub default_query: String,
    #[serde(default)]
    pub max_articles: Option<u32>,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default = "default_notes_path")]
    pub notes_path: String,
    #[serde(default = "default_notes_key")]
    pub notes_key: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_target_lang() -> String {
    "hi".to_string()
}

fn default_translation_chain() -> Vec<String> {
    vec!["libre_translate".to_string(), "google_translate".to_string()]
}

fn default_libre_translate_url() -> String {
    "https://de.libretranslate.com/translate".to_string()
}

fn default_google_translate_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_news_base_url() -> String {
    "https://gnews.io/api/v4".to_string()
}

fn default_news_lang() -> String {
    "en".to_string()
}

fn default_query() -> String {
    "technology".to_string()
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/160x100?text=No+Image".to_string()
}

fn default_proxy_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_notes_path() -> String {
    "newsdesk-storage.json".to_string()
}

fn default_notes_key() -> String {
    "notes".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the first config file found in the usual locations, falling back
    /// to built-in defaults, then apply environment overrides.
    pub fn discover() -> Result<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        let config_paths: Vec<String> = vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
            exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_from(&config_paths, |key| std::env::var(key).ok())
    }

    /// Load the first existing path in `config_paths`. A file that exists but
    /// does not load is an error; defaults are only used when none exists.
    pub fn discover_from<F>(config_paths: &[String], lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let found = config_paths
            .iter()
            .find(|path| std::path::Path::new(path.as_str()).exists());

        let mut config = match found {
            Some(path) => {
                let cfg = Config::load(path)
                    .with_context(|| format!("Failed to load config from {}", path))?;
                info!("Loaded configuration from: {}", path);
                cfg
            }
            None => {
                warn!("No config file found (tried {:?}), using defaults", config_paths);
                Config::default()
            }
        };

        config.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT`, `HOST`, `NEWS_API_KEY`, `NEWS_BASE_URL`, `PROXY_URL`
    /// and `NOTES_PATH` on top of the loaded values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(key) = lookup("NEWS_API_KEY") {
            self.news.api_key = key;
        }
        if let Some(url) = lookup("NEWS_BASE_URL") {
            self.news.base_url = url;
        }
        if let Some(url) = lookup("PROXY_URL") {
            self.client.proxy_url = url;
        }
        if let Some(path) = lookup("NOTES_PATH") {
            self.client.notes_path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.providers.translation_chain.is_empty() {
            return Err(anyhow::anyhow!("providers.translation_chain must name at least one provider"));
        }
        for name in &self.providers.translation_chain {
            if !crate::translate::TranslatorFactory::is_known(name) {
                return Err(anyhow::anyhow!("Unsupported translation provider: {}", name));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            translation_chain: default_translation_chain(),
            libre_translate_url: default_libre_translate_url(),
            google_translate_url: default_google_translate_url(),
            dictionary_url: default_dictionary_url(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            api_key: String::new(),
            lang: default_news_lang(),
            default_query: default_query(),
            max_articles: None,
            placeholder_image: default_placeholder_image(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            notes_path: default_notes_path(),
            notes_key: default_notes_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_match_the_public_services() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.providers.timeout_secs, 10);
        assert_eq!(config.providers.target_lang, "hi");
        assert_eq!(config.providers.translation_chain, vec!["libre_translate", "google_translate"]);
        assert_eq!(config.news.default_query, "technology");
        assert!(config.news.api_key.is_empty());
        assert_eq!(config.client.notes_key, "notes");
    }

    #[test]
    fn env_overrides_replace_loaded_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8080"),
            ("NEWS_API_KEY", "secret"),
            ("PROXY_URL", "http://proxy:9000"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.news.api_key, "secret");
        assert_eq!(config.client.proxy_url, "http://proxy:9000");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn invalid_port_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|k| (k == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "server:\n  port: 7000\nnews:\n  api_key: abc\n  max_articles: 5").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.static_dir, "public");
        assert_eq!(config.news.api_key, "abc");
        assert_eq!(config.news.max_articles, Some(5));
        assert_eq!(config.providers.dictionary_url, "https://api.dictionaryapi.dev/api/v2/entries/en");
    }

    #[test]
    fn json_config_is_parsed_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"providers": {{"translation_chain": ["google_translate"]}}}}"#).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.providers.translation_chain, vec!["google_translate"]);
    }

    #[test]
    fn discovered_file_that_fails_to_load_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "server:\n  port: 7777\nproviders:\n  translation_chain: [babelfish]").unwrap();
        let paths = vec![file.path().to_str().unwrap().to_string()];

        let err = Config::discover_from(&paths, |_| None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn discover_uses_first_existing_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "server:\n  port: 7777\nnews:\n  api_key: from-file").unwrap();
        let paths = vec![
            "/nonexistent/conf.yaml".to_string(),
            file.path().to_str().unwrap().to_string(),
        ];

        let config = Config::discover_from(&paths, |k| (k == "NEWS_API_KEY").then(|| "from-env".to_string())).unwrap();
        assert_eq!(config.server.port, 7777);
        assert_eq!(config.news.api_key, "from-env");
    }

    #[test]
    fn discover_without_files_uses_defaults() {
        let paths = vec!["/nonexistent/conf.yaml".to_string()];
        let config = Config::discover_from(&paths, |_| None).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "providers:\n  translation_chain: [babelfish]").unwrap();
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
