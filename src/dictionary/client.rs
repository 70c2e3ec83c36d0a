use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::interface::{DictionaryProvider, LookupError};

/// Client for the Free Dictionary API (`GET <base>/<word>`).
pub struct FreeDictionaryClient {
    client: Client,
    base_url: String,
}

impl FreeDictionaryClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn entry_url(&self, word: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(word)
        )
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Value, LookupError> {
        let url = self.entry_url(word);
        debug!("Dictionary lookup: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(word.to_string()));
        }
        if !response.status().is_success() {
            return Err(LookupError::Upstream(format!(
                "Dictionary API returned {}",
                response.status()
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_url_escaped() {
        let client = FreeDictionaryClient::new(Client::new(), "https://dict.test/en/".to_string());
        assert_eq!(client.entry_url("ice cream"), "https://dict.test/en/ice%20cream");
        assert_eq!(client.entry_url("a/b?c"), "https://dict.test/en/a%2Fb%3Fc");
    }
}
