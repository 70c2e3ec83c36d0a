use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interface::{TranslateRequest, TranslationProvider};

/// LibreTranslate: POST with a JSON body, answer in `translatedText`.
pub struct LibreTranslateProvider {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreTranslateProvider {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        "libre_translate"
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<String, anyhow::Error> {
        let body = LibreRequest {
            q: &request.text,
            source: &request.source_lang,
            target: &request.target_lang,
            format: "text",
        };

        debug!("LibreTranslate request: target={}", request.target_lang);
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let result: LibreResponse = response.json().await?;
        result
            .translated_text
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow::anyhow!("LibreTranslate response has no translatedText"))
    }
}
