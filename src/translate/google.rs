use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::interface::{TranslateRequest, TranslationProvider};

/// Google's free web endpoint (`client=gtx`). The answer is a nested array
/// whose first element lists `[translated, original, ...]` fragments.
pub struct GoogleTranslateProvider {
    client: Client,
    url: String,
}

impl GoogleTranslateProvider {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

/// Concatenate the translated fragments of a `translate_a/single` response.
pub fn join_fragments(data: &Value) -> String {
    data.get(0)
        .and_then(Value::as_array)
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google_translate"
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<String, anyhow::Error> {
        debug!("Google Translate request: target={}", request.target_lang);
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_lang.as_str()),
                ("tl", request.target_lang.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        let translated = join_fragments(&data);
        if translated.is_empty() {
            return Err(anyhow::anyhow!("Google Translate returned no fragments"));
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fragments_are_concatenated_in_order() {
        let data = json!([
            [["नमस्ते ", "Hello ", null], ["दुनिया", "world", null]],
            null,
            "en"
        ]);
        assert_eq!(join_fragments(&data), "नमस्ते दुनिया");
    }

    #[test]
    fn unexpected_shapes_yield_empty_text() {
        assert_eq!(join_fragments(&json!({"error": "nope"})), "");
        assert_eq!(join_fragments(&json!([])), "");
        assert_eq!(join_fragments(&json!([[[1, 2]]])), "");
    }
}
