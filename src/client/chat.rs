use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ClientError;

pub const HELP_MESSAGE: &str = "I can help with:\n- translate <text>\n- meaning <word>";
pub const CONNECTION_ERROR: &str = "Error connecting to server.";
pub const TRANSLATION_FAILED: &str = "Translation failed.";
pub const MEANING_NOT_FOUND: &str = "Meaning not found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Translate(String),
    Meaning(String),
    Help,
}

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)^(translate|meaning)(?:\s+(.*))?$").expect("command pattern is valid")
    })
}

/// Parse a chat line. The keyword must open the message and be followed by
/// whitespace or nothing; everything after it is the argument.
pub fn parse_command(input: &str) -> Command {
    let Some(captures) = command_pattern().captures(input.trim()) else {
        return Command::Help;
    };

    let argument = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    if argument.is_empty() {
        return Command::Help;
    }

    if captures[1].eq_ignore_ascii_case("translate") {
        Command::Translate(argument.to_string())
    } else {
        Command::Meaning(argument.to_string())
    }
}

/// The proxy endpoints as seen from the client. Replies are the raw JSON
/// bodies, whatever the status code.
#[async_trait]
pub trait ProxyApi: Send + Sync {
    async fn translate(&self, text: &str) -> Result<Value, ClientError>;
    async fn meaning(&self, word: &str) -> Result<Value, ClientError>;
}

pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ProxyApi for ProxyClient {
    async fn translate(&self, text: &str) -> Result<Value, ClientError> {
        let url = format!("{}/translate", self.base_url);
        let response = self.client.post(&url).json(&json!({ "text": text })).send().await?;
        debug!("Proxy /translate answered {}", response.status());
        Ok(response.json().await?)
    }

    async fn meaning(&self, word: &str) -> Result<Value, ClientError> {
        let url = format!("{}/meaning/{}", self.base_url, urlencoding::encode(word));
        let response = self.client.get(&url).send().await?;
        debug!("Proxy /meaning answered {}", response.status());
        Ok(response.json().await?)
    }
}

/// First definition of the first meaning of the first entry.
pub fn first_definition(payload: &Value) -> Option<&str> {
    payload
        .pointer("/0/meanings/0/definitions/0/definition")
        .and_then(Value::as_str)
}

pub struct ChatBot<P: ProxyApi> {
    proxy: P,
}

impl<P: ProxyApi> ChatBot<P> {
    pub fn new(proxy: P) -> Self {
        Self { proxy }
    }

    pub fn proxy(&self) -> &P {
        &self.proxy
    }

    /// Reply to one chat line. Connection problems become a fixed message.
    pub async fn reply(&self, input: &str) -> String {
        match parse_command(input) {
            Command::Translate(text) => match self.proxy.translate(&text).await {
                Ok(body) => body
                    .get("translatedText")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(TRANSLATION_FAILED)
                    .to_string(),
                Err(e) => {
                    warn!("translate via proxy failed: {}", e);
                    CONNECTION_ERROR.to_string()
                }
            },
            Command::Meaning(word) => match self.proxy.meaning(&word).await {
                Ok(body) => first_definition(&body).unwrap_or(MEANING_NOT_FOUND).to_string(),
                Err(e) => {
                    warn!("meaning via proxy failed: {}", e);
                    CONNECTION_ERROR.to_string()
                }
            },
            Command::Help => HELP_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProxy {
        calls: Mutex<Vec<(String, String)>>,
        offline: bool,
    }

    #[async_trait]
    impl ProxyApi for RecordingProxy {
        async fn translate(&self, text: &str) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(("translate".into(), text.into()));
            if self.offline {
                return Err(ClientError::Network("connection refused".into()));
            }
            Ok(json!({ "translatedText": format!("[hi] {}", text) }))
        }

        async fn meaning(&self, word: &str) -> Result<Value, ClientError> {
            self.calls.lock().unwrap().push(("meaning".into(), word.into()));
            if self.offline {
                return Err(ClientError::Network("connection refused".into()));
            }
            if word == "zzzz" {
                return Ok(json!({ "error": "Word meaning not found." }));
            }
            Ok(json!([{ "meanings": [{ "definitions": [{ "definition": "a happy accident" }] }] }]))
        }
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert_eq!(parse_command("Translate hello"), Command::Translate("hello".into()));
        assert_eq!(parse_command("  MEANING  serendipity "), Command::Meaning("serendipity".into()));
        assert_eq!(
            parse_command("translate good\nmorning"),
            Command::Translate("good\nmorning".into())
        );
    }

    #[test]
    fn keyword_must_open_the_message() {
        assert_eq!(parse_command("nonsense translate hello"), Command::Help);
        assert_eq!(parse_command("translated text"), Command::Help);
        assert_eq!(parse_command("meaningful"), Command::Help);
        assert_eq!(parse_command("translate   "), Command::Help);
        assert_eq!(parse_command("hello"), Command::Help);
    }

    #[tokio::test]
    async fn meaning_dispatches_the_word() {
        let bot = ChatBot::new(RecordingProxy::default());
        assert_eq!(bot.reply("meaning serendipity").await, "a happy accident");
        assert_eq!(
            *bot.proxy().calls.lock().unwrap(),
            vec![("meaning".to_string(), "serendipity".to_string())]
        );
    }

    #[tokio::test]
    async fn mixed_case_translate_dispatches_the_text() {
        let bot = ChatBot::new(RecordingProxy::default());
        assert_eq!(bot.reply("Translate hello").await, "[hi] hello");
        assert_eq!(
            *bot.proxy().calls.lock().unwrap(),
            vec![("translate".to_string(), "hello".to_string())]
        );
    }

    #[tokio::test]
    async fn error_bodies_map_to_fixed_replies() {
        let bot = ChatBot::new(RecordingProxy::default());
        assert_eq!(bot.reply("meaning zzzz").await, MEANING_NOT_FOUND);
    }

    #[tokio::test]
    async fn offline_proxy_yields_connection_error() {
        let bot = ChatBot::new(RecordingProxy {
            offline: true,
            ..RecordingProxy::default()
        });
        assert_eq!(bot.reply("translate hello").await, CONNECTION_ERROR);
        assert_eq!(bot.reply("meaning word").await, CONNECTION_ERROR);
    }

    #[tokio::test]
    async fn help_does_not_touch_the_proxy() {
        let bot = ChatBot::new(RecordingProxy::default());
        assert_eq!(bot.reply("what can you do?").await, HELP_MESSAGE);
        assert!(bot.proxy().calls.lock().unwrap().is_empty());
    }
}
