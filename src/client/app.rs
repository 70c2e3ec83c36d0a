use tracing::error;

use super::chat::{ChatBot, ProxyApi};
use super::news::{NewsQuery, NewsSource};
use super::notes::NotesStore;
use super::render::cards_from_articles;
use super::storage::KeyValueStore;
use super::view::{ChatMessage, Sender, View};
use crate::config::NewsConfig;
use crate::error::ClientError;

/// The news reader: every collaborator is handed in, nothing is global.
pub struct NewsApp<V, S, N, P>
where
    V: View,
    S: KeyValueStore,
    N: NewsSource,
    P: ProxyApi,
{
    view: V,
    notes: NotesStore<S>,
    news: N,
    chat: ChatBot<P>,
    default_query: String,
    placeholder_image: String,
}

impl<V, S, N, P> NewsApp<V, S, N, P>
where
    V: View,
    S: KeyValueStore,
    N: NewsSource,
    P: ProxyApi,
{
    pub fn new(view: V, notes: NotesStore<S>, news: N, chat: ChatBot<P>, config: &NewsConfig) -> Self {
        Self {
            view,
            notes,
            news,
            chat,
            default_query: config.default_query.clone(),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notes(&self) -> &NotesStore<S> {
        &self.notes
    }

    pub async fn load_default_news(&mut self) -> bool {
        self.fetch_news(NewsQuery::TopHeadlines).await
    }

    pub async fn search_news(&mut self, input: &str) -> bool {
        let query = NewsQuery::search(input, &self.default_query);
        self.fetch_news(query).await
    }

    /// Fetch and render. On failure the error panel is shown and the
    /// article list is left alone. Returns whether articles were rendered.
    async fn fetch_news(&mut self, query: NewsQuery) -> bool {
        self.view.show_error(None);
        self.view.show_loading(true);
        let result = self.news.fetch(&query).await;
        self.view.show_loading(false);

        match result {
            Ok(articles) => {
                let cards = cards_from_articles(&articles, &self.placeholder_image);
                self.view.render_articles(&cards);
                true
            }
            Err(e) => {
                error!("News fetch failed: {}", e);
                self.view.show_error(Some(&format!("Error fetching news: {}", e)));
                false
            }
        }
    }

    pub fn load_notes(&mut self) {
        let notes = self.notes.load();
        self.view.render_notes(&notes);
    }

    pub fn add_note(&mut self, note: &str) -> Result<(), ClientError> {
        let notes = self.notes.add(note)?;
        self.view.render_notes(&notes);
        Ok(())
    }

    pub fn delete_note(&mut self, index: usize) -> Result<(), ClientError> {
        let notes = self.notes.delete(index)?;
        self.view.render_notes(&notes);
        Ok(())
    }

    /// Post a chat line and the bot's answer. Blank lines are dropped.
    pub async fn send_chat(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.view.add_message(&ChatMessage {
            sender: Sender::User,
            text: text.to_string(),
        });
        let reply = self.chat.reply(text).await;
        self.view.add_message(&ChatMessage {
            sender: Sender::Bot,
            text: reply.clone(),
        });
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::news::Article;
    use crate::client::render::NO_RESULTS;
    use crate::client::storage::MemoryStore;
    use crate::client::view::HtmlView;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FixedNews(Result<Vec<Article>, &'static str>);

    #[async_trait]
    impl NewsSource for FixedNews {
        async fn fetch(&self, _query: &NewsQuery) -> Result<Vec<Article>, ClientError> {
            self.0
                .clone()
                .map_err(|status| ClientError::Status(status.to_string()))
        }
    }

    struct EchoProxy;

    #[async_trait]
    impl ProxyApi for EchoProxy {
        async fn translate(&self, text: &str) -> Result<Value, ClientError> {
            Ok(json!({ "translatedText": text.to_uppercase() }))
        }

        async fn meaning(&self, _word: &str) -> Result<Value, ClientError> {
            Err(ClientError::Network("refused".into()))
        }
    }

    fn app(news: FixedNews) -> NewsApp<HtmlView, MemoryStore, FixedNews, EchoProxy> {
        NewsApp::new(
            HtmlView::new(),
            NotesStore::new(MemoryStore::new(), "notes"),
            news,
            ChatBot::new(EchoProxy),
            &NewsConfig::default(),
        )
    }

    #[tokio::test]
    async fn failed_fetch_shows_error_and_renders_nothing() {
        let mut app = app(FixedNews(Err("401 Unauthorized")));
        assert!(!app.load_default_news().await);

        let view = app.view();
        assert_eq!(view.error.as_deref(), Some("Error fetching news: HTTP 401 Unauthorized"));
        assert!(!view.loading);
        assert!(view.articles_html.is_empty());
    }

    #[tokio::test]
    async fn empty_result_renders_placeholder() {
        let mut app = app(FixedNews(Ok(Vec::new())));
        assert!(app.search_news("").await);
        assert!(app.view().articles_html.contains(NO_RESULTS));
        assert_eq!(app.view().error, None);
    }

    #[tokio::test]
    async fn articles_are_rendered_escaped() {
        let article = Article {
            title: Some("Launch".to_string()),
            description: Some("<script>steal()</script>".to_string()),
            ..Article::default()
        };
        let mut app = app(FixedNews(Ok(vec![article])));
        app.load_default_news().await;

        let html = &app.view().articles_html;
        assert!(html.contains("<h3>Launch</h3>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn note_changes_are_rerendered() {
        let mut app = app(FixedNews(Ok(Vec::new())));
        app.add_note("buy milk").unwrap();
        assert!(app.view().notes_html.contains("buy milk"));

        app.delete_note(0).unwrap();
        assert!(app.view().notes_html.is_empty());
        assert!(app.notes().load().is_empty());
    }

    #[tokio::test]
    async fn chat_transcript_records_both_sides() {
        let mut app = app(FixedNews(Ok(Vec::new())));
        assert_eq!(app.send_chat("   ").await, None);
        assert_eq!(app.send_chat("translate hi there").await.as_deref(), Some("HI THERE"));
        assert_eq!(
            app.send_chat("meaning word").await.as_deref(),
            Some("Error connecting to server.")
        );

        let messages = &app.view().messages;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "translate hi there");
        assert_eq!(messages[1].sender, Sender::Bot);
    }
}
