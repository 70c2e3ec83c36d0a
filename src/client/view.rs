use super::render::{self, ArticleCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Rendering surface the app draws into.
pub trait View {
    fn show_loading(&mut self, visible: bool);
    fn show_error(&mut self, message: Option<&str>);
    fn render_articles(&mut self, cards: &[ArticleCard]);
    fn render_notes(&mut self, notes: &[String]);
    fn add_message(&mut self, message: &ChatMessage);
}

/// Keeps the latest state of every panel as markup.
#[derive(Debug, Default, Clone)]
pub struct HtmlView {
    pub loading: bool,
    pub error: Option<String>,
    pub articles_html: String,
    pub notes_html: String,
    pub messages: Vec<ChatMessage>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standalone page with every panel.
    pub fn to_page(&self) -> String {
        let error = self
            .error
            .as_deref()
            .map(|e| format!("<div id=\"error\">{}</div>", render::escape_html(e)))
            .unwrap_or_default();
        let loading = if self.loading {
            "<div id=\"loading\">Loading...</div>"
        } else {
            ""
        };

        format!(
            concat!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>News</title></head>\n<body>\n",
                "{loading}{error}\n",
                "<section id=\"articles\">{articles}</section>\n",
                "<section id=\"notes\">{notes}</section>\n",
                "<section id=\"chat-messages\">{chat}</section>\n",
                "</body>\n</html>\n"
            ),
            loading = loading,
            error = error,
            articles = self.articles_html,
            notes = self.notes_html,
            chat = render::render_chat_html(&self.messages),
        )
    }
}

impl View for HtmlView {
    fn show_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn show_error(&mut self, message: Option<&str>) {
        self.error = message.filter(|m| !m.is_empty()).map(str::to_owned);
    }

    fn render_articles(&mut self, cards: &[ArticleCard]) {
        self.articles_html = render::render_articles_html(cards);
    }

    fn render_notes(&mut self, notes: &[String]) {
        self.notes_html = render::render_notes_html(notes);
    }

    fn add_message(&mut self, message: &ChatMessage) {
        self.messages.push(message.clone());
    }
}

/// Prints to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalView;

impl View for TerminalView {
    fn show_loading(&mut self, visible: bool) {
        if visible {
            eprintln!("Loading...");
        }
    }

    fn show_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("{}", message);
        }
    }

    fn render_articles(&mut self, cards: &[ArticleCard]) {
        if cards.is_empty() {
            println!("{}", render::NO_RESULTS);
            return;
        }
        for card in cards {
            println!("{}\n", card.to_text());
        }
    }

    fn render_notes(&mut self, notes: &[String]) {
        for (index, note) in notes.iter().enumerate() {
            println!("[{}] {}", index, note);
        }
    }

    fn add_message(&mut self, message: &ChatMessage) {
        if message.sender == Sender::Bot {
            println!("{}", message.text);
        }
    }
}
