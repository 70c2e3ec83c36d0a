use chrono::{DateTime, Local};

use super::news::Article;
use super::view::ChatMessage;

pub const NO_RESULTS: &str = "No articles found for this query.";
pub const NO_TITLE: &str = "(No title)";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_CONTENT: &str = "No content available.";

/// Escape the five reserved markup characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Local-time rendering of an RFC 3339 timestamp; anything else is shown as is.
pub fn format_published(published_at: &str) -> String {
    DateTime::parse_from_rfc3339(published_at)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|_| published_at.to_string())
}

pub fn meta_line(source_name: Option<&str>, published_at: Option<&str>) -> String {
    let published = published_at.map(format_published).unwrap_or_default();
    match source_name.filter(|name| !name.is_empty()) {
        Some(name) => format!("{} • {}", name, published),
        None => published,
    }
}

/// Display-ready article with every fallback already applied. Fields hold
/// plain text; markup is only produced by [`ArticleCard::to_html`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub image_src: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub link_href: String,
    pub meta: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ArticleCard {
    pub fn from_article(article: &Article, placeholder_image: &str) -> Self {
        let source_name = article.source.as_ref().and_then(|s| non_empty(&s.name));
        Self {
            image_src: non_empty(&article.image).unwrap_or(placeholder_image).to_string(),
            title: non_empty(&article.title).unwrap_or(NO_TITLE).to_string(),
            description: non_empty(&article.description).unwrap_or(NO_DESCRIPTION).to_string(),
            content: non_empty(&article.content).unwrap_or(NO_CONTENT).to_string(),
            link_href: non_empty(&article.url).unwrap_or("#").to_string(),
            meta: meta_line(source_name, non_empty(&article.published_at)),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<article class=\"article\">",
                "<img alt=\"article image\" src=\"{image}\">",
                "<div class=\"info\">",
                "<h3>{title}</h3>",
                "<p><strong>Description:</strong> {description}</p>",
                "<p><strong>Content:</strong> {content}</p>",
                "<a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">Read full article</a>",
                "<div class=\"meta2 small-muted\">{meta}</div>",
                "</div>",
                "</article>"
            ),
            image = escape_html(&self.image_src),
            title = escape_html(&self.title),
            description = escape_html(&self.description),
            content = escape_html(&self.content),
            href = escape_html(&self.link_href),
            meta = escape_html(&self.meta),
        )
    }

    pub fn to_text(&self) -> String {
        let mut text = format!(
            "{}\n  Description: {}\n  Content: {}\n  Read full article: {}",
            self.title, self.description, self.content, self.link_href
        );
        if !self.meta.is_empty() {
            text.push_str(&format!("\n  {}", self.meta));
        }
        text
    }
}

pub fn cards_from_articles(articles: &[Article], placeholder_image: &str) -> Vec<ArticleCard> {
    articles
        .iter()
        .map(|article| ArticleCard::from_article(article, placeholder_image))
        .collect()
}

pub fn render_articles_html(cards: &[ArticleCard]) -> String {
    if cards.is_empty() {
        return format!("<div class=\"small-muted\">{}</div>", NO_RESULTS);
    }
    cards.iter().map(ArticleCard::to_html).collect()
}

pub fn render_notes_html(notes: &[String]) -> String {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            format!(
                "<div class=\"note\" data-index=\"{}\"><span>{}</span><button>❌</button></div>",
                index,
                escape_html(note)
            )
        })
        .collect()
}

pub fn render_chat_html(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "<div class=\"msg {}\">{}</div>",
                message.sender.as_str(),
                escape_html(&message.text)
            )
        })
        .collect()
}
