use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::NewsConfig;
use crate::error::ClientError;

/// Article as returned by the news provider. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub total_articles: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    TopHeadlines,
    Search(String),
}

impl NewsQuery {
    /// Search for `input`, or for `default_query` when the input is blank.
    pub fn search(input: &str, default_query: &str) -> Self {
        let query = input.trim();
        if query.is_empty() {
            NewsQuery::Search(default_query.to_string())
        } else {
            NewsQuery::Search(query.to_string())
        }
    }
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, ClientError>;
}

/// GNews v4 client (`/top-headlines` and `/search`).
pub struct GNewsClient {
    client: Client,
    config: NewsConfig,
}

impl GNewsClient {
    pub fn new(config: NewsConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn request_parts(&self, query: &NewsQuery) -> (String, Vec<(&'static str, String)>) {
        let base = self.config.base_url.trim_end_matches('/');
        let mut params = Vec::new();
        let endpoint = match query {
            NewsQuery::TopHeadlines => format!("{}/top-headlines", base),
            NewsQuery::Search(q) => {
                params.push(("q", q.clone()));
                format!("{}/search", base)
            }
        };
        params.push(("lang", self.config.lang.clone()));
        if let Some(max) = self.config.max_articles {
            params.push(("max", max.to_string()));
        }
        params.push(("token", self.config.api_key.clone()));
        (endpoint, params)
    }
}

#[async_trait]
impl NewsSource for GNewsClient {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<Article>, ClientError> {
        let (endpoint, params) = self.request_parts(query);
        debug!("Fetching news from {} ({:?})", endpoint, query);

        let response = self.client.get(&endpoint).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().to_string()));
        }

        let data: NewsResponse = response.json().await?;
        debug!(
            "News provider returned {} articles (total {:?})",
            data.articles.len(),
            data.total_articles
        );
        Ok(data.articles)
    }
}
