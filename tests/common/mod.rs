#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use newsdesk::dictionary::{DictionaryProvider, LookupError};
use newsdesk::translate::{TranslateRequest, TranslationProvider};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub struct CountingProvider {
    pub name: &'static str,
    pub reply: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl CountingProvider {
    pub fn ok(name: &'static str, reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for CountingProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn translate(&self, _request: &TranslateRequest) -> Result<String, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("{} timed out", self.name))
    }
}

pub enum FakeDictionary {
    Found(Value),
    Missing,
    Broken,
}

#[async_trait]
impl DictionaryProvider for FakeDictionary {
    async fn lookup(&self, word: &str) -> Result<Value, LookupError> {
        match self {
            FakeDictionary::Found(payload) => Ok(payload.clone()),
            FakeDictionary::Missing => Err(LookupError::NotFound(word.to_string())),
            FakeDictionary::Broken => Err(LookupError::Upstream("connection reset".to_string())),
        }
    }
}
