//! Terminal-side news reader: news fetch and render, local notes and the
//! command-style chat that talks to the proxy.

pub mod news;
pub mod render;
pub mod storage;
pub mod notes;
pub mod chat;
pub mod view;
pub mod app;

pub use app::NewsApp;
pub use chat::{ChatBot, Command, ProxyApi, ProxyClient};
pub use news::{Article, GNewsClient, NewsQuery, NewsSource};
pub use notes::NotesStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{ChatMessage, HtmlView, Sender, TerminalView, View};
