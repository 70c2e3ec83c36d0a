pub mod interface;
pub mod client;

pub use interface::{DictionaryProvider, LookupError};
pub use client::FreeDictionaryClient;
