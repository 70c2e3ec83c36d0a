//! Proxy server and terminal client for a small news reader.
//!
//! The proxy relays translation (with a provider fallback chain) and word
//! definition lookups. The client fetches and renders news articles, keeps a
//! local notes list and routes chat commands to the proxy.

pub mod config;
pub mod error;
pub mod translate;
pub mod dictionary;
pub mod state;
pub mod routes;
pub mod client;

/// Install the fmt subscriber used by both binaries. `RUST_LOG` wins over
/// the built-in filter.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
