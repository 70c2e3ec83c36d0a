use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use newsdesk::client::{
    ChatBot, FileStore, GNewsClient, HtmlView, NewsApp, NotesStore, ProxyClient, TerminalView, View,
};
use newsdesk::config::Config;

#[derive(Parser, Debug)]
#[command(name = "newsdesk", version, about = "Read the news, keep notes and ask the translate/meaning bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show top headlines, or search when a query is given
    News {
        query: Option<String>,
        /// Also write the rendered page to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Manage saved notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Send one chat line, e.g. `chat translate good morning`
    Chat {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum NotesAction {
    List,
    Add {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    Delete { index: usize },
}

type App<V> = NewsApp<V, FileStore, GNewsClient, ProxyClient>;

fn build_app<V: View>(config: &Config, view: V) -> Result<App<V>> {
    let notes = NotesStore::new(
        FileStore::new(&config.client.notes_path),
        config.client.notes_key.clone(),
    );
    let news = GNewsClient::new(config.news.clone())?;
    let proxy = ProxyClient::new(
        config.client.proxy_url.clone(),
        Duration::from_secs(config.providers.timeout_secs),
    )?;
    Ok(NewsApp::new(view, notes, news, ChatBot::new(proxy), &config.news))
}

async fn show_news<V: View>(app: &mut App<V>, query: Option<&str>) -> bool {
    match query {
        Some(query) => app.search_news(query).await,
        None => app.load_default_news().await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    newsdesk::init_tracing("newsdesk=info");
    let cli = Cli::parse();
    let config = Config::discover()?;

    match cli.command {
        Commands::News { query, html } => {
            if config.news.api_key.is_empty() {
                tracing::warn!("news.api_key is empty; set NEWS_API_KEY");
            }
            let ok = match html {
                Some(path) => {
                    let mut app = build_app(&config, HtmlView::new())?;
                    let ok = show_news(&mut app, query.as_deref()).await;
                    app.load_notes();
                    std::fs::write(&path, app.view().to_page())?;
                    info!("Wrote {}", path.display());
                    ok
                }
                None => {
                    let mut app = build_app(&config, TerminalView)?;
                    show_news(&mut app, query.as_deref()).await
                }
            };
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Notes { action } => {
            let mut app = build_app(&config, TerminalView)?;
            match action {
                NotesAction::List => app.load_notes(),
                NotesAction::Add { text } => app.add_note(&text.join(" "))?,
                NotesAction::Delete { index } => app.delete_note(index)?,
            }
        }
        Commands::Chat { text } => {
            let mut app = build_app(&config, TerminalView)?;
            app.send_chat(&text.join(" ")).await;
        }
    }

    Ok(())
}
