use anyhow::Result;
use tracing::info;

use newsdesk::config::Config;
use newsdesk::routes;
use newsdesk::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    newsdesk::init_tracing("newsdesk=debug,tower_http=debug");

    let config = Config::discover()?;

    // Initialize app state
    let app_state = AppState::new(config.clone())?;
    let app = routes::build_app(app_state);

    // Start server
    let addr = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
