mod app;
mod client;
mod config;
mod error;
mod local_state;
mod logging;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config.log_file, &config.log_level)?;
    tracing::info!("shopdesk_tui starting against {}", config.base_url);

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
