use clap::Parser;
use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/shopdesk.toml";
const MIN_TICK_MS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Directory CSV exports are written to.
    pub export_dir: String,
    pub state_path: String,
    pub log_file: String,
    pub log_level: String,
    /// Initial page size of the expenses list; `-1` shows every row.
    pub page_size: i64,
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            export_dir: ".".to_string(),
            state_path: "config/shopdesk_state.json".to_string(),
            log_file: "shopdesk_tui.log".to_string(),
            log_level: "info".to_string(),
            page_size: 10,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shopdesk_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the CSV export directory.
    #[arg(long)]
    export_dir: Option<String>,
    /// Override the local preferences file.
    #[arg(long)]
    state_path: Option<String>,
    #[arg(long)]
    log_file: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Initial page size of the expenses list (-1 for all rows).
    #[arg(long, allow_negative_numbers = true)]
    page_size: Option<i64>,
    /// Event loop tick in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SHOPDESK_TUI"));
    resolve(builder, args)
}

fn resolve(builder: ConfigBuilder<DefaultState>, args: Args) -> Result<AppConfig> {
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;
    apply_overrides(&mut settings, args);
    // event::poll(0) would spin
    settings.tick_ms = settings.tick_ms.max(MIN_TICK_MS);

    Ok(settings)
}

fn apply_overrides(settings: &mut AppConfig, args: Args) {
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(tick_ms) = args.tick_ms {
        settings.tick_ms = tick_ms;
    }
}
