use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use waview::core::config::{self, WaviewConfig};
use waview::core::preferences::Preferences;
use waview::core::state::Theme;
use waview::tui;

#[derive(Parser)]
#[command(name = "waview", about = "WhatsApp message admin dashboard")]
struct Args {
    /// Phone number to look up at startup
    #[arg(short, long)]
    phone: Option<String>,

    /// Message endpoint (overrides WAVIEW_API_ENDPOINT and the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Switch to the light theme and remember it
    #[arg(long, conflicts_with = "dark")]
    light: bool,

    /// Switch to the dark theme and remember it
    #[arg(long)]
    dark: bool,
}

impl Args {
    fn theme_override(&self) -> Option<Theme> {
        if self.light {
            Some(Theme::Light)
        } else if self.dark {
            Some(Theme::Dark)
        } else {
            None
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to waview.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("waview.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        WaviewConfig::default()
    });
    let env_endpoint = std::env::var(config::ENDPOINT_ENV).ok();
    let resolved = config::resolve(
        &file_config,
        env_endpoint.as_deref(),
        args.endpoint.as_deref(),
        args.phone.as_deref(),
    );

    let mut preferences = Preferences::load();
    if let Some(theme) = args.theme_override() {
        preferences.set_theme(theme);
        if let Err(e) = preferences.save() {
            log::warn!("Failed to save theme preference: {}", e);
        }
    }

    log::info!(
        "waview starting up (endpoint={}, theme={})",
        resolved.endpoint,
        preferences.theme().attribute()
    );

    tui::run(resolved, preferences)
}
