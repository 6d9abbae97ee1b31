use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use cloudai_core::Config;

mod app;
mod handler;
mod tui;
mod ui;

use app::{wait_for_reply, App};
use tui::{EventHandler, Tui};

/// Drives the typing indicator and toast expiry
const TICK_RATE: Duration = Duration::from_millis(300);

/// CloudAI Assistant - chat with a (mock) cloud automation assistant
#[derive(Parser, Debug)]
#[command(name = "cloudai")]
#[command(version, about = "Terminal chat for a mocked cloud automation assistant")]
struct Args {
    /// Color theme for this session (the 't' key toggles and saves it)
    #[arg(long, value_parser = ["dark", "light"])]
    theme: Option<String>,

    /// Delay before the assistant replies, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Write logs here instead of the default file in the temp directory
    #[arg(long, env = "CLOUDAI_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    /// Session-only overrides, never written back to the config file
    fn apply(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.theme = Some(theme.clone());
        }
        if let Some(delay) = self.reply_delay_ms {
            config.reply_delay_ms = Some(delay);
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    // The terminal belongs to the TUI, so logs go to a file
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("cloudai.log"));
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

async fn run(terminal: &mut Tui, mut app: App) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        tokio::select! {
            event = events.next() => match event {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            },
            pending = wait_for_reply(&mut app.reply_task) => app.finish_reply(pending),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config_path = Config::get_config_path()
        .map_err(|e| warn!("theme changes will not be saved: {}", e))
        .ok();
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("failed to load config, using defaults: {}", e);
        Config::new()
    });
    args.apply(&mut config);

    info!(
        theme = config.theme().as_str(),
        reply_delay_ms = config.reply_delay().as_millis() as u64,
        "starting cloudai"
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = run(&mut terminal, App::new(&config, config_path)).await;

    tui::restore()?;
    result
}
