//! marquee - movie recommendations in your terminal
//!
//! A terminal client for a movie-recommendation backend:
//! - watched-history browsing, scoped to a month or flattened across all
//! - per-month recommendation cards, shuffled and capped at eight
//! - live backend (POST routes) or exported JSON snapshots as data source

use anyhow::Result;
use clap::Parser;

use marquee_core::config::{Config, SourceKind};
use marquee_core::{paths, source};

mod tui;

/// marquee - movie recommendations in your terminal
#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Browse watched movies and monthly recommendations", long_about = None)]
struct Cli {
    /// Base URL of the backend (or snapshot directory); overrides config
    #[arg(long)]
    url: Option<String>,

    /// Data source: "backend" (POST routes) or "snapshot" (static JSON)
    #[arg(long)]
    source: Option<SourceKind>,

    /// Theme name; overrides config
    #[arg(long)]
    theme: Option<String>,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Initialize logging to file (not stdout/stderr which would mess up the TUI)
    let log_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
    }
    let log_file = std::fs::File::create(log_dir.join("marquee.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = Config::load()?;
    if let Some(url) = cli.url {
        config.backend_url = url;
    }
    if let Some(kind) = cli.source {
        config.source = kind;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    tracing::info!(
        url = %config.backend_url,
        source = %config.source,
        "starting marquee"
    );

    let source = source::from_config(&config);
    let theme = tui::theme::by_name(&config.theme);
    let app = tui::App::new(source, theme);
    app.run().await
}
