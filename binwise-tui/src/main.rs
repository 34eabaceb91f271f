//! Terminal front end for binwise: pick a region, type or scan an item, see its bin.

mod app;
mod cli;
mod commands;
mod config;
mod feed;
mod input;
mod output;
mod ui;

use std::{
    fs::OpenOptions,
    io,
    path::Path,
    process::ExitCode,
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use anyhow::{Context, Result};
use binwise_core::{BinwiseService, Prediction};
use binwise_provider_gemini as gemini;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::feed::StartAt;
use crate::input::Action;

const FEED_BUFFER: usize = 64;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.command.is_some())?;

    let config = Config::load()?;
    let store = binwise_regions::store_with_default(&config.region)
        .context("Built-in region catalogs are invalid")?;

    // HTTP + service setup
    let mut service = BinwiseService::new(store);
    if let Some(api_key) = &config.gemini_api_key {
        let client = Client::builder().user_agent("binwise/0.1").build()?;
        service = service.with_scorer(gemini::port(
            client,
            api_key.clone(),
            config.gemini_model.clone(),
        ));
    } else {
        info!("GEMINI_API_KEY not set, footprint scoring disabled");
    }
    let service = Arc::new(service);

    if let Some(command) = cli.command {
        return commands::run(command, &service, &config).await;
    }

    let feed = cli.feed.or_else(|| config.feed.clone());
    run_tui(service, &config, feed.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

/// Log to `BINWISE_LOG_FILE` when set. Otherwise one-shot commands log to
/// stderr and the interactive view stays silent.
fn init_logging(to_stderr: bool) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    if let Some(path) = config::log_file() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        fmt()
            .with_env_filter(filter("info"))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if to_stderr {
        fmt()
            .with_env_filter(filter("warn"))
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_tui(service: Arc<BinwiseService>, config: &Config, feed: Option<&Path>) -> Result<()> {
    let (tx, rx) = mpsc::channel(FEED_BUFFER);
    let feed_task = feed.map(|path| feed::spawn(path.to_path_buf(), StartAt::End, tx));

    // App state
    let app = App::new(
        service,
        config.min_confidence,
        feed.map(|path| path.display().to_string()),
    );

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(task) = feed_task {
        task.abort();
    }
    res
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut predictions: mpsc::Receiver<Prediction>,
) -> Result<()> {
    loop {
        // Apply every prediction that arrived since the last frame, oldest first
        loop {
            match predictions.try_recv() {
                Ok(prediction) => app.on_prediction(prediction),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.on_feed_closed();
                    break;
                }
            }
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
            && input::handle_key_event(key, &mut app) == Action::Quit
        {
            break;
        }
    }

    Ok(())
}
