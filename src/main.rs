//! clima - current weather for any city, in the terminal
//!
//! A terminal UI application that geocodes a city, fetches its current
//! conditions and today's forecast from Open-Meteo, and shows them as a card.

use std::fs::File;
use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use clima::app::App;
use clima::cli::Cli;
use clima::config::Config;
use clima::search::{SearchMessage, SearchRunner, WeatherService};
use clima::ui::{self, WeatherCard};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends logs to `path`; the terminal belongs to the UI
fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Plain mode logs to stderr, but only when asked to via `RUST_LOG`
fn init_stderr_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init();
    }
}

/// One lookup, printed as text
async fn run_plain(service: WeatherService, config: &Config) -> ExitCode {
    let city = config.initial_city.as_deref().unwrap_or_default();

    match service.lookup(city).await {
        Ok(report) => {
            for line in WeatherCard::from_report(&report, config.language).plain_lines() {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(city, error = %e, "lookup failed");
            eprintln!("{}", e.user_message(config.language));
            ExitCode::FAILURE
        }
    }
}

/// Runs the terminal UI until the user quits
async fn run_tui(service: WeatherService, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_initial_city(config.language, config.initial_city.clone());
    let mut runner = SearchRunner::new(Arc::new(service));

    // Main event loop
    let result = loop {
        // Hand new searches to the runner and collect finished ones
        if let Some(city) = app.take_pending_search() {
            runner.spawn(city);
        }
        while let Some(SearchMessage::Completed { city, result }) = runner.try_recv() {
            app.apply_search_result(&city, result);
        }

        if let Err(e) = terminal.draw(|f| ui::render(f, &app)) {
            break Err(e);
        }

        // Poll for keyboard events with 100ms timeout
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => {}
            Err(e) => break Err(e),
        }

        // Check if we should quit
        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    if let Some(ref path) = config.log_file {
        init_file_logging(path)?;
    } else if config.plain {
        init_stderr_logging();
    }

    tracing::info!(
        language = config.language.code(),
        cache = ?config.cache,
        timeout_secs = config.timeout.as_secs(),
        "clima starting"
    );

    let service = config.weather_service()?;

    if config.plain {
        return Ok(run_plain(service, &config).await);
    }

    run_tui(service, &config).await?;
    Ok(ExitCode::SUCCESS)
}
