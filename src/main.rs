// ABOUTME: Main entry point for the computer use viewer TUI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    Terminal,
};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use computer_use_viewer::app::{App, EventHandler};
use computer_use_viewer::commands::{register_viewer_commands, CommandRegistry};
use computer_use_viewer::components::LayoutComponent;
use computer_use_viewer::config::AppConfig;

/// Terminal viewer and lifecycle control for the computer use VM
#[derive(Parser, Debug)]
#[command(name = "computer-use-viewer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the Lifecycle API server
    #[arg(long)]
    base_url: Option<String>,

    /// noVNC viewer URL shown while the VM runs
    #[arg(long)]
    display_url: Option<String>,

    /// Status refresh interval in milliseconds
    #[arg(long)]
    refresh_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a registered command handler and print its acknowledgment
    Dispatch {
        /// Handler name, e.g. computer_start
        name: String,
        /// JSON payload with an `event` field
        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Dispatch { name, payload }) = &cli.command {
        return dispatch(name, payload);
    }

    let config = load_config(&cli)?;
    setup_logging();
    setup_panic_handler();

    let mut app = App::new(&config);
    app.init();
    let mut layout = LayoutComponent::new();

    let result = run_tui(&mut app, &mut layout).await;
    app.shutdown();

    result
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(display_url) = &cli.display_url {
        config.display_url = display_url.clone();
    }
    if let Some(refresh_ms) = cli.refresh_ms {
        config.refresh_interval_ms = refresh_ms;
    }

    config.validate().context("Invalid command line options")?;
    Ok(config)
}

fn dispatch(name: &str, payload: &str) -> Result<()> {
    let mut registry = CommandRegistry::new();
    register_viewer_commands(&mut registry);

    if let Some(ack) = registry.dispatch_json(name, payload)? {
        println!("{}", ack.text);
    }
    Ok(())
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, layout).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    layout: &mut LayoutComponent,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|frame| {
                layout.render(frame, &app.state, app.viewer.state());
            })?;
            needs_redraw = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if let Some(app_event) =
                        EventHandler::handle_key_event(key_event, &app.state, app.viewer.state())
                    {
                        EventHandler::process_event(app_event, app);
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.tick() {
                needs_redraw = true;
            }
            last_tick = Instant::now();
            // Let request tasks make progress between frames
            tokio::task::yield_now().await;
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use std::fs::OpenOptions;

    let log_dir = std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".computer-use-viewer").join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".computer-use-viewer/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "computer-use-viewer-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    // Never log to stdout while the alternate screen is active
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false)
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "computer_use_viewer=info".into())
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stderr(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
