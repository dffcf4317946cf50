use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use trackgrid::{app, song::NewSongOptions};

#[derive(Parser)]
#[command(name = "trackgrid", version, about = "A terminal pattern-grid track editor")]
struct Cli {
    /// Song file to open (created on first save if missing)
    file: PathBuf,

    /// Channels in a new song
    #[arg(long, default_value_t = 4)]
    channels: usize,

    /// Bars in a new song
    #[arg(long, default_value_t = 16)]
    bars: usize,

    /// Patterns per channel in a new song
    #[arg(long, default_value_t = 8)]
    patterns: usize,

    /// Playback speed in bars per second
    #[arg(long, default_value_t = 0.5)]
    tempo: f64,

    /// Write logs here (filtered by TRACKGRID_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let options = NewSongOptions {
        channels: cli.channels,
        bars: cli.bars,
        patterns: cli.patterns,
    };
    let app = match app::App::new(cli.file, options, cli.tempo) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    run_editor(app)
}

/// The terminal belongs to the TUI, so logs only ever go to a file.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env("TRACKGRID_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Sets up the terminal, runs the TUI, and restores the terminal on exit.
fn run_editor(app: app::App) -> io::Result<()> {
    // Setup panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, app);

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: app::App,
) -> io::Result<()> {
    loop {
        app.render_frame(terminal)?;

        // Short poll so the playhead keeps moving while idle.
        if event::poll(Duration::from_millis(30))? {
            // Drain all queued events without blocking, then render immediately.
            loop {
                let ev = event::read()?;
                app.handle_event(ev);
                if app.should_quit {
                    break;
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
