//! hrdash - Terminal HR Dashboard
//!
//! Lists employees from a remote collection, with bookmarks, search,
//! filters, per-employee profiles and a decorative analytics view.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info};

use hrdash::application::{App, AppMode, Store};
use hrdash::domain::{RngSynthesizer, Synthesizer};
use hrdash::infrastructure::{init_logging, Cli, Config, DummyJsonClient};
use hrdash::presentation::{render_ui, InputHandler};

/// How long the loop waits for input before ticking.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = Config::load(Cli::parse())?;
    init_logging(config.log_file.as_deref())?;
    info!(base_url = %config.base_url, page_size = config.page_size, "starting");

    let client = DummyJsonClient::new(config.base_url.clone(), config.timeout)
        .context("building HTTP client")?;
    let synth: Box<dyn Synthesizer + Send> = match config.seed {
        Some(seed) => Box::new(RngSynthesizer::seeded(seed)),
        None => Box::new(RngSynthesizer::from_entropy()),
    };

    let mut store = Store::new();
    store.subscribe(|state| {
        debug!(
            bookmarks = state.bookmarked_users.len(),
            search = %state.search_query,
            filters = state.filters.active_count(),
            "state changed"
        );
    });

    let mut app = App::new(store, Arc::new(client), synth, config.app_settings());
    app.show_employees();

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

/// The loop's error is returned once, for `main` to report.
fn loop_outcome(res: io::Result<()>) -> Result<()> {
    info!(failed = res.is_err(), "exiting");
    res.context("running event loop")
}

/// Main application event loop.
///
/// Draws, waits briefly for a key, then advances timers and applies any
/// completed fetches. Runs until the user quits.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c');
                    match key.code {
                        _ if ctrl_c => return Ok(()),
                        KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
