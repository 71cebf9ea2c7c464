mod app;
mod clock;
mod config;
mod event;
mod game;
mod input;
mod scores;
mod ui;

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use app::App;
use clock::MonotonicClock;
use config::Config;
use event::{Event, EventHandler};
use scores::FileScoreStore;

// The terminal belongs to the game, so logs go to a file.
fn init_tracing(log_path: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let writer = match File::create(log_path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        eprintln!("{info}");
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags, LeaveAlternateScreen);
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config.log_path);
    info!(?config, "starting");

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events make held keys exact; older terminals fall back to auto-repeat.
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!("terminal does not report key releases, using the hold window");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let store = FileScoreStore::new(config.scores_path.clone());
    let mut app = App::new(
        &config,
        Box::new(store),
        Box::new(MonotonicClock::new()),
        reports_release,
    );
    let event_handler = EventHandler::new(config.tick_rate_ms);

    // Main loop
    let result: anyhow::Result<()> = (|| {
        loop {
            terminal.draw(|frame| ui::render(frame, &mut app))?;

            match event_handler.next()? {
                Event::Tick => app.on_tick(),
                Event::Key(key) => app.on_key(key),
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal
    restore_terminal();
    terminal.show_cursor()?;
    info!("bye");

    result
}
