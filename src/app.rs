use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::game::{RunSummary, Session, TickOutcome};
use crate::input::HeldKeys;
use crate::scores::{self, RunRecord, ScoreStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Stats,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeItem {
    Play,
    Stats,
}

impl HomeItem {
    pub const ALL: [HomeItem; 2] = [HomeItem::Play, HomeItem::Stats];

    pub fn label(&self) -> &'static str {
        match self {
            HomeItem::Play => "PLAY",
            HomeItem::Stats => "VIEW STATS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndItem {
    Restart,
    End,
}

impl EndItem {
    pub const ALL: [EndItem; 2] = [EndItem::Restart, EndItem::End];

    pub fn label(&self) -> &'static str {
        match self {
            EndItem::Restart => "RESTART",
            EndItem::End => "END",
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub selected: usize, // menu row on Home / GameOver
    pub session: Session,
    pub last_run: RunSummary,
    pub leaderboard: Vec<RunRecord>,
    /// Timestamp of the latest tick, for blink timing.
    pub now: u64,
    keys: HeldKeys,
    store: Box<dyn ScoreStore>,
    clock: Box<dyn Clock>,
    leaderboard_size: usize,
}

impl App {
    pub fn new(
        config: &Config,
        store: Box<dyn ScoreStore>,
        clock: Box<dyn Clock>,
        reports_release: bool,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, "session rng seeded");
        Self {
            should_quit: false,
            screen: Screen::Home,
            selected: 0,
            session: Session::new(seed),
            last_run: RunSummary::default(),
            leaderboard: Vec::new(),
            now: clock.now_ms(),
            keys: HeldKeys::new(reports_release),
            store,
            clock,
            leaderboard_size: config.leaderboard_size,
        }
    }

    pub fn on_tick(&mut self) {
        self.now = self.clock.now_ms();
        if self.screen != Screen::Playing {
            return;
        }

        let input = self.keys.snapshot();
        match self.session.tick(&input, self.now) {
            TickOutcome::Continue => {}
            TickOutcome::Quit(summary) => {
                self.finish_run(summary);
                self.screen = Screen::Home;
                self.selected = 0;
            }
            TickOutcome::GameOver(summary) => {
                self.finish_run(summary);
                self.screen = Screen::GameOver;
                self.selected = 0;
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.screen == Screen::Playing {
                self.finish_run(self.session.summary());
            }
            self.should_quit = true;
            return;
        }

        if self.screen == Screen::Playing {
            self.keys.on_key(key);
            return;
        }

        // Menus act on fresh presses only; a fire key held through the end of a run
        // keeps auto-repeating.
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.screen {
            Screen::Home => self.home_input(key),
            Screen::Stats => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q')
                ) {
                    self.screen = Screen::Home;
                }
            }
            Screen::GameOver => self.game_over_input(key),
            Screen::Playing => {}
        }
    }

    fn home_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down => self.selected = (self.selected + 1) % HomeItem::ALL.len(),
            KeyCode::Enter => match HomeItem::ALL[self.selected] {
                HomeItem::Play => self.start_run(),
                HomeItem::Stats => self.open_stats(),
            },
            KeyCode::Char('p') | KeyCode::Char('P') => self.start_run(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.open_stats(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn game_over_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down => self.selected = (self.selected + 1) % EndItem::ALL.len(),
            KeyCode::Enter => match EndItem::ALL[self.selected] {
                EndItem::Restart => self.start_run(),
                EndItem::End => self.should_quit = true,
            },
            KeyCode::Char('r') | KeyCode::Char('R') => self.start_run(),
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true
            }
            _ => {}
        }
    }

    fn start_run(&mut self) {
        self.session.reset();
        self.keys.clear();
        self.screen = Screen::Playing;
        info!("run started");
    }

    fn open_stats(&mut self) {
        self.leaderboard = scores::leaderboard(self.store.as_ref(), self.leaderboard_size);
        self.screen = Screen::Stats;
    }

    fn finish_run(&mut self, summary: RunSummary) {
        self.last_run = summary;
        scores::record_best_effort(self.store.as_mut(), summary);
        info!(score = summary.score, kills = summary.kills, "run finished");
    }
}
