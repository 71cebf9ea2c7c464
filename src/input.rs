use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::InputSnapshot;

// Without release events a key counts as held for a while after its last press.
// A fresh press has to outlast the terminal's first auto-repeat delay (up to ~500 ms);
// once repeats are flowing they arrive every few ticks.
const FIRST_HOLD_TICKS: u64 = 32;
const HOLD_TICKS: u64 = 9;

#[derive(Clone, Copy, Debug, Default)]
struct Hold {
    down: bool,
    // First tick at which the key no longer counts as held.
    until: u64,
}

impl Hold {
    fn held_at(&self, tick: u64, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            tick < self.until
        }
    }
}

/// Turns a stream of key events into per-tick held-key snapshots.
pub struct HeldKeys {
    reports_release: bool,
    tick: u64,
    left: Hold,
    right: Hold,
    fire: Hold,
    quit: bool,
}

impl HeldKeys {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            tick: 0,
            left: Hold::default(),
            right: Hold::default(),
            fire: Hold::default(),
            quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let tick = self.tick;
        let reports_release = self.reports_release;
        let hold = match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => &mut self.left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => &mut self.right,
            KeyCode::Char(' ') | KeyCode::Up => &mut self.fire,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                if key.kind == KeyEventKind::Press {
                    self.quit = true;
                }
                return;
            }
            _ => return,
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let window = if hold.held_at(tick, reports_release) {
                    HOLD_TICKS
                } else {
                    FIRST_HOLD_TICKS
                };
                hold.down = true;
                hold.until = hold.until.max(tick + window);
            }
            KeyEventKind::Release => {
                hold.down = false;
                hold.until = 0;
            }
        }
    }

    /// Samples the controls for one tick. A quit request is reported once.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            quit: std::mem::take(&mut self.quit),
            left: self.left.held_at(self.tick, self.reports_release),
            right: self.right.held_at(self.tick, self.reports_release),
            fire: self.fire.held_at(self.tick, self.reports_release),
        };
        self.tick += 1;
        snapshot
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.reports_release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_outlasts_the_first_repeat_delay() {
        let mut keys = HeldKeys::new(false);
        keys.on_key(key(KeyCode::Left, KeyEventKind::Press));

        for _ in 0..FIRST_HOLD_TICKS {
            assert!(keys.snapshot().left);
        }
        assert!(!keys.snapshot().left);
    }

    #[test]
    fn key_lets_go_soon_after_repeats_stop() {
        let mut keys = HeldKeys::new(false);
        keys.on_key(key(KeyCode::Right, KeyEventKind::Press));
        // First repeat lands after ~400 ms, then every couple of ticks.
        for _ in 0..25 {
            assert!(keys.snapshot().right);
        }
        for _ in 0..20 {
            keys.on_key(key(KeyCode::Right, KeyEventKind::Press));
            assert!(keys.snapshot().right);
            assert!(keys.snapshot().right);
        }

        let lingering = (0..FIRST_HOLD_TICKS).take_while(|_| keys.snapshot().right).count();
        assert!(lingering < HOLD_TICKS as usize);
    }

    #[test]
    fn auto_repeat_keeps_the_key_down() {
        let mut keys = HeldKeys::new(false);
        keys.on_key(key(KeyCode::Char(' '), KeyEventKind::Press));
        for _ in 0..30 {
            keys.snapshot();
            keys.on_key(key(KeyCode::Char(' '), KeyEventKind::Press));
            assert!(keys.snapshot().fire);
        }
    }

    #[test]
    fn release_events_end_the_hold() {
        let mut keys = HeldKeys::new(true);
        keys.on_key(key(KeyCode::Right, KeyEventKind::Press));
        for _ in 0..50 {
            assert!(keys.snapshot().right);
        }
        keys.on_key(key(KeyCode::Right, KeyEventKind::Release));
        assert!(!keys.snapshot().right);
    }

    #[test]
    fn quit_is_reported_once() {
        let mut keys = HeldKeys::new(false);
        keys.on_key(key(KeyCode::Esc, KeyEventKind::Press));
        assert!(keys.snapshot().quit);
        assert!(!keys.snapshot().quit);

        keys.on_key(key(KeyCode::Char('q'), KeyEventKind::Release));
        assert!(!keys.snapshot().quit);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut keys = HeldKeys::new(false);
        keys.on_key(key(KeyCode::Left, KeyEventKind::Press));
        keys.on_key(key(KeyCode::Esc, KeyEventKind::Press));
        keys.clear();
        assert_eq!(keys.snapshot(), InputSnapshot::default());
    }
}
