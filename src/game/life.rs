use tracing::info;

use crate::game::geometry::Vec2;
use crate::game::tuning::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Simulation frozen after a hit; `since` is the hit timestamp.
    Blackout { since: u64 },
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifeEvent {
    /// Wall-clock advance with no collision.
    Tick,
    /// The ship touched a hazard at `ship`.
    Hit { ship: Vec2 },
}

/// Result of feeding an event to [`LifeCycle::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    LifeLost { lives_left: u32 },
    Resumed,
    GameOver,
}

/// Lives, blackout and invincibility for one run.
#[derive(Clone, Debug)]
pub struct LifeCycle {
    phase: Phase,
    lives: u32,
    invincible_since: Option<u64>,
    wreck: Option<Vec2>,
}

impl LifeCycle {
    pub fn new(lives: u32) -> Self {
        Self {
            phase: Phase::Running,
            lives,
            invincible_since: None,
            wreck: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_since.is_some()
    }

    /// Where the ship blew up, while the blackout overlay is showing.
    pub fn wreck(&self) -> Option<Vec2> {
        self.wreck
    }

    pub fn advance(&mut self, event: LifeEvent, now: u64) -> Transition {
        if let Some(since) = self.invincible_since {
            if now.saturating_sub(since) > INVINCIBLE_MS {
                self.invincible_since = None;
            }
        }

        match (self.phase, event) {
            (Phase::Running, LifeEvent::Hit { ship }) if self.invincible_since.is_none() => {
                self.lives = self.lives.saturating_sub(1);
                self.phase = Phase::Blackout { since: now };
                self.invincible_since = Some(now);
                self.wreck = Some(Vec2::new(ship.x - WRECK_OFFSET, ship.y - WRECK_OFFSET));
                info!(lives_left = self.lives, "life lost");
                Transition::LifeLost {
                    lives_left: self.lives,
                }
            }
            (Phase::Blackout { since }, _) if now.saturating_sub(since) >= BLACKOUT_MS => {
                self.wreck = None;
                if self.lives == 0 {
                    self.phase = Phase::GameOver;
                    Transition::GameOver
                } else {
                    self.phase = Phase::Running;
                    Transition::Resumed
                }
            }
            _ => Transition::None,
        }
    }
}
