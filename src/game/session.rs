use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::game::combat;
use crate::game::geometry::{Aabb, Vec2};
use crate::game::life::{LifeCycle, LifeEvent, Phase, Transition};
use crate::game::movement;
use crate::game::spawner::Spawner;
use crate::game::tuning::*;
use crate::game::world::{Bullet, World};

/// Controls sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub quit: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Final counters of a run, handed to the score store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub kills: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit(RunSummary),
    GameOver(RunSummary),
}

/// One run of the game: owns every piece of per-run state.
pub struct Session {
    ship: Vec2,
    world: World,
    spawner: Spawner,
    life: LifeCycle,
    score: u32,
    kills: u32,
    distance: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let spawner = Spawner::new(&mut rng);
        Self {
            ship: ship_start(),
            world: World::default(),
            spawner,
            life: LifeCycle::new(START_LIVES),
            score: 0,
            kills: 0,
            distance: 0,
            rng,
        }
    }

    /// Back to a fresh run. The random stream carries on.
    pub fn reset(&mut self) {
        self.ship = ship_start();
        self.world.clear();
        self.spawner = Spawner::new(&mut self.rng);
        self.life = LifeCycle::new(START_LIVES);
        self.score = 0;
        self.kills = 0;
        self.distance = 0;
    }

    pub fn tick(&mut self, input: &InputSnapshot, now: u64) -> TickOutcome {
        if input.quit {
            info!(score = self.score, kills = self.kills, distance = self.distance, "run abandoned");
            return TickOutcome::Quit(self.summary());
        }

        match self.life.phase() {
            Phase::GameOver => return TickOutcome::GameOver(self.summary()),
            Phase::Blackout { .. } => {
                return match self.life.advance(LifeEvent::Tick, now) {
                    Transition::GameOver => {
                        info!(score = self.score, kills = self.kills, distance = self.distance, "game over");
                        TickOutcome::GameOver(self.summary())
                    }
                    _ => TickOutcome::Continue,
                };
            }
            Phase::Running => {}
        }

        self.life.advance(LifeEvent::Tick, now);
        self.distance += DISTANCE_PER_TICK;
        self.steer_ship(input);
        if input.fire && self.world.bullets.len() < MAX_BULLETS {
            self.world.bullets.push(Bullet {
                pos: Vec2::new(self.ship.x + BULLET_MUZZLE_X, self.ship.y),
            });
        }

        self.spawner.update(&mut self.world, self.distance, &mut self.rng);
        movement::advance(&mut self.world, self.ship, now, &mut self.rng);

        let tally = combat::resolve_bullet_hits(&mut self.world, now);
        self.kills += tally.kills;
        self.score += tally.score;

        let ship = self.ship_bounds();
        if let Some(hazard) = combat::ship_collision(&self.world, &ship) {
            let event = LifeEvent::Hit { ship: self.ship };
            if let Transition::LifeLost { lives_left } = self.life.advance(event, now) {
                info!(?hazard, lives_left, score = self.score, "ship destroyed");
                self.world.wipe_hazards(&ship);
            }
        }

        TickOutcome::Continue
    }

    fn steer_ship(&mut self, input: &InputSnapshot) {
        if input.left {
            self.ship.x = (self.ship.x - SHIP_SPEED).max(0.0);
        }
        if input.right {
            self.ship.x = (self.ship.x + SHIP_SPEED).min(FIELD_WIDTH - SHIP_WIDTH);
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            kills: self.kills,
        }
    }

    #[cfg(test)]
    pub fn ship(&self) -> Vec2 {
        self.ship
    }

    pub fn ship_bounds(&self) -> Aabb {
        Aabb::at(self.ship, SHIP_WIDTH, SHIP_HEIGHT)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn lives(&self) -> u32 {
        self.life.lives()
    }

    pub fn distance(&self) -> u64 {
        self.distance
    }

    pub fn phase(&self) -> Phase {
        self.life.phase()
    }

    pub fn is_invincible(&self) -> bool {
        self.life.is_invincible()
    }

    pub fn wreck(&self) -> Option<Vec2> {
        self.life.wreck()
    }
}

fn ship_start() -> Vec2 {
    Vec2::new(
        FIELD_WIDTH / 2.0 - (SHIP_WIDTH / 2.0).floor(),
        FIELD_HEIGHT - SHIP_START_Y_OFFSET,
    )
}
