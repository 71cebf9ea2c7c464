use crate::game::geometry::{Aabb, Vec2};
use crate::game::tuning::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// Lateral bias a UFO applies while steering around a planet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Drift {
    Left,
    #[default]
    Neutral,
    Right,
}

impl Drift {
    pub fn sign(self) -> f32 {
        match self {
            Drift::Left => -1.0,
            Drift::Neutral => 0.0,
            Drift::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub drift: Drift,
    /// Timestamp (ms) when the current avoidance manoeuvre ends.
    pub avoid_until: Option<u64>,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            drift: Drift::Neutral,
            avoid_until: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, UFO_WIDTH, UFO_HEIGHT)
    }

    pub fn is_avoiding(&self, now: u64) -> bool {
        self.avoid_until.is_some_and(|until| now < until)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanetKind {
    Ringed,
    Giant,
    Rocky,
    Ice,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 4] = [
        PlanetKind::Ringed,
        PlanetKind::Giant,
        PlanetKind::Rocky,
        PlanetKind::Ice,
    ];

    /// Side length of the square footprint.
    pub fn size(self) -> f32 {
        match self {
            PlanetKind::Ringed => 150.0,
            PlanetKind::Giant => 160.0,
            PlanetKind::Rocky => 130.0,
            PlanetKind::Ice => 150.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub pos: Vec2,
    pub kind: PlanetKind,
}

impl Planet {
    pub fn bounds(&self) -> Aabb {
        let size = self.kind.size();
        Aabb::at(self.pos, size, size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
}

impl Meteor {
    pub fn bounds(&self) -> Aabb {
        Aabb::at(self.pos, METEOR_SIZE, METEOR_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub created_at: u64,
}

impl Explosion {
    pub fn expired(&self, now: u64) -> bool {
        now.saturating_sub(self.created_at) > EXPLOSION_MS
    }
}

/// Every live entity of a run. Owned by the session; cleared on reset.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub planets: Vec<Planet>,
    pub meteors: Vec<Meteor>,
    pub explosions: Vec<Explosion>,
}

impl World {
    pub fn clear(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
        self.planets.clear();
        self.meteors.clear();
        self.explosions.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
            && self.enemies.is_empty()
            && self.planets.is_empty()
            && self.meteors.is_empty()
            && self.explosions.is_empty()
    }

    /// Life-loss cleanup: every hazard and bullet goes, planets only where they cover the ship.
    pub fn wipe_hazards(&mut self, ship: &Aabb) {
        self.enemies.clear();
        self.meteors.clear();
        self.bullets.clear();
        self.planets.retain(|p| !p.bounds().intersects(ship));
    }
}
