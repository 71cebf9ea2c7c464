use rand::Rng;
use tracing::debug;

use crate::game::geometry::{Aabb, Vec2};
use crate::game::tuning::*;
use crate::game::world::{Enemy, Meteor, Planet, PlanetKind, World};

/// Decides when new hazards enter the field.
#[derive(Clone, Debug)]
pub struct Spawner {
    planet_interval: u64,
    ufo_timer: u32,
    meteor_timer: u32,
}

impl Spawner {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            planet_interval: roll_planet_interval(rng),
            ufo_timer: 0,
            meteor_timer: 0,
        }
    }

    #[cfg(test)]
    pub fn planet_interval(&self) -> u64 {
        self.planet_interval
    }

    pub fn update(&mut self, world: &mut World, distance: u64, rng: &mut impl Rng) {
        if distance % self.planet_interval < PLANET_WINDOW {
            if let Some(planet) = place_planet(world, rng) {
                debug!(x = planet.pos.x, y = planet.pos.y, kind = ?planet.kind, "planet spawned");
                world.planets.push(planet);
                self.planet_interval = roll_planet_interval(rng);
            }
        }

        self.ufo_timer += 1;
        if self.ufo_timer > UFO_SPAWN_TICKS {
            self.ufo_timer = 0;
            let x = rng.gen_range(UFO_SPAWN_X_MIN..=UFO_SPAWN_X_MAX).floor();
            world.enemies.push(Enemy::new(Vec2::new(x, UFO_SPAWN_Y)));
            debug!(x, "ufo spawned");
        }

        self.meteor_timer += 1;
        if self.meteor_timer > METEOR_SPAWN_TICKS {
            self.meteor_timer = 0;
            world.meteors.push(Meteor {
                pos: Vec2::new(METEOR_SPAWN_X, METEOR_SPAWN_Y),
            });
            debug!("meteor spawned");
        }
    }
}

fn roll_planet_interval(rng: &mut impl Rng) -> u64 {
    rng.gen_range(PLANET_INTERVAL_MIN..=PLANET_INTERVAL_MAX)
}

/// Tries a handful of random spots; `None` when every one crowds an existing planet.
fn place_planet(world: &World, rng: &mut impl Rng) -> Option<Planet> {
    for _ in 0..PLANET_PLACEMENT_ATTEMPTS {
        let kind = PlanetKind::ALL[rng.gen_range(0..PlanetKind::ALL.len())];
        let x = rng.gen_range(PLANET_SPAWN_X_MIN..=PLANET_SPAWN_X_MAX).floor();
        let y = rng.gen_range(PLANET_SPAWN_Y_MIN..=PLANET_SPAWN_Y_MAX).floor();
        let candidate = Planet { pos: Vec2::new(x, y), kind };
        if is_clear(world, &candidate.bounds()) {
            return Some(candidate);
        }
    }
    debug!(planets = world.planets.len(), "no room for a new planet");
    None
}

fn is_clear(world: &World, bounds: &Aabb) -> bool {
    world.planets.iter().all(|p| {
        let other = p.bounds();
        !other.intersects(bounds) && !other.within_clearance(bounds, PLANET_CLEARANCE)
    })
}
