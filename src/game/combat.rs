use crate::game::geometry::Aabb;
use crate::game::tuning::KILL_REWARD;
use crate::game::world::{Explosion, World};

/// What the ship ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    Meteor,
    Planet,
    Ufo,
}

/// Score and kill deltas produced by one pass of bullet hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub kills: u32,
    pub score: u32,
}

/// Each enemy is destroyed by the first bullet overlapping it; both are consumed.
pub fn resolve_bullet_hits(world: &mut World, now: u64) -> Tally {
    let mut tally = Tally::default();
    let mut survivors = Vec::with_capacity(world.enemies.len());

    for enemy in world.enemies.drain(..) {
        let bounds = enemy.bounds();
        match world.bullets.iter().position(|b| b.bounds().intersects(&bounds)) {
            Some(hit) => {
                world.bullets.remove(hit);
                world.explosions.push(Explosion {
                    pos: enemy.pos,
                    created_at: now,
                });
                tally.kills += 1;
                tally.score += KILL_REWARD;
            }
            None => survivors.push(enemy),
        }
    }

    world.enemies = survivors;
    tally
}

/// First hazard touching the ship, checked meteors, then planets, then UFOs.
pub fn ship_collision(world: &World, ship: &Aabb) -> Option<Hazard> {
    if world.meteors.iter().any(|m| m.bounds().intersects(ship)) {
        return Some(Hazard::Meteor);
    }
    if world.planets.iter().any(|p| p.bounds().intersects(ship)) {
        return Some(Hazard::Planet);
    }
    if world.enemies.iter().any(|e| e.bounds().intersects(ship)) {
        return Some(Hazard::Ufo);
    }
    None
}
