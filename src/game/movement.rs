use rand::Rng;
use tracing::trace;

use crate::game::geometry::{Aabb, Vec2};
use crate::game::tuning::*;
use crate::game::world::{Bullet, Drift, Enemy, Meteor, Planet, World};

/// Advances every entity one tick and drops the ones that left the field.
pub fn advance(world: &mut World, ship: Vec2, now: u64, rng: &mut impl Rng) {
    move_bullets(&mut world.bullets);
    move_planets(&mut world.planets);
    move_meteors(&mut world.meteors);

    for enemy in &mut world.enemies {
        steer_enemy(enemy, &world.planets, ship, now, rng);
    }
    world.enemies.retain(|e| e.pos.y <= FIELD_HEIGHT);

    world.explosions.retain(|e| !e.expired(now));
}

fn move_bullets(bullets: &mut Vec<Bullet>) {
    for b in bullets.iter_mut() {
        b.pos.y -= BULLET_SPEED;
    }
    bullets.retain(|b| b.pos.y >= BULLET_MIN_Y);
}

fn move_planets(planets: &mut Vec<Planet>) {
    for p in planets.iter_mut() {
        p.pos.y += PLANET_FALL_SPEED;
    }
    planets.retain(|p| p.pos.y <= FIELD_HEIGHT + PLANET_DESPAWN_MARGIN);
}

fn move_meteors(meteors: &mut Vec<Meteor>) {
    for m in meteors.iter_mut() {
        m.pos.x += METEOR_DX;
        m.pos.y += METEOR_DY;
    }
    meteors.retain(|m| m.pos.y <= FIELD_HEIGHT + METEOR_DESPAWN_MARGIN);
}

/// Chase the ship horizontally, side-stepping planets, then fall.
pub fn steer_enemy(enemy: &mut Enemy, planets: &[Planet], ship: Vec2, now: u64, rng: &mut impl Rng) {
    if enemy.avoid_until.is_some_and(|until| now >= until) {
        enemy.avoid_until = None;
        enemy.drift = Drift::Neutral;
    }

    let x = enemy.pos.x;
    let y = enemy.pos.y;
    let next_x = if enemy.is_avoiding(now) {
        x + enemy.drift.sign() * UFO_DODGE_SPEED
    } else {
        let chase_x = chase(x, ship.x);
        match blocking_planet(planets, chase_x, y) {
            None => chase_x,
            Some(planet) => {
                enemy.drift = dodge_direction(x, planet, rng);
                enemy.avoid_until = Some(now + UFO_AVOID_MS);
                trace!(x, y, drift = ?enemy.drift, "ufo avoiding planet");
                x + enemy.drift.sign() * UFO_DODGE_SPEED
            }
        }
    };

    // A sidestep into another planet is not taken.
    let next_x = if blocking_planet(planets, next_x, y).is_some() {
        x
    } else {
        next_x
    };

    enemy.pos.x = next_x.clamp(0.0, FIELD_WIDTH - UFO_WIDTH);
    enemy.pos.y += UFO_FALL_SPEED;
}

/// Steps toward the x that puts the UFO's centre over the ship's centre.
fn chase(x: f32, ship_x: f32) -> f32 {
    let target = ship_x + SHIP_WIDTH / 2.0 - UFO_WIDTH / 2.0;
    let gap = target - x;
    if gap.abs() > UFO_DEADBAND {
        x + gap.signum() * UFO_CHASE_SPEED
    } else {
        x + gap * UFO_EASE
    }
}

fn blocking_planet(planets: &[Planet], x: f32, y: f32) -> Option<&Planet> {
    let probe = Aabb::new(x, y, UFO_WIDTH, UFO_HEIGHT);
    planets.iter().find(|p| p.bounds().intersects(&probe))
}

fn dodge_direction(x: f32, planet: &Planet, rng: &mut impl Rng) -> Drift {
    let ufo_center = x + UFO_WIDTH / 2.0;
    let planet_center = planet.bounds().center().x;
    if ufo_center < planet_center {
        Drift::Left
    } else if ufo_center > planet_center {
        Drift::Right
    } else if rng.gen_bool(0.5) {
        Drift::Left
    } else {
        Drift::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::{Explosion, PlanetKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn bullets_fly_up_and_leave_the_top() {
        let mut world = World::default();
        world.bullets.push(Bullet { pos: Vec2::new(440.0, 600.0) });
        world.bullets.push(Bullet { pos: Vec2::new(100.0, -15.0) });

        advance(&mut world, Vec2::new(400.0, 600.0), 0, &mut rng());

        assert_eq!(world.bullets, vec![Bullet { pos: Vec2::new(440.0, 590.0) }]);
    }

    #[test]
    fn meteors_fall_diagonally_and_despawn_below() {
        let mut world = World::default();
        world.meteors.push(Meteor { pos: Vec2::new(950.0, -50.0) });
        world.meteors.push(Meteor { pos: Vec2::new(0.0, FIELD_HEIGHT + METEOR_DESPAWN_MARGIN - 1.0) });

        advance(&mut world, Vec2::default(), 0, &mut rng());

        assert_eq!(world.meteors, vec![Meteor { pos: Vec2::new(947.0, -46.0) }]);
    }

    #[test]
    fn planets_scroll_down_and_despawn_below() {
        let mut world = World::default();
        world.planets.push(Planet { pos: Vec2::new(100.0, -200.0), kind: PlanetKind::Ice });
        world.planets.push(Planet {
            pos: Vec2::new(300.0, FIELD_HEIGHT + PLANET_DESPAWN_MARGIN),
            kind: PlanetKind::Ice,
        });

        advance(&mut world, Vec2::default(), 0, &mut rng());

        assert_eq!(world.planets.len(), 1);
        assert_eq!(world.planets[0].pos, Vec2::new(100.0, -198.0));
    }

    #[test]
    fn enemies_despawn_below_the_field() {
        let mut world = World::default();
        world.enemies.push(Enemy::new(Vec2::new(100.0, 749.0)));
        world.enemies.push(Enemy::new(Vec2::new(300.0, 700.0)));

        advance(&mut world, Vec2::default(), 0, &mut rng());

        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].pos.y, 702.0);
    }

    #[test]
    fn ufo_chases_at_capped_speed_when_far() {
        let mut ufo = Enemy::new(Vec2::new(0.0, 100.0));
        steer_enemy(&mut ufo, &[], Vec2::new(400.0, 600.0), 0, &mut rng());
        assert_eq!(ufo.pos, Vec2::new(2.0, 102.0));

        let mut ufo = Enemy::new(Vec2::new(800.0, 100.0));
        steer_enemy(&mut ufo, &[], Vec2::new(0.0, 600.0), 0, &mut rng());
        assert_eq!(ufo.pos.x, 798.0);
    }

    #[test]
    fn ufo_eases_inside_deadband() {
        // Centre-aligned target for a ship at 400 is 397.5.
        let mut ufo = Enemy::new(Vec2::new(390.0, 100.0));
        steer_enemy(&mut ufo, &[], Vec2::new(400.0, 600.0), 0, &mut rng());
        assert!((ufo.pos.x - 391.5).abs() < 1e-4);

        for _ in 0..60 {
            steer_enemy(&mut ufo, &[], Vec2::new(400.0, 600.0), 0, &mut rng());
        }
        assert!((ufo.pos.x - 397.5).abs() < 0.01);
    }

    #[test]
    fn ufo_sidesteps_planet_for_the_avoid_window() {
        let planets = [Planet { pos: Vec2::new(191.0, 100.0), kind: PlanetKind::Rocky }];
        let ship = Vec2::new(800.0, 600.0);
        let mut ufo = Enemy::new(Vec2::new(100.0, 100.0));
        let mut rng = rng();

        steer_enemy(&mut ufo, &planets, ship, 1_000, &mut rng);
        assert_eq!(ufo.drift, Drift::Left);
        assert_eq!(ufo.avoid_until, Some(1_000 + UFO_AVOID_MS));
        assert_eq!(ufo.pos.x, 97.0);

        // Still avoiding: keeps drifting instead of chasing.
        steer_enemy(&mut ufo, &planets, ship, 1_100, &mut rng);
        assert_eq!(ufo.pos.x, 94.0);
        assert!(ufo.is_avoiding(1_100));

        // Window over: drift clears and the chase resumes.
        steer_enemy(&mut ufo, &planets, ship, 1_000 + UFO_AVOID_MS, &mut rng);
        assert_eq!(ufo.drift, Drift::Neutral);
        assert_eq!(ufo.avoid_until, None);
        assert_eq!(ufo.pos.x, 96.0);
    }

    #[test]
    fn blocked_sidestep_holds_position() {
        // Chase path runs into the right planet, the dodge to the left clips the other one.
        let planets = [
            Planet { pos: Vec2::new(191.0, 100.0), kind: PlanetKind::Rocky },
            Planet { pos: Vec2::new(-32.0, 100.0), kind: PlanetKind::Rocky },
        ];
        let mut ufo = Enemy::new(Vec2::new(100.0, 100.0));

        steer_enemy(&mut ufo, &planets, Vec2::new(800.0, 600.0), 0, &mut rng());

        assert_eq!(ufo.drift, Drift::Left);
        assert!(ufo.is_avoiding(0));
        assert_eq!(ufo.pos, Vec2::new(100.0, 100.0 + UFO_FALL_SPEED));
    }

    #[test]
    fn avoidance_is_tracked_per_ufo() {
        let planets = [Planet { pos: Vec2::new(191.0, 100.0), kind: PlanetKind::Rocky }];
        let ship = Vec2::new(800.0, 600.0);
        let mut blocked = Enemy::new(Vec2::new(100.0, 100.0));
        let mut free = Enemy::new(Vec2::new(500.0, 400.0));
        let mut rng = rng();

        steer_enemy(&mut blocked, &planets, ship, 0, &mut rng);
        steer_enemy(&mut free, &planets, ship, 0, &mut rng);

        assert!(blocked.is_avoiding(0));
        assert!(!free.is_avoiding(0));
        assert_eq!(free.pos.x, 502.0);
    }

    #[test]
    fn ufo_stays_inside_the_field() {
        let mut ufo = Enemy::new(Vec2::new(FIELD_WIDTH - UFO_WIDTH - 1.0, 100.0));
        ufo.drift = Drift::Right;
        ufo.avoid_until = Some(500);
        steer_enemy(&mut ufo, &[], Vec2::new(0.0, 600.0), 0, &mut rng());
        assert_eq!(ufo.pos.x, FIELD_WIDTH - UFO_WIDTH);
    }

    #[test]
    fn explosions_expire_after_display_time() {
        let mut world = World::default();
        world.explosions.push(Explosion { pos: Vec2::default(), created_at: 0 });
        world.explosions.push(Explosion { pos: Vec2::default(), created_at: 100 });

        advance(&mut world, Vec2::default(), EXPLOSION_MS + 1, &mut rng());

        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.explosions[0].created_at, 100);
    }
}
