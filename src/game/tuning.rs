// Gameplay tuning. World units are pixels of a 900x750 playfield.

pub const FIELD_WIDTH: f32 = 900.0;
pub const FIELD_HEIGHT: f32 = 750.0;

// Ship
pub const SHIP_WIDTH: f32 = 85.0;
pub const SHIP_HEIGHT: f32 = 110.0;
pub const SHIP_SPEED: f32 = 5.0;
pub const SHIP_START_Y_OFFSET: f32 = 150.0;
pub const START_LIVES: u32 = 3;

// Bullets
pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 20.0;
pub const BULLET_SPEED: f32 = 10.0;
pub const BULLET_MUZZLE_X: f32 = 40.0;
pub const BULLET_MIN_Y: f32 = -20.0;
pub const MAX_BULLETS: usize = 7;

// UFOs
pub const UFO_WIDTH: f32 = 90.0;
pub const UFO_HEIGHT: f32 = 60.0;
pub const UFO_SPAWN_TICKS: u32 = 120;
pub const UFO_SPAWN_X_MIN: f32 = 60.0;
pub const UFO_SPAWN_X_MAX: f32 = FIELD_WIDTH - 100.0;
pub const UFO_SPAWN_Y: f32 = -80.0;
pub const UFO_FALL_SPEED: f32 = 2.0;
pub const UFO_CHASE_SPEED: f32 = 2.0;
pub const UFO_DEADBAND: f32 = 15.0;
pub const UFO_EASE: f32 = 0.2;
pub const UFO_DODGE_SPEED: f32 = 3.0;
pub const UFO_AVOID_MS: u64 = 300;
pub const KILL_REWARD: u32 = 20;

// Planets
pub const PLANET_FALL_SPEED: f32 = 2.0;
pub const PLANET_SPAWN_X_MIN: f32 = 60.0;
pub const PLANET_SPAWN_X_MAX: f32 = FIELD_WIDTH - 200.0;
pub const PLANET_SPAWN_Y_MIN: f32 = -260.0;
pub const PLANET_SPAWN_Y_MAX: f32 = -200.0;
pub const PLANET_INTERVAL_MIN: u64 = 900;
pub const PLANET_INTERVAL_MAX: u64 = 1600;
pub const PLANET_WINDOW: u64 = 5;
pub const PLANET_PLACEMENT_ATTEMPTS: usize = 25;
pub const PLANET_CLEARANCE: f32 = 100.0;
pub const PLANET_DESPAWN_MARGIN: f32 = 200.0;

// Meteors
pub const METEOR_SIZE: f32 = 80.0;
pub const METEOR_SPAWN_TICKS: u32 = 240;
pub const METEOR_SPAWN_X: f32 = FIELD_WIDTH + 50.0;
pub const METEOR_SPAWN_Y: f32 = -50.0;
pub const METEOR_DX: f32 = -3.0;
pub const METEOR_DY: f32 = 4.0;
pub const METEOR_DESPAWN_MARGIN: f32 = 200.0;

// Effects
pub const EXPLOSION_SIZE: f32 = 80.0;
pub const EXPLOSION_MS: u64 = 220;
pub const WRECK_SIZE: f32 = 150.0;
pub const WRECK_OFFSET: f32 = 30.0;

// Life loss
pub const BLACKOUT_MS: u64 = 1200;
pub const INVINCIBLE_MS: u64 = 1500;
pub const BLINK_MS: u64 = 150;

// Travel; the background scrolls by the same amount.
pub const DISTANCE_PER_TICK: u64 = 2;
