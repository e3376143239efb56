//! Bullet Hell - a single-screen boss-rush arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, attack patterns, collisions, progression)
//! - `settings`: Player-facing options (difficulty, palette choices)
//!
//! Drawing, audio and window handling live outside this crate. The core takes
//! a [`sim::TickInput`] and a time delta per frame and hands back a
//! [`sim::RenderSnapshot`].

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest time step a single tick may consume (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;
    /// Nominal frame step used by the headless runner
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (screen space, +y points down)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 280.0;
    pub const PLAYER_SLOW_MULT: f32 = 0.45;
    pub const PLAYER_RADIUS: f32 = 10.0;
    /// Extra gap kept between the player hull and the playfield edge
    pub const PLAYER_PAD: f32 = 6.0;
    pub const PLAYER_MAX_HP: u32 = 20;
    pub const PLAYER_SHOT_COOLDOWN: f32 = 0.09;

    /// Player projectiles
    pub const PLAYER_BULLET_SPEED: f32 = 520.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 4.0;
    pub const PLAYER_BULLET_DAMAGE: u32 = 1;
    pub const SUPER_BULLET_SPEED: f32 = 420.0;
    pub const SUPER_BULLET_RADIUS: f32 = 18.0;
    pub const SUPER_DAMAGE: u32 = 20;
    pub const SUPER_COOLDOWN: f32 = 3.0;

    /// Boss
    pub const BOSS_RADIUS: f32 = 18.0;
    pub const BOSS_SWAY_AMPLITUDE: f32 = 220.0;
    pub const BOSS_SWAY_FREQUENCY: f32 = 0.9;
    /// Boss max HP multiplier applied per cleared level
    pub const BOSS_HP_GROWTH: f64 = 1.35;

    /// Boss projectiles
    pub const ENEMY_BULLET_SPEED: f32 = 220.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 5.0;
    /// Enemy hits always cost the player exactly this much HP
    pub const ENEMY_HIT_DAMAGE: u32 = 1;

    /// Projectiles are culled once this far outside the playfield
    pub const CULL_MARGIN_X: f32 = 40.0;
    pub const CULL_MARGIN_Y: f32 = 60.0;

    /// Heal pickups
    pub const HEAL_RADIUS: f32 = 10.0;
    pub const HEAL_FALL_SPEED: f32 = 90.0;
    pub const HEAL_AMOUNT: u32 = 5;
    pub const HEAL_SPAWN_Y: f32 = -20.0;

    /// Number of upgrades offered after each cleared level
    pub const UPGRADE_CHOICES: usize = 3;
    /// Number of selectable entries in the renderer's color palette
    pub const PALETTE_LEN: usize = 8;
}

/// Magnitudes below this are treated as zero when normalizing
pub const NORMALIZE_EPSILON: f32 = 1e-3;

/// Normalize `v`, or return zero when it is too short to have a direction
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > NORMALIZE_EPSILON {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Squared distance between two points
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Velocity vector with the given heading (radians) and speed
#[inline]
pub fn velocity_at(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}
