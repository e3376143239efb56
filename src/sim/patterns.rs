//! Boss attack patterns
//!
//! Each pattern is a time-gated emitter: once per crossed period boundary it
//! appends bullets to the enemy list. Periods shrink and bullet counts and
//! speeds grow with the level number.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Projectile;
use crate::consts::ENEMY_BULLET_SPEED;
use crate::{safe_normalize, velocity_at};

/// Angular offsets of the aimed spread, relative to the aim line
const AIMED_SPREAD: [f32; 3] = [-0.20, 0.0, 0.20];
/// Half-width of the rain cone around straight down
const RAIN_CONE: f32 = 0.55;

/// Inputs every pattern reads
#[derive(Debug, Clone, Copy)]
pub struct PatternContext {
    pub boss_pos: Vec2,
    pub player_pos: Vec2,
    /// Seconds since the level started, after this tick's step
    pub t: f32,
    /// Same clock before this tick's step
    pub prev_t: f32,
    pub level: u32,
}

/// The boss's attack repertoire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Full circle of bullets, rotated a little each time
    RingBurst,
    /// Three-bullet fan aimed at the player
    AimedSpread,
    /// Single rotating stream
    SpiralStream,
    /// A few bullets falling in a cone below the boss
    DownwardRain,
}

impl AttackPattern {
    pub const POOL: [AttackPattern; 4] = [
        AttackPattern::RingBurst,
        AttackPattern::AimedSpread,
        AttackPattern::SpiralStream,
        AttackPattern::DownwardRain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttackPattern::RingBurst => "Ring Burst",
            AttackPattern::AimedSpread => "Aimed Spread",
            AttackPattern::SpiralStream => "Spiral Stream",
            AttackPattern::DownwardRain => "Downward Rain",
        }
    }

    /// Seconds between emissions at `level`
    pub fn period(&self, level: u32) -> f32 {
        let steps = level_steps(level);
        match self {
            AttackPattern::RingBurst => (1.25 - 0.05 * steps).max(0.95),
            AttackPattern::AimedSpread => (0.42 - 0.02 * steps).max(0.22),
            AttackPattern::SpiralStream => (0.12 - 0.005 * steps).max(0.05),
            AttackPattern::DownwardRain => (0.30 - 0.02 * steps).max(0.10),
        }
    }

    /// Emit if a period boundary was crossed this tick. Returns whether it fired.
    pub fn fire_if_due<R: Rng + ?Sized>(
        &self,
        ctx: &PatternContext,
        rng: &mut R,
        out: &mut Vec<Projectile>,
    ) -> bool {
        if !boundary_crossed(ctx.prev_t, ctx.t, self.period(ctx.level)) {
            return false;
        }
        self.emit(ctx, rng, out);
        true
    }

    /// Append this pattern's bullets unconditionally
    pub fn emit<R: Rng + ?Sized>(
        &self,
        ctx: &PatternContext,
        rng: &mut R,
        out: &mut Vec<Projectile>,
    ) {
        let origin = ctx.boss_pos;
        let speed = ENEMY_BULLET_SPEED * speed_scale(ctx.level);

        match self {
            AttackPattern::RingBurst => {
                let n = ring_bullet_count(ctx.level);
                let base = ctx.t * 1.6;
                for i in 0..n {
                    let angle = base + (i as f32 / n as f32) * TAU;
                    out.push(Projectile::enemy(origin, velocity_at(angle, speed)));
                }
            }
            AttackPattern::AimedSpread => {
                let aim = safe_normalize(ctx.player_pos - origin);
                // Zero aim degenerates to angle 0 rather than NaN
                let aim_angle = aim.y.atan2(aim.x);
                for offset in AIMED_SPREAD {
                    out.push(Projectile::enemy(
                        origin,
                        velocity_at(aim_angle + offset, speed * 1.10),
                    ));
                }
            }
            AttackPattern::SpiralStream => {
                let angle = ctx.t * (2.2 + 0.12 * ctx.level as f32);
                out.push(Projectile::enemy(origin, velocity_at(angle, speed)));
            }
            AttackPattern::DownwardRain => {
                for _ in 0..rain_bullet_count(ctx.level) {
                    let angle = FRAC_PI_2 + rng.random_range(-RAIN_CONE..=RAIN_CONE);
                    out.push(Projectile::enemy(origin, velocity_at(angle, speed * 0.9)));
                }
            }
        }
    }
}

/// Edge-triggered timer test: true when `(prev_t, t]` crosses a multiple of
/// `period`. A boundary is reported at most once however large the step is.
/// Chained calls with `prev_t` equal to the last `t` report every boundary
/// exactly once.
pub fn boundary_crossed(prev_t: f32, t: f32, period: f32) -> bool {
    if period <= 0.0 || t <= prev_t {
        return false;
    }
    (t / period).floor() != (prev_t / period).floor()
}

fn level_steps(level: u32) -> f32 {
    level.saturating_sub(1) as f32
}

/// Bullet speed multiplier, +3% per level past the first
pub fn speed_scale(level: u32) -> f32 {
    1.0 + 0.03 * level_steps(level)
}

pub fn ring_bullet_count(level: u32) -> usize {
    (24 + 2 * level.saturating_sub(1) as usize).clamp(18, 44)
}

pub fn rain_bullet_count(level: u32) -> usize {
    (1 + level.saturating_sub(1) as usize / 2).clamp(1, 4)
}

/// How many patterns the boss runs at `level`
pub fn pattern_count(level: u32) -> usize {
    (1 + level as usize / 2).clamp(1, AttackPattern::POOL.len())
}

/// Draw `count` distinct patterns; `count` is clamped to the pool size
pub fn sample_patterns<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<AttackPattern> {
    let pool = &AttackPattern::POOL;
    let count = count.min(pool.len());
    rand::seq::index::sample(rng, pool.len(), count)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

/// Pattern set for a freshly started level
pub fn roll_patterns<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<AttackPattern> {
    sample_patterns(pattern_count(level), rng)
}
