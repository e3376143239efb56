//! Collision detection and damage resolution
//!
//! Everything collides as circles. Passes run in a fixed order and each list
//! is compacted right after its pass, so nothing is resolved twice.

use glam::Vec2;

use super::state::{Boss, GameState, Player};
use crate::consts::{ENEMY_HIT_DAMAGE, HEAL_AMOUNT};
use crate::dist2;

/// What the resolver did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// HP removed from the boss
    pub boss_damage: u32,
    /// Enemy bullets that struck the player
    pub player_hits: u32,
    /// HP restored by pickups (after capping)
    pub healed: u32,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Closed-boundary circle test: touching counts as a hit
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    dist2(a, b) <= reach * reach
}

/// Player bullets vs boss, enemy bullets vs player, pickups vs player
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    let boss_pos = state.boss.pos;
    for bullet in state.player_bullets.iter_mut().filter(|b| !b.dead) {
        if circles_overlap(bullet.pos, bullet.radius, boss_pos, Boss::RADIUS) {
            bullet.dead = true;
            let before = state.boss_hp;
            state.boss_hp = state.boss_hp.saturating_sub(bullet.damage);
            report.boss_damage += before - state.boss_hp;
        }
    }
    state.player_bullets.retain(|b| !b.dead);

    let player = &mut state.player;
    for bullet in state.enemy_bullets.iter_mut().filter(|b| !b.dead) {
        if circles_overlap(bullet.pos, bullet.radius, player.pos, Player::RADIUS) {
            bullet.dead = true;
            player.take_damage(ENEMY_HIT_DAMAGE);
            report.player_hits += 1;
        }
    }
    state.enemy_bullets.retain(|b| !b.dead);

    for pickup in state.pickups.iter_mut().filter(|p| !p.dead) {
        if circles_overlap(pickup.pos, pickup.radius, player.pos, Player::RADIUS) {
            pickup.dead = true;
            let before = player.hp;
            player.heal(HEAL_AMOUNT);
            report.healed += player.hp - before;
        }
    }
    state.pickups.retain(|p| !p.dead);

    report
}
