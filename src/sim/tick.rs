//! Per-frame simulation tick
//!
//! One call = one frame: consume the input snapshot, advance the simulation
//! if a level is in progress, resolve collisions and check for a finished
//! level or run.

use super::collision::resolve_collisions;
use super::patterns::PatternContext;
use super::progression::{MenuAction, apply_menu_action, on_boss_defeated, restart, toggle_pause};
use super::snapshot::RenderSnapshot;
use super::state::{GamePhase, GameState, HealPickup, MoveIntent, Projectile};
use crate::consts::*;
use rand::Rng;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Fire button held
    pub fire: bool,
    /// Super shot pressed this frame
    pub super_shot: bool,
    /// Pause toggle pressed this frame
    pub pause: bool,
    /// Restart pressed this frame
    pub restart: bool,
    /// Menu buttons activated this frame, in order
    pub actions: Vec<MenuAction>,
}

impl TickInput {
    /// Drop the edge-triggered parts once a tick has seen them
    pub fn clear_events(&mut self) {
        self.super_shot = false;
        self.pause = false;
        self.restart = false;
        self.actions.clear();
    }
}

/// Clamp a wall-clock delta to something the simulation can take in one step
pub fn clamp_frame_dt(wall_dt: f32) -> f32 {
    if wall_dt.is_nan() {
        return 0.0;
    }
    wall_dt.clamp(0.0, MAX_FRAME_DT)
}

/// Run one frame from a raw wall-clock delta and hand back what to draw
pub fn advance_frame(state: &mut GameState, input: &TickInput, wall_dt: f32) -> RenderSnapshot {
    tick(state, input, clamp_frame_dt(wall_dt));
    RenderSnapshot::capture(state)
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &action in &input.actions {
        apply_menu_action(state, action);
    }
    if input.pause {
        toggle_pause(state);
    }
    if input.restart {
        restart(state);
    }

    if !state.phase.is_simulating() {
        return;
    }

    let prev_elapsed = state.elapsed;
    state.elapsed += dt;
    state.time_ticks += 1;

    state.player.update(dt, &input.movement);
    state.boss.update(dt);

    if input.fire && state.player.can_shoot() {
        state.player.shoot();
        state.player_bullets.push(Projectile::player_shot(&state.player));
    }

    if input.super_shot && state.boss_alive() && state.player.can_super() {
        state.player.use_super();
        state.player_bullets.push(Projectile::super_shot(&state.player));
    }

    if state.boss_alive() {
        let ctx = PatternContext {
            boss_pos: state.boss.pos,
            player_pos: state.player.pos,
            t: state.elapsed,
            prev_t: prev_elapsed,
            level: state.level,
        };
        for pattern in &state.patterns {
            pattern.fire_if_due(&ctx, &mut state.rng, &mut state.enemy_bullets);
        }
    }

    state.heal_timer -= dt;
    if state.heal_timer <= 0.0 {
        state.heal_timer += state.settings.difficulty.heal_interval();
        let inset = HEAL_RADIUS + PLAYER_PAD;
        let x = state.rng.random_range(inset..=FIELD_WIDTH - inset);
        state.pickups.push(HealPickup::new(x));
        log::debug!("Heal pickup spawned at x={:.0}", x);
    }

    for bullet in &mut state.player_bullets {
        bullet.update(dt);
    }
    for bullet in &mut state.enemy_bullets {
        bullet.update(dt);
    }
    for pickup in &mut state.pickups {
        pickup.update(dt);
    }

    let report = resolve_collisions(state);
    if !report.is_empty() {
        log::debug!("Tick {}: {:?}", state.time_ticks, report);
    }

    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on level {} after {:.1}s",
            state.level,
            state.elapsed
        );
    } else if !state.boss_alive() {
        on_boss_defeated(state);
    }
}
