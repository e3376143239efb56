//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]. Entities never reference
//! each other; the tick reads their values and mutates them in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::patterns::AttackPattern;
use super::upgrade::UpgradeKind;
use crate::consts::*;
use crate::safe_normalize;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu
    Menu,
    /// Options screen (difficulty, colors)
    Options,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Boss beaten, waiting for an upgrade pick
    Upgrade,
    /// Player died
    GameOver,
    /// Final level cleared
    Win,
}

impl GamePhase {
    /// Only this phase advances entities, patterns and collisions
    pub fn is_simulating(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Precision movement
    pub slow: bool,
}

impl MoveIntent {
    /// Unit (or zero) direction from the held keys
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        safe_normalize(dir)
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Movement speed in px/s
    pub speed: f32,
    pub bullet_damage: u32,
    pub super_damage: u32,
    /// Seconds between super shots
    pub super_cooldown: f32,
    pub max_hp: u32,
    pub hp: u32,
    /// Time until the next standard shot
    pub shot_cd: f32,
    /// Time until the next super shot
    pub super_cd: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::spawn_pos(),
            speed: PLAYER_SPEED,
            bullet_damage: PLAYER_BULLET_DAMAGE,
            super_damage: SUPER_DAMAGE,
            super_cooldown: SUPER_COOLDOWN,
            max_hp: PLAYER_MAX_HP,
            hp: PLAYER_MAX_HP,
            shot_cd: 0.0,
            super_cd: 0.0,
        }
    }
}

impl Player {
    pub const RADIUS: f32 = PLAYER_RADIUS;

    fn spawn_pos() -> Vec2 {
        Vec2::new(FIELD_WIDTH * 0.5, FIELD_HEIGHT * 0.82)
    }

    /// Smallest and largest allowed coordinate on each axis
    pub fn bounds() -> (Vec2, Vec2) {
        let inset = PLAYER_RADIUS + PLAYER_PAD;
        (
            Vec2::splat(inset),
            Vec2::new(FIELD_WIDTH - inset, FIELD_HEIGHT - inset),
        )
    }

    /// Restore stats, HP, cooldowns and position (new run)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move back to the spawn point, keeping stats and HP (new level)
    pub fn reset_position(&mut self) {
        self.pos = Self::spawn_pos();
    }

    pub fn update(&mut self, dt: f32, intent: &MoveIntent) {
        let mut speed = self.speed;
        if intent.slow {
            speed *= PLAYER_SLOW_MULT;
        }

        self.pos += intent.direction() * speed * dt;

        let (lo, hi) = Self::bounds();
        self.pos = self.pos.clamp(lo, hi);

        self.shot_cd = (self.shot_cd - dt).max(0.0);
        self.super_cd = (self.super_cd - dt).max(0.0);
    }

    pub fn can_shoot(&self) -> bool {
        self.shot_cd <= 0.0
    }

    /// Start the shot cooldown. Callers check [`Player::can_shoot`] first.
    pub fn shoot(&mut self) {
        self.shot_cd = PLAYER_SHOT_COOLDOWN;
    }

    pub fn can_super(&self) -> bool {
        self.super_cd <= 0.0
    }

    /// Start the super cooldown. Callers check [`Player::can_super`] first.
    pub fn use_super(&mut self) {
        self.super_cd = self.super_cooldown;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// The boss, swaying left and right along a fixed line
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub pos: Vec2,
    /// Sway phase timer
    pub t: f32,
    pub base_x: f32,
}

impl Default for Boss {
    fn default() -> Self {
        let base_x = FIELD_WIDTH * 0.5;
        Self {
            pos: Vec2::new(base_x, FIELD_HEIGHT * 0.22),
            t: 0.0,
            base_x,
        }
    }
}

impl Boss {
    pub const RADIUS: f32 = BOSS_RADIUS;

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn update(&mut self, dt: f32) {
        self.t += dt;
        self.pos.x = self.base_x + (self.t * BOSS_SWAY_FREQUENCY).sin() * BOSS_SWAY_AMPLITUDE;
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Projectile weight class, used for collision size and color choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotTier {
    #[default]
    Standard,
    Super,
}

/// A bullet in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub faction: Faction,
    pub tier: ShotTier,
    pub damage: u32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, faction: Faction, damage: u32) -> Self {
        Self {
            pos,
            vel,
            radius,
            faction,
            tier: ShotTier::Standard,
            damage,
            dead: false,
        }
    }

    /// Standard shot fired from just above the player's nose
    pub fn player_shot(player: &Player) -> Self {
        Self::new(
            player.pos - Vec2::new(0.0, 12.0),
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            PLAYER_BULLET_RADIUS,
            Faction::Player,
            player.bullet_damage,
        )
    }

    /// Large, slow, heavy shot
    pub fn super_shot(player: &Player) -> Self {
        Self {
            tier: ShotTier::Super,
            ..Self::new(
                player.pos - Vec2::new(0.0, 18.0),
                Vec2::new(0.0, -SUPER_BULLET_SPEED),
                SUPER_BULLET_RADIUS,
                Faction::Player,
                player.super_damage,
            )
        }
    }

    /// Boss bullet. Damage is nominal: hits always cost [`ENEMY_HIT_DAMAGE`].
    pub fn enemy(pos: Vec2, vel: Vec2) -> Self {
        Self::new(pos, vel, ENEMY_BULLET_RADIUS, Faction::Enemy, 1)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if self.pos.x < -CULL_MARGIN_X
            || self.pos.x > FIELD_WIDTH + CULL_MARGIN_X
            || self.pos.y < -CULL_MARGIN_Y
            || self.pos.y > FIELD_HEIGHT + CULL_MARGIN_Y
        {
            self.dead = true;
        }
    }
}

/// A falling health pack
#[derive(Debug, Clone, PartialEq)]
pub struct HealPickup {
    pub pos: Vec2,
    pub fall_speed: f32,
    pub radius: f32,
    pub dead: bool,
}

impl HealPickup {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, HEAL_SPAWN_Y),
            fall_speed: HEAL_FALL_SPEED,
            radius: HEAL_RADIUS,
            dead: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.fall_speed * dt;
        if self.pos.y > FIELD_HEIGHT + CULL_MARGIN_Y {
            self.dead = true;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Drives pattern rolls, upgrade offers, rain spread and pickup spawns
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub boss_max_hp: u32,
    pub boss_hp: u32,
    /// Seconds since the current level started
    pub elapsed: f32,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Patterns the boss uses this level
    pub patterns: Vec<AttackPattern>,
    /// Seconds until the next heal pickup
    pub heal_timer: f32,
    pub player: Player,
    pub boss: Boss,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub pickups: Vec<HealPickup>,
    /// Offered upgrades while in [`GamePhase::Upgrade`]
    pub upgrade_choices: Vec<UpgradeKind>,
    /// Set once the menu's quit action fires
    pub quit_requested: bool,
}

impl GameState {
    /// Create a session sitting on the title menu
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed), settings)
    }

    /// Create a session around an explicit RNG
    pub fn with_rng(seed: u64, rng: Pcg32, settings: Settings) -> Self {
        let boss_max_hp = super::progression::boss_max_hp(settings.difficulty.base_boss_hp(), 1);
        let heal_timer = settings.difficulty.heal_interval();
        Self {
            seed,
            rng,
            settings,
            phase: GamePhase::Menu,
            level: 1,
            boss_max_hp,
            boss_hp: boss_max_hp,
            elapsed: 0.0,
            time_ticks: 0,
            patterns: Vec::new(),
            heal_timer,
            player: Player::default(),
            boss: Boss::default(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            pickups: Vec::new(),
            upgrade_choices: Vec::new(),
            quit_requested: false,
        }
    }

    pub fn boss_alive(&self) -> bool {
        self.boss_hp > 0
    }

    /// Drop every projectile and pickup
    pub fn clear_entities(&mut self) {
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.pickups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_not_faster() {
        let mut straight = Player::default();
        let mut diagonal = Player::default();
        let start = straight.pos;

        straight.update(0.05, &MoveIntent { right: true, ..Default::default() });
        diagonal.update(
            0.05,
            &MoveIntent { right: true, up: true, ..Default::default() },
        );

        let d1 = straight.pos.distance(start);
        let d2 = diagonal.pos.distance(start);
        assert!((d1 - d2).abs() < 1e-3);
    }

    #[test]
    fn test_session_keeps_seed() {
        let state = GameState::new(77, Settings::default());
        assert_eq!(state.seed, 77);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_slow_modifier() {
        let mut player = Player::default();
        let start = player.pos;
        player.update(0.05, &MoveIntent { left: true, slow: true, ..Default::default() });
        let moved = start.x - player.pos.x;
        assert!((moved - PLAYER_SPEED * PLAYER_SLOW_MULT * 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut player = Player::default();
        let start = player.pos;
        player.update(
            0.05,
            &MoveIntent { left: true, right: true, up: true, down: true, slow: false },
        );
        assert_eq!(player.pos, start);
        assert!(player.pos.is_finite());
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut player = Player::default();
        for _ in 0..200 {
            player.update(0.05, &MoveIntent { left: true, up: true, ..Default::default() });
        }
        let (lo, _) = Player::bounds();
        assert_eq!(player.pos, lo);
        assert_eq!(lo, Vec2::splat(16.0));
    }

    #[test]
    fn test_cooldowns_floor_at_zero() {
        let mut player = Player::default();
        player.shoot();
        player.use_super();
        assert!(!player.can_shoot());
        assert!(!player.can_super());

        player.update(0.05, &MoveIntent::default());
        player.update(0.05, &MoveIntent::default());
        assert!(player.can_shoot());
        assert_eq!(player.shot_cd, 0.0);
        assert!(!player.can_super());

        for _ in 0..100 {
            player.update(0.05, &MoveIntent::default());
        }
        assert_eq!(player.super_cd, 0.0);
    }

    #[test]
    fn test_heal_and_damage_clamp() {
        let mut player = Player::default();
        player.take_damage(100);
        assert_eq!(player.hp, 0);
        assert!(player.is_dead());
        player.heal(1000);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn test_boss_follows_sine_law() {
        let mut boss = Boss::default();
        for _ in 0..37 {
            boss.update(1.0 / 60.0);
        }
        let expected = boss.base_x + (boss.t * 0.9).sin() * 220.0;
        assert!((boss.pos.x - expected).abs() < 1e-3);
        assert_eq!(boss.pos.y, FIELD_HEIGHT * 0.22);
    }

    #[test]
    fn test_projectile_culled_outside_margin() {
        let mut bullet = Projectile::enemy(Vec2::new(400.0, FIELD_HEIGHT + 50.0), Vec2::new(0.0, 100.0));
        bullet.update(0.05);
        assert!(!bullet.dead, "still inside the 60px margin");
        bullet.update(0.1);
        assert!(bullet.dead);

        let mut side = Projectile::enemy(Vec2::new(-35.0, 300.0), Vec2::new(-200.0, 0.0));
        side.update(0.05);
        assert!(side.dead);
    }

    #[test]
    fn test_super_shot_uses_player_stats() {
        let mut player = Player::default();
        player.super_damage = 35;
        let shot = Projectile::super_shot(&player);
        assert_eq!(shot.damage, 35);
        assert_eq!(shot.tier, ShotTier::Super);
        assert_eq!(shot.faction, Faction::Player);
        assert_eq!(shot.radius, SUPER_BULLET_RADIUS);
    }

    #[test]
    fn test_pickup_falls_off_screen() {
        let mut pickup = HealPickup::new(100.0);
        let mut ticks = 0;
        while !pickup.dead {
            pickup.update(0.05);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert!(pickup.pos.y > FIELD_HEIGHT + CULL_MARGIN_Y);
    }
}
