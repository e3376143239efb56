//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Time only enters through the `dt` passed to [`tick`]
//! - Randomness only comes from the session's seeded RNG
//! - Input arrives as one [`TickInput`] per frame

pub mod collision;
pub mod patterns;
pub mod progression;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use collision::{CollisionReport, circles_overlap, resolve_collisions};
pub use patterns::{AttackPattern, PatternContext, boundary_crossed, roll_patterns, sample_patterns};
pub use progression::{MenuAction, apply_menu_action, boss_max_hp, select_upgrade, start_run};
pub use snapshot::RenderSnapshot;
pub use state::{
    Boss, Faction, GamePhase, GameState, HealPickup, MoveIntent, Player, Projectile, ShotTier,
};
pub use tick::{TickInput, advance_frame, clamp_frame_dt, tick};
pub use upgrade::{UpgradeKind, roll_upgrade_offer};
