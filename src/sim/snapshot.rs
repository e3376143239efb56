//! Read-only view of a session for the renderer and HUD

use glam::Vec2;
use serde::Serialize;

use super::state::{Faction, GamePhase, GameState, ShotTier};
use super::upgrade::UpgradeKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub color: usize,
    pub hp: u32,
    pub max_hp: u32,
    pub super_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub color: usize,
    pub hp: u32,
    pub max_hp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub faction: Faction,
    pub tier: ShotTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    pub kind: UpgradeKind,
    pub label: &'static str,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub player: PlayerView,
    pub boss: BossView,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<Vec2>,
    /// Empty outside the upgrade screen
    pub upgrade_choices: Vec<UpgradeView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let projectiles = state
            .player_bullets
            .iter()
            .chain(&state.enemy_bullets)
            .filter(|b| !b.dead)
            .map(|b| ProjectileView {
                pos: b.pos,
                radius: b.radius,
                faction: b.faction,
                tier: b.tier,
            })
            .collect();

        let upgrade_choices = if state.phase == GamePhase::Upgrade {
            state
                .upgrade_choices
                .iter()
                .map(|&kind| UpgradeView {
                    kind,
                    label: kind.label(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase,
            level: state.level,
            player: PlayerView {
                pos: state.player.pos,
                color: state.settings.player_color,
                hp: state.player.hp,
                max_hp: state.player.max_hp,
                super_ready: state.player.can_super(),
            },
            boss: BossView {
                pos: state.boss.pos,
                color: state.settings.boss_color,
                hp: state.boss_hp,
                max_hp: state.boss_max_hp,
            },
            projectiles,
            pickups: state
                .pickups
                .iter()
                .filter(|p| !p.dead)
                .map(|p| p.pos)
                .collect(),
            upgrade_choices,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::progression::{MenuAction, apply_menu_action, on_boss_defeated};
    use crate::sim::state::Projectile;

    #[test]
    fn test_capture_lists_both_factions() {
        let mut state = GameState::new(1, Settings::default());
        apply_menu_action(&mut state, MenuAction::Play);
        state.player_bullets.push(Projectile::super_shot(&state.player));
        state
            .enemy_bullets
            .push(Projectile::enemy(Vec2::new(50.0, 50.0), Vec2::ZERO));

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.projectiles.len(), 2);
        assert_eq!(snap.projectiles[0].tier, ShotTier::Super);
        assert_eq!(snap.projectiles[1].faction, Faction::Enemy);
        assert!(snap.upgrade_choices.is_empty());
        assert!(snap.player.super_ready);
    }

    #[test]
    fn test_upgrade_labels_exposed() {
        let mut state = GameState::new(2, Settings::default());
        apply_menu_action(&mut state, MenuAction::Play);
        on_boss_defeated(&mut state);

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::Upgrade);
        assert_eq!(snap.upgrade_choices.len(), 3);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"phase\":\"Upgrade\""));
        assert!(json.contains(snap.upgrade_choices[0].label));
    }
}
