//! Run and level progression
//!
//! Phase transitions and their side effects: starting a run, clearing a
//! level, picking an upgrade, and the menu/options screens.

use serde::{Deserialize, Serialize};

use super::patterns::{AttackPattern, roll_patterns};
use super::state::{GamePhase, GameState};
use super::upgrade::roll_upgrade_offer;
use crate::consts::BOSS_HP_GROWTH;
use crate::settings::Difficulty;

/// Discrete actions produced by menu buttons or their hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Play,
    Options,
    Quit,
    Back,
    ColorPrev,
    ColorNext,
    SelectDifficulty(Difficulty),
    /// Pick the n-th offered upgrade (0-based)
    SelectUpgrade(usize),
}

/// Boss max HP for `level`: `round(base * 1.35^(level-1))`
pub fn boss_max_hp(base: u32, level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (base as f64 * BOSS_HP_GROWTH.powi(exponent)).round() as u32
}

fn pattern_names(patterns: &[AttackPattern]) -> Vec<&'static str> {
    patterns.iter().map(AttackPattern::name).collect()
}

/// Fresh run at level 1 with reset player stats
pub fn start_run(state: &mut GameState) {
    state.player.reset();
    state.level = 1;
    enter_level(state);
    log::info!(
        "Run started (difficulty {}, boss HP {}, patterns {:?})",
        state.settings.difficulty,
        state.boss_max_hp,
        pattern_names(&state.patterns)
    );
}

/// Shared level setup for run start and level advance
fn enter_level(state: &mut GameState) {
    state.boss.reset();
    state.player.reset_position();
    state.boss_max_hp = boss_max_hp(state.settings.difficulty.base_boss_hp(), state.level);
    state.boss_hp = state.boss_max_hp;
    state.clear_entities();
    state.elapsed = 0.0;
    state.heal_timer = state.settings.difficulty.heal_interval();
    state.patterns = roll_patterns(state.level, &mut state.rng);
    state.upgrade_choices.clear();
    state.phase = GamePhase::Playing;
}

/// Boss HP hit zero: stop the level and offer upgrades (or end the run)
pub fn on_boss_defeated(state: &mut GameState) {
    state.enemy_bullets.clear();
    state.pickups.clear();

    if state.settings.is_final_level(state.level) {
        state.phase = GamePhase::Win;
        log::info!("Final level {} cleared, run won", state.level);
        return;
    }

    state.upgrade_choices = roll_upgrade_offer(&mut state.rng);
    state.phase = GamePhase::Upgrade;
    log::info!(
        "Level {} cleared, offering {:?}",
        state.level,
        state.upgrade_choices
    );
}

/// Apply the chosen upgrade and start the next level.
/// Returns false (and changes nothing) for an index outside the offer.
pub fn select_upgrade(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::Upgrade {
        return false;
    }
    let Some(&upgrade) = state.upgrade_choices.get(index) else {
        log::warn!(
            "Ignoring upgrade choice {} ({} offered)",
            index,
            state.upgrade_choices.len()
        );
        return false;
    };

    upgrade.apply(&mut state.player);
    state.level += 1;
    enter_level(state);
    log::info!(
        "Picked {}, entering level {} (boss HP {}, patterns {:?})",
        upgrade.label(),
        state.level,
        state.boss_max_hp,
        pattern_names(&state.patterns)
    );
    true
}

/// Route a menu action according to the current phase. Actions that make no
/// sense in the current phase are ignored.
pub fn apply_menu_action(state: &mut GameState, action: MenuAction) {
    match (state.phase, action) {
        (GamePhase::Menu, MenuAction::Play) => start_run(state),
        (GamePhase::Menu, MenuAction::Options) => state.phase = GamePhase::Options,
        (GamePhase::Menu, MenuAction::Quit) => {
            log::info!("Quit requested");
            state.quit_requested = true;
        }
        (GamePhase::Options, MenuAction::Back) => state.phase = GamePhase::Menu,
        (GamePhase::Options, MenuAction::ColorPrev) => state.settings.prev_player_color(),
        (GamePhase::Options, MenuAction::ColorNext) => state.settings.next_player_color(),
        (GamePhase::Options, MenuAction::SelectDifficulty(difficulty)) => {
            state.settings.difficulty = difficulty;
            log::info!("Difficulty set to {}", difficulty);
        }
        (GamePhase::Upgrade, MenuAction::SelectUpgrade(index)) => {
            select_upgrade(state, index);
        }
        (phase, action) => log::debug!("Ignoring {:?} in {:?}", action, phase),
    }
}

/// Toggle between playing and paused; other phases ignore it
pub fn toggle_pause(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Playing => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Playing,
        other => other,
    };
}

/// Restart after a finished run
pub fn restart(state: &mut GameState) {
    if matches!(state.phase, GamePhase::GameOver | GamePhase::Win) {
        start_run(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PALETTE_LEN;
    use crate::settings::Settings;
    use crate::sim::state::Projectile;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(42, Settings::default());
        apply_menu_action(&mut state, MenuAction::Play);
        state
    }

    #[test]
    fn test_boss_hp_growth() {
        assert_eq!(boss_max_hp(100, 1), 100);
        assert_eq!(boss_max_hp(100, 2), 135);
        assert_eq!(boss_max_hp(100, 3), 182);
        assert_eq!(boss_max_hp(100, 4), 246);
        assert_eq!(boss_max_hp(70, 1), 70);
    }

    #[test]
    fn test_menu_flow() {
        let mut state = GameState::new(1, Settings::default());
        assert_eq!(state.phase, GamePhase::Menu);

        apply_menu_action(&mut state, MenuAction::Options);
        assert_eq!(state.phase, GamePhase::Options);

        apply_menu_action(&mut state, MenuAction::SelectDifficulty(Difficulty::Hard));
        apply_menu_action(&mut state, MenuAction::ColorPrev);
        assert_eq!(state.settings.difficulty, Difficulty::Hard);
        assert_eq!(state.settings.player_color, PALETTE_LEN - 1);

        // Play is not an options-screen action
        apply_menu_action(&mut state, MenuAction::Play);
        assert_eq!(state.phase, GamePhase::Options);

        apply_menu_action(&mut state, MenuAction::Back);
        apply_menu_action(&mut state, MenuAction::Play);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.boss_max_hp, 150);
        assert_eq!(state.patterns.len(), 1);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut state = GameState::new(1, Settings::default());
        apply_menu_action(&mut state, MenuAction::Quit);
        assert!(state.quit_requested);
    }

    #[test]
    fn test_boss_defeat_offers_upgrades() {
        let mut state = playing();
        state.player_bullets.push(Projectile::player_shot(&state.player));
        state
            .enemy_bullets
            .push(Projectile::enemy(Vec2::new(10.0, 10.0), Vec2::ZERO));

        on_boss_defeated(&mut state);
        assert_eq!(state.phase, GamePhase::Upgrade);
        assert_eq!(state.upgrade_choices.len(), 3);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_final_level_wins() {
        let mut state = GameState::new(
            3,
            Settings {
                final_level: Some(1),
                ..Settings::default()
            },
        );
        apply_menu_action(&mut state, MenuAction::Play);
        on_boss_defeated(&mut state);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.upgrade_choices.is_empty());

        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_select_upgrade_advances_level() {
        let mut state = playing();
        state.player.hp = 9;
        state.player.pos = Vec2::new(30.0, 30.0);
        state.elapsed = 12.0;
        on_boss_defeated(&mut state);
        let pick = state.upgrade_choices[1];

        assert!(select_upgrade(&mut state, 1));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.boss_max_hp, 135);
        assert_eq!(state.boss_hp, 135);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.patterns.len(), 2);
        assert!(state.player_bullets.is_empty());
        assert!(state.upgrade_choices.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 492.0));
        let expected_hp = if pick == crate::sim::UpgradeKind::MaxHealth { 14 } else { 9 };
        assert_eq!(state.player.hp, expected_hp);
    }

    #[test]
    fn test_invalid_upgrade_index_is_noop() {
        let mut state = playing();
        on_boss_defeated(&mut state);
        let before = state.clone();

        assert!(!select_upgrade(&mut state, 3));
        apply_menu_action(&mut state, MenuAction::SelectUpgrade(99));
        assert_eq!(state.phase, GamePhase::Upgrade);
        assert_eq!(state.level, before.level);
        assert_eq!(state.player, before.player);
        assert_eq!(state.upgrade_choices, before.upgrade_choices);
    }

    #[test]
    fn test_pause_toggle_only_while_running() {
        let mut state = playing();
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Paused);
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_ignored_mid_run() {
        let mut state = playing();
        state.level = 3;
        restart(&mut state);
        assert_eq!(state.level, 3);
    }
}
