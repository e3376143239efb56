//! Between-level upgrades
//!
//! After each boss kill the player picks one of three permanent stat boosts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::UPGRADE_CHOICES;

pub const SPEED_BONUS: f32 = 30.0;
pub const BULLET_DAMAGE_BONUS: u32 = 1;
pub const SUPER_DAMAGE_BONUS: u32 = 10;
/// Super cooldown multiplier per pick
pub const SUPER_COOLDOWN_FACTOR: f32 = 0.85;
/// Super cooldown never drops below this
pub const MIN_SUPER_COOLDOWN: f32 = 0.75;
pub const MAX_HEALTH_BONUS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Speed,
    BulletDamage,
    SuperDamage,
    SuperCooldown,
    MaxHealth,
}

impl UpgradeKind {
    pub const POOL: [UpgradeKind; 5] = [
        UpgradeKind::Speed,
        UpgradeKind::BulletDamage,
        UpgradeKind::SuperDamage,
        UpgradeKind::SuperCooldown,
        UpgradeKind::MaxHealth,
    ];

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "Speed",
            UpgradeKind::BulletDamage => "Bullet Damage",
            UpgradeKind::SuperDamage => "Super Damage",
            UpgradeKind::SuperCooldown => "Super Cooldown",
            UpgradeKind::MaxHealth => "Max Health",
        }
    }

    pub fn apply(&self, player: &mut Player) {
        match self {
            UpgradeKind::Speed => player.speed += SPEED_BONUS,
            UpgradeKind::BulletDamage => player.bullet_damage += BULLET_DAMAGE_BONUS,
            UpgradeKind::SuperDamage => player.super_damage += SUPER_DAMAGE_BONUS,
            UpgradeKind::SuperCooldown => {
                player.super_cooldown =
                    (player.super_cooldown * SUPER_COOLDOWN_FACTOR).max(MIN_SUPER_COOLDOWN);
                player.super_cd = player.super_cd.min(player.super_cooldown);
            }
            UpgradeKind::MaxHealth => {
                player.max_hp += MAX_HEALTH_BONUS;
                player.heal(MAX_HEALTH_BONUS);
            }
        }
    }
}

/// Draw the three distinct upgrades offered after a level clear
pub fn roll_upgrade_offer<R: Rng + ?Sized>(rng: &mut R) -> Vec<UpgradeKind> {
    let pool = &UpgradeKind::POOL;
    rand::seq::index::sample(rng, pool.len(), UPGRADE_CHOICES.min(pool.len()))
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_offer_is_three_distinct() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let offer = roll_upgrade_offer(&mut rng);
            assert_eq!(offer.len(), 3);
            let unique: HashSet<_> = offer.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_max_health_raises_both() {
        let mut player = Player::default();
        player.hp = 12;
        UpgradeKind::MaxHealth.apply(&mut player);
        assert_eq!(player.max_hp, 25);
        assert_eq!(player.hp, 17);

        let mut full = Player::default();
        UpgradeKind::MaxHealth.apply(&mut full);
        assert_eq!(full.hp, full.max_hp);
    }

    #[test]
    fn test_super_cooldown_floor() {
        let mut player = Player::default();
        for _ in 0..30 {
            UpgradeKind::SuperCooldown.apply(&mut player);
        }
        assert_eq!(player.super_cooldown, MIN_SUPER_COOLDOWN);
    }

    #[test]
    fn test_damage_and_speed_bonuses() {
        let mut player = Player::default();
        UpgradeKind::BulletDamage.apply(&mut player);
        UpgradeKind::SuperDamage.apply(&mut player);
        UpgradeKind::Speed.apply(&mut player);
        assert_eq!(player.bullet_damage, 2);
        assert_eq!(player.super_damage, 30);
        assert_eq!(player.speed, 310.0);
    }
}
