//! Pure stat-derivation formulas.
//!
//! Everything here is a deterministic function of (attribute totals,
//! equipment levels, passive-track levels, monster level). No state, no
//! side effects; all formulas tolerate level 0 (identity multiplier, zero
//! additive bonus).

use crate::attributes::{AttributeType, Attributes};
use crate::constants::*;
use crate::equipment::{Equipment, EquipmentId};
use crate::passives::PassiveTracks;

/// Milestone bonus: one step per full 10 points of the driving attribute.
fn milestone(total: f64) -> f64 {
    (total / 10.0).floor()
}

/// Unrounded final attack. Rewards the STR milestone and tracks monster HP
/// growth through the level term.
fn final_attack_raw(base_atk: f64, total_str: f64, equipment: &Equipment, monster_level: u32) -> f64 {
    let sword = equipment.level(EquipmentId::VoidBlade) as f64;
    base_atk
        * (1.0 + 0.10 * sword)
        * (1.0 + 0.05 * milestone(total_str))
        * (1.0 + 0.02 * monster_level as f64)
}

/// `base_atk * (1 + 0.10*sword) * (1 + 0.05*floor(str/10)) * (1 + 0.02*level)`,
/// rounded to nearest.
pub fn final_attack(base_atk: f64, total_str: f64, equipment: &Equipment, monster_level: u32) -> u32 {
    final_attack_raw(base_atk, total_str, equipment, monster_level).round() as u32
}

/// `(1 + 0.03*bow) * (1 + 0.03*floor(agi/10))`.
pub fn attack_speed_multiplier(equipment: &Equipment, total_agi: f64) -> f64 {
    let bow = equipment.level(EquipmentId::WindBow) as f64;
    (1.0 + 0.03 * bow) * (1.0 + 0.03 * milestone(total_agi))
}

/// Flat crit-rate percentage points: `2 * eye`. Additive, no milestone.
pub fn crit_rate_bonus(equipment: &Equipment) -> f64 {
    2.0 * equipment.level(EquipmentId::HawkeyeEye) as f64
}

/// `(1 + 0.10*fang) * (1 + 0.05*floor(dex/10))`.
pub fn crit_damage_multiplier(equipment: &Equipment, total_dex: f64) -> f64 {
    let fang = equipment.level(EquipmentId::DragonFang) as f64;
    (1.0 + 0.10 * fang) * (1.0 + 0.05 * milestone(total_dex))
}

/// `(1 + 0.05*ring) * (1 + 0.10*floor(luk/10))`. Intentionally uncapped.
pub fn mana_multiplier(equipment: &Equipment, total_luk: f64) -> f64 {
    let ring = equipment.level(EquipmentId::EssenceRing) as f64;
    (1.0 + 0.05 * ring) * (1.0 + 0.10 * milestone(total_luk))
}

/// `1 + 0.15*clock`.
pub fn time_dilation(equipment: &Equipment) -> f64 {
    1.0 + 0.15 * equipment.level(EquipmentId::AeonClock) as f64
}

/// Battle-timer ceiling for an encounter at `level`.
pub fn max_battle_time(level: u32, equipment: &Equipment) -> f64 {
    let base = (BATTLE_TIME_BASE + level as f64 * BATTLE_TIME_PER_LEVEL).min(BATTLE_TIME_SOFT_CAP);
    (base * time_dilation(equipment)).min(BATTLE_TIME_HARD_CAP)
}

/// Combined mana multiplier including the mana passive track and the luck
/// track's effective-LUK contribution to the milestone.
fn total_mana_mult(equipment: &Equipment, total_luk: f64, passives: &PassiveTracks) -> f64 {
    mana_multiplier(equipment, total_luk + passives.bonus_luk()) * passives.mana_mult()
}

/// Mana granted per landed hit: `round((1 + 0.5*level) * mana multipliers)`.
pub fn mana_per_hit(
    monster_level: u32,
    equipment: &Equipment,
    total_luk: f64,
    passives: &PassiveTracks,
) -> u64 {
    let base = 1.0 + HIT_MANA_PER_LEVEL * monster_level as f64;
    (base * total_mana_mult(equipment, total_luk, passives)).round() as u64
}

/// Mana granted on a kill: `round(20 * 1.2^(level-1) * mana multipliers)`.
pub fn mana_on_kill(
    monster_level: u32,
    equipment: &Equipment,
    total_luk: f64,
    passives: &PassiveTracks,
) -> u64 {
    let base = KILL_REWARD_BASE * KILL_REWARD_GROWTH.powi(monster_level as i32 - 1);
    (base * total_mana_mult(equipment, total_luk, passives)).round() as u64
}

/// The player's derived combat block. Always recomputed as a whole; never
/// mutated field-by-field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub atk: u32,
    pub attack_speed: f64,
    /// Clamped to [0, 80].
    pub crit_rate: f64,
    /// Percentage; 150 means a crit deals 1.5x.
    pub crit_damage: f64,
    pub max_hp: u32,
}

impl DerivedStats {
    pub fn calculate(
        attributes: &Attributes,
        equipment: &Equipment,
        passives: &PassiveTracks,
        monster_level: u32,
    ) -> Self {
        let str_total = attributes.get(AttributeType::Strength);
        let agi_total = attributes.get(AttributeType::Agility);
        let dex_total = attributes.get(AttributeType::Dexterity);
        let luk_total = attributes.get(AttributeType::Luck);

        let base_atk = BASE_ATK + str_total * ATK_PER_STR;
        let base_aspd = BASE_ATTACK_SPEED + agi_total * ASPD_PER_AGI;
        let base_crit_rate = BASE_CRIT_RATE + luk_total * CRIT_RATE_PER_LUK;
        let base_crit_dmg = BASE_CRIT_DAMAGE + dex_total * CRIT_DMG_PER_DEX;

        let atk = (final_attack_raw(base_atk, str_total, equipment, monster_level)
            * passives.attack_mult())
        .round() as u32;

        let attack_speed =
            base_aspd * attack_speed_multiplier(equipment, agi_total) * passives.speed_mult();

        let crit_rate = (base_crit_rate + crit_rate_bonus(equipment) + passives.crit_rate_bonus())
            .clamp(0.0, CRIT_RATE_CAP);

        let crit_damage = (base_crit_dmg
            * crit_damage_multiplier(equipment, dex_total)
            * passives.crit_damage_mult())
        .round();

        let max_hp = (BASE_MAX_HP + str_total * HP_PER_STR).round() as u32;

        Self {
            atk,
            attack_speed,
            crit_rate,
            crit_damage,
            max_hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;

    fn equipment_with(id: EquipmentId, level: u32) -> Equipment {
        let mut eq = Equipment::new();
        eq.get_mut(id).level = level;
        eq
    }

    #[test]
    fn test_final_attack_known_values() {
        // Void blade 5, STR 12, base atk 10, monster level 3:
        // round(10 * 1.5 * 1.05 * 1.06) = round(16.695) = 17
        let eq = equipment_with(EquipmentId::VoidBlade, 5);
        assert_eq!(final_attack(10.0, 12.0, &eq, 3), 17);
    }

    #[test]
    fn test_final_attack_level_zero_identity() {
        let eq = Equipment::new();
        // No equipment, STR below the first milestone, monster level 0:
        // all multipliers collapse to 1.
        assert_eq!(final_attack(10.0, 9.9, &eq, 0), 10);
    }

    #[test]
    fn test_milestone_steps_every_ten_points() {
        let eq = Equipment::new();
        assert_eq!(final_attack(100.0, 9.0, &eq, 0), 100);
        assert_eq!(final_attack(100.0, 10.0, &eq, 0), 105);
        assert_eq!(final_attack(100.0, 19.9, &eq, 0), 105);
        assert_eq!(final_attack(100.0, 20.0, &eq, 0), 110);
    }

    #[test]
    fn test_attack_speed_multiplier() {
        let eq = equipment_with(EquipmentId::WindBow, 2);
        // (1 + 0.06) * (1 + 0.03)
        assert!((attack_speed_multiplier(&eq, 10.0) - 1.06 * 1.03).abs() < 1e-12);
    }

    #[test]
    fn test_crit_rate_bonus_no_milestone() {
        let eq = equipment_with(EquipmentId::HawkeyeEye, 4);
        assert_eq!(crit_rate_bonus(&eq), 8.0);
    }

    #[test]
    fn test_crit_damage_multiplier() {
        let eq = equipment_with(EquipmentId::DragonFang, 1);
        // (1 + 0.10) * (1 + 0.05 * 2)
        assert!((crit_damage_multiplier(&eq, 25.0) - 1.10 * 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_mana_multiplier() {
        let eq = equipment_with(EquipmentId::EssenceRing, 2);
        // (1 + 0.10) * (1 + 0.10 * 3)
        assert!((mana_multiplier(&eq, 30.0) - 1.10 * 1.30).abs() < 1e-12);
    }

    #[test]
    fn test_time_dilation_and_battle_time() {
        let eq = Equipment::new();
        assert_eq!(time_dilation(&eq), 1.0);
        assert_eq!(max_battle_time(1, &eq), 15.5);
        // Soft cap: 15 + 0.5*level tops out at 40 seconds undilated
        assert_eq!(max_battle_time(100, &eq), 40.0);

        let clocked = equipment_with(EquipmentId::AeonClock, 2);
        assert!((max_battle_time(1, &clocked) - 15.5 * 1.3).abs() < 1e-9);
        // Hard cap at 300 regardless of dilation
        let heavy = equipment_with(EquipmentId::AeonClock, 100);
        assert_eq!(max_battle_time(100, &heavy), 300.0);
    }

    #[test]
    fn test_mana_per_hit_scales_with_level() {
        let eq = Equipment::new();
        let passives = PassiveTracks::new();
        // round(1 + 0.5*1) = 2
        assert_eq!(mana_per_hit(1, &eq, 0.0, &passives), 2);
        // round(1 + 0.5*9) = 6 (round half away from zero: 5.5 -> 6)
        assert_eq!(mana_per_hit(9, &eq, 0.0, &passives), 6);
    }

    #[test]
    fn test_mana_on_kill_growth() {
        let eq = Equipment::new();
        let passives = PassiveTracks::new();
        assert_eq!(mana_on_kill(1, &eq, 0.0, &passives), 20);
        // 20 * 1.2^4 = 41.472 -> 41
        assert_eq!(mana_on_kill(5, &eq, 0.0, &passives), 41);
    }

    #[test]
    fn test_mana_passives_feed_rewards() {
        let eq = Equipment::new();
        let mut passives = PassiveTracks::new();
        passives.mana.level = 50; // +50%
        assert_eq!(mana_on_kill(1, &eq, 0.0, &passives), 30);
        // Luck track pushes the effective LUK over the first milestone
        passives.mana.level = 0;
        passives.luck.level = 20; // +10 effective LUK -> 1.10 multiplier
        assert_eq!(mana_on_kill(1, &eq, 0.0, &passives), 22);
    }

    #[test]
    fn test_derived_stats_baseline() {
        let attrs = Attributes::new();
        let eq = Equipment::new();
        let passives = PassiveTracks::new();
        let stats = DerivedStats::calculate(&attrs, &eq, &passives, 1);

        // base atk 5 scaled only by the monster-level term: round(5 * 1.02)
        assert_eq!(stats.atk, 5);
        assert!((stats.attack_speed - BASE_ATTACK_SPEED).abs() < 1e-12);
        assert_eq!(stats.crit_rate, BASE_CRIT_RATE);
        assert_eq!(stats.crit_damage, BASE_CRIT_DAMAGE);
        assert_eq!(stats.max_hp, 100);
    }

    #[test]
    fn test_crit_rate_clamped_to_cap() {
        let attrs = {
            let mut a = Attributes::new();
            a.set(AttributeType::Luck, 200.0); // base 10 + 160 = 170 uncapped
            a
        };
        let eq = equipment_with(EquipmentId::HawkeyeEye, 50);
        let passives = PassiveTracks::new();
        let stats = DerivedStats::calculate(&attrs, &eq, &passives, 1);
        assert_eq!(stats.crit_rate, CRIT_RATE_CAP);
    }

    #[test]
    fn test_derived_stats_composition() {
        let mut attrs = Attributes::new();
        attrs.set(AttributeType::Strength, 10.0);
        let eq = Equipment::new();
        let passives = PassiveTracks::new();
        let stats = DerivedStats::calculate(&attrs, &eq, &passives, 1);

        // base atk 5 + 10*2.5 = 30; milestone 1.05; level term 1.02
        // round(30 * 1.05 * 1.02) = round(32.13) = 32
        assert_eq!(stats.atk, 32);
        // max hp 100 + 10*15
        assert_eq!(stats.max_hp, 250);
    }
}
