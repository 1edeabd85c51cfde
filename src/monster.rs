use crate::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Defensive ability attached to a monster instance, altering damage
/// resolution. Re-rolled on every spawn at level 20 and above.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MonsterPassive {
    None,
    /// Caps incoming damage at 20% of the monster's max HP.
    HardSkin,
    /// Chance to negate an attack entirely (a true miss, not a 0-damage hit).
    Dodge,
    /// Marks reflected damage for the caller; not applied to the player.
    Reflect,
    /// Marker only; no numeric effect.
    Regen,
}

/// Cosmetic tier derived from monster level. The stage number feeds event
/// metadata; name and color are flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionStage {
    pub stage: u8,
    pub name: &'static str,
    pub color: (u8, u8, u8),
}

pub fn evolution_stage(level: u32) -> EvolutionStage {
    if level <= 10 {
        EvolutionStage { stage: 1, name: "Primordial Droplet", color: (0x38, 0xbd, 0xf8) }
    } else if level <= 30 {
        EvolutionStage { stage: 2, name: "Fragmented Sentinel", color: (0x81, 0x8c, 0xf8) }
    } else if level <= 70 {
        EvolutionStage { stage: 3, name: "Crystal Juggernaut", color: (0xfb, 0x71, 0x85) }
    } else if level <= 150 {
        EvolutionStage { stage: 4, name: "Dimensional Guardian", color: (0x34, 0xd3, 0x99) }
    } else {
        EvolutionStage { stage: 5, name: "The Singularity", color: (0xfa, 0xcc, 0x15) }
    }
}

/// Max HP curve: floor(100 * 1.12^(level-1)).
pub fn monster_max_hp(level: u32) -> f64 {
    (MONSTER_BASE_HP * MONSTER_HP_GROWTH.powi(level as i32 - 1)).floor()
}

pub fn is_boss(level: u32) -> bool {
    level % BOSS_LEVEL_INTERVAL == 0
}

/// Soul shards awarded for killing a monster at `level`. Zero for non-bosses.
pub fn shard_reward(level: u32) -> u64 {
    if is_boss(level) {
        ((level / BOSS_LEVEL_INTERVAL) as u64).max(1)
    } else {
        0
    }
}

/// Rolls the passive for a monster spawning at `level`: 30% chance of one of
/// the three combat passives once the level threshold is reached.
pub fn roll_passive(level: u32, rng: &mut impl Rng) -> MonsterPassive {
    if level >= MONSTER_PASSIVE_MIN_LEVEL && rng.gen::<f64>() < MONSTER_PASSIVE_CHANCE {
        match rng.gen_range(0..3) {
            0 => MonsterPassive::HardSkin,
            1 => MonsterPassive::Dodge,
            _ => MonsterPassive::Reflect,
        }
    } else {
        MonsterPassive::None
    }
}

/// The current encounter target. Mutated in place on kill (level up) and on
/// timer expiry (level down).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub stage: u8,
    pub hp: f64,
    pub max_hp: f64,
    pub passive: MonsterPassive,
}

impl Monster {
    pub fn spawn(level: u32, passive: MonsterPassive) -> Self {
        let evo = evolution_stage(level);
        let max_hp = monster_max_hp(level);
        Self {
            name: evo.name.to_string(),
            level,
            stage: evo.stage,
            hp: max_hp,
            max_hp,
            passive,
        }
    }

    /// Re-targets this monster at a new level with full HP. Used for both the
    /// kill transition (level + 1) and timer-expiry regression (level - 1).
    pub fn respawn_at(&mut self, level: u32, passive: MonsterPassive) {
        let evo = evolution_stage(level);
        self.name = evo.name.to_string();
        self.level = level;
        self.stage = evo.stage;
        self.max_hp = monster_max_hp(level);
        self.hp = self.max_hp;
        self.passive = passive;
    }

    /// Applies damage under the floor rule: HP lands on
    /// `floor(max(0, hp - amount))`, keeping displayed and stored HP equal.
    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0).floor();
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_max_hp_curve() {
        assert_eq!(monster_max_hp(1), 100.0);
        assert_eq!(monster_max_hp(2), 112.0);
        // 100 * 1.12^9 = 277.30... -> 277
        assert_eq!(monster_max_hp(10), 277.0);
    }

    #[test]
    fn test_evolution_stage_boundaries() {
        assert_eq!(evolution_stage(1).stage, 1);
        assert_eq!(evolution_stage(10).stage, 1);
        assert_eq!(evolution_stage(11).stage, 2);
        assert_eq!(evolution_stage(30).stage, 2);
        assert_eq!(evolution_stage(31).stage, 3);
        assert_eq!(evolution_stage(70).stage, 3);
        assert_eq!(evolution_stage(71).stage, 4);
        assert_eq!(evolution_stage(150).stage, 4);
        assert_eq!(evolution_stage(151).stage, 5);
    }

    #[test]
    fn test_boss_every_fifth_level() {
        for level in 1..100 {
            assert_eq!(is_boss(level), level % 5 == 0);
        }
    }

    #[test]
    fn test_shard_reward() {
        assert_eq!(shard_reward(3), 0);
        assert_eq!(shard_reward(5), 1);
        assert_eq!(shard_reward(25), 5);
        assert_eq!(shard_reward(100), 20);
    }

    #[test]
    fn test_no_passive_below_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(roll_passive(19, &mut rng), MonsterPassive::None);
        }
    }

    #[test]
    fn test_passive_rate_at_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let rolls = 10_000;
        let with_passive = (0..rolls)
            .filter(|_| roll_passive(20, &mut rng) != MonsterPassive::None)
            .count();
        // 30% chance; allow generous variance
        assert!(
            (2500..=3500).contains(&with_passive),
            "expected ~3000 passives, got {}",
            with_passive
        );
    }

    #[test]
    fn test_take_damage_floor_rule() {
        let mut monster = Monster::spawn(1, MonsterPassive::None);
        monster.take_damage(7.5);
        assert_eq!(monster.hp, 92.0);
        monster.take_damage(1000.0);
        assert_eq!(monster.hp, 0.0);
        assert!(monster.is_dead());
    }

    #[test]
    fn test_respawn_resets_hp_and_stage() {
        let mut monster = Monster::spawn(10, MonsterPassive::None);
        monster.take_damage(200.0);
        monster.respawn_at(11, MonsterPassive::Dodge);
        assert_eq!(monster.level, 11);
        assert_eq!(monster.stage, 2);
        assert_eq!(monster.hp, monster.max_hp);
        assert_eq!(monster.passive, MonsterPassive::Dodge);
    }
}
