// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICK_SECONDS: f64 = TICK_INTERVAL_MS as f64 / 1000.0;

// Starting player stats (battle rule set; attributes all start at 0)
pub const BASE_ATK: f64 = 5.0;
pub const BASE_ATTACK_SPEED: f64 = 1.2;
pub const BASE_CRIT_RATE: f64 = 10.0;
pub const BASE_CRIT_DAMAGE: f64 = 150.0;
pub const BASE_MAX_HP: f64 = 100.0;
pub const STARTING_ESSENCE: u64 = 100;

// Attribute coefficients feeding the base stats
pub const ATK_PER_STR: f64 = 2.5;
pub const ASPD_PER_AGI: f64 = 0.04;
pub const CRIT_DMG_PER_DEX: f64 = 4.0;
pub const CRIT_RATE_PER_LUK: f64 = 0.8;
pub const HP_PER_STR: f64 = 15.0;

// Crit rate is hard-capped; attack and mana multipliers are not
pub const CRIT_RATE_CAP: f64 = 80.0;

// Manual attack bonuses
pub const MANUAL_CRIT_BONUS: f64 = 5.0;
pub const MANUAL_DAMAGE_MULT: f64 = 1.5;

// Monster scaling
pub const MONSTER_BASE_HP: f64 = 100.0;
pub const MONSTER_HP_GROWTH: f64 = 1.12;
pub const MONSTER_PASSIVE_MIN_LEVEL: u32 = 20;
pub const MONSTER_PASSIVE_CHANCE: f64 = 0.30;
pub const BOSS_LEVEL_INTERVAL: u32 = 5;

// Battle timer curve: min(hard cap, min(soft cap, base + level * per_level) * dilation)
pub const BATTLE_TIME_BASE: f64 = 15.0;
pub const BATTLE_TIME_PER_LEVEL: f64 = 0.5;
pub const BATTLE_TIME_SOFT_CAP: f64 = 40.0;
pub const BATTLE_TIME_HARD_CAP: f64 = 300.0;

// Economy
pub const EQUIPMENT_COST_GROWTH: f64 = 1.8;
pub const KILL_REWARD_BASE: f64 = 20.0;
pub const KILL_REWARD_GROWTH: f64 = 1.2;
pub const HIT_MANA_PER_LEVEL: f64 = 0.5;

// Battle log ring size
pub const BATTLE_LOG_CAP: usize = 50;
