use crate::attributes::Attributes;
use crate::constants::*;
use crate::derived_stats::{max_battle_time, DerivedStats};
use crate::equipment::Equipment;
use crate::monster::{Monster, MonsterPassive};
use crate::passives::PassiveTracks;
use crate::progression::{attribute_totals, initial_nodes, ProgressionNode};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The player's combat state. Derived fields are only ever written by
/// [`GameState::recompute_derived_stats`]; essence is the spendable
/// accumulator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    /// Node-granted attribute totals.
    pub attributes: Attributes,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub attack_speed: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub essence: u64,
}

impl PlayerStats {
    fn new() -> Self {
        Self {
            attributes: Attributes::new(),
            hp: BASE_MAX_HP as u32,
            max_hp: BASE_MAX_HP as u32,
            atk: BASE_ATK as u32,
            attack_speed: BASE_ATTACK_SPEED,
            crit_rate: BASE_CRIT_RATE,
            crit_damage: BASE_CRIT_DAMAGE,
            essence: STARTING_ESSENCE,
        }
    }
}

/// The one authoritative session aggregate. Single writer; the UI only reads
/// snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub session_id: String,
    pub created_at: i64,
    pub rules: RuleSet,

    pub player: PlayerStats,
    pub monster: Monster,
    pub nodes: BTreeMap<String, ProgressionNode>,
    pub equipment: Equipment,
    pub passives: PassiveTracks,
    pub soul_shards: u64,

    /// Seconds left before the encounter fails and regresses a level.
    pub battle_timer: f64,
    pub max_battle_time: f64,
    /// Auto-attack accumulator; an attack fires per 1.0 crossed.
    pub attack_timer: f64,
    pub is_running: bool,

    /// Most recent first, capped at [`BATTLE_LOG_CAP`].
    pub battle_log: Vec<String>,

    pub total_essence_earned: u64,
    pub total_monsters_killed: u64,
    pub play_time_seconds: f64,
}

impl GameState {
    pub fn new(rules: RuleSet, created_at: i64) -> Self {
        let equipment = Equipment::new();
        let monster = Monster::spawn(1, MonsterPassive::None);
        let max_time = max_battle_time(monster.level, &equipment);
        let mut state = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            created_at,
            rules,
            player: PlayerStats::new(),
            monster,
            nodes: initial_nodes(&rules),
            equipment,
            passives: PassiveTracks::new(),
            soul_shards: 0,
            battle_timer: max_time,
            max_battle_time: max_time,
            attack_timer: 0.0,
            is_running: false,
            battle_log: Vec::new(),
            total_essence_earned: 0,
            total_monsters_killed: 0,
            play_time_seconds: 0.0,
        };
        state.recompute_derived_stats();
        state
    }

    /// Restores every entity to its initial lifecycle state, preserving only
    /// the session's identity. Idempotent.
    pub fn reset(&mut self) {
        let fresh = GameState::new(self.rules, self.created_at);
        let session_id = std::mem::take(&mut self.session_id);
        *self = fresh;
        self.session_id = session_id;
        self.battle_log = vec!["♻️ System reset".to_string()];
    }

    /// The single recompute path for every derived field: attribute totals
    /// from the nodes, then the combat block from totals + equipment +
    /// passives + monster level, then the battle-time ceiling.
    pub fn recompute_derived_stats(&mut self) {
        self.player.attributes = attribute_totals(&self.nodes);
        let derived = DerivedStats::calculate(
            &self.player.attributes,
            &self.equipment,
            &self.passives,
            self.monster.level,
        );
        self.player.atk = derived.atk;
        self.player.attack_speed = derived.attack_speed;
        self.player.crit_rate = derived.crit_rate;
        self.player.crit_damage = derived.crit_damage;
        self.player.max_hp = derived.max_hp;
        self.player.hp = self.player.hp.min(derived.max_hp);
        self.max_battle_time = max_battle_time(self.monster.level, &self.equipment);
    }

    pub fn add_battle_log(&mut self, message: impl Into<String>) {
        self.battle_log.insert(0, message.into());
        self.battle_log.truncate(BATTLE_LOG_CAP);
    }
}
