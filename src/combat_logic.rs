use crate::attributes::AttributeType;
use crate::constants::*;
use crate::derived_stats::{mana_on_kill, mana_per_hit};
use crate::game_state::GameState;
use crate::monster::{evolution_stage, is_boss, roll_passive, shard_reward, MonsterPassive};
use crate::passives::{random_track, PassiveTrackId};
use rand::Rng;

/// Everything a kill transition produced, as structured metadata. Log lines
/// are derived from this; tests assert on the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct KillReport {
    pub killed_level: u32,
    pub new_level: u32,
    pub was_boss: bool,
    pub shards_gained: u64,
    /// Kill reward only; the landing hit's mana is reported on the attack event.
    pub mana_gained: u64,
    pub essence_track: PassiveTrackId,
    pub essence_gained: u64,
    /// Set when the essence drop leveled the receiving track.
    pub track_leveled_to: Option<u32>,
    /// `(from_stage, to_stage)` when the kill crossed an evolution boundary.
    pub evolved: Option<(u8, u8)>,
}

/// Structured outcome of combat resolution and the encounter clock.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// An attack landed (possibly the killing blow).
    PlayerAttack {
        damage: f64,
        was_crit: bool,
        was_manual: bool,
        mana_gained: u64,
    },
    /// The monster's DODGE passive negated the attack outright: no HP
    /// deducted, no mana granted. Distinct from a zero-damage hit.
    AttackDodged,
    /// HARD_SKIN capped the incoming damage at 20% of max HP.
    DamageCapped { original: f64, capped: f64 },
    /// REFLECT marker: 10% of the original damage. Deliberately not applied
    /// to the player.
    DamageReflected { amount: f64 },
    MonsterKilled(KillReport),
    /// The battle timer ran out and the encounter regressed one level.
    TimerExpired { regressed_to: u32 },
}

/// Resolves one attack exchange against the current monster.
///
/// Pipeline: guard, crit roll, manual bonus, monster passive, mana, then
/// either the kill transition or a plain hit. The whole resolution commits
/// before returning; callers never observe a half-applied exchange.
pub fn resolve_player_attack(
    state: &mut GameState,
    rng: &mut impl Rng,
    is_manual: bool,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if !state.is_running || state.monster.is_dead() {
        return events;
    }

    let crit_bonus = if is_manual { MANUAL_CRIT_BONUS } else { 0.0 };
    let is_crit = rng.gen::<f64>() * 100.0 < state.player.crit_rate + crit_bonus;

    let base_damage = if is_crit {
        state.player.atk as f64 * state.player.crit_damage / 100.0
    } else {
        state.player.atk as f64
    };
    let final_damage = base_damage * if is_manual { MANUAL_DAMAGE_MULT } else { 1.0 };

    // Monster passive interaction
    let mut damage = final_damage;
    match state.monster.passive {
        MonsterPassive::HardSkin => {
            let cap = 0.20 * state.monster.max_hp;
            if damage > cap {
                events.push(CombatEvent::DamageCapped {
                    original: damage,
                    capped: cap,
                });
                damage = cap;
            }
        }
        MonsterPassive::Dodge => {
            let total_dex = state.player.attributes.get(AttributeType::Dexterity);
            let dodge_chance = (0.15 - total_dex * 0.001).max(0.02);
            if rng.gen::<f64>() < dodge_chance {
                events.push(CombatEvent::AttackDodged);
                return events;
            }
        }
        MonsterPassive::Reflect => {
            events.push(CombatEvent::DamageReflected {
                amount: final_damage * 0.10,
            });
        }
        MonsterPassive::Regen | MonsterPassive::None => {}
    }

    // Mana for a landed hit (also granted on the killing blow, never on a miss)
    let total_luk = state.player.attributes.get(AttributeType::Luck);
    let hit_mana = mana_per_hit(
        state.monster.level,
        &state.equipment,
        total_luk,
        &state.passives,
    );
    state.player.essence += hit_mana;
    state.total_essence_earned += hit_mana;

    events.push(CombatEvent::PlayerAttack {
        damage,
        was_crit: is_crit,
        was_manual: is_manual,
        mana_gained: hit_mana,
    });

    state.monster.take_damage(damage);
    if state.monster.is_dead() {
        events.push(CombatEvent::MonsterKilled(apply_kill_transition(state, rng)));
    }

    events
}

/// The kill transition: level up the monster, re-roll its passive, credit
/// rewards, drop passive essence, and reset the battle clock. Applied as one
/// commit.
fn apply_kill_transition(state: &mut GameState, rng: &mut impl Rng) -> KillReport {
    let killed_level = state.monster.level;
    let next_level = killed_level + 1;

    let was_boss = is_boss(killed_level);
    let shards = shard_reward(killed_level);

    let total_luk = state.player.attributes.get(AttributeType::Luck);
    let kill_mana = mana_on_kill(killed_level, &state.equipment, total_luk, &state.passives);

    let from_stage = evolution_stage(killed_level).stage;
    let to_stage = evolution_stage(next_level).stage;

    let next_passive = roll_passive(next_level, rng);

    let essence_track = random_track(rng);
    let essence_amount = 1 + (killed_level / 10) as u64;
    let track_leveled_to = state.passives.add_essence(essence_track, essence_amount);

    state.monster.respawn_at(next_level, next_passive);
    state.soul_shards += shards;
    state.player.essence += kill_mana;
    state.total_essence_earned += kill_mana;
    state.total_monsters_killed += 1;

    // The ATK level term and the battle-time ceiling both track the new level
    state.recompute_derived_stats();
    state.battle_timer = state.max_battle_time;

    KillReport {
        killed_level,
        new_level: next_level,
        was_boss,
        shards_gained: shards,
        mana_gained: kill_mana,
        essence_track,
        essence_gained: essence_amount,
        track_leveled_to,
        evolved: (from_stage != to_stage).then_some((from_stage, to_stage)),
    }
}
