//! Headless balance simulator.
//!
//! Runs a seeded session for a fixed number of ticks with a greedy spending
//! policy, then reports progression statistics. This is the non-UI driver of
//! the engine; the TUI and the simulator share the exact same tick path.

use crate::combat_logic::CombatEvent;
use crate::constants::{TICK_INTERVAL_MS, TICK_SECONDS};
use crate::equipment::{upgrade_cost, EquipmentId};
use crate::rules::RuleSet;
use crate::session::GameSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// How often the greedy spending policy runs, in ticks.
const SPEND_INTERVAL_TICKS: u64 = 10;

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Ticks to simulate (100ms each).
    pub ticks: u64,
    /// RNG seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Greedily buy node and equipment upgrades as they become affordable.
    pub auto_spend: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // One simulated hour
            ticks: 36_000,
            seed: None,
            auto_spend: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub ticks: u64,
    pub seed: u64,
    pub simulated_seconds: f64,
    pub final_monster_level: u32,
    pub peak_monster_level: u32,
    pub total_kills: u64,
    pub boss_kills: u64,
    pub timer_expiries: u64,
    pub kills_per_minute: f64,
    pub total_essence_earned: u64,
    pub soul_shards_remaining: u64,
    pub node_levels: BTreeMap<String, u32>,
    pub equipment_levels: BTreeMap<String, u32>,
    pub passive_levels: BTreeMap<String, u32>,
}

impl SimReport {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Simulated {:.0}s ({} ticks, seed {})\n",
            self.simulated_seconds, self.ticks, self.seed
        ));
        out.push_str(&format!(
            "Monster level: {} (peak {})\n",
            self.final_monster_level, self.peak_monster_level
        ));
        out.push_str(&format!(
            "Kills: {} ({} bosses, {:.2}/min), timer expiries: {}\n",
            self.total_kills, self.boss_kills, self.kills_per_minute, self.timer_expiries
        ));
        out.push_str(&format!(
            "Essence earned: {}, shards left: {}\n",
            self.total_essence_earned, self.soul_shards_remaining
        ));
        out.push_str("Nodes:\n");
        for (id, level) in &self.node_levels {
            out.push_str(&format!("  {:<8} Lv.{}\n", id, level));
        }
        out.push_str("Equipment:\n");
        for (name, level) in &self.equipment_levels {
            out.push_str(&format!("  {:<16} Lv.{}\n", name, level));
        }
        out.push_str("Passives:\n");
        for (name, level) in &self.passive_levels {
            out.push_str(&format!("  {:<12} Lv.{}\n", name, level));
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serializes")
    }
}

pub fn run_simulation(config: &SimConfig) -> SimReport {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut session = GameSession::with_rng(RuleSet::battle(), ChaCha8Rng::seed_from_u64(seed), 0);
    session.start();

    let mut total_kills = 0u64;
    let mut boss_kills = 0u64;
    let mut timer_expiries = 0u64;
    let mut peak_level = session.state().monster.level;

    for tick_idx in 0..config.ticks {
        for event in session.tick(TICK_SECONDS) {
            match event {
                CombatEvent::MonsterKilled(report) => {
                    total_kills += 1;
                    if report.was_boss {
                        boss_kills += 1;
                    }
                    peak_level = peak_level.max(report.new_level);
                }
                CombatEvent::TimerExpired { .. } => timer_expiries += 1,
                _ => {}
            }
        }

        if config.auto_spend && tick_idx % SPEND_INTERVAL_TICKS == 0 {
            spend_greedily(&mut session);
        }
    }

    let state = session.state();
    let simulated_seconds = config.ticks as f64 * TICK_INTERVAL_MS as f64 / 1000.0;
    SimReport {
        ticks: config.ticks,
        seed,
        simulated_seconds,
        final_monster_level: state.monster.level,
        peak_monster_level: peak_level,
        total_kills,
        boss_kills,
        timer_expiries,
        kills_per_minute: total_kills as f64 / (simulated_seconds / 60.0),
        total_essence_earned: state.total_essence_earned,
        soul_shards_remaining: state.soul_shards,
        node_levels: state
            .nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.level))
            .collect(),
        equipment_levels: state
            .equipment
            .iter()
            .map(|item| (item.id.name().to_string(), item.level))
            .collect(),
        passive_levels: crate::passives::PassiveTrackId::all()
            .iter()
            .map(|id| (id.name().to_string(), state.passives.get(*id).level))
            .collect(),
    }
}

/// Buys the cheapest affordable node upgrade until essence runs dry, then
/// the cheapest affordable equipment upgrade with any shards on hand.
fn spend_greedily(session: &mut GameSession<ChaCha8Rng>) {
    loop {
        let cheapest = session
            .state()
            .nodes
            .keys()
            .cloned()
            .filter_map(|id| {
                session
                    .upgrade_preview(&id)
                    .ok()
                    .map(|preview| (id, preview.cost))
            })
            .min_by_key(|(_, cost)| *cost);
        match cheapest {
            Some((id, cost)) if session.state().player.essence >= cost => {
                if session.upgrade_node(&id).is_err() {
                    break;
                }
            }
            _ => break,
        }
    }

    loop {
        let cheapest = EquipmentId::all()
            .into_iter()
            .map(|id| (id, upgrade_cost(session.state().equipment.level(id))))
            .min_by_key(|(_, cost)| *cost)
            .expect("six slots");
        if session.state().soul_shards >= cheapest.1 {
            if session.buy_equipment(cheapest.0).is_err() {
                break;
            }
        } else {
            break;
        }
    }
}
