//! The session orchestrator: owns the one authoritative [`GameState`],
//! exposes the action interface the UI consumes, and drives the encounter
//! clock. All mutation funnels through here on a single logical thread.

use crate::combat_logic::{resolve_player_attack, CombatEvent};
use crate::equipment::{upgrade_cost, EquipmentId};
use crate::error::ActionError;
use crate::game_state::GameState;
use crate::monster::evolution_stage;
use crate::progression::{upgrade_preview, UpgradePreview};
use crate::rules::RuleSet;
use crate::tick::game_tick;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Receipt for a committed node upgrade.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUpgraded {
    pub node_id: String,
    pub new_level: u32,
    pub cost: u64,
    /// Exact attribute gain, identical to the preview's.
    pub gain: f64,
}

/// Receipt for a committed equipment purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentPurchased {
    pub id: EquipmentId,
    pub new_level: u32,
    pub cost: u64,
}

/// One game session. Generic over the RNG so drivers pick their own
/// determinism (entropy for play, a seeded ChaCha for simulation and tests).
pub struct GameSession<R: Rng = StdRng> {
    state: GameState,
    rng: R,
}

impl GameSession<StdRng> {
    pub fn new(created_at: i64) -> Self {
        Self::with_rng(RuleSet::battle(), StdRng::from_entropy(), created_at)
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(rules: RuleSet, rng: R, created_at: i64) -> Self {
        Self {
            state: GameState::new(rules, created_at),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for the simulator and tests.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Starts the tick-driven encounter. Idempotent.
    pub fn start(&mut self) {
        if !self.state.is_running {
            self.state.is_running = true;
            self.state.add_battle_log("🌲 Soul link established...");
        }
    }

    /// Halts all further ticks. Idempotent.
    pub fn stop(&mut self) {
        self.state.is_running = false;
    }

    /// Advances the session by `delta` seconds of wall-clock time and logs
    /// whatever happened. Empty while stopped.
    pub fn tick(&mut self, delta: f64) -> Vec<CombatEvent> {
        let events = game_tick(&mut self.state, &mut self.rng, delta);
        self.log_events(&events);
        events
    }

    /// A player-initiated attack: +5 crit points and x1.5 damage.
    pub fn manual_attack(&mut self) -> Result<Vec<CombatEvent>, ActionError> {
        if !self.state.is_running {
            return Err(ActionError::NotRunning);
        }
        let events = resolve_player_attack(&mut self.state, &mut self.rng, true);
        self.log_events(&events);
        Ok(events)
    }

    /// Projected cost and attribute gain of upgrading `node_id`, computed
    /// with the same formula the commit uses.
    pub fn upgrade_preview(&self, node_id: &str) -> Result<UpgradePreview, ActionError> {
        let node = self
            .state
            .nodes
            .get(node_id)
            .ok_or_else(|| ActionError::InvalidTarget(node_id.to_string()))?;
        Ok(upgrade_preview(
            &self.state.nodes,
            node,
            &self.state.rules,
            self.state.monster.level,
        ))
    }

    /// Upgrades a progression node. All checks precede any write.
    pub fn upgrade_node(&mut self, node_id: &str) -> Result<NodeUpgraded, ActionError> {
        let node = self
            .state
            .nodes
            .get(node_id)
            .ok_or_else(|| ActionError::InvalidTarget(node_id.to_string()))?;

        if let Some(max) = node.max_level {
            if node.level >= max {
                return Err(ActionError::InvalidTarget(node_id.to_string()));
            }
        }

        if self.state.rules.use_prerequisites {
            for req in &node.requires {
                let met = self
                    .state
                    .nodes
                    .get(req)
                    .map(|n| n.is_unlocked)
                    .unwrap_or(false);
                if !met {
                    return Err(ActionError::PrerequisiteNotMet(req.clone()));
                }
            }
        }

        let preview = upgrade_preview(
            &self.state.nodes,
            node,
            &self.state.rules,
            self.state.monster.level,
        );
        if self.state.player.essence < preview.cost {
            return Err(ActionError::InsufficientResources {
                currency: "essence",
                needed: preview.cost,
                available: self.state.player.essence,
            });
        }

        // Commit
        self.state.player.essence -= preview.cost;
        let node = self.state.nodes.get_mut(node_id).expect("checked above");
        node.level += 1;
        node.is_unlocked = true;
        let name = node.name.clone();
        let new_level = node.level;
        self.state.recompute_derived_stats();

        self.state
            .add_battle_log(format!("✨ Awakened: {} Lv.{}", name, new_level));

        Ok(NodeUpgraded {
            node_id: node_id.to_string(),
            new_level,
            cost: preview.cost,
            gain: preview.gain,
        })
    }

    /// Buys one level of an equipment item with soul shards.
    pub fn buy_equipment(&mut self, id: EquipmentId) -> Result<EquipmentPurchased, ActionError> {
        let cost = upgrade_cost(self.state.equipment.level(id));
        if self.state.soul_shards < cost {
            return Err(ActionError::InsufficientResources {
                currency: "soul shards",
                needed: cost,
                available: self.state.soul_shards,
            });
        }

        self.state.soul_shards -= cost;
        let item = self.state.equipment.get_mut(id);
        item.level += 1;
        let new_level = item.level;
        self.state.recompute_derived_stats();

        self.state.add_battle_log(format!(
            "⚔️ {} upgraded to Lv.{} (-{} 💎)",
            id.name(),
            new_level,
            cost
        ));

        Ok(EquipmentPurchased {
            id,
            new_level,
            cost,
        })
    }

    /// Restores the initial state with the session stopped. Idempotent.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn log_events(&mut self, events: &[CombatEvent]) {
        for event in events {
            match event {
                CombatEvent::PlayerAttack {
                    damage,
                    was_crit,
                    was_manual,
                    ..
                } => {
                    if *was_manual {
                        self.state
                            .add_battle_log(format!("⚔️ Strike! -{}", damage.floor() as u64));
                    } else if *was_crit {
                        self.state
                            .add_battle_log(format!("💥 CRIT! -{}", damage.floor() as u64));
                    }
                }
                CombatEvent::AttackDodged => {
                    self.state.add_battle_log("💨 Miss!");
                }
                CombatEvent::DamageCapped { .. } => {
                    self.state.add_battle_log("🛡️ Skin hardened!");
                }
                CombatEvent::DamageReflected { .. } => {}
                CombatEvent::MonsterKilled(report) => {
                    if let Some((_, to)) = report.evolved {
                        let name = evolution_stage(report.new_level).name;
                        self.state.add_battle_log(format!(
                            "✨ Evolution! Stage {} -> [{}]",
                            to, name
                        ));
                    }
                    if report.shards_gained > 0 {
                        self.state.add_battle_log(format!(
                            "💎 🏆 BOSS level {} down! Soul Shard x{}",
                            report.killed_level, report.shards_gained
                        ));
                    }
                    self.state
                        .add_battle_log(format!("⚔️ Vanquished! +{} Mana", report.mana_gained));
                    self.state.add_battle_log(format!(
                        "🌟 {} Essence +{}",
                        report.essence_track.name(),
                        report.essence_gained
                    ));
                }
                CombatEvent::TimerExpired { regressed_to } => {
                    self.state.add_battle_log(format!(
                        "⚠️ Time's up! Fell back to level {}",
                        regressed_to
                    ));
                }
            }
        }
    }
}
