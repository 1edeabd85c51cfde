//! The encounter clock: one tick advances the battle countdown and the
//! auto-attack accumulator.
//!
//! The tick is driven externally (TUI loop, simulator, tests) with a
//! wall-clock delta; the engine never owns a timer. A tick runs to
//! completion on the calling thread, so its state changes land as one
//! commit.

use crate::combat_logic::{resolve_player_attack, CombatEvent};
use crate::game_state::GameState;
use crate::monster::MonsterPassive;
use rand::Rng;

/// Advances the session by `delta` seconds. No-op while the session is
/// stopped.
pub fn game_tick(state: &mut GameState, rng: &mut impl Rng, delta: f64) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if !state.is_running {
        return events;
    }

    state.play_time_seconds += delta;

    // Auto-attacks: one per full 1.0 accumulated. The fractional remainder
    // carries over; it is never zeroed on a crossing.
    state.attack_timer += state.player.attack_speed * delta;
    while state.attack_timer >= 1.0 {
        state.attack_timer -= 1.0;
        events.extend(resolve_player_attack(state, rng, false));
    }

    // Battle countdown. Expiry regresses the encounter one level (floored at
    // 1), clears the passive, and restarts the clock at the regressed
    // level's ceiling.
    state.battle_timer -= delta;
    if state.battle_timer <= 0.0 {
        let fallback = state.monster.level.saturating_sub(1).max(1);
        state.monster.respawn_at(fallback, MonsterPassive::None);
        state.recompute_derived_stats();
        state.battle_timer = state.max_battle_time;
        events.push(CombatEvent::TimerExpired {
            regressed_to: fallback,
        });
    }

    events
}
