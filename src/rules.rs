use crate::attributes::AttributeType;
use serde::{Deserialize, Serialize};

/// Which of the two historical rule sets a session runs under.
///
/// The game went through two prototypes with incompatible attribute naming
/// and node economies. Both are expressed over the same canonical entities;
/// this value selects naming, cost curve, and prerequisite checking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleSetId {
    /// The battle/evolution rules: STR/AGI/DEX/LUK, monster-scaled node
    /// costs, no prerequisites. This is the canonical rule set.
    Battle,
    /// The legacy skill-tree/training rules: STR/AGI/VIT/DEX, fixed cost
    /// growth, prerequisite edges between nodes.
    Training,
}

/// Cost curve for raising a progression node from level L to L+1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum NodeCostCurve {
    /// `base * growth^L * monster_factor^monster_level`, rounded.
    MonsterScaled { growth: f64, monster_factor: f64 },
    /// `base * growth^L`, rounded.
    Fixed { growth: f64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    pub id: RuleSetId,
    pub cost_curve: NodeCostCurve,
    pub use_prerequisites: bool,
}

impl RuleSet {
    pub fn battle() -> Self {
        Self {
            id: RuleSetId::Battle,
            cost_curve: NodeCostCurve::MonsterScaled {
                growth: 1.15,
                monster_factor: 1.02,
            },
            use_prerequisites: false,
        }
    }

    pub fn training() -> Self {
        Self {
            id: RuleSetId::Training,
            cost_curve: NodeCostCurve::Fixed { growth: 1.6 },
            use_prerequisites: true,
        }
    }

    /// Display label for a canonical attribute track under these rules.
    pub fn attribute_name(&self, attr: AttributeType) -> &'static str {
        match (self.id, attr) {
            (_, AttributeType::Strength) => "STR",
            (_, AttributeType::Agility) => "AGI",
            (RuleSetId::Battle, AttributeType::Dexterity) => "DEX",
            (RuleSetId::Battle, AttributeType::Luck) => "LUK",
            (RuleSetId::Training, AttributeType::Dexterity) => "VIT",
            (RuleSetId::Training, AttributeType::Luck) => "DEX",
        }
    }

    /// Cost to raise a node with the given base cost from `level` to
    /// `level + 1`. Monotonically increasing in `level`.
    pub fn node_upgrade_cost(&self, base_cost: u64, level: u32, monster_level: u32) -> u64 {
        let raw = match self.cost_curve {
            NodeCostCurve::MonsterScaled {
                growth,
                monster_factor,
            } => base_cost as f64 * growth.powi(level as i32) * monster_factor.powi(monster_level as i32),
            NodeCostCurve::Fixed { growth } => base_cost as f64 * growth.powi(level as i32),
        };
        raw.round() as u64
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::battle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_cost_scales_with_monster_level() {
        let rules = RuleSet::battle();
        // 10 * 1.15^0 * 1.02^1 = 10.2 -> 10
        assert_eq!(rules.node_upgrade_cost(10, 0, 1), 10);
        // 10 * 1.15^3 * 1.02^10 = 15.2087... * 1.21899... -> 19
        assert_eq!(rules.node_upgrade_cost(10, 3, 10), 19);
    }

    #[test]
    fn test_training_cost_ignores_monster_level() {
        let rules = RuleSet::training();
        assert_eq!(rules.node_upgrade_cost(10, 0, 1), 10);
        assert_eq!(rules.node_upgrade_cost(10, 0, 99), 10);
        // 10 * 1.6^2 = 25.6 -> 26
        assert_eq!(rules.node_upgrade_cost(10, 2, 1), 26);
    }

    #[test]
    fn test_cost_monotonic_in_level() {
        for rules in [RuleSet::battle(), RuleSet::training()] {
            let mut prev = 0;
            for level in 0..30 {
                let cost = rules.node_upgrade_cost(10, level, 5);
                assert!(cost >= prev, "cost decreased at level {}", level);
                prev = cost;
            }
        }
    }

    #[test]
    fn test_attribute_names_per_rule_set() {
        let battle = RuleSet::battle();
        let training = RuleSet::training();
        assert_eq!(battle.attribute_name(AttributeType::Luck), "LUK");
        assert_eq!(training.attribute_name(AttributeType::Dexterity), "VIT");
        assert_eq!(training.attribute_name(AttributeType::Luck), "DEX");
    }
}
