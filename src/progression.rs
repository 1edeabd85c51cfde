use crate::attributes::{AttributeType, Attributes};
use crate::rules::{RuleSet, RuleSetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An upgradeable progression unit tied to one attribute track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressionNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub attribute: AttributeType,
    /// Scaling coefficient for this node's contribution.
    pub value: f64,
    /// Base cost; the live cost follows the rule set's curve.
    pub base_cost: u64,
    pub level: u32,
    pub max_level: Option<u32>,
    pub is_unlocked: bool,
    /// Node ids that must be unlocked first (training rules only).
    pub requires: Vec<String>,
}

impl ProgressionNode {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        attribute: AttributeType,
        value: f64,
        base_cost: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            attribute,
            value,
            base_cost,
            level: 0,
            max_level: None,
            is_unlocked: false,
            requires: Vec::new(),
        }
    }

    fn with_max_level(mut self, max: u32) -> Self {
        self.max_level = Some(max);
        self
    }

    fn with_requirement(mut self, req: &str) -> Self {
        self.requires.push(req.to_string());
        self
    }
}

/// A single node's contribution to its attribute total:
/// `value * level^1.3` (zero at level 0, diminishing per point).
pub fn node_bonus(value: f64, level: u32) -> f64 {
    value * (level as f64).powf(1.3)
}

/// Sums every node's contribution into per-attribute totals.
///
/// Iteration order is the map's (deterministic) order; the preview path
/// below walks the nodes identically so projected and committed totals are
/// bit-exact.
pub fn attribute_totals(nodes: &BTreeMap<String, ProgressionNode>) -> Attributes {
    attribute_totals_with(nodes, None)
}

/// Same summation with one node counted at `level + 1`. This is the single
/// gain formula shared by the upgrade preview and the commit path.
pub fn attribute_totals_with(
    nodes: &BTreeMap<String, ProgressionNode>,
    upgraded: Option<&str>,
) -> Attributes {
    let mut totals = Attributes::new();
    for node in nodes.values() {
        let level = if upgraded == Some(node.id.as_str()) {
            node.level + 1
        } else {
            node.level
        };
        if level > 0 {
            totals.add(node.attribute, node_bonus(node.value, level));
        }
    }
    totals
}

/// Projected effect of upgrading one node, computed with the exact same
/// summation as the commit path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradePreview {
    pub attribute: AttributeType,
    pub cost: u64,
    /// Exact attribute gain.
    pub gain: f64,
    /// Gain under `round(next) - round(current)` display semantics.
    pub displayed_gain: i64,
}

pub fn upgrade_preview(
    nodes: &BTreeMap<String, ProgressionNode>,
    node: &ProgressionNode,
    rules: &RuleSet,
    monster_level: u32,
) -> UpgradePreview {
    let current = attribute_totals(nodes).get(node.attribute);
    let next = attribute_totals_with(nodes, Some(&node.id)).get(node.attribute);
    UpgradePreview {
        attribute: node.attribute,
        cost: rules.node_upgrade_cost(node.base_cost, node.level, monster_level),
        gain: next - current,
        displayed_gain: next.round() as i64 - current.round() as i64,
    }
}

/// Node catalog for a rule set. The battle rules expose one free-standing
/// node per track; the training rules add capped tier-2 nodes gated on their
/// tier-1 counterparts.
pub fn initial_nodes(rules: &RuleSet) -> BTreeMap<String, ProgressionNode> {
    let mut nodes = BTreeMap::new();
    let base = [
        ProgressionNode::new(
            "str_1",
            "Enhanced Muscle",
            "Refines muscle fiber to raise ATK and max HP",
            AttributeType::Strength,
            2.0,
            10,
        ),
        ProgressionNode::new(
            "agi_1",
            "Rapid Reflex",
            "Accelerates nerve response to raise attack speed",
            AttributeType::Agility,
            1.0,
            10,
        ),
        ProgressionNode::new(
            "dex_1",
            "Neural Precision",
            "Tunes sensory accuracy to raise crit damage",
            AttributeType::Dexterity,
            1.0,
            10,
        ),
        ProgressionNode::new(
            "luk_1",
            "Fortune Core",
            "Attunes the fortune gene to raise crit rate and essence",
            AttributeType::Luck,
            1.0,
            10,
        ),
    ];
    for node in base {
        nodes.insert(node.id.clone(), node);
    }

    if rules.id == RuleSetId::Training {
        let tier2 = [
            ProgressionNode::new(
                "str_2",
                "Titan Grip",
                "Channels trained strength into heavier blows",
                AttributeType::Strength,
                3.0,
                40,
            )
            .with_max_level(10)
            .with_requirement("str_1"),
            ProgressionNode::new(
                "agi_2",
                "Phantom Step",
                "Layers footwork drills into raw speed",
                AttributeType::Agility,
                2.0,
                40,
            )
            .with_max_level(10)
            .with_requirement("agi_1"),
            ProgressionNode::new(
                "dex_2",
                "Iron Constitution",
                "Hardens the body against punishment",
                AttributeType::Dexterity,
                2.0,
                40,
            )
            .with_max_level(10)
            .with_requirement("dex_1"),
            ProgressionNode::new(
                "luk_2",
                "Deadeye Focus",
                "Sharpens aim to exploit every opening",
                AttributeType::Luck,
                2.0,
                40,
            )
            .with_max_level(10)
            .with_requirement("luk_1"),
        ];
        for node in tier2 {
            nodes.insert(node.id.clone(), node);
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_bonus_zero_at_level_zero() {
        assert_eq!(node_bonus(2.0, 0), 0.0);
    }

    #[test]
    fn test_node_bonus_non_decreasing() {
        let mut prev = 0.0;
        for level in 0..50 {
            let bonus = node_bonus(1.0, level);
            assert!(bonus >= prev);
            prev = bonus;
        }
    }

    #[test]
    fn test_node_bonus_superlinear() {
        // 2 * 10^1.3 = 39.9052...
        assert!((node_bonus(2.0, 10) - 39.905246).abs() < 1e-5);
    }

    #[test]
    fn test_attribute_totals_sum_same_track() {
        let rules = RuleSet::training();
        let mut nodes = initial_nodes(&rules);
        nodes.get_mut("str_1").unwrap().level = 3;
        nodes.get_mut("str_2").unwrap().level = 2;
        let totals = attribute_totals(&nodes);
        let expected = node_bonus(2.0, 3) + node_bonus(3.0, 2);
        assert!((totals.get(AttributeType::Strength) - expected).abs() < 1e-12);
        assert_eq!(totals.get(AttributeType::Agility), 0.0);
    }

    #[test]
    fn test_preview_matches_commit_exactly() {
        let rules = RuleSet::battle();
        let mut nodes = initial_nodes(&rules);
        nodes.get_mut("str_1").unwrap().level = 10;

        let node = nodes.get("str_1").unwrap().clone();
        let preview = upgrade_preview(&nodes, &node, &rules, 7);
        let before = attribute_totals(&nodes).get(AttributeType::Strength);

        nodes.get_mut("str_1").unwrap().level += 1;
        let after = attribute_totals(&nodes).get(AttributeType::Strength);

        assert_eq!(preview.gain, after - before);
        assert_eq!(
            preview.displayed_gain,
            after.round() as i64 - before.round() as i64
        );
    }

    #[test]
    fn test_battle_catalog_has_no_prerequisites() {
        let nodes = initial_nodes(&RuleSet::battle());
        assert_eq!(nodes.len(), 4);
        assert!(nodes.values().all(|n| n.requires.is_empty()));
        assert!(nodes.values().all(|n| n.max_level.is_none()));
    }

    #[test]
    fn test_training_catalog_gates_tier_two() {
        let nodes = initial_nodes(&RuleSet::training());
        assert_eq!(nodes.len(), 8);
        assert_eq!(nodes["str_2"].requires, vec!["str_1".to_string()]);
        assert_eq!(nodes["str_2"].max_level, Some(10));
    }
}
