use serde::{Deserialize, Serialize};

/// The four canonical attribute tracks.
///
/// Display names depend on the active rule set (the legacy training rules
/// label the last two tracks VIT/DEX); the engine only ever deals in these
/// canonical tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Strength,
    Agility,
    Dexterity,
    Luck,
}

impl AttributeType {
    pub fn all() -> [AttributeType; 4] {
        [
            AttributeType::Strength,
            AttributeType::Agility,
            AttributeType::Dexterity,
            AttributeType::Luck,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Agility => 1,
            AttributeType::Dexterity => 2,
            AttributeType::Luck => 3,
        }
    }
}

/// Attribute totals granted by progression nodes.
///
/// Values are fractional because node contributions scale as
/// `value * level^1.3`. Totals are non-negative and only ever grow within a
/// session (reset aside).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Attributes {
    values: [f64; 4],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self { values: [0.0; 4] }
    }

    pub fn get(&self, attr: AttributeType) -> f64 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: f64) {
        self.values[attr.index()] = value;
    }

    pub fn add(&mut self, attr: AttributeType, amount: f64) {
        self.values[attr.index()] += amount;
    }
}
