use crate::constants::EQUIPMENT_COST_GROWTH;
use serde::{Deserialize, Serialize};

/// The six fixed equipment slots. Each maps to exactly one derived-stat
/// multiplier family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EquipmentId {
    VoidBlade,
    AeonClock,
    EssenceRing,
    WindBow,
    HawkeyeEye,
    DragonFang,
}

impl EquipmentId {
    pub fn all() -> [EquipmentId; 6] {
        [
            EquipmentId::VoidBlade,
            EquipmentId::AeonClock,
            EquipmentId::EssenceRing,
            EquipmentId::WindBow,
            EquipmentId::HawkeyeEye,
            EquipmentId::DragonFang,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentId::VoidBlade => "Void Blade",
            EquipmentId::AeonClock => "Aeon Clock",
            EquipmentId::EssenceRing => "Essence Ring",
            EquipmentId::WindBow => "Wind God's Bow",
            EquipmentId::HawkeyeEye => "Hawkeye Eye",
            EquipmentId::DragonFang => "Dragon Fang",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EquipmentId::VoidBlade => "+10% ATK per level",
            EquipmentId::AeonClock => "+15% battle time per level",
            EquipmentId::EssenceRing => "+5% mana gain per level",
            EquipmentId::WindBow => "+3% attack speed per level",
            EquipmentId::HawkeyeEye => "+2% crit rate per level (flat)",
            EquipmentId::DragonFang => "+10% crit damage per level",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EquipmentItem {
    pub id: EquipmentId,
    pub level: u32,
}

impl EquipmentItem {
    fn new(id: EquipmentId) -> Self {
        Self { id, level: 0 }
    }
}

/// The full equipment loadout. Items exist from session start at level 0 and
/// are never removed; purchases raise one item's level by one step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub void_blade: EquipmentItem,
    pub aeon_clock: EquipmentItem,
    pub essence_ring: EquipmentItem,
    pub wind_bow: EquipmentItem,
    pub hawkeye_eye: EquipmentItem,
    pub dragon_fang: EquipmentItem,
}

impl Equipment {
    pub fn new() -> Self {
        Self {
            void_blade: EquipmentItem::new(EquipmentId::VoidBlade),
            aeon_clock: EquipmentItem::new(EquipmentId::AeonClock),
            essence_ring: EquipmentItem::new(EquipmentId::EssenceRing),
            wind_bow: EquipmentItem::new(EquipmentId::WindBow),
            hawkeye_eye: EquipmentItem::new(EquipmentId::HawkeyeEye),
            dragon_fang: EquipmentItem::new(EquipmentId::DragonFang),
        }
    }

    pub fn get(&self, id: EquipmentId) -> &EquipmentItem {
        match id {
            EquipmentId::VoidBlade => &self.void_blade,
            EquipmentId::AeonClock => &self.aeon_clock,
            EquipmentId::EssenceRing => &self.essence_ring,
            EquipmentId::WindBow => &self.wind_bow,
            EquipmentId::HawkeyeEye => &self.hawkeye_eye,
            EquipmentId::DragonFang => &self.dragon_fang,
        }
    }

    pub fn get_mut(&mut self, id: EquipmentId) -> &mut EquipmentItem {
        match id {
            EquipmentId::VoidBlade => &mut self.void_blade,
            EquipmentId::AeonClock => &mut self.aeon_clock,
            EquipmentId::EssenceRing => &mut self.essence_ring,
            EquipmentId::WindBow => &mut self.wind_bow,
            EquipmentId::HawkeyeEye => &mut self.hawkeye_eye,
            EquipmentId::DragonFang => &mut self.dragon_fang,
        }
    }

    pub fn level(&self, id: EquipmentId) -> u32 {
        self.get(id).level
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentItem> {
        [
            &self.void_blade,
            &self.aeon_clock,
            &self.essence_ring,
            &self.wind_bow,
            &self.hawkeye_eye,
            &self.dragon_fang,
        ]
        .into_iter()
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new()
    }
}

/// Soul-shard cost to raise any item from `current_level` to the next level.
/// Identical exponential curve for every slot.
pub fn upgrade_cost(current_level: u32) -> u64 {
    (EQUIPMENT_COST_GROWTH.powi(current_level as i32).floor() as u64).max(1)
}
