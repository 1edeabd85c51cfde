use rand::Rng;
use serde::{Deserialize, Serialize};

/// The six infinite passive tracks. Each kill feeds one random track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassiveTrackId {
    Attack,
    Mana,
    Speed,
    CritRate,
    CritDamage,
    Luck,
}

impl PassiveTrackId {
    pub fn all() -> [PassiveTrackId; 6] {
        [
            PassiveTrackId::Attack,
            PassiveTrackId::Mana,
            PassiveTrackId::Speed,
            PassiveTrackId::CritRate,
            PassiveTrackId::CritDamage,
            PassiveTrackId::Luck,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PassiveTrackId::Attack => "Attack",
            PassiveTrackId::Mana => "Mana",
            PassiveTrackId::Speed => "Speed",
            PassiveTrackId::CritRate => "Crit Rate",
            PassiveTrackId::CritDamage => "Crit Damage",
            PassiveTrackId::Luck => "Luck",
        }
    }
}

/// One uncapped progression track fed by essence drops.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PassiveTrack {
    pub level: u32,
    pub essence: u64,
    pub required_essence: u64,
}

impl PassiveTrack {
    fn new() -> Self {
        Self {
            level: 0,
            essence: 0,
            required_essence: 10,
        }
    }
}

/// All six tracks plus their bonus accessors, consumed by stat derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassiveTracks {
    pub attack: PassiveTrack,
    pub mana: PassiveTrack,
    pub speed: PassiveTrack,
    pub crit_rate: PassiveTrack,
    pub crit_damage: PassiveTrack,
    pub luck: PassiveTrack,
}

impl PassiveTracks {
    pub fn new() -> Self {
        Self {
            attack: PassiveTrack::new(),
            mana: PassiveTrack::new(),
            speed: PassiveTrack::new(),
            crit_rate: PassiveTrack::new(),
            crit_damage: PassiveTrack::new(),
            luck: PassiveTrack::new(),
        }
    }

    pub fn get(&self, id: PassiveTrackId) -> &PassiveTrack {
        match id {
            PassiveTrackId::Attack => &self.attack,
            PassiveTrackId::Mana => &self.mana,
            PassiveTrackId::Speed => &self.speed,
            PassiveTrackId::CritRate => &self.crit_rate,
            PassiveTrackId::CritDamage => &self.crit_damage,
            PassiveTrackId::Luck => &self.luck,
        }
    }

    fn get_mut(&mut self, id: PassiveTrackId) -> &mut PassiveTrack {
        match id {
            PassiveTrackId::Attack => &mut self.attack,
            PassiveTrackId::Mana => &mut self.mana,
            PassiveTrackId::Speed => &mut self.speed,
            PassiveTrackId::CritRate => &mut self.crit_rate,
            PassiveTrackId::CritDamage => &mut self.crit_damage,
            PassiveTrackId::Luck => &mut self.luck,
        }
    }

    /// Adds essence to a track. Levels up at most ONCE per call, even when
    /// `amount` alone would cross several thresholds; overflow is discarded
    /// (essence resets to 0 on level-up). Returns the new level on level-up.
    pub fn add_essence(&mut self, id: PassiveTrackId, amount: u64) -> Option<u32> {
        let track = self.get_mut(id);
        track.essence += amount;
        if track.essence >= track.required_essence {
            track.level += 1;
            track.essence = 0;
            track.required_essence = 10 + track.level as u64 * 2;
            Some(track.level)
        } else {
            None
        }
    }

    // Per-level bonus coefficients. Multipliers are purely additive per
    // level; none of these are clamped.

    /// Attack multiplier: +0.2% per level.
    pub fn attack_mult(&self) -> f64 {
        1.0 + self.attack.level as f64 * 0.002
    }

    /// Mana-gain multiplier: +1% per level.
    pub fn mana_mult(&self) -> f64 {
        1.0 + self.mana.level as f64 * 0.01
    }

    /// Attack-speed multiplier: +0.5% per level.
    pub fn speed_mult(&self) -> f64 {
        1.0 + self.speed.level as f64 * 0.005
    }

    /// Flat crit-rate points: +0.1 per level (applied inside the cap).
    pub fn crit_rate_bonus(&self) -> f64 {
        self.crit_rate.level as f64 * 0.1
    }

    /// Crit-damage multiplier: +0.5% per level.
    pub fn crit_damage_mult(&self) -> f64 {
        1.0 + self.crit_damage.level as f64 * 0.005
    }

    /// Effective LUK granted for milestone purposes: +0.5 per level.
    pub fn bonus_luk(&self) -> f64 {
        self.luck.level as f64 * 0.5
    }
}

impl Default for PassiveTracks {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the track receiving a kill's essence drop, uniformly.
pub fn random_track(rng: &mut impl Rng) -> PassiveTrackId {
    PassiveTrackId::all()[rng.gen_range(0..6)]
}
