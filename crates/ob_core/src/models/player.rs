//! Player record and rated-ability access.

use crate::ids::{Ability, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default value substituted for an absent derived ability.
pub const DERIVED_DEFAULT: f64 = 50.0;

/// Dense ability table built by the validator from the raw `derived` map.
///
/// Engine code never does string lookups on the hot path; it reads this
/// table through [`Ability`] indices.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityTable([f64; Ability::COUNT]);

impl Default for AbilityTable {
    fn default() -> Self {
        AbilityTable([DERIVED_DEFAULT; Ability::COUNT])
    }
}

impl AbilityTable {
    pub fn get(&self, key: Ability) -> f64 {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: Ability, value: f64) {
        self.0[key.index()] = value;
    }

    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let mut table = AbilityTable::default();
        for (k, v) in map {
            if let Some(a) = Ability::from_key(k) {
                table.set(a, *v);
            }
        }
        table
    }
}

/// A rostered player.
///
/// `derived` is the boundary representation (string keys, straight from
/// JSON); `ratings` is the validated dense table the engine reads. Mutable
/// per-game state is the raw fatigue counter (0 fresh, 100 gassed) and the
/// personal foul count; both reset only between games.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub pid: String,
    pub name: String,
    #[serde(default)]
    pub pos: Position,
    #[serde(default)]
    pub derived: BTreeMap<String, f64>,
    #[serde(default)]
    pub fatigue: f64,
    #[serde(skip)]
    pub fouls: u8,
    #[serde(skip)]
    pub ratings: AbilityTable,
}

impl Player {
    pub fn new(pid: impl Into<String>, name: impl Into<String>, pos: Position) -> Self {
        Player {
            pid: pid.into(),
            name: name.into(),
            pos,
            derived: BTreeMap::new(),
            fatigue: 0.0,
            fouls: 0,
            ratings: AbilityTable::default(),
        }
    }

    /// Builds a player whose ratings are already resolved. Test and harness
    /// helper; `derived` is filled so validation sees the same values.
    pub fn with_ratings(
        pid: impl Into<String>,
        name: impl Into<String>,
        pos: Position,
        ratings: &BTreeMap<Ability, f64>,
    ) -> Self {
        let mut p = Player::new(pid, name, pos);
        for (k, v) in ratings {
            p.derived.insert(k.as_str().to_string(), *v);
        }
        p.rebuild_ratings();
        p
    }

    /// Refreshes the dense table from the raw map. The validator calls this
    /// after sanitizing `derived`.
    pub fn rebuild_ratings(&mut self) {
        self.ratings = AbilityTable::from_map(&self.derived);
    }

    /// Rated ability, optionally discounted by fatigue.
    ///
    /// Fatigue model: 0..100 maps to a factor of 1.00 down to 0.82.
    pub fn get(&self, key: Ability, fatigue_sensitive: bool) -> f64 {
        let v = self.ratings.get(key);
        if !fatigue_sensitive {
            return v;
        }
        let f = (1.0 - self.fatigue / 560.0).clamp(0.82, 1.0);
        v * f
    }

    /// Rated ability with the fatigue discount applied (the common case).
    pub fn rated(&self, key: Ability) -> f64 {
        self.get(key, true)
    }

    /// Adds a fatigue cost scaled by endurance. ENDURANCE 100 pays roughly
    /// two thirds of the nominal cost.
    pub fn add_fatigue(&mut self, cost: f64) {
        let endu = self.ratings.get(Ability::Endurance);
        let gain = cost * (1.12 - endu / 220.0);
        self.fatigue = (self.fatigue + gain).clamp(0.0, 100.0);
    }

    /// Clears per-game mutable state.
    pub fn reset_game_state(&mut self) {
        self.fatigue = 0.0;
        self.fouls = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(key: Ability, value: f64) -> Player {
        let mut ratings = BTreeMap::new();
        ratings.insert(key, value);
        Player::with_ratings("p1", "P One", Position::Guard, &ratings)
    }

    #[test]
    fn missing_ability_defaults_to_fifty() {
        let p = Player::new("p1", "P One", Position::Guard);
        assert_eq!(p.get(Ability::Shot3Cs, false), DERIVED_DEFAULT);
    }

    #[test]
    fn fatigue_discount_is_bounded() {
        let mut p = player_with(Ability::Shot3Cs, 80.0);
        assert_eq!(p.rated(Ability::Shot3Cs), 80.0);
        p.fatigue = 100.0;
        let floor = p.rated(Ability::Shot3Cs);
        assert!(floor >= 80.0 * 0.82 - 1e-9);
        assert!(floor < 80.0);
    }

    #[test]
    fn endurance_discounts_fatigue_gain() {
        let mut strong = player_with(Ability::Endurance, 100.0);
        let mut weak = player_with(Ability::Endurance, 0.0);
        strong.add_fatigue(10.0);
        weak.add_fatigue(10.0);
        assert!(strong.fatigue < weak.fatigue);
        assert!((strong.fatigue - 10.0 * (1.12 - 100.0 / 220.0)).abs() < 1e-9);
    }

    #[test]
    fn fatigue_saturates() {
        let mut p = player_with(Ability::Endurance, 0.0);
        for _ in 0..1000 {
            p.add_fatigue(5.0);
        }
        assert_eq!(p.fatigue, 100.0);
    }
}
