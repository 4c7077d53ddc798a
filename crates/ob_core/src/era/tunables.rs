//! Named tuning handles for calibration sweeps.
//!
//! The registry maps abstract handle names onto the small set of scalar
//! multipliers the sweep tooling is allowed to nudge without editing era
//! tables. Snapshot/restore lets a sweep probe a direction and back out.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

/// Scalar multipliers layered on top of the active era tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tunables {
    pub shot_base_rim: f64,
    pub shot_base_mid: f64,
    pub shot_base_3: f64,
    pub orb_base: f64,
    pub to_base: f64,
    pub foul_base: f64,
    pub pass_base_success_mult: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Tunables {
            shot_base_rim: 1.0,
            shot_base_mid: 1.0,
            shot_base_3: 1.0,
            orb_base: 1.0,
            to_base: 1.0,
            foul_base: 1.0,
            pass_base_success_mult: 1.0,
        }
    }
}

impl Tunables {
    pub fn get(&self, key: TunableKey) -> f64 {
        match key {
            TunableKey::ShotBaseRim => self.shot_base_rim,
            TunableKey::ShotBaseMid => self.shot_base_mid,
            TunableKey::ShotBase3 => self.shot_base_3,
            TunableKey::OrbBase => self.orb_base,
            TunableKey::ToBase => self.to_base,
            TunableKey::FoulBase => self.foul_base,
            TunableKey::PassBaseSuccessMult => self.pass_base_success_mult,
        }
    }

    pub fn set(&mut self, key: TunableKey, value: f64) {
        match key {
            TunableKey::ShotBaseRim => self.shot_base_rim = value,
            TunableKey::ShotBaseMid => self.shot_base_mid = value,
            TunableKey::ShotBase3 => self.shot_base_3 = value,
            TunableKey::OrbBase => self.orb_base = value,
            TunableKey::ToBase => self.to_base = value,
            TunableKey::FoulBase => self.foul_base = value,
            TunableKey::PassBaseSuccessMult => self.pass_base_success_mult = value,
        }
    }
}

/// Handle names exposed to the sweep tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TunableKey {
    ShotBaseRim,
    ShotBaseMid,
    ShotBase3,
    OrbBase,
    ToBase,
    FoulBase,
    PassBaseSuccessMult,
}

impl TunableKey {
    pub const ALL: [TunableKey; 7] = [
        TunableKey::ShotBaseRim,
        TunableKey::ShotBaseMid,
        TunableKey::ShotBase3,
        TunableKey::OrbBase,
        TunableKey::ToBase,
        TunableKey::FoulBase,
        TunableKey::PassBaseSuccessMult,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TunableKey::ShotBaseRim => "SHOT_BASE_RIM",
            TunableKey::ShotBaseMid => "SHOT_BASE_MID",
            TunableKey::ShotBase3 => "SHOT_BASE_3",
            TunableKey::OrbBase => "ORB_BASE",
            TunableKey::ToBase => "TO_BASE",
            TunableKey::FoulBase => "FOUL_BASE",
            TunableKey::PassBaseSuccessMult => "PASS_BASE_SUCCESS_MULT",
        }
    }

    pub fn from_key(s: &str) -> Option<TunableKey> {
        TunableKey::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for TunableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TUNABLES: Lazy<RwLock<Tunables>> = Lazy::new(|| RwLock::new(Tunables::default()));

/// Deep copy of the current values.
pub fn snapshot() -> Tunables {
    *TUNABLES.read().expect("tunables lock")
}

/// Restores a previously captured snapshot.
pub fn restore(snap: Tunables) {
    *TUNABLES.write().expect("tunables lock") = snap;
}

/// Sets handles to absolute values. Unknown handle names are ignored.
pub fn apply_updates(updates: &BTreeMap<String, f64>) {
    let mut cur = TUNABLES.write().expect("tunables lock");
    for (name, value) in updates {
        if let Some(key) = TunableKey::from_key(name) {
            cur.set(key, *value);
        }
    }
}

/// Multiplies handles by relative factors. Unknown handle names are ignored.
pub fn apply_relative(updates: &BTreeMap<String, f64>) {
    let mut cur = TUNABLES.write().expect("tunables lock");
    for (name, mult) in updates {
        if let Some(key) = TunableKey::from_key(name) {
            let base = cur.get(key);
            cur.set(key, base * mult);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_updates_cover_every_handle() {
        let mut t = Tunables::default();
        for key in TunableKey::ALL {
            assert_eq!(t.get(key), 1.0);
            t.set(key, 0.9);
            assert_eq!(t.get(key), 0.9);
        }
    }

    // Mutations here stay value-neutral: other tests read the global
    // registry concurrently, and a 1.0 handle is indistinguishable from
    // the default.
    #[test]
    fn global_snapshot_restore_round_trip() {
        let snap = snapshot();
        let mut updates = BTreeMap::new();
        updates.insert("SHOT_BASE_3".to_string(), 1.0);
        updates.insert("NOT_A_HANDLE".to_string(), 5.0);
        apply_updates(&updates);
        assert_eq!(snapshot().shot_base_3, 1.0);

        let mut rel = BTreeMap::new();
        rel.insert("ORB_BASE".to_string(), 1.0);
        apply_relative(&rel);
        assert_eq!(snapshot().orb_base, snap.orb_base);

        restore(snap);
        assert_eq!(snapshot(), snap);
    }

    #[test]
    fn handle_names_round_trip() {
        for k in TunableKey::ALL {
            assert_eq!(TunableKey::from_key(k.as_str()), Some(k));
        }
    }
}
