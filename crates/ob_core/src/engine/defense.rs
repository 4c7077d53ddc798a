//! Defensive snapshot: a compact ability view of the on-court defense.
//!
//! No individual matchups; the best on-ball, rim and steal defenders
//! anchor those keys, the rest are on-court averages.

use crate::ids::Ability;
use crate::models::team::{best_on_court, TeamState};

/// Team defense snapshot for dot products against outcome profiles.
#[derive(Debug, Clone, Copy)]
pub struct DefSnapshot {
    pub poa: f64,
    pub rim: f64,
    pub steal: f64,
    pub help: f64,
    pub post: f64,
    pub physical: f64,
    pub endurance: f64,
}

impl DefSnapshot {
    /// Snapshot value for a defensive profile key; anything the snapshot
    /// does not carry reads as the neutral 50.
    pub fn value(&self, key: Ability) -> f64 {
        match key {
            Ability::DefPoa => self.poa,
            Ability::DefRim => self.rim,
            Ability::DefSteal => self.steal,
            Ability::DefHelp => self.help,
            Ability::DefPost => self.post,
            Ability::Physical => self.physical,
            Ability::Endurance => self.endurance,
            _ => 50.0,
        }
    }

    /// Weighted dot product against a defensive coefficient vector.
    pub fn dot(&self, profile: &[(Ability, f64)]) -> f64 {
        profile.iter().map(|(k, w)| self.value(*k) * w).sum()
    }
}

pub fn team_def_snapshot(team: &TeamState, on_court: &[usize]) -> DefSnapshot {
    let avg = |key: Ability| -> f64 {
        if on_court.is_empty() {
            return 50.0;
        }
        on_court.iter().map(|i| team.lineup[*i].rated(key)).sum::<f64>() / on_court.len() as f64
    };
    let best = |key: Ability| -> f64 {
        let idx = best_on_court(team, on_court, key);
        team.lineup.get(idx).map(|p| p.rated(key)).unwrap_or(50.0)
    };
    DefSnapshot {
        poa: best(Ability::DefPoa),
        rim: best(Ability::DefRim),
        steal: best(Ability::DefSteal),
        help: avg(Ability::DefHelp),
        post: avg(Ability::DefPost),
        physical: avg(Ability::Physical),
        endurance: avg(Ability::Endurance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Position;
    use crate::models::player::Player;
    use std::collections::BTreeMap;

    #[test]
    fn snapshot_mixes_best_and_average() {
        let mut lineup = Vec::new();
        for (i, (poa, help)) in [(80.0, 40.0), (50.0, 60.0), (30.0, 50.0), (45.0, 70.0), (55.0, 30.0)]
            .iter()
            .enumerate()
        {
            let mut m = BTreeMap::new();
            m.insert(Ability::DefPoa, *poa);
            m.insert(Ability::DefHelp, *help);
            lineup.push(Player::with_ratings(format!("p{i}"), format!("p{i}"), Position::Guard, &m));
        }
        let team = TeamState::new("t", "T", lineup);
        let snap = team_def_snapshot(&team, &[0, 1, 2, 3, 4]);
        assert!((snap.poa - 80.0).abs() < 1e-9);
        assert!((snap.help - 50.0).abs() < 1e-9);
        // keys outside the snapshot read neutral
        assert_eq!(snap.value(Ability::Shot3Cs), 50.0);
    }
}
