//! Team record: roster, role assignments, tactics and per-game aggregates.

use crate::ids::{Ability, Action, DefAction, FitRole, Grade, Outcome, ShotZone, SlotRole};
use crate::models::player::Player;
use crate::models::tactics::TacticsConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Team counters accumulated during a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTotals {
    pub pts: i64,
    pub fgm: u32,
    pub fga: u32,
    pub tpm: u32,
    pub tpa: u32,
    pub ftm: u32,
    pub fta: u32,
    pub tov: u32,
    pub orb: u32,
    pub drb: u32,
    pub possessions: u32,
}

/// Per-player box line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBox {
    #[serde(rename = "PTS")]
    pub pts: i64,
    #[serde(rename = "FGM")]
    pub fgm: u32,
    #[serde(rename = "FGA")]
    pub fga: u32,
    #[serde(rename = "3PM")]
    pub tpm: u32,
    #[serde(rename = "3PA")]
    pub tpa: u32,
    #[serde(rename = "FTM")]
    pub ftm: u32,
    #[serde(rename = "FTA")]
    pub fta: u32,
    #[serde(rename = "TOV")]
    pub tov: u32,
    #[serde(rename = "ORB")]
    pub orb: u32,
    #[serde(rename = "DRB")]
    pub drb: u32,
}

/// TO/RESET tallies used by the role-fit diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BadOutcomeCounts {
    #[serde(rename = "TO")]
    pub turnovers: u32,
    #[serde(rename = "RESET")]
    pub resets: u32,
}

/// One role-fit application, logged per possession step.
#[derive(Debug, Clone, Serialize)]
pub struct RoleFitStepLog {
    pub action_family: String,
    pub applied: bool,
    pub n_roles: usize,
    pub fit_eff: f64,
    pub grade: Grade,
    pub role_fit_strength: f64,
    pub avg_mult_final: f64,
    pub delta_final: f64,
}

/// Role-fit diagnostics kept per team per game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleFitDiagnostics {
    pub pos_log: Vec<RoleFitStepLog>,
    pub role_counts: BTreeMap<String, u32>,
    pub grade_counts: BTreeMap<Grade, u32>,
    pub bad_totals: BadOutcomeCounts,
    pub bad_by_grade: BTreeMap<Grade, BadOutcomeCounts>,
}

/// A team entering a game: identity, 12-player lineup (first five start),
/// role assignments, tactics, and the aggregates the game mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamState {
    pub id: String,
    pub name: String,
    pub lineup: Vec<Player>,
    /// role name -> pid, covering both slot roles and scheme roles.
    #[serde(default)]
    pub roles: BTreeMap<String, String>,
    #[serde(default)]
    pub tactics: TacticsConfig,

    #[serde(skip)]
    pub totals: TeamTotals,
    #[serde(skip)]
    pub off_action_counts: BTreeMap<Action, u32>,
    #[serde(skip)]
    pub def_action_counts: BTreeMap<DefAction, u32>,
    #[serde(skip)]
    pub outcome_counts: BTreeMap<Outcome, u32>,
    #[serde(skip)]
    pub player_stats: BTreeMap<String, PlayerBox>,
    #[serde(skip)]
    pub shot_zones: BTreeMap<ShotZone, u32>,
    #[serde(skip)]
    pub role_fit: RoleFitDiagnostics,

    /// Validated role maps, filled by the validator.
    #[serde(skip)]
    pub slot_roles: BTreeMap<SlotRole, String>,
    #[serde(skip)]
    pub fit_roles: BTreeMap<FitRole, String>,
}

impl TeamState {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lineup: Vec<Player>) -> Self {
        TeamState {
            id: id.into(),
            name: name.into(),
            lineup,
            roles: BTreeMap::new(),
            tactics: TacticsConfig::default(),
            totals: TeamTotals::default(),
            off_action_counts: BTreeMap::new(),
            def_action_counts: BTreeMap::new(),
            outcome_counts: BTreeMap::new(),
            player_stats: BTreeMap::new(),
            shot_zones: BTreeMap::new(),
            role_fit: RoleFitDiagnostics::default(),
            slot_roles: BTreeMap::new(),
            fit_roles: BTreeMap::new(),
        }
    }

    pub fn find_player(&self, pid: &str) -> Option<usize> {
        self.lineup.iter().position(|p| p.pid == pid)
    }

    pub fn player(&self, idx: usize) -> &Player {
        &self.lineup[idx]
    }

    /// Box line for a pid, created on demand.
    pub fn box_mut(&mut self, pid: &str) -> &mut PlayerBox {
        self.player_stats.entry(pid.to_string()).or_default()
    }

    pub fn count_outcome(&mut self, outcome: Outcome) {
        *self.outcome_counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn count_off_action(&mut self, action: Action) {
        *self.off_action_counts.entry(action).or_insert(0) += 1;
    }

    pub fn count_def_action(&mut self, action: DefAction) {
        *self.def_action_counts.entry(action).or_insert(0) += 1;
    }

    pub fn count_shot_zone(&mut self, zone: ShotZone) {
        *self.shot_zones.entry(zone).or_insert(0) += 1;
    }

    /// Resolves a slot role to an on-court lineup index. A role pointing at
    /// a benched or missing player falls back to the on-court player ranking
    /// highest on the role's fallback ability.
    pub fn role_player_on_court(&self, role: SlotRole, on_court: &[usize]) -> usize {
        if let Some(pid) = self.slot_roles.get(&role) {
            if let Some(idx) = on_court
                .iter()
                .copied()
                .find(|i| self.lineup.get(*i).map(|p| p.pid == *pid).unwrap_or(false))
            {
                return idx;
            }
        }
        let key = role.fallback_rank();
        best_on_court(self, on_court, key)
    }

    /// Clears every per-game aggregate and per-player game state.
    pub fn reset_game_state(&mut self) {
        self.totals = TeamTotals::default();
        self.off_action_counts.clear();
        self.def_action_counts.clear();
        self.outcome_counts.clear();
        self.player_stats.clear();
        self.shot_zones.clear();
        self.role_fit = RoleFitDiagnostics::default();
        for p in &mut self.lineup {
            p.reset_game_state();
        }
        for p in &self.lineup {
            self.player_stats.insert(p.pid.clone(), PlayerBox::default());
        }
    }

    /// Average raw fatigue across the roster.
    pub fn avg_fatigue(&self) -> f64 {
        if self.lineup.is_empty() {
            return 0.0;
        }
        self.lineup.iter().map(|p| p.fatigue).sum::<f64>() / self.lineup.len() as f64
    }
}

/// On-court player with the highest fatigue-adjusted value of `key`.
/// Ties break toward the earlier lineup slot.
pub fn best_on_court(team: &TeamState, on_court: &[usize], key: Ability) -> usize {
    let mut best = on_court.first().copied().unwrap_or(0);
    let mut best_val = f64::NEG_INFINITY;
    for &idx in on_court {
        if idx >= team.lineup.len() {
            continue;
        }
        let v = team.lineup[idx].rated(key);
        if v > best_val {
            best_val = v;
            best = idx;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Position;

    fn team_of(abilities: &[(&str, Ability, f64)]) -> TeamState {
        let lineup: Vec<Player> = abilities
            .iter()
            .map(|(pid, key, v)| {
                let mut m = BTreeMap::new();
                m.insert(*key, *v);
                Player::with_ratings(*pid, *pid, Position::Guard, &m)
            })
            .collect();
        TeamState::new("t1", "Team One", lineup)
    }

    #[test]
    fn role_resolution_prefers_assignment_then_ability() {
        let mut team = team_of(&[
            ("a", Ability::PnrRead, 40.0),
            ("b", Ability::PnrRead, 90.0),
            ("c", Ability::PnrRead, 60.0),
        ]);
        let on_court = [0usize, 1, 2];

        // no assignment: best PNR_READ wins
        assert_eq!(team.role_player_on_court(SlotRole::BallHandler, &on_court), 1);

        team.slot_roles.insert(SlotRole::BallHandler, "c".to_string());
        assert_eq!(team.role_player_on_court(SlotRole::BallHandler, &on_court), 2);

        // assignment to a player not on court falls back to ability rank
        assert_eq!(team.role_player_on_court(SlotRole::BallHandler, &[0, 1]), 1);
    }

    #[test]
    fn reset_clears_counters_and_boxes() {
        let mut team = team_of(&[("a", Ability::PnrRead, 50.0)]);
        team.totals.pts = 12;
        team.count_outcome(Outcome::Shot3Cs);
        team.box_mut("a").pts = 7;
        team.reset_game_state();
        assert_eq!(team.totals, TeamTotals::default());
        assert!(team.outcome_counts.is_empty());
        assert_eq!(team.player_stats.get("a"), Some(&PlayerBox::default()));
    }
}
