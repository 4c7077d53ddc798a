//! Result record emitted after the final whistle.

use crate::ids::ShotZone;
use crate::models::game_state::GameState;
use crate::models::team::{PlayerBox, RoleFitDiagnostics, TeamState};
use crate::validate::ValidationSummary;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-team box summary. Histogram objects are emitted in descending count
/// order (ties alphabetical), which is why JSON object order is preserved.
#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
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
    #[serde(rename = "Possessions")]
    pub possessions: u32,
    #[serde(rename = "OffActionCounts")]
    pub off_action_counts: Map<String, Value>,
    #[serde(rename = "DefActionCounts")]
    pub def_action_counts: Map<String, Value>,
    #[serde(rename = "OutcomeCounts")]
    pub outcome_counts: Map<String, Value>,
    #[serde(rename = "Players")]
    pub players: BTreeMap<String, PlayerBox>,
    #[serde(rename = "AvgFatigue")]
    pub avg_fatigue: f64,
    #[serde(rename = "ShotZones")]
    pub shot_zones: Map<String, Value>,
}

fn desc_histogram<I>(entries: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (String, u32)>,
{
    let mut rows: Vec<(String, u32)> = entries.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut out = Map::new();
    for (k, v) in rows {
        out.insert(k, Value::from(v));
    }
    out
}

impl TeamSummary {
    pub fn from_team(team: &TeamState) -> Self {
        let shot_zones = {
            let mut out = Map::new();
            for zone in ShotZone::ALL {
                let n = team.shot_zones.get(&zone).copied().unwrap_or(0);
                out.insert(zone.as_str().to_string(), Value::from(n));
            }
            out
        };
        TeamSummary {
            pts: team.totals.pts,
            fgm: team.totals.fgm,
            fga: team.totals.fga,
            tpm: team.totals.tpm,
            tpa: team.totals.tpa,
            ftm: team.totals.ftm,
            fta: team.totals.fta,
            tov: team.totals.tov,
            orb: team.totals.orb,
            drb: team.totals.drb,
            possessions: team.totals.possessions,
            off_action_counts: desc_histogram(
                team.off_action_counts.iter().map(|(k, v)| (k.as_str().to_string(), *v)),
            ),
            def_action_counts: desc_histogram(
                team.def_action_counts.iter().map(|(k, v)| (k.as_str().to_string(), *v)),
            ),
            outcome_counts: desc_histogram(
                team.outcome_counts.iter().map(|(k, v)| (k.as_str().to_string(), *v)),
            ),
            players: team.player_stats.clone(),
            avg_fatigue: team.avg_fatigue(),
            shot_zones,
        }
    }
}

/// Role-fit diagnostics for both teams, keyed by team id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleFitDebug {
    pub role_counts: BTreeMap<String, BTreeMap<String, u32>>,
    pub grade_counts: BTreeMap<String, BTreeMap<String, u32>>,
    pub pos_log: BTreeMap<String, Vec<crate::models::team::RoleFitStepLog>>,
    pub bad_totals: BTreeMap<String, crate::models::team::BadOutcomeCounts>,
    pub bad_by_grade: BTreeMap<String, BTreeMap<String, crate::models::team::BadOutcomeCounts>>,
}

impl RoleFitDebug {
    pub fn insert_team(&mut self, team_id: &str, diag: &RoleFitDiagnostics) {
        self.role_counts.insert(team_id.to_string(), diag.role_counts.clone());
        self.grade_counts.insert(
            team_id.to_string(),
            diag.grade_counts.iter().map(|(g, n)| (g.as_str().to_string(), *n)).collect(),
        );
        self.pos_log.insert(team_id.to_string(), diag.pos_log.clone());
        self.bad_totals.insert(team_id.to_string(), diag.bad_totals);
        self.bad_by_grade.insert(
            team_id.to_string(),
            diag.bad_by_grade.iter().map(|(g, c)| (g.as_str().to_string(), *c)).collect(),
        );
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InternalDebug {
    pub role_fit: RoleFitDebug,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameMeta {
    pub engine_version: String,
    pub era: String,
    pub era_version: String,
    pub replay_token: String,
    pub validation: ValidationSummary,
    pub internal_debug: InternalDebug,
}

/// Final game-state snapshot. `fatigue` carries the normalized freshness
/// map (1 fresh, 0 gassed), mirroring the live substitution scalar.
#[derive(Debug, Clone, Serialize)]
pub struct GameStateOut {
    pub team_fouls: BTreeMap<String, u32>,
    pub player_fouls: BTreeMap<String, u8>,
    pub fatigue: BTreeMap<String, f64>,
    pub minutes_played_sec: BTreeMap<String, u64>,
    pub scores: BTreeMap<String, i64>,
}

impl GameStateOut {
    pub fn from_state(state: &GameState) -> Self {
        GameStateOut {
            team_fouls: state.team_fouls.clone(),
            player_fouls: state.player_fouls.clone(),
            fatigue: state.freshness.clone(),
            minutes_played_sec: state.minutes_played_sec.clone(),
            scores: state.scores.clone(),
        }
    }
}

/// Full output record of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub meta: GameMeta,
    pub possessions_per_team: u32,
    pub teams: BTreeMap<String, TeamSummary>,
    pub game_state: GameStateOut,
}
