//! Per-game metric extraction from result records.

use crate::models::summary::GameResult;
use std::collections::BTreeMap;

/// Flat calibration metrics for one team-game.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub team: String,
    pub opponent: String,
    pub metrics: BTreeMap<String, f64>,
}

fn safe_div(num: f64, den: f64) -> f64 {
    if den.abs() < 1e-12 {
        0.0
    } else {
        num / den
    }
}

/// One metrics row per team: pace, ratings, rate stats and shot-diet
/// shares.
pub fn compute_game_metrics(result: &GameResult) -> Vec<GameMetrics> {
    let ids: Vec<&String> = result.teams.keys().collect();
    let mut out = Vec::new();
    for (i, team_id) in ids.iter().enumerate() {
        let team = &result.teams[*team_id];
        let opponent_id = if ids.len() > 1 { ids[1 - i].clone() } else { String::new() };
        let opp_drb = result
            .teams
            .get(&opponent_id)
            .map(|t| t.drb as f64)
            .unwrap_or(0.0);

        let poss = if team.possessions > 0 {
            team.possessions as f64
        } else {
            result.possessions_per_team as f64
        };
        let fga = team.fga as f64;
        let zone = |key: &str| -> f64 {
            team.shot_zones.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
        };

        let mut metrics = BTreeMap::new();
        metrics.insert("pace".to_string(), poss);
        metrics.insert("ortg".to_string(), safe_div(team.pts as f64, poss) * 100.0);
        metrics.insert("tov_pct".to_string(), safe_div(team.tov as f64, poss));
        metrics.insert("three_rate".to_string(), safe_div(team.tpa as f64, fga));
        metrics.insert("ftr".to_string(), safe_div(team.fta as f64, fga));
        metrics.insert(
            "orb_pct".to_string(),
            safe_div(team.orb as f64, team.orb as f64 + opp_drb),
        );
        metrics.insert("shot_share_rim".to_string(), safe_div(zone("rim"), fga));
        metrics.insert("shot_share_mid".to_string(), safe_div(zone("mid"), fga));
        metrics.insert("shot_share_three".to_string(), safe_div(zone("3"), fga));
        metrics.insert("shot_share_post".to_string(), safe_div(zone("post"), fga));

        out.push(GameMetrics {
            team: (*team_id).clone(),
            opponent: opponent_id,
            metrics,
        });
    }
    out
}
