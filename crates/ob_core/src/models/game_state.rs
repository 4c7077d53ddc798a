//! Shared per-game state: clocks, fouls, freshness and the on-court lists.

use crate::models::team::TeamState;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which bench a team occupies. Home is the team passed first to the game
/// loop; even possession indices put it on offense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Home,
    Away,
}

/// Identifies one scheduled game.
#[derive(Debug, Clone, Serialize)]
pub struct GameContext {
    pub game_id: String,
    pub home_team_id: String,
    pub away_team_id: String,
}

impl GameContext {
    pub fn new(
        game_id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
    ) -> Self {
        GameContext {
            game_id: game_id.into(),
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
        }
    }
}

/// Mutable state shared across a game. Created at tip-off, discarded at the
/// final whistle. Freshness is the substitution-trigger scalar (1 fresh,
/// 0 gassed); it is distinct from the raw per-player fatigue counter.
#[derive(Debug, Clone)]
pub struct GameState {
    pub quarter: u8,
    pub clock_sec: f64,
    pub shot_clock_sec: f64,
    pub possession: u32,
    /// pts by team id.
    pub scores: BTreeMap<String, i64>,
    /// team fouls in the current quarter, by team id.
    pub team_fouls: BTreeMap<String, u32>,
    /// personal fouls, persistent across quarters, by pid.
    pub player_fouls: BTreeMap<String, u8>,
    /// normalized freshness in [0, 1], by pid.
    pub freshness: BTreeMap<String, f64>,
    /// seconds played, by pid.
    pub minutes_played_sec: BTreeMap<String, u64>,
    pub on_court_home: Vec<String>,
    pub on_court_away: Vec<String>,
    /// minute targets in seconds, by pid.
    pub targets_home: BTreeMap<String, u64>,
    pub targets_away: BTreeMap<String, u64>,
}

impl GameState {
    pub fn at_tipoff(
        home: &TeamState,
        away: &TeamState,
        targets_home: BTreeMap<String, u64>,
        targets_away: BTreeMap<String, u64>,
    ) -> Self {
        let mut freshness = BTreeMap::new();
        let mut minutes = BTreeMap::new();
        for p in home.lineup.iter().chain(away.lineup.iter()) {
            freshness.insert(p.pid.clone(), 1.0);
            minutes.insert(p.pid.clone(), 0);
        }
        let mut scores = BTreeMap::new();
        scores.insert(home.id.clone(), 0);
        scores.insert(away.id.clone(), 0);
        let mut team_fouls = BTreeMap::new();
        team_fouls.insert(home.id.clone(), 0);
        team_fouls.insert(away.id.clone(), 0);
        GameState {
            quarter: 1,
            clock_sec: 0.0,
            shot_clock_sec: 0.0,
            possession: 0,
            scores,
            team_fouls,
            player_fouls: BTreeMap::new(),
            freshness,
            minutes_played_sec: minutes,
            on_court_home: home.lineup.iter().take(5).map(|p| p.pid.clone()).collect(),
            on_court_away: away.lineup.iter().take(5).map(|p| p.pid.clone()).collect(),
            targets_home,
            targets_away,
        }
    }

    pub fn on_court(&self, side: TeamSide) -> &Vec<String> {
        match side {
            TeamSide::Home => &self.on_court_home,
            TeamSide::Away => &self.on_court_away,
        }
    }

    pub fn on_court_mut(&mut self, side: TeamSide) -> &mut Vec<String> {
        match side {
            TeamSide::Home => &mut self.on_court_home,
            TeamSide::Away => &mut self.on_court_away,
        }
    }

    pub fn targets(&self, side: TeamSide) -> &BTreeMap<String, u64> {
        match side {
            TeamSide::Home => &self.targets_home,
            TeamSide::Away => &self.targets_away,
        }
    }

    pub fn freshness_of(&self, pid: &str) -> f64 {
        self.freshness.get(pid).copied().unwrap_or(1.0)
    }

    pub fn fouls_of(&self, pid: &str) -> u8 {
        self.player_fouls.get(pid).copied().unwrap_or(0)
    }

    pub fn add_seconds_played(&mut self, pids: &[String], delta_sec: f64) {
        let inc = delta_sec.max(0.0) as u64;
        for pid in pids {
            *self.minutes_played_sec.entry(pid.clone()).or_insert(0) += inc;
        }
    }
}
