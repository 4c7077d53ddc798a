//! Participant selection: which on-court player takes the sampled
//! outcome. Selection is ability-weighted among small candidate pools so
//! stars shoulder more of the load without monopolizing it.

use crate::ids::{Ability, Action, Outcome, SlotRole};
use crate::models::team::TeamState;
use rand::Rng;
use std::collections::BTreeMap;

use super::weighted_choice;

/// Weighted pick among candidate lineup indices, weight `rated(key)^power`
/// floored at 1 so a zero rating still has a sliver of a chance.
pub fn choose_weighted_player<R: Rng>(
    rng: &mut R,
    team: &TeamState,
    candidates: &[usize],
    key: Ability,
    power: f64,
) -> usize {
    if candidates.len() <= 1 {
        return candidates.first().copied().unwrap_or(0);
    }
    let weights: BTreeMap<usize, f64> = candidates
        .iter()
        .map(|idx| (*idx, team.lineup[*idx].rated(key).max(1.0).powf(power)))
        .collect();
    weighted_choice(rng, &weights).unwrap_or(candidates[0])
}

/// Top `n` on-court players by a sort key (ties keep lineup order).
fn top_by<F: Fn(usize) -> f64>(on_court: &[usize], n: usize, score: F) -> Vec<usize> {
    let mut sorted: Vec<usize> = on_court.to_vec();
    sorted.sort_by(|a, b| {
        score(*b).partial_cmp(&score(*a)).unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

pub fn choose_shooter_for_three<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
) -> usize {
    let cand = top_by(on_court, 3, |i| offense.lineup[i].rated(Ability::Shot3Cs));
    choose_weighted_player(rng, offense, &cand, Ability::Shot3Cs, 1.35)
}

pub fn choose_shooter_for_mid<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
) -> usize {
    let cand = top_by(on_court, 3, |i| offense.lineup[i].rated(Ability::ShotMidCs));
    choose_weighted_player(rng, offense, &cand, Ability::ShotMidCs, 1.25)
}

/// Pull-up shots go to one of the two handlers, weighted by the shot key.
pub fn choose_creator_for_pulloff<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
    outcome: Outcome,
) -> usize {
    let bh = offense.role_player_on_court(SlotRole::BallHandler, on_court);
    let sh = offense.role_player_on_court(SlotRole::SecondaryHandler, on_court);
    let cand: Vec<usize> = if bh == sh { vec![bh] } else { vec![bh, sh] };
    let key = if outcome == Outcome::Shot3Od { Ability::Shot3Od } else { Ability::ShotMidPu };
    choose_weighted_player(rng, offense, &cand, key, 1.20)
}

/// Rim finishes pick among the handler, rim runner, screener and cutter.
pub fn choose_finisher_rim<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
    dunk_bias: bool,
) -> usize {
    let cand = [
        offense.role_player_on_court(SlotRole::BallHandler, on_court),
        offense.role_player_on_court(SlotRole::RimRunner, on_court),
        offense.role_player_on_court(SlotRole::Screener, on_court),
        offense.role_player_on_court(SlotRole::Cutter, on_court),
    ];
    let mut uniq = Vec::new();
    for idx in cand {
        if !uniq.contains(&idx) {
            uniq.push(idx);
        }
    }
    let key = if dunk_bias { Ability::FinDunk } else { Ability::FinRim };
    choose_weighted_player(rng, offense, &uniq, key, 1.15)
}

pub fn choose_post_target(offense: &TeamState, on_court: &[usize]) -> usize {
    offense.role_player_on_court(SlotRole::Post, on_court)
}

/// Passer heuristic: short-roll from the screener, post family from the
/// post hub, drives from the better of handler/top driver, else handler.
pub fn choose_passer<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
    base_action: Action,
    outcome: Outcome,
) -> usize {
    if outcome == Outcome::PassShortroll {
        return offense.role_player_on_court(SlotRole::Screener, on_court);
    }
    if base_action == Action::PostUp {
        return offense.role_player_on_court(SlotRole::Post, on_court);
    }
    let bh = offense.role_player_on_court(SlotRole::BallHandler, on_court);
    if base_action == Action::Drive {
        let driver = crate::models::team::best_on_court(offense, on_court, Ability::DriveCreate);
        let cand: Vec<usize> = if bh == driver { vec![bh] } else { vec![bh, driver] };
        return choose_weighted_player(rng, offense, &cand, Ability::PassCreate, 1.10);
    }
    bh
}

/// Offensive rebounder: top three by `REB_OR + 0.2 * PHYSICAL`, weighted
/// by raw offensive rebounding.
pub fn choose_orb_rebounder<R: Rng>(
    rng: &mut R,
    offense: &TeamState,
    on_court: &[usize],
) -> usize {
    let cand = top_by(on_court, 3, |i| {
        offense.lineup[i].rated(Ability::RebOr) + 0.20 * offense.lineup[i].rated(Ability::Physical)
    });
    choose_weighted_player(rng, offense, &cand, Ability::RebOr, 1.15)
}

pub fn choose_drb_rebounder<R: Rng>(
    rng: &mut R,
    defense: &TeamState,
    on_court: &[usize],
) -> usize {
    let cand = top_by(on_court, 3, |i| {
        defense.lineup[i].rated(Ability::RebDr) + 0.20 * defense.lineup[i].rated(Ability::Physical)
    });
    choose_weighted_player(rng, defense, &cand, Ability::RebDr, 1.10)
}
