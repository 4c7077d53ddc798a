//! Fatigue-driven rotation: freshness decay, minute targets and the
//! substitution pass that runs after every possession.

use crate::era::GameRules;
use crate::ids::{OffScheme, SlotRole};
use crate::models::game_state::{GameState, TeamSide};
use crate::models::team::TeamState;
use std::collections::BTreeMap;

/// Minute targets by lineup slot: starters, the 6-8 rotation, then the
/// bench split into two tiers.
pub fn init_targets(team: &TeamState, rules: &GameRules) -> BTreeMap<String, u64> {
    let t = &rules.targets;
    team.lineup
        .iter()
        .enumerate()
        .map(|(slot, p)| {
            let target = match slot {
                0..=4 => t.starter_sec,
                5..=7 => t.rotation_sec,
                8..=9 => t.bench_high_sec,
                _ => t.bench_low_sec,
            };
            (p.pid.clone(), target)
        })
        .collect()
}

fn role_bucket(team: &TeamState, pid: &str) -> RoleBucket {
    let mut bucket = RoleBucket::Wing;
    let is_slot = |role: SlotRole| team.slot_roles.get(&role).map(String::as_str) == Some(pid);
    if is_slot(SlotRole::BallHandler) || is_slot(SlotRole::SecondaryHandler) {
        bucket = RoleBucket::Handler;
    } else if is_slot(SlotRole::Screener) || is_slot(SlotRole::Post) {
        bucket = RoleBucket::Big;
    }
    if let Some(idx) = team.find_player(pid) {
        if team.lineup[idx].pos.is_big() {
            bucket = RoleBucket::Big;
        }
    }
    bucket
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleBucket {
    Handler,
    Wing,
    Big,
}

/// Per-possession freshness decay for everyone on the floor. Handlers pay
/// the most, bigs the least; transition emphasis and a heavy-PnR identity
/// add a surcharge.
pub fn apply_freshness_loss(
    team: &TeamState,
    on_court: &[String],
    game_state: &mut GameState,
    rules: &GameRules,
) {
    let fl = &rules.freshness_loss;
    let ctx = &team.tactics.resolved.context;
    let heavy_pnr =
        ctx.heavy_pnr || team.tactics.resolved.offense_scheme == OffScheme::SpreadHeavyPnr;
    for pid in on_court {
        let bucket = role_bucket(team, pid);
        let mut loss = match bucket {
            RoleBucket::Handler => fl.handler,
            RoleBucket::Wing => fl.wing,
            RoleBucket::Big => fl.big,
        };
        if ctx.transition_emphasis {
            loss += fl.transition_emphasis;
        }
        if heavy_pnr && bucket != RoleBucket::Wing {
            loss += fl.heavy_pnr;
        }
        let fresh = game_state.freshness.entry(pid.clone()).or_insert(1.0);
        *fresh = (*fresh - loss).clamp(0.0, 1.0);
    }
}

/// Substitution pass, up to two swaps per call.
///
/// Out-candidates: gassed below the sub-out threshold, fouled out, over
/// minute target, or (in garbage time) high-target players making room.
/// In-candidates: fresh bench players still under their target. Selection
/// favors the bench player furthest below target, tie-break by freshness.
pub fn perform_rotation(
    team: &TeamState,
    side: TeamSide,
    game_state: &mut GameState,
    rules: &GameRules,
    is_garbage: bool,
) {
    let sub_out = rules.freshness_thresholds.sub_out;
    let sub_in = rules.freshness_thresholds.sub_in;
    let foul_out = rules.foul_out;

    let targets = game_state.targets(side).clone();
    let mut on_court = game_state.on_court(side).clone();
    let bench: Vec<String> = team
        .lineup
        .iter()
        .filter(|p| !on_court.contains(&p.pid) && game_state.fouls_of(&p.pid) < foul_out)
        .map(|p| p.pid.clone())
        .collect();

    let target_of = |pid: &str| targets.get(pid).copied().unwrap_or(0);
    let minutes_of =
        |pid: &str| game_state.minutes_played_sec.get(pid).copied().unwrap_or(0);

    let mut out_candidates: Vec<String> = Vec::new();
    let anchor_target = on_court.first().map(|pid| target_of(pid)).unwrap_or(0);
    for pid in &on_court {
        let tired = game_state.freshness_of(pid) < sub_out
            || game_state.fouls_of(pid) >= foul_out;
        let over_target = minutes_of(pid) > target_of(pid) + 120;
        if tired || over_target {
            out_candidates.push(pid.clone());
        } else if is_garbage && target_of(pid) >= anchor_target {
            out_candidates.push(pid.clone());
        }
    }

    let mut in_candidates: Vec<String> = bench
        .into_iter()
        .filter(|pid| {
            game_state.freshness_of(pid) > sub_in && minutes_of(pid) <= target_of(pid) + 240
        })
        .collect();

    out_candidates.sort_by(|a, b| {
        game_state
            .freshness_of(a)
            .partial_cmp(&game_state.freshness_of(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut swaps = 0;
    for pid_out in out_candidates {
        if swaps >= 2 || in_candidates.is_empty() {
            break;
        }
        // bench player furthest below target, tie-break by freshness
        let mut best: Option<(usize, i64, f64)> = None;
        for (i, pid) in in_candidates.iter().enumerate() {
            let deficit = target_of(pid) as i64 - minutes_of(pid) as i64;
            let fresh = game_state.freshness_of(pid);
            let better = match best {
                None => true,
                Some((_, d, f)) => deficit > d || (deficit == d && fresh > f),
            };
            if better {
                best = Some((i, deficit, fresh));
            }
        }
        let Some((pick, _, _)) = best else { break };
        let pid_in = in_candidates.remove(pick);
        if let Some(slot) = on_court.iter().position(|pid| *pid == pid_out) {
            log::debug!("sub: {pid_out} -> {pid_in}");
            on_court[slot] = pid_in;
            swaps += 1;
        }
    }

    on_court.truncate(5);
    *game_state.on_court_mut(side) = on_court;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::default_era;
    use crate::ids::{Ability, Position};
    use crate::models::player::Player;

    fn twelve_man_team() -> TeamState {
        let lineup: Vec<Player> = (0..12)
            .map(|i| {
                let mut m = BTreeMap::new();
                m.insert(Ability::Endurance, 60.0);
                Player::with_ratings(format!("p{i}"), format!("p{i}"), Position::Guard, &m)
            })
            .collect();
        TeamState::new("t", "T", lineup)
    }

    fn fresh_state(team: &TeamState, rules: &crate::era::GameRules) -> GameState {
        let other = TeamState::new("x", "X", team.lineup.clone());
        GameState::at_tipoff(team, &other, init_targets(team, rules), BTreeMap::new())
    }

    #[test]
    fn targets_follow_lineup_slots() {
        let rules = default_era().rules;
        let team = twelve_man_team();
        let targets = init_targets(&team, &rules);
        assert_eq!(targets["p0"], 32 * 60);
        assert_eq!(targets["p6"], 20 * 60);
        assert_eq!(targets["p8"], 12 * 60);
        assert_eq!(targets["p11"], 6 * 60);
    }

    #[test]
    fn gassed_starter_is_replaced_by_fresh_bench() {
        let rules = default_era().rules;
        let team = twelve_man_team();
        let mut state = fresh_state(&team, &rules);
        state.freshness.insert("p0".to_string(), 0.10);
        perform_rotation(&team, TeamSide::Home, &mut state, &rules, false);
        assert!(!state.on_court_home.contains(&"p0".to_string()));
        assert_eq!(state.on_court_home.len(), 5);
    }

    #[test]
    fn fouled_out_player_cannot_reenter() {
        let rules = default_era().rules;
        let team = twelve_man_team();
        let mut state = fresh_state(&team, &rules);
        // p0 fouls out; p5 also fouled out on the bench must not come in
        state.player_fouls.insert("p0".to_string(), rules.foul_out);
        state.freshness.insert("p0".to_string(), 0.0);
        state.player_fouls.insert("p5".to_string(), rules.foul_out);
        perform_rotation(&team, TeamSide::Home, &mut state, &rules, false);
        assert!(!state.on_court_home.contains(&"p0".to_string()));
        assert!(!state.on_court_home.contains(&"p5".to_string()));
        // later passes never bring him back while the fouls stand
        for _ in 0..10 {
            perform_rotation(&team, TeamSide::Home, &mut state, &rules, false);
            assert!(!state.on_court_home.contains(&"p0".to_string()));
        }
    }

    #[test]
    fn at_most_two_swaps_per_pass() {
        let rules = default_era().rules;
        let team = twelve_man_team();
        let mut state = fresh_state(&team, &rules);
        for i in 0..5 {
            state.freshness.insert(format!("p{i}"), 0.05);
        }
        let before = state.on_court_home.clone();
        perform_rotation(&team, TeamSide::Home, &mut state, &rules, false);
        let replaced = before
            .iter()
            .filter(|pid| !state.on_court_home.contains(*pid))
            .count();
        assert_eq!(replaced, 2);
    }

    #[test]
    fn freshness_decay_hits_handlers_hardest() {
        let rules = default_era().rules;
        let mut team = twelve_man_team();
        // keep the heavy-PnR surcharge out of the comparison
        team.tactics.resolved.offense_scheme = OffScheme::DriveKick;
        team.slot_roles.insert(SlotRole::BallHandler, "p0".to_string());
        team.slot_roles.insert(SlotRole::Screener, "p4".to_string());
        let mut state = fresh_state(&team, &rules);
        let on_court: Vec<String> = (0..5).map(|i| format!("p{i}")).collect();
        apply_freshness_loss(&team, &on_court, &mut state, &rules);
        let f = |pid: &str| state.freshness_of(pid);
        assert!(f("p0") < f("p1"), "handler should tire faster than wing");
        assert!(f("p4") > f("p1"), "big decays slower than wing");
        assert!(state.freshness.values().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn garbage_time_prefers_resting_high_target_players() {
        let rules = default_era().rules;
        let team = twelve_man_team();
        let mut state = fresh_state(&team, &rules);
        perform_rotation(&team, TeamSide::Home, &mut state, &rules, true);
        // starters share the starter target, so two make way for the bench
        let replaced = (0..5)
            .filter(|i| !state.on_court_home.contains(&format!("p{i}")))
            .count();
        assert_eq!(replaced, 2);
    }
}
