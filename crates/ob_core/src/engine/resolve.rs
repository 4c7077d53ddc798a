//! Resolution engine: turns a sampled outcome into scored events, fouls,
//! turnovers, free throws and rebounds.

use crate::era::{EraConfig, Tunables};
use crate::ids::{Ability, Action, Outcome, OutcomeKind, ShotZone, SlotRole};
use crate::models::game_state::GameState;
use crate::models::team::TeamState;
use rand::Rng;

use super::builders::StepTags;
use super::defense::team_def_snapshot;
use super::participants::{
    choose_creator_for_pulloff, choose_finisher_rim, choose_passer, choose_post_target,
    choose_shooter_for_mid, choose_shooter_for_three,
};
use super::prob::{dot_profile, prob_from_scores};
use super::profiles::outcome_profile;

/// What a resolved step means for the possession state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Score,
    Miss,
    Turnover,
    Foul,
    Reset,
    Continue { pass_chain: u32 },
}

/// Per-possession context assembled by the game loop.
#[derive(Debug, Clone, Copy)]
pub struct PossessionCtx {
    pub score_diff: i64,
    pub is_clutch: bool,
    pub is_garbage: bool,
    pub variance_mult: f64,
    pub tempo_mult: f64,
    pub def_eff_mult: f64,
    pub fatigue_logit_max: f64,
    pub foul_out: u8,
}

impl Default for PossessionCtx {
    fn default() -> Self {
        PossessionCtx {
            score_diff: 0,
            is_clutch: false,
            is_garbage: false,
            variance_mult: 1.0,
            tempo_mult: 1.0,
            def_eff_mult: 1.0,
            fatigue_logit_max: -0.25,
            foul_out: 6,
        }
    }
}

/// Per-step fatigue costs (raw ability-side counter).
const STEP_COST_OFF: f64 = 0.42;
const STEP_COST_OFF_TRANSITION: f64 = 0.58;
const STEP_COST_DEF: f64 = 0.40;
const STEP_COST_DEF_TRANSITION: f64 = 0.54;

fn charge_step_fatigue(
    offense: &mut TeamState,
    defense: &mut TeamState,
    off_court: &[usize],
    def_court: &[usize],
    in_transition: bool,
) {
    let (off_cost, def_cost) = if in_transition {
        (STEP_COST_OFF_TRANSITION, STEP_COST_DEF_TRANSITION)
    } else {
        (STEP_COST_OFF, STEP_COST_DEF)
    };
    for idx in off_court {
        offense.lineup[*idx].add_fatigue(off_cost);
    }
    for idx in def_court {
        defense.lineup[*idx].add_fatigue(def_cost);
    }
}

fn shot_base_kind_mult(tunables: &Tunables, kind: OutcomeKind) -> f64 {
    match kind {
        OutcomeKind::ShotRim => tunables.shot_base_rim,
        OutcomeKind::ShotMid => tunables.shot_base_mid,
        _ => tunables.shot_base_3,
    }
}

fn book_made_shot(offense: &mut TeamState, pid: &str, points: i64) {
    offense.totals.fgm += 1;
    offense.totals.pts += points;
    let b = offense.box_mut(pid);
    b.fgm += 1;
    b.pts += points;
    if points == 3 {
        offense.totals.tpm += 1;
        offense.box_mut(pid).tpm += 1;
    }
}

fn book_shot_attempt(offense: &mut TeamState, pid: &str, points: i64, zone: Option<ShotZone>) {
    offense.totals.fga += 1;
    offense.box_mut(pid).fga += 1;
    if points == 3 {
        offense.totals.tpa += 1;
        offense.box_mut(pid).tpa += 1;
    }
    if let Some(zone) = zone {
        offense.count_shot_zone(zone);
    }
}

/// Per-FT make probability scales with the shooter's SHOT_FT rating.
pub fn resolve_free_throws<R: Rng>(
    rng: &mut R,
    era: &EraConfig,
    offense: &mut TeamState,
    shooter_idx: usize,
    n: u32,
) {
    let pm = &era.prob_model;
    let ft = offense.lineup[shooter_idx].rated(Ability::ShotFt);
    let p = (pm.ft_base + (ft / 100.0) * pm.ft_range).clamp(pm.ft_min, pm.ft_max);
    let pid = offense.lineup[shooter_idx].pid.clone();
    for _ in 0..n {
        offense.totals.fta += 1;
        offense.box_mut(&pid).fta += 1;
        if rng.gen::<f64>() < p {
            offense.totals.ftm += 1;
            offense.totals.pts += 1;
            let b = offense.box_mut(&pid);
            b.ftm += 1;
            b.pts += 1;
        }
    }
}

/// Offensive rebound probability: attribute ratios and team ORB/DRB
/// context multipliers only, drawn without variance noise.
pub fn rebound_orb_probability(
    era: &EraConfig,
    tunables: &Tunables,
    offense: &TeamState,
    defense: &TeamState,
    off_court: &[usize],
    def_court: &[usize],
) -> f64 {
    let mean = |team: &TeamState, court: &[usize], key: Ability| -> f64 {
        if court.is_empty() {
            return 50.0;
        }
        court.iter().map(|i| team.lineup[*i].rated(key)).sum::<f64>() / court.len() as f64
    };
    let off_orb = mean(offense, off_court, Ability::RebOr)
        * offense.tactics.resolved.context.orb_mult;
    let def_drb = mean(defense, def_court, Ability::RebDr)
        * defense.tactics.resolved.context.drb_mult;
    let base = era.prob_model.orb_base * tunables.orb_base;
    prob_from_scores::<rand_chacha::ChaCha8Rng>(
        None,
        era,
        base,
        off_orb,
        def_drb,
        OutcomeKind::Rebound,
        1.0,
        0.0,
        0.0,
    )
}

/// Resolves one sampled outcome. Mutates team aggregates, player fatigue
/// and the shared foul counters; returns what the possession loop should
/// do next.
#[allow(clippy::too_many_arguments)]
pub fn resolve_outcome<R: Rng>(
    rng: &mut R,
    era: &EraConfig,
    tunables: &Tunables,
    outcome: Outcome,
    action: Action,
    offense: &mut TeamState,
    defense: &mut TeamState,
    off_court: &[usize],
    def_court: &[usize],
    tags: &StepTags,
    pass_chain: u32,
    ctx: &PossessionCtx,
    game_state: &mut GameState,
) -> Resolution {
    offense.count_outcome(outcome);

    if outcome == Outcome::ToShotclock {
        let actor = offense.role_player_on_court(SlotRole::BallHandler, off_court);
        let pid = offense.lineup[actor].pid.clone();
        offense.totals.tov += 1;
        offense.box_mut(&pid).tov += 1;
        return Resolution::Turnover;
    }

    // role-fit diagnostics on bad endings, only for steps it touched
    if tags.role_fit_applied {
        if outcome.is_turnover() {
            offense.role_fit.bad_totals.turnovers += 1;
            offense
                .role_fit
                .bad_by_grade
                .entry(tags.role_fit_grade)
                .or_default()
                .turnovers += 1;
        } else if outcome.is_reset() {
            offense.role_fit.bad_totals.resets += 1;
            offense
                .role_fit
                .bad_by_grade
                .entry(tags.role_fit_grade)
                .or_default()
                .resets += 1;
        }
    }

    let base_action = era.action_base(action);
    let def_snap = team_def_snapshot(defense, def_court);
    let Some(profile) = outcome_profile(outcome) else {
        return Resolution::Reset;
    };

    // participants
    let actor = if outcome.is_shot() {
        match outcome {
            Outcome::Shot3Cs => choose_shooter_for_three(rng, offense, off_court),
            Outcome::ShotMidCs => choose_shooter_for_mid(rng, offense, off_court),
            Outcome::Shot3Od | Outcome::ShotMidPu => {
                choose_creator_for_pulloff(rng, offense, off_court, outcome)
            }
            Outcome::ShotPost => choose_post_target(offense, off_court),
            Outcome::ShotRimDunk => choose_finisher_rim(rng, offense, off_court, true),
            _ => choose_finisher_rim(rng, offense, off_court, false),
        }
    } else if outcome.is_pass() {
        choose_passer(rng, offense, off_court, base_action, outcome)
    } else if outcome.is_foul() {
        match outcome {
            Outcome::FoulDrawPost => choose_post_target(offense, off_court),
            Outcome::FoulDrawJumper => {
                choose_creator_for_pulloff(rng, offense, off_court, Outcome::Shot3Od)
            }
            _ => choose_finisher_rim(rng, offense, off_court, false),
        }
    } else {
        offense.role_player_on_court(SlotRole::BallHandler, off_court)
    };

    charge_step_fatigue(offense, defense, off_court, def_court, tags.in_transition);

    let variance_mult = offense.tactics.resolved.context.variance_mult * ctx.variance_mult;
    let off_score = dot_profile(&offense.lineup[actor], profile.offense);
    let def_score = def_snap.dot(profile.defense) * ctx.def_eff_mult;

    let actor_pid = offense.lineup[actor].pid.clone();
    let fatigue_logit_delta =
        (1.0 - game_state.freshness_of(&actor_pid)) * ctx.fatigue_logit_max;

    if outcome.is_shot() {
        let kind = outcome.kernel_kind();
        let base_p = era.shot_base.get(&outcome).copied().unwrap_or(0.45)
            * shot_base_kind_mult(tunables, kind);
        let p_make = prob_from_scores(
            Some(&mut *rng),
            era,
            base_p,
            off_score,
            def_score,
            kind,
            variance_mult,
            tags.role_logit_delta,
            fatigue_logit_delta,
        );
        let points = outcome.points();
        book_shot_attempt(offense, &actor_pid, points, outcome.shot_zone());
        if rng.gen::<f64>() < p_make {
            book_made_shot(offense, &actor_pid, points);
            return Resolution::Score;
        }
        return Resolution::Miss;
    }

    if outcome.is_pass() {
        let base_s = era.pass_base_success.get(&outcome).copied().unwrap_or(0.90)
            * tunables.pass_base_success_mult;
        let p_ok = prob_from_scores(
            Some(&mut *rng),
            era,
            base_s,
            off_score,
            def_score,
            OutcomeKind::Pass,
            variance_mult,
            tags.role_logit_delta,
            0.0,
        );
        if rng.gen::<f64>() < p_ok {
            return Resolution::Continue { pass_chain: pass_chain + 1 };
        }
        // a failed pass resets the action; turnovers stay prior-driven
        return Resolution::Reset;
    }

    if outcome.is_turnover() {
        offense.totals.tov += 1;
        offense.box_mut(&actor_pid).tov += 1;
        return Resolution::Turnover;
    }

    if outcome.is_foul() {
        // team foul plus a personal on a random on-court defender
        *game_state.team_fouls.entry(defense.id.clone()).or_insert(0) += 1;
        let fouler_pid = if def_court.is_empty() {
            None
        } else {
            let pick = def_court[rng.gen_range(0..def_court.len())];
            let pid = defense.lineup[pick].pid.clone();
            defense.lineup[pick].fouls = defense.lineup[pick].fouls.saturating_add(1);
            let count = game_state.player_fouls.entry(pid.clone()).or_insert(0);
            *count = count.saturating_add(1);
            Some(pid)
        };

        // paired shot decides the and-one before the stripe
        let shot_key = if outcome == Outcome::FoulDrawJumper {
            Outcome::Shot3Od
        } else {
            Outcome::ShotRimDunk
        };
        let points = shot_key.points();
        let kind = shot_key.kernel_kind();
        let base_p = era.shot_base.get(&shot_key).copied().unwrap_or(0.45)
            * shot_base_kind_mult(tunables, kind);
        let p_make = prob_from_scores(
            Some(&mut *rng),
            era,
            base_p,
            off_score,
            def_score,
            kind,
            variance_mult,
            tags.role_logit_delta,
            fatigue_logit_delta,
        );
        let and_one = rng.gen::<f64>() < p_make;
        if and_one {
            book_shot_attempt(offense, &actor_pid, points, shot_key.shot_zone());
            book_made_shot(offense, &actor_pid, points);
        }

        let base_fts = if outcome == Outcome::FoulDrawJumper { 3 } else { 2 };
        let n_fts = base_fts + u32::from(and_one);
        resolve_free_throws(rng, era, offense, actor, n_fts);

        if let Some(pid) = fouler_pid {
            if game_state.fouls_of(&pid) >= ctx.foul_out {
                // fouled out: zero freshness so the next rotation pulls him
                game_state.freshness.insert(pid, 0.0);
            }
        }
        return Resolution::Foul;
    }

    Resolution::Reset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::default_era;
    use crate::ids::Position;
    use crate::models::game_state::GameState;
    use crate::models::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    fn uniform_team(id: &str, level: f64) -> TeamState {
        let lineup: Vec<Player> = (0..5)
            .map(|i| {
                let mut m = BTreeMap::new();
                for a in Ability::ALL {
                    m.insert(a, level);
                }
                Player::with_ratings(format!("{id}{i}"), format!("{id}{i}"), Position::Guard, &m)
            })
            .collect();
        let mut team = TeamState::new(id, id, lineup);
        team.reset_game_state();
        team
    }

    fn setup() -> (TeamState, TeamState, GameState) {
        let off = uniform_team("o", 60.0);
        let def = uniform_team("d", 55.0);
        let state = GameState::at_tipoff(&off, &def, BTreeMap::new(), BTreeMap::new());
        (off, def, state)
    }

    #[test]
    fn shot_outcome_books_attempt_and_zone() {
        let era = default_era();
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let court = [0usize, 1, 2, 3, 4];
        let res = resolve_outcome(
            &mut rng,
            &era,
            &Tunables::default(),
            Outcome::Shot3Cs,
            Action::SpotUp,
            &mut off,
            &mut def,
            &court,
            &court,
            &StepTags::default(),
            0,
            &PossessionCtx::default(),
            &mut state,
        );
        assert!(matches!(res, Resolution::Score | Resolution::Miss));
        assert_eq!(off.totals.fga, 1);
        assert_eq!(off.totals.tpa, 1);
        assert_eq!(off.shot_zones.get(&ShotZone::Three), Some(&1));
        if res == Resolution::Score {
            assert_eq!(off.totals.pts, 3);
        }
        // every on-court player paid the step cost
        assert!(off.lineup.iter().all(|p| p.fatigue > 0.0));
        assert!(def.lineup.iter().all(|p| p.fatigue > 0.0));
    }

    #[test]
    fn turnover_charges_the_actor() {
        let era = default_era();
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let court = [0usize, 1, 2, 3, 4];
        let res = resolve_outcome(
            &mut rng,
            &era,
            &Tunables::default(),
            Outcome::ToHandleLoss,
            Action::Drive,
            &mut off,
            &mut def,
            &court,
            &court,
            &StepTags::default(),
            0,
            &PossessionCtx::default(),
            &mut state,
        );
        assert_eq!(res, Resolution::Turnover);
        assert_eq!(off.totals.tov, 1);
        let charged: u32 = off.player_stats.values().map(|b| b.tov).sum();
        assert_eq!(charged, 1);
    }

    #[test]
    fn pass_failure_is_a_reset_not_a_turnover() {
        let mut era = default_era();
        // force pass failure by zeroing the base success
        era.pass_base_success.insert(Outcome::PassKickout, 0.0);
        era.variance.logit_noise_std = 0.0;
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let court = [0usize, 1, 2, 3, 4];
        let mut resets = 0;
        let mut continues = 0;
        for _ in 0..200 {
            match resolve_outcome(
                &mut rng,
                &era,
                &Tunables::default(),
                Outcome::PassKickout,
                Action::Drive,
                &mut off,
                &mut def,
                &court,
                &court,
                &StepTags::default(),
                0,
                &PossessionCtx::default(),
                &mut state,
            ) {
                Resolution::Reset => resets += 1,
                Resolution::Continue { .. } => continues += 1,
                other => panic!("unexpected resolution {other:?}"),
            }
        }
        assert_eq!(off.totals.tov, 0);
        assert!(resets > continues * 10, "resets {resets}, continues {continues}");
    }

    #[test]
    fn foul_books_team_and_personal_fouls_and_free_throws() {
        let era = default_era();
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let court = [0usize, 1, 2, 3, 4];
        let res = resolve_outcome(
            &mut rng,
            &era,
            &Tunables::default(),
            Outcome::FoulDrawRim,
            Action::Drive,
            &mut off,
            &mut def,
            &court,
            &court,
            &StepTags::default(),
            0,
            &PossessionCtx::default(),
            &mut state,
        );
        assert_eq!(res, Resolution::Foul);
        assert_eq!(state.team_fouls.get("d"), Some(&1));
        let personals: u32 = state.player_fouls.values().map(|f| *f as u32).sum();
        assert_eq!(personals, 1);
        let made_pair = off.totals.fgm;
        assert_eq!(off.totals.fta, 2 + made_pair);
        assert!(off.totals.ftm <= off.totals.fta);
    }

    #[test]
    fn jumper_foul_awards_three_free_throws() {
        let mut era = default_era();
        // make the paired three impossible so the stripe count is exact
        era.shot_base.insert(Outcome::Shot3Od, 0.0);
        era.prob_model.base_p_min = 0.0;
        era.prob_model.prob_min = 0.0;
        era.variance.logit_noise_std = 0.0;
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let court = [0usize, 1, 2, 3, 4];
        resolve_outcome(
            &mut rng,
            &era,
            &Tunables::default(),
            Outcome::FoulDrawJumper,
            Action::PnR,
            &mut off,
            &mut def,
            &court,
            &court,
            &StepTags::default(),
            0,
            &PossessionCtx::default(),
            &mut state,
        );
        assert_eq!(off.totals.fta, 3);
        assert_eq!(off.totals.fga, 0);
    }

    #[test]
    fn foul_out_zeroes_freshness() {
        let era = default_era();
        let (mut off, mut def, mut state) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        let court = [0usize, 1, 2, 3, 4];
        // preload every defender to the brink
        for p in &def.lineup {
            state.player_fouls.insert(p.pid.clone(), 5);
        }
        resolve_outcome(
            &mut rng,
            &era,
            &Tunables::default(),
            Outcome::FoulDrawRim,
            Action::Drive,
            &mut off,
            &mut def,
            &court,
            &court,
            &StepTags::default(),
            0,
            &PossessionCtx::default(),
            &mut state,
        );
        let benched: Vec<_> = state
            .freshness
            .iter()
            .filter(|(pid, f)| pid.starts_with('d') && **f == 0.0)
            .collect();
        assert_eq!(benched.len(), 1);
    }

    #[test]
    fn free_throw_rate_tracks_shooter_rating() {
        let era = default_era();
        let mut elite = uniform_team("e", 60.0);
        let mut brick = uniform_team("b", 60.0);
        elite.lineup[0].derived.insert(Ability::ShotFt.as_str().into(), 99.0);
        elite.lineup[0].rebuild_ratings();
        brick.lineup[0].derived.insert(Ability::ShotFt.as_str().into(), 0.0);
        brick.lineup[0].rebuild_ratings();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        resolve_free_throws(&mut rng, &era, &mut elite, 0, 400);
        resolve_free_throws(&mut rng, &era, &mut brick, 0, 400);
        let elite_rate = elite.totals.ftm as f64 / elite.totals.fta as f64;
        let brick_rate = brick.totals.ftm as f64 / brick.totals.fta as f64;
        assert!(elite_rate > 0.80, "elite FT rate {elite_rate}");
        assert!(brick_rate < 0.55, "brick FT rate {brick_rate}");
    }

    #[test]
    fn rebound_probability_has_no_noise_and_tracks_mults() {
        let era = default_era();
        let (mut off, def, _) = setup();
        let court = [0usize, 1, 2, 3, 4];
        let tun = Tunables::default();
        let p1 = rebound_orb_probability(&era, &tun, &off, &def, &court, &court);
        let p2 = rebound_orb_probability(&era, &tun, &off, &def, &court, &court);
        assert_eq!(p1, p2);
        off.tactics.resolved.context.orb_mult = 1.40;
        let boosted = rebound_orb_probability(&era, &tun, &off, &def, &court, &court);
        assert!(boosted > p1);
    }
}
