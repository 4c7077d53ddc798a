//! Possession loop: drives action choice, outcome sampling, resolution,
//! offensive-rebound continuation, pass chains and clock accounting.

use crate::era::{EraConfig, Tunables};
use crate::ids::{Action, DefAction, Outcome, SlotRole};
use crate::models::game_state::GameState;
use crate::models::team::TeamState;
use crate::replay::{ReplayEvent, ReplaySink};
use rand::Rng;

use super::builders::{build_defense_action_probs, build_offense_action_probs, build_outcome_priors, StepTags};
use super::participants::{choose_drb_rebounder, choose_orb_rebounder};
use super::resolve::{rebound_orb_probability, resolve_outcome, PossessionCtx, Resolution};
use super::role_fit::apply_role_fit;
use super::weighted_choice;

/// Books a shot-clock violation against the ball handler.
pub fn commit_shot_clock_turnover(offense: &mut TeamState, off_court: &[usize]) {
    offense.totals.tov += 1;
    let bh = offense.role_player_on_court(SlotRole::BallHandler, off_court);
    let pid = offense.lineup[bh].pid.clone();
    offense.box_mut(&pid).tov += 1;
    offense.count_outcome(Outcome::ToShotclock);
}

fn apply_time_cost(game_state: &mut GameState, cost: f64, tempo_mult: f64) {
    let adj = cost * tempo_mult;
    game_state.shot_clock_sec -= adj;
    game_state.clock_sec = (game_state.clock_sec - adj).max(0.0);
}

enum ClockCheck {
    Ok,
    ShotClockViolation,
    EndOfQuarter,
}

fn charge_and_check(game_state: &mut GameState, cost: f64, tempo_mult: f64) -> ClockCheck {
    if cost <= 0.0 {
        return ClockCheck::Ok;
    }
    apply_time_cost(game_state, cost, tempo_mult);
    if game_state.shot_clock_sec <= 0.0 {
        return ClockCheck::ShotClockViolation;
    }
    if game_state.clock_sec <= 0.0 {
        game_state.clock_sec = 0.0;
        return ClockCheck::EndOfQuarter;
    }
    ClockCheck::Ok
}

fn emit(
    sink: &mut Option<&mut dyn ReplaySink>,
    game_state: &GameState,
    offense: &TeamState,
    action: Action,
    outcome: Option<Outcome>,
    resolution: &'static str,
) {
    if let Some(s) = sink.as_deref_mut() {
        let ev = ReplayEvent::step(
            game_state.possession,
            game_state.quarter,
            &offense.id,
            action,
            outcome,
            resolution,
        );
        s.on_event(&ev);
    }
}

/// Runs one possession to a terminal event, a shot-clock violation or the
/// end-of-quarter cutoff.
#[allow(clippy::too_many_arguments)]
pub fn simulate_possession<R: Rng>(
    rng: &mut R,
    era: &EraConfig,
    tunables: &Tunables,
    offense: &mut TeamState,
    defense: &mut TeamState,
    off_court: &[usize],
    def_court: &[usize],
    game_state: &mut GameState,
    ctx: &PossessionCtx,
    mut sink: Option<&mut dyn ReplaySink>,
) {
    offense.totals.possessions += 1;

    // faster-paced offenses burn less clock per action
    let tempo_mult = ctx.tempo_mult / offense.tactics.resolved.context.pace_mult.max(0.1);

    let off_probs = build_offense_action_probs(
        era,
        &offense.tactics.resolved,
        Some(&defense.tactics.resolved),
    );
    let def_probs = build_defense_action_probs(era, &defense.tactics.resolved);

    let mut action = weighted_choice(rng, &off_probs).unwrap_or(Action::SpotUp);
    offense.count_off_action(action);

    let def_action = weighted_choice(rng, &def_probs).unwrap_or(DefAction::DropCoverage);
    defense.count_def_action(def_action);

    let mut tags = StepTags {
        in_transition: era.action_base(action) == Action::TransitionEarly,
        is_side_pnr: action == Action::SideAnglePnR,
        ..StepTags::default()
    };

    let mut steps: u32 = 0;
    let mut pass_chain: u32 = 0;

    while steps < era.rules.max_steps && game_state.clock_sec > 0.0 {
        steps += 1;

        let action_cost = era.rules.time_cost(era.action_base(action));
        match charge_and_check(game_state, action_cost, tempo_mult) {
            ClockCheck::ShotClockViolation => {
                commit_shot_clock_turnover(offense, off_court);
                emit(&mut sink, game_state, offense, action, Some(Outcome::ToShotclock), "TURNOVER");
                return;
            }
            ClockCheck::EndOfQuarter => return,
            ClockCheck::Ok => {}
        }

        let base_action = era.action_base(action);
        let pri = build_outcome_priors(
            era,
            tunables,
            action,
            &offense.tactics.resolved,
            &defense.tactics.resolved,
            &tags,
        );
        let pri = apply_role_fit(pri, base_action, offense, off_court, &mut tags, era);
        let outcome = weighted_choice(rng, &pri).unwrap_or(Outcome::ResetHub);

        let term = resolve_outcome(
            rng, era, tunables, outcome, action, offense, defense, off_court, def_court, &tags,
            pass_chain, ctx, game_state,
        );

        match term {
            Resolution::Score | Resolution::Turnover | Resolution::Foul => {
                let label = match term {
                    Resolution::Score => "SCORE",
                    Resolution::Turnover => "TURNOVER",
                    _ => "FOUL",
                };
                emit(&mut sink, game_state, offense, action, Some(outcome), label);
                return;
            }
            Resolution::Miss => {
                emit(&mut sink, game_state, offense, action, Some(outcome), "MISS");
                let p_orb = rebound_orb_probability(
                    era, tunables, offense, defense, off_court, def_court,
                );
                if rng.gen::<f64>() < p_orb {
                    offense.totals.orb += 1;
                    let rebounder = choose_orb_rebounder(rng, offense, off_court);
                    let pid = offense.lineup[rebounder].pid.clone();
                    offense.box_mut(&pid).orb += 1;
                    game_state.shot_clock_sec = era.rules.orb_reset_sec;
                    action = if rng.gen::<f64>() < 0.55 { Action::Kickout } else { Action::Drive };
                    pass_chain = 0;
                    continue;
                }
                defense.totals.drb += 1;
                let rebounder = choose_drb_rebounder(rng, defense, def_court);
                let pid = defense.lineup[rebounder].pid.clone();
                defense.box_mut(&pid).drb += 1;
                return;
            }
            Resolution::Reset => {
                emit(&mut sink, game_state, offense, action, Some(outcome), "RESET");
                match charge_and_check(game_state, era.rules.reset_cost_sec, tempo_mult) {
                    ClockCheck::ShotClockViolation => {
                        commit_shot_clock_turnover(offense, off_court);
                        return;
                    }
                    ClockCheck::EndOfQuarter => return,
                    ClockCheck::Ok => {}
                }
                action = weighted_choice(rng, &off_probs).unwrap_or(Action::SpotUp);
                offense.count_off_action(action);
                pass_chain = 0;
                continue;
            }
            Resolution::Continue { pass_chain: chained } => {
                emit(&mut sink, game_state, offense, action, Some(outcome), "CONTINUE");
                pass_chain = chained;
                let pass_cost = match outcome {
                    Outcome::PassKickout | Outcome::PassSkip => {
                        era.rules.time_cost(Action::Kickout)
                    }
                    Outcome::PassExtra => era.rules.time_cost(Action::ExtraPass),
                    _ => 0.0,
                };
                match charge_and_check(game_state, pass_cost, tempo_mult) {
                    ClockCheck::ShotClockViolation => {
                        commit_shot_clock_turnover(offense, off_court);
                        return;
                    }
                    ClockCheck::EndOfQuarter => return,
                    ClockCheck::Ok => {}
                }
                // post-pass steering
                action = match outcome {
                    Outcome::PassKickout | Outcome::PassSkip | Outcome::PassExtra => {
                        if rng.gen::<f64>() < 0.72 {
                            Action::SpotUp
                        } else {
                            Action::ExtraPass
                        }
                    }
                    Outcome::PassShortroll => {
                        if rng.gen::<f64>() < 0.55 {
                            Action::Drive
                        } else {
                            Action::Kickout
                        }
                    }
                    _ => weighted_choice(rng, &off_probs).unwrap_or(Action::SpotUp),
                };
                if pass_chain >= 3 {
                    action = Action::SpotUp;
                }
                continue;
            }
        }
    }

    // ran out of steps: book it as a shot-clock violation
    commit_shot_clock_turnover(offense, off_court);
    emit(&mut sink, game_state, offense, action, Some(Outcome::ToShotclock), "TURNOVER");
}
