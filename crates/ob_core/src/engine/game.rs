//! Game loop: quarters, possession alternation, clutch/garbage context,
//! rotations, and assembly of the final result record.

use crate::era::{self, EraSelector};
use crate::error::Result;
use crate::models::game_state::{GameContext, GameState, TeamSide};
use crate::models::summary::{GameMeta, GameResult, GameStateOut, InternalDebug, TeamSummary};
use crate::models::team::TeamState;
use crate::replay::{make_replay_token, ReplaySink};
use crate::validate::{validate_and_sanitize_team, ValidationConfig, ValidationReport};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use super::possession::{commit_shot_clock_turnover, simulate_possession};
use super::resolve::PossessionCtx;
use super::rotation::{apply_freshness_loss, init_targets, perform_rotation};

pub const ENGINE_VERSION: &str = concat!("possession_engine_", env!("CARGO_PKG_VERSION"));

/// Simulation options.
#[derive(Debug, Clone)]
pub struct SimOptions {
    /// Abort before simulation when validation records any error.
    pub strict_validation: bool,
    /// Skip replay event emission even when a sink is supplied.
    pub replay_disabled: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions { strict_validation: true, replay_disabled: true }
    }
}

fn on_court_indices(team: &TeamState, pids: &[String]) -> Vec<usize> {
    pids.iter().filter_map(|pid| team.find_player(pid)).collect()
}

/// Simulates a full game. See [`simulate_game_with_sink`] for replay
/// event consumption.
pub fn simulate_game(
    rng: &mut ChaCha8Rng,
    home: &mut TeamState,
    away: &mut TeamState,
    context: &GameContext,
    era_selector: &EraSelector,
    options: &SimOptions,
) -> Result<GameResult> {
    simulate_game_with_sink(rng, home, away, context, era_selector, options, None)
}

/// Simulates a full game, optionally streaming possession events into a
/// replay sink. The RNG is the single stochastic source; identical seed,
/// era and inputs reproduce the output bit for bit.
#[allow(clippy::too_many_arguments)]
pub fn simulate_game_with_sink(
    rng: &mut ChaCha8Rng,
    home: &mut TeamState,
    away: &mut TeamState,
    context: &GameContext,
    era_selector: &EraSelector,
    options: &SimOptions,
    mut sink: Option<&mut dyn ReplaySink>,
) -> Result<GameResult> {
    let mut report = ValidationReport::default();
    let era_label = era_selector.label();

    let (runtime, era_warnings, era_errors) = era::load_era(era_selector);
    for w in era_warnings {
        report.warn(format!("era[{era_label}]: {w}"));
    }
    for e in era_errors {
        report.error(format!("era[{era_label}]: {e}"));
    }
    era::activate(runtime.clone());

    let mut cfg = ValidationConfig::with_strict(options.strict_validation);
    cfg.mult_lo = runtime.cfg.mult_lo;
    cfg.mult_hi = runtime.cfg.mult_hi;

    validate_and_sanitize_team(home, &runtime, &cfg, &mut report, &format!("team[{}]", home.name));
    validate_and_sanitize_team(away, &runtime, &cfg, &mut report, &format!("team[{}]", away.name));

    if cfg.strict && !report.ok() {
        return Err(report.strict_failure());
    }

    home.reset_game_state();
    away.reset_game_state();

    let era_cfg = &runtime.cfg;
    let rules = &era_cfg.rules;
    let tunables = era::tunables::snapshot();

    let targets_home = init_targets(home, rules);
    let targets_away = init_targets(away, rules);
    let mut game_state = GameState::at_tipoff(home, away, targets_home, targets_away);
    log::debug!(
        "game {}: {} vs {} under era '{}'",
        context.game_id,
        home.id,
        away.id,
        era_cfg.name
    );

    let mut total_possessions: u32 = 0;
    for q in 0..rules.quarters {
        game_state.quarter = q + 1;
        game_state.clock_sec = rules.quarter_length_sec;
        game_state.team_fouls.insert(home.id.clone(), 0);
        game_state.team_fouls.insert(away.id.clone(), 0);

        while game_state.clock_sec > 0.0 {
            let score_home = home.totals.pts;
            let score_away = away.totals.pts;

            let home_offense = total_possessions % 2 == 0;
            game_state.possession = total_possessions;
            game_state.shot_clock_sec = rules.shot_clock_sec;
            let start_clock = game_state.clock_sec;

            let (off_side, def_side) = if home_offense {
                (TeamSide::Home, TeamSide::Away)
            } else {
                (TeamSide::Away, TeamSide::Home)
            };
            let off_pids = game_state.on_court(off_side).clone();
            let def_pids = game_state.on_court(def_side).clone();

            let avg_fresh = |pids: &[String]| -> f64 {
                if pids.is_empty() {
                    return 1.0;
                }
                pids.iter().map(|pid| game_state.freshness_of(pid)).sum::<f64>()
                    / pids.len() as f64
            };
            let avg_def_fresh = avg_fresh(&def_pids);
            let def_eff_mult = rules.fatigue_effects.def_mult_min + 0.10 * avg_def_fresh;

            let score_diff = score_home - score_away;
            let is_clutch = game_state.quarter == 4
                && game_state.clock_sec <= 120.0
                && score_diff.abs() <= 8;
            let is_garbage = game_state.quarter == 4
                && game_state.clock_sec <= 360.0
                && score_diff.abs() >= 20;
            let variance_mult = if is_clutch {
                0.80
            } else if is_garbage {
                1.25
            } else {
                1.0
            };
            let tempo_mult = if is_garbage { 1.0 / 1.08 } else { 1.0 };

            let ctx = PossessionCtx {
                score_diff,
                is_clutch,
                is_garbage,
                variance_mult,
                tempo_mult,
                def_eff_mult,
                fatigue_logit_max: rules.fatigue_effects.logit_delta_max,
                foul_out: rules.foul_out,
            };

            let (offense, defense): (&mut TeamState, &mut TeamState) = if home_offense {
                (&mut *home, &mut *away)
            } else {
                (&mut *away, &mut *home)
            };
            let off_court = on_court_indices(offense, &off_pids);
            let def_court = on_court_indices(defense, &def_pids);

            // inbound setup burns clock before the first action
            if rules.setup_cost_sec > 0.0 {
                let adj = rules.setup_cost_sec * ctx.tempo_mult;
                game_state.shot_clock_sec -= adj;
                game_state.clock_sec = (game_state.clock_sec - adj).max(0.0);
                if game_state.shot_clock_sec <= 0.0 {
                    commit_shot_clock_turnover(offense, &off_court);
                    total_possessions += 1;
                    game_state.scores.insert(home.id.clone(), home.totals.pts);
                    game_state.scores.insert(away.id.clone(), away.totals.pts);
                    if game_state.clock_sec <= 0.0 {
                        break;
                    }
                    continue;
                }
                if game_state.clock_sec <= 0.0 {
                    break;
                }
            }

            let step_sink = if options.replay_disabled {
                None
            } else {
                match sink {
                    Some(ref mut s) => Some(&mut **s as &mut dyn ReplaySink),
                    None => None,
                }
            };
            simulate_possession(
                rng,
                era_cfg,
                &tunables,
                offense,
                defense,
                &off_court,
                &def_court,
                &mut game_state,
                &ctx,
                step_sink,
            );

            let elapsed = (start_clock - game_state.clock_sec).max(0.0);
            game_state.add_seconds_played(&off_pids, elapsed);
            game_state.add_seconds_played(&def_pids, elapsed);

            apply_freshness_loss(offense, &off_pids, &mut game_state, rules);
            apply_freshness_loss(defense, &def_pids, &mut game_state, rules);

            perform_rotation(offense, off_side, &mut game_state, rules, is_garbage);
            perform_rotation(defense, def_side, &mut game_state, rules, is_garbage);

            total_possessions += 1;
            game_state.scores.insert(home.id.clone(), home.totals.pts);
            game_state.scores.insert(away.id.clone(), away.totals.pts);

            if game_state.clock_sec <= 0.0 {
                break;
            }
        }
    }

    let replay_token = make_replay_token(ENGINE_VERSION, &era_label, rng, home, away);

    let mut internal_debug = InternalDebug::default();
    internal_debug.role_fit.insert_team(&home.id, &home.role_fit);
    internal_debug.role_fit.insert_team(&away.id, &away.role_fit);

    let mut teams = BTreeMap::new();
    teams.insert(home.id.clone(), TeamSummary::from_team(home));
    teams.insert(away.id.clone(), TeamSummary::from_team(away));

    Ok(GameResult {
        meta: GameMeta {
            engine_version: ENGINE_VERSION.to_string(),
            era: era_label,
            era_version: era_cfg.version.clone(),
            replay_token,
            validation: report.summary(),
            internal_debug,
        },
        possessions_per_team: home.totals.possessions.max(away.totals.possessions),
        teams,
        game_state: GameStateOut::from_state(&game_state),
    })
}
