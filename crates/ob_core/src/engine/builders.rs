//! Per-possession distribution builders: action distributions and
//! action-conditional outcome priors, composed from scheme tables, UI
//! multipliers and the opposing defense's distortions.

use crate::era::{EraConfig, Tunables};
use crate::ids::{Action, DefAction, Grade, Outcome};
use crate::models::tactics::ResolvedTactics;
use std::collections::BTreeMap;

use super::normalize_weights;

/// Per-step context tags threaded from the possession loop into the
/// builders and resolution.
#[derive(Debug, Clone)]
pub struct StepTags {
    pub in_transition: bool,
    pub is_side_pnr: bool,
    pub role_fit_applied: bool,
    pub role_logit_delta: f64,
    pub role_fit_eff: f64,
    pub role_fit_grade: Grade,
}

impl Default for StepTags {
    fn default() -> Self {
        StepTags {
            in_transition: false,
            is_side_pnr: false,
            role_fit_applied: false,
            role_logit_delta: 0.0,
            role_fit_eff: 50.0,
            role_fit_grade: Grade::B,
        }
    }
}

/// Weight given to an action a UI multiplier references but the scheme
/// table omits.
const MISSING_ACTION_WEIGHT: f64 = 0.5;

/// Offense action distribution:
/// `normalize((W_scheme[a] ^ sharpness) * off_mult[a] * def_opp_mult[a])`.
pub fn build_offense_action_probs(
    era: &EraConfig,
    off: &ResolvedTactics,
    def: Option<&ResolvedTactics>,
) -> BTreeMap<Action, f64> {
    let fallback = || {
        era.off_scheme_weights
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    };
    let mut base: BTreeMap<Action, f64> = era
        .off_scheme_weights
        .get(&off.offense_scheme)
        .cloned()
        .unwrap_or_else(fallback);

    let sharpness = off.scheme_weight_sharpness.clamp(0.70, 1.40);
    for w in base.values_mut() {
        *w = w.max(0.0).powf(sharpness);
    }

    for (a, m) in &off.action_weight_mult {
        let w = base.entry(*a).or_insert(MISSING_ACTION_WEIGHT);
        *w *= m;
    }
    if let Some(def) = def {
        for (a, m) in &def.opp_action_weight_mult {
            let w = base.entry(*a).or_insert(MISSING_ACTION_WEIGHT);
            *w *= m;
        }
    }
    normalize_weights(&base)
}

/// Defense action distribution, same pipeline on the defensive table. It
/// feeds the defensive histogram; outcomes are gated elsewhere.
pub fn build_defense_action_probs(
    era: &EraConfig,
    tac: &ResolvedTactics,
) -> BTreeMap<DefAction, f64> {
    let mut base: BTreeMap<DefAction, f64> = era
        .def_scheme_weights
        .get(&tac.defense_scheme)
        .cloned()
        .unwrap_or_else(|| {
            era.def_scheme_weights
                .values()
                .next()
                .cloned()
                .unwrap_or_default()
        });

    let sharpness = tac.def_scheme_weight_sharpness.clamp(0.70, 1.40);
    for w in base.values_mut() {
        *w = w.max(0.0).powf(sharpness);
    }
    for (a, m) in &tac.def_action_weight_mult {
        let w = base.entry(*a).or_insert(MISSING_ACTION_WEIGHT);
        *w *= m;
    }
    normalize_weights(&base)
}

/// Renders a scheme multiplier at a given strength knob:
/// `1 + (m - 1) * clamp(strength, 0.70, 1.40)`.
pub fn effective_scheme_multiplier(base_mult: f64, strength: f64) -> f64 {
    1.0 + (base_mult - 1.0) * strength.clamp(0.70, 1.40)
}

fn apply_mults(pri: &mut BTreeMap<Outcome, f64>, mults: &BTreeMap<Outcome, f64>) {
    for (o, m) in mults {
        if let Some(w) = pri.get_mut(o) {
            *w *= m;
        }
    }
}

/// Outcome prior for one action: era prior distorted by both teams'
/// tactics, scheme distortions at the configured strengths, tunable
/// baselines, and context tags. Normalized with non-positive keys pruned.
pub fn build_outcome_priors(
    era: &EraConfig,
    tunables: &Tunables,
    action: Action,
    off: &ResolvedTactics,
    def: &ResolvedTactics,
    tags: &StepTags,
) -> BTreeMap<Outcome, f64> {
    let base_action = era.action_base(action);
    let mut pri: BTreeMap<Outcome, f64> = era
        .priors
        .get(&base_action)
        .or_else(|| era.priors.get(&Action::SpotUp))
        .cloned()
        .unwrap_or_default();

    // offense UI: global, then per-action (alias and base spellings both)
    apply_mults(&mut pri, &off.outcome_global_mult);
    if let Some(m) = off.outcome_by_action_mult.get(&action) {
        apply_mults(&mut pri, m);
    }
    if base_action != action {
        if let Some(m) = off.outcome_by_action_mult.get(&base_action) {
            apply_mults(&mut pri, m);
        }
    }

    // offense scheme distortion, rendered at the outcome-strength knob
    let scheme_mults = era.off_scheme_mult.get(&off.offense_scheme);
    if let Some(per_action) = scheme_mults {
        let table = per_action.get(&action).or_else(|| per_action.get(&base_action));
        if let Some(table) = table {
            for (o, m) in table {
                if let Some(w) = pri.get_mut(o) {
                    *w *= effective_scheme_multiplier(*m, off.scheme_outcome_strength);
                }
            }
        }
    }

    // defense knobs on the opponent's priors
    apply_mults(&mut pri, &def.opp_outcome_global_mult);
    if let Some(m) = def.opp_outcome_by_action_mult.get(&action) {
        apply_mults(&mut pri, m);
    }
    if base_action != action {
        if let Some(m) = def.opp_outcome_by_action_mult.get(&base_action) {
            apply_mults(&mut pri, m);
        }
    }

    // defense scheme distortion
    if let Some(per_action) = era.def_scheme_mult.get(&def.defense_scheme) {
        let table = per_action.get(&action).or_else(|| per_action.get(&base_action));
        if let Some(table) = table {
            for (o, m) in table {
                if let Some(w) = pri.get_mut(o) {
                    *w *= effective_scheme_multiplier(*m, def.def_scheme_outcome_strength);
                }
            }
        }
    }

    // calibration baselines on turnover and foul mass
    if (tunables.to_base - 1.0).abs() > 1e-12 || (tunables.foul_base - 1.0).abs() > 1e-12 {
        for (o, w) in pri.iter_mut() {
            if o.is_turnover() {
                *w *= tunables.to_base;
            } else if o.is_foul() {
                *w *= tunables.foul_base;
            }
        }
    }

    // conditional tweaks
    if def.defense_scheme == crate::ids::DefScheme::IceSidePnr && !tags.is_side_pnr {
        for o in [Outcome::ResetRescreen, Outcome::PassKickout] {
            if let Some(w) = pri.get_mut(&o) {
                *w *= 1.03;
            }
        }
    }

    if tags.in_transition {
        for o in [
            Outcome::ToBadPass,
            Outcome::ToHandleLoss,
            Outcome::ToCharge,
            Outcome::ResetHub,
            Outcome::ResetRescreen,
        ] {
            if let Some(w) = pri.get_mut(&o) {
                *w *= 0.92;
            }
        }
    }

    if def.defense_scheme == crate::ids::DefScheme::BlitzTrapPnr && base_action == Action::PnR {
        let shortroll = pri.get(&Outcome::PassShortroll).copied().unwrap_or(0.0);
        pri.insert(Outcome::PassShortroll, shortroll.max(0.10));
        let reach = pri.get(&Outcome::FoulReachTrap).copied().unwrap_or(0.0);
        pri.insert(Outcome::FoulReachTrap, reach + 0.02);
    }

    normalize_weights(&pri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::default_era;
    use crate::ids::{DefScheme, OffScheme};

    fn tactics(off: OffScheme, def: DefScheme) -> ResolvedTactics {
        ResolvedTactics {
            offense_scheme: off,
            defense_scheme: def,
            ..ResolvedTactics::default()
        }
    }

    #[test]
    fn offense_actions_normalize_to_one() {
        let era = default_era();
        let off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let def = tactics(OffScheme::DriveKick, DefScheme::Drop);
        let probs = build_offense_action_probs(&era, &off, Some(&def));
        let sum: f64 = probs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(probs[&Action::PnR] > probs[&Action::Cut]);
    }

    #[test]
    fn sharpening_concentrates_the_distribution() {
        let era = default_era();
        let mut off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let flat = build_offense_action_probs(&era, &off, None);
        off.scheme_weight_sharpness = 1.40;
        let sharp = build_offense_action_probs(&era, &off, None);
        assert!(sharp[&Action::PnR] > flat[&Action::PnR]);
    }

    #[test]
    fn opponent_action_mult_steers_offense() {
        let era = default_era();
        let off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let mut def = tactics(OffScheme::DriveKick, DefScheme::Drop);
        def.opp_action_weight_mult.insert(Action::PnR, 0.70);
        let unshaped = build_offense_action_probs(&era, &off, None);
        let shaped = build_offense_action_probs(&era, &off, Some(&def));
        assert!(shaped[&Action::PnR] < unshaped[&Action::PnR]);
    }

    #[test]
    fn priors_fold_aliases_onto_base_actions() {
        let era = default_era();
        let off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let def = tactics(OffScheme::DriveKick, DefScheme::Drop);
        let tags = StepTags::default();
        let tun = Tunables::default();
        let direct = build_outcome_priors(&era, &tun, Action::PnR, &off, &def, &tags);
        let aliased = build_outcome_priors(&era, &tun, Action::DoubleDrag, &off, &def, &tags);
        assert_eq!(direct, aliased);
    }

    #[test]
    fn blitz_floor_guarantees_shortroll_release() {
        let era = default_era();
        let off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let mut off_ui = off.clone();
        off_ui
            .outcome_by_action_mult
            .entry(Action::PnR)
            .or_default()
            .insert(Outcome::PassShortroll, 0.70);
        let def = tactics(OffScheme::DriveKick, DefScheme::BlitzTrapPnr);
        let tags = StepTags::default();
        let pri =
            build_outcome_priors(&era, &Tunables::default(), Action::PnR, &off_ui, &def, &tags);
        // pre-normalization floor of 0.10 against a total slightly above 1
        assert!(pri[&Outcome::PassShortroll] >= 0.08);
        assert!(pri.contains_key(&Outcome::FoulReachTrap));
    }

    #[test]
    fn transition_damps_turnover_mass() {
        let era = default_era();
        let off = tactics(OffScheme::TransitionEarly, DefScheme::Drop);
        let def = tactics(OffScheme::DriveKick, DefScheme::Drop);
        let calm = StepTags::default();
        let running = StepTags { in_transition: true, ..StepTags::default() };
        let tun = Tunables::default();
        let base = build_outcome_priors(&era, &tun, Action::TransitionEarly, &off, &def, &calm);
        let fast = build_outcome_priors(&era, &tun, Action::TransitionEarly, &off, &def, &running);
        assert!(fast[&Outcome::ToHandleLoss] < base[&Outcome::ToHandleLoss]);
    }

    #[test]
    fn to_base_tunable_scales_turnover_mass() {
        let era = default_era();
        let off = tactics(OffScheme::SpreadHeavyPnr, DefScheme::Drop);
        let def = tactics(OffScheme::DriveKick, DefScheme::Drop);
        let tags = StepTags::default();
        let lo = Tunables { to_base: 0.5, ..Tunables::default() };
        let pri_base =
            build_outcome_priors(&era, &Tunables::default(), Action::PnR, &off, &def, &tags);
        let pri_lo = build_outcome_priors(&era, &lo, Action::PnR, &off, &def, &tags);
        assert!(pri_lo[&Outcome::ToHandleLoss] < pri_base[&Outcome::ToHandleLoss]);
    }

    #[test]
    fn priors_are_normalized_and_positive() {
        let era = default_era();
        let off = tactics(OffScheme::PostInsideOut, DefScheme::Zone);
        let def = tactics(OffScheme::DriveKick, DefScheme::Zone);
        let tags = StepTags::default();
        for action in Action::ALL {
            let pri =
                build_outcome_priors(&era, &Tunables::default(), action, &off, &def, &tags);
            let sum: f64 = pri.values().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{action} priors sum {sum}");
            assert!(pri.values().all(|w| *w > 0.0), "{action} carries non-positive mass");
        }
    }
}
