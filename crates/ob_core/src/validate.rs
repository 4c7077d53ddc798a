//! Input validation and sanitization.
//!
//! Mutates team records in place: clamps every UI knob into the era clamp
//! range, drops keys outside the era's allowed sets, enforces the required
//! derived-ability contract, and resolves string-keyed maps into the
//! enum-keyed views the engine reads. All repairs are logged into a
//! [`ValidationReport`]; in strict mode errors abort before simulation.

use crate::era::EraRuntime;
use crate::error::EngineError;
use crate::ids::{Ability, Action, DefAction, DefScheme, FitRole, OffScheme, Outcome, SlotRole};
use crate::models::player::{Player, DERIVED_DEFAULT};
use crate::models::tactics::{ContextBag, ResolvedTactics, TacticsConfig};
use crate::models::team::TeamState;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub const MAX_LINEUP: usize = 12;
pub const ON_COURT: usize = 5;

/// What to do when a player is missing required derived keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDerivedPolicy {
    /// Record an error (fatal under strict validation).
    Error,
    /// Fill with the default value and warn.
    Fill,
}

/// Controls how strictly inputs are validated and sanitized.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub strict: bool,
    pub mult_lo: f64,
    pub mult_hi: f64,
    pub derived_lo: f64,
    pub derived_hi: f64,
    pub missing_derived_policy: MissingDerivedPolicy,
    pub default_derived_value: f64,
    /// Clamp out-of-range numbers instead of erroring (still warns).
    pub clamp_out_of_range: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            strict: true,
            mult_lo: 0.70,
            mult_hi: 1.40,
            derived_lo: 0.0,
            derived_hi: 100.0,
            missing_derived_policy: MissingDerivedPolicy::Error,
            default_derived_value: DERIVED_DEFAULT,
            clamp_out_of_range: true,
        }
    }
}

impl ValidationConfig {
    pub fn with_strict(strict: bool) -> Self {
        ValidationConfig { strict, ..ValidationConfig::default() }
    }
}

/// Accumulated repairs and failures.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Serializable form embedded in the result meta.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSummary {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub ok: bool,
}

impl ValidationReport {
    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            warnings: self.warnings.clone(),
            errors: self.errors.clone(),
            ok: self.ok(),
        }
    }

    /// Compact strict-mode failure: up to six errors plus an overflow count.
    pub fn strict_failure(&self) -> EngineError {
        let mut summary: String = self
            .errors
            .iter()
            .take(6)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        if self.errors.len() > 6 {
            summary.push_str(&format!("\n... (+{} more)", self.errors.len() - 6));
        }
        EngineError::Validation { summary }
    }
}

fn clamp_mult(v: f64, cfg: &ValidationConfig) -> f64 {
    v.clamp(cfg.mult_lo, cfg.mult_hi)
}

fn sanitize_mult_map<K: Ord + Copy + std::fmt::Display>(
    raw: &BTreeMap<String, f64>,
    parse: impl Fn(&str) -> Option<K>,
    allowed: &BTreeSet<K>,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    path: &str,
) -> BTreeMap<K, f64> {
    let mut out = BTreeMap::new();
    for (key, raw_v) in raw {
        let parsed = parse(key).filter(|k| allowed.contains(k));
        let Some(k) = parsed else {
            report.warn(format!("{path}: unknown key '{key}' ignored"));
            continue;
        };
        if !raw_v.is_finite() {
            let msg = format!("{path}.{key}: non-numeric multiplier '{raw_v}'");
            if cfg.strict {
                report.error(msg);
            } else {
                report.warn(msg + " (ignored)");
            }
            continue;
        }
        let clamped = clamp_mult(*raw_v, cfg);
        if (clamped - raw_v).abs() > 1e-9 {
            report.warn(format!("{path}.{key}: clamped {raw_v:.3} -> {clamped:.3}"));
        }
        out.insert(k, clamped);
    }
    out
}

fn sanitize_nested_outcome_map(
    raw: &BTreeMap<String, BTreeMap<String, f64>>,
    runtime: &EraRuntime,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    path: &str,
) -> BTreeMap<Action, BTreeMap<Outcome, f64>> {
    let mut out = BTreeMap::new();
    for (action_key, sub) in raw {
        let parsed = Action::from_key(action_key)
            .filter(|a| runtime.allowed_off_actions.contains(a));
        let Some(action) = parsed else {
            report.warn(format!("{path}: unknown action '{action_key}' ignored"));
            continue;
        };
        let clean = sanitize_mult_map(
            sub,
            Outcome::from_key,
            &runtime.allowed_outcomes,
            cfg,
            report,
            &format!("{path}.{action_key}"),
        );
        if !clean.is_empty() {
            out.insert(action, clean);
        }
    }
    out
}

fn sanitize_scalar_knob(
    value: &mut f64,
    name: &str,
    label: &str,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
) {
    if !value.is_finite() {
        let msg = format!("{label}.{name}: non-numeric '{value}'");
        if cfg.strict {
            report.error(msg);
        } else {
            report.warn(msg + " (set to 1.0)");
            *value = 1.0;
        }
        return;
    }
    let clamped = clamp_mult(*value, cfg);
    if (clamped - *value).abs() > 1e-9 {
        report.warn(format!("{label}.{name}: clamped {:.3} -> {clamped:.3}", *value));
    }
    *value = clamped;
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

fn sanitize_context(
    raw: &BTreeMap<String, Value>,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    label: &str,
) -> ContextBag {
    let mut bag = ContextBag::default();
    for (key, value) in raw {
        match key.as_str() {
            "PACE_MULT" | "ORB_MULT" | "DRB_MULT" | "VARIANCE_MULT" => {
                let Some(f) = value.as_f64().filter(|f| f.is_finite()) else {
                    let msg = format!("{label}.context.{key}: non-numeric '{value}'");
                    if cfg.strict {
                        report.error(msg);
                    } else {
                        report.warn(msg + " (set to 1.0)");
                    }
                    continue;
                };
                let clamped = clamp_mult(f, cfg);
                if (clamped - f).abs() > 1e-9 {
                    report.warn(format!("{label}.context.{key}: clamped {f:.3} -> {clamped:.3}"));
                }
                match key.as_str() {
                    "PACE_MULT" => bag.pace_mult = clamped,
                    "ORB_MULT" => bag.orb_mult = clamped,
                    "DRB_MULT" => bag.drb_mult = clamped,
                    _ => bag.variance_mult = clamped,
                }
            }
            "ROLE_FIT_STRENGTH" => {
                let Some(f) = value.as_f64().filter(|f| f.is_finite()) else {
                    let msg = format!("{label}.context.ROLE_FIT_STRENGTH: non-numeric '{value}'");
                    if cfg.strict {
                        report.error(msg);
                    } else {
                        report.warn(msg + " (using era default)");
                    }
                    continue;
                };
                let clamped = f.clamp(0.0, 1.0);
                if (clamped - f).abs() > 1e-9 {
                    report.warn(format!(
                        "{label}.context.ROLE_FIT_STRENGTH: clamped {f:.3} -> {clamped:.3}"
                    ));
                }
                bag.role_fit_strength = Some(clamped);
            }
            "TRANSITION_EMPHASIS" => bag.transition_emphasis = truthy(value),
            "HEAVY_PNR" => bag.heavy_pnr = truthy(value),
            other => report.warn(format!("{label}.context: unknown key '{other}' ignored")),
        }
    }
    bag
}

/// Clamps all UI knobs, drops unknown keys and builds the resolved view.
pub fn sanitize_tactics_config(
    tactics: &mut TacticsConfig,
    runtime: &EraRuntime,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    label: &str,
) {
    let mut resolved = ResolvedTactics::default();

    match OffScheme::from_key(&tactics.offense_scheme)
        .filter(|s| runtime.cfg.off_scheme_weights.contains_key(s))
    {
        Some(scheme) => resolved.offense_scheme = scheme,
        None => {
            let msg = format!(
                "{label}.offense_scheme: unknown scheme '{}'",
                tactics.offense_scheme
            );
            if cfg.strict {
                report.error(msg);
            } else {
                report.warn(msg + " (fallback to Spread_HeavyPnR)");
                tactics.offense_scheme = OffScheme::SpreadHeavyPnr.as_str().to_string();
            }
        }
    }

    match DefScheme::from_key(&tactics.defense_scheme)
        .filter(|s| runtime.cfg.def_scheme_weights.contains_key(s))
    {
        Some(scheme) => resolved.defense_scheme = scheme,
        None => {
            let msg = format!(
                "{label}.defense_scheme: unknown scheme '{}'",
                tactics.defense_scheme
            );
            if cfg.strict {
                report.error(msg);
            } else {
                report.warn(msg + " (fallback to Drop)");
                tactics.defense_scheme = DefScheme::Drop.as_str().to_string();
            }
        }
    }

    sanitize_scalar_knob(
        &mut tactics.scheme_weight_sharpness,
        "scheme_weight_sharpness",
        label,
        cfg,
        report,
    );
    sanitize_scalar_knob(
        &mut tactics.scheme_outcome_strength,
        "scheme_outcome_strength",
        label,
        cfg,
        report,
    );
    sanitize_scalar_knob(
        &mut tactics.def_scheme_weight_sharpness,
        "def_scheme_weight_sharpness",
        label,
        cfg,
        report,
    );
    sanitize_scalar_knob(
        &mut tactics.def_scheme_outcome_strength,
        "def_scheme_outcome_strength",
        label,
        cfg,
        report,
    );
    resolved.scheme_weight_sharpness = tactics.scheme_weight_sharpness;
    resolved.scheme_outcome_strength = tactics.scheme_outcome_strength;
    resolved.def_scheme_weight_sharpness = tactics.def_scheme_weight_sharpness;
    resolved.def_scheme_outcome_strength = tactics.def_scheme_outcome_strength;

    resolved.action_weight_mult = sanitize_mult_map(
        &tactics.action_weight_mult,
        Action::from_key,
        &runtime.allowed_off_actions,
        cfg,
        report,
        &format!("{label}.action_weight_mult"),
    );
    resolved.outcome_global_mult = sanitize_mult_map(
        &tactics.outcome_global_mult,
        Outcome::from_key,
        &runtime.allowed_outcomes,
        cfg,
        report,
        &format!("{label}.outcome_global_mult"),
    );
    resolved.outcome_by_action_mult = sanitize_nested_outcome_map(
        &tactics.outcome_by_action_mult,
        runtime,
        cfg,
        report,
        &format!("{label}.outcome_by_action_mult"),
    );

    resolved.def_action_weight_mult = sanitize_mult_map(
        &tactics.def_action_weight_mult,
        DefAction::from_key,
        &runtime.allowed_def_actions,
        cfg,
        report,
        &format!("{label}.def_action_weight_mult"),
    );
    resolved.opp_action_weight_mult = sanitize_mult_map(
        &tactics.opp_action_weight_mult,
        Action::from_key,
        &runtime.allowed_off_actions,
        cfg,
        report,
        &format!("{label}.opp_action_weight_mult"),
    );
    resolved.opp_outcome_global_mult = sanitize_mult_map(
        &tactics.opp_outcome_global_mult,
        Outcome::from_key,
        &runtime.allowed_outcomes,
        cfg,
        report,
        &format!("{label}.opp_outcome_global_mult"),
    );
    resolved.opp_outcome_by_action_mult = sanitize_nested_outcome_map(
        &tactics.opp_outcome_by_action_mult,
        runtime,
        cfg,
        report,
        &format!("{label}.opp_outcome_by_action_mult"),
    );

    resolved.context = sanitize_context(&tactics.context, cfg, report, label);
    tactics.resolved = resolved;
}

/// Ensures derived stats are numeric, in range and complete.
pub fn sanitize_player_derived(
    player: &mut Player,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    label: &str,
) {
    let mut clean: BTreeMap<String, f64> = BTreeMap::new();
    for (key, raw) in &player.derived {
        if !raw.is_finite() {
            let msg = format!("{label}.{}.derived.{key}: non-numeric '{raw}'", player.pid);
            if cfg.strict {
                report.error(msg);
            } else {
                report.warn(msg + " (dropped)");
            }
            continue;
        }
        let mut v = *raw;
        if cfg.clamp_out_of_range {
            let clamped = v.clamp(cfg.derived_lo, cfg.derived_hi);
            if (clamped - v).abs() > 1e-9 {
                report.warn(format!(
                    "{label}.{}.derived.{key}: clamped {v:.2} -> {clamped:.2}",
                    player.pid
                ));
            }
            v = clamped;
        }
        clean.insert(key.clone(), v);
    }
    player.derived = clean;

    let missing: Vec<Ability> = Ability::required()
        .filter(|a| !player.derived.contains_key(a.as_str()))
        .collect();
    if !missing.is_empty() {
        let head: Vec<&str> = missing.iter().take(8).map(|a| a.as_str()).collect();
        let suffix = if missing.len() > 8 { "..." } else { "" };
        let msg = format!(
            "{label}.{}: missing derived keys ({}): {}{suffix}",
            player.pid,
            missing.len(),
            head.join(", ")
        );
        match cfg.missing_derived_policy {
            MissingDerivedPolicy::Fill => {
                report.warn(msg + &format!(" (filled with {})", cfg.default_derived_value));
                for a in missing {
                    player.derived.insert(a.as_str().to_string(), cfg.default_derived_value);
                }
            }
            MissingDerivedPolicy::Error => report.error(msg),
        }
    }

    player.rebuild_ratings();
}

/// Full team pass: lineup shape, pids, derived abilities, roles, tactics.
pub fn validate_and_sanitize_team(
    team: &mut TeamState,
    runtime: &EraRuntime,
    cfg: &ValidationConfig,
    report: &mut ValidationReport,
    label: &str,
) {
    if team.lineup.is_empty() {
        report.error(format!("{label}: lineup missing"));
        return;
    }
    if team.lineup.len() < ON_COURT {
        report.error(format!(
            "{label}: lineup size is {} (need at least {ON_COURT})",
            team.lineup.len()
        ));
        return;
    }
    if team.lineup.len() > MAX_LINEUP {
        report.warn(format!(
            "{label}: lineup size is {} (truncated to {MAX_LINEUP})",
            team.lineup.len()
        ));
        team.lineup.truncate(MAX_LINEUP);
    }

    let pids: Vec<String> = team.lineup.iter().map(|p| p.pid.clone()).collect();
    let unique: BTreeSet<&String> = pids.iter().collect();
    if unique.len() != pids.len() {
        report.error(format!("{label}: duplicate player pid in lineup"));
    }
    if pids.iter().any(|pid| pid.trim().is_empty()) {
        report.error(format!("{label}: invalid empty pid in lineup"));
    }

    for player in &mut team.lineup {
        sanitize_player_derived(player, cfg, report, label);
    }

    team.slot_roles.clear();
    team.fit_roles.clear();
    let pid_set: BTreeSet<&String> = pids.iter().collect();
    for (role_key, pid) in &team.roles {
        if !pid_set.contains(pid) {
            report.warn(format!(
                "{label}.roles.{role_key}: pid '{pid}' not in lineup (fallback will be used)"
            ));
            continue;
        }
        if let Some(slot) = SlotRole::from_key(role_key) {
            team.slot_roles.insert(slot, pid.clone());
        } else if let Some(fit) = FitRole::from_key(role_key) {
            team.fit_roles.insert(fit, pid.clone());
        } else {
            report.warn(format!("{label}.roles: unknown role '{role_key}' ignored"));
        }
    }

    sanitize_tactics_config(&mut team.tactics, runtime, cfg, report, &format!("{label}.tactics"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::{default_era, EraRuntime};
    use crate::ids::Position;

    fn five_players() -> Vec<Player> {
        (0..5)
            .map(|i| {
                let mut p = Player::new(format!("p{i}"), format!("P{i}"), Position::Guard);
                for a in Ability::ALL {
                    p.derived.insert(a.as_str().to_string(), 60.0);
                }
                p
            })
            .collect()
    }

    fn runtime() -> EraRuntime {
        EraRuntime::from_config(default_era())
    }

    #[test]
    fn clamps_knobs_and_mult_maps() {
        let mut team = TeamState::new("t", "T", five_players());
        team.tactics.scheme_weight_sharpness = 9.0;
        team.tactics.action_weight_mult.insert("PnR".to_string(), 3.0);
        team.tactics.action_weight_mult.insert("Moonball".to_string(), 1.1);
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::with_strict(false),
            &mut report,
            "team[T]",
        );
        assert!(report.ok());
        assert_eq!(team.tactics.scheme_weight_sharpness, 1.40);
        assert_eq!(
            team.tactics.resolved.action_weight_mult.get(&Action::PnR),
            Some(&1.40)
        );
        assert!(report.warnings.iter().any(|w| w.contains("Moonball")));
    }

    #[test]
    fn missing_derived_errors_by_default_and_fills_on_request() {
        let mut team = TeamState::new("t", "T", five_players());
        team.lineup[0].derived.remove(Ability::Shot3Cs.as_str());
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::default(),
            &mut report,
            "team[T]",
        );
        assert!(!report.ok());

        let mut team = TeamState::new("t", "T", five_players());
        team.lineup[0].derived.remove(Ability::Shot3Cs.as_str());
        let mut report = ValidationReport::default();
        let cfg = ValidationConfig {
            missing_derived_policy: MissingDerivedPolicy::Fill,
            ..ValidationConfig::default()
        };
        validate_and_sanitize_team(&mut team, &runtime(), &cfg, &mut report, "team[T]");
        assert!(report.ok());
        assert_eq!(team.lineup[0].get(Ability::Shot3Cs, false), DERIVED_DEFAULT);
    }

    #[test]
    fn role_pointing_off_roster_is_dropped() {
        let mut team = TeamState::new("t", "T", five_players());
        team.roles.insert("ball_handler".to_string(), "ghost".to_string());
        team.roles.insert("post".to_string(), "p2".to_string());
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::with_strict(false),
            &mut report,
            "team[T]",
        );
        assert!(!team.slot_roles.contains_key(&SlotRole::BallHandler));
        assert_eq!(team.slot_roles.get(&SlotRole::Post), Some(&"p2".to_string()));
        assert!(report.warnings.iter().any(|w| w.contains("ghost")));
    }

    #[test]
    fn duplicate_pid_is_an_error() {
        let mut players = five_players();
        players[4].pid = "p0".to_string();
        let mut team = TeamState::new("t", "T", players);
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::default(),
            &mut report,
            "team[T]",
        );
        assert!(report.errors.iter().any(|e| e.contains("duplicate")));
    }

    #[test]
    fn unknown_scheme_falls_back_when_not_strict() {
        let mut team = TeamState::new("t", "T", five_players());
        team.tactics.offense_scheme = "Seven_Seconds".to_string();
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::with_strict(false),
            &mut report,
            "team[T]",
        );
        assert!(report.ok());
        assert_eq!(team.tactics.resolved.offense_scheme, OffScheme::SpreadHeavyPnr);
    }

    #[test]
    fn strict_failure_summary_caps_at_six() {
        let mut report = ValidationReport::default();
        for i in 0..9 {
            report.error(format!("error {i}"));
        }
        let err = report.strict_failure();
        let text = err.to_string();
        assert!(text.contains("error 5"));
        assert!(!text.contains("error 6\n"));
        assert!(text.contains("(+3 more)"));
    }

    #[test]
    fn context_unknown_keys_dropped_and_bools_parsed() {
        let mut team = TeamState::new("t", "T", five_players());
        team.tactics.context.insert("PACE_MULT".into(), serde_json::json!(2.0));
        team.tactics.context.insert("HEAVY_PNR".into(), serde_json::json!(true));
        team.tactics.context.insert("MYSTERY".into(), serde_json::json!(1));
        let mut report = ValidationReport::default();
        validate_and_sanitize_team(
            &mut team,
            &runtime(),
            &ValidationConfig::with_strict(false),
            &mut report,
            "team[T]",
        );
        let ctx = &team.tactics.resolved.context;
        assert_eq!(ctx.pace_mult, 1.40);
        assert!(ctx.heavy_pnr);
        assert!(report.warnings.iter().any(|w| w.contains("MYSTERY")));
    }
}
