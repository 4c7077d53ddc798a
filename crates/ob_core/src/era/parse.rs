//! Era JSON parsing: merges a raw record onto the built-in defaults and
//! reports what it had to repair along the way.

use super::defaults;
use super::{EraConfig, LogisticSpec, VarianceParams};
use crate::ids::{Action, DefAction, DefScheme, OffScheme, Outcome, OutcomeKind};
use serde_json::Value;
use std::collections::BTreeMap;

const REQUIRED_BLOCKS: [&str; 12] = [
    "shot_base",
    "pass_base_success",
    "action_outcome_priors",
    "action_aliases",
    "off_scheme_action_weights",
    "def_scheme_action_weights",
    "offense_scheme_mult",
    "defense_scheme_mult",
    "prob_model",
    "knobs",
    "logistic_params",
    "variance_params",
];

fn num(v: &Value) -> Option<f64> {
    v.as_f64().filter(|f| f.is_finite())
}

/// Returns the block as an object, recording a warning when it is missing
/// and an error when it has the wrong type. `None` means "use defaults".
fn block<'a>(
    raw: &'a Value,
    key: &str,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) -> Option<&'a serde_json::Map<String, Value>> {
    match raw.get(key) {
        None | Some(Value::Null) => {
            warnings.push(format!("missing key '{key}' (filled from defaults)"));
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            errors.push(format!(
                "'{key}' must be an object (got {}); using defaults",
                json_type_name(other)
            ));
            None
        }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_outcome_table(
    map: &serde_json::Map<String, Value>,
    path: &str,
    warnings: &mut Vec<String>,
) -> BTreeMap<Outcome, f64> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let Some(outcome) = Outcome::from_key(k) else {
            warnings.push(format!("{path}: unknown outcome '{k}' ignored"));
            continue;
        };
        match num(v) {
            Some(f) => {
                out.insert(outcome, f);
            }
            None => warnings.push(format!("{path}.{k}: expected number, got {}", json_type_name(v))),
        }
    }
    out
}

fn parse_action_table(
    map: &serde_json::Map<String, Value>,
    path: &str,
    warnings: &mut Vec<String>,
) -> BTreeMap<Action, f64> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let Some(action) = Action::from_key(k) else {
            warnings.push(format!("{path}: unknown action '{k}' ignored"));
            continue;
        };
        match num(v) {
            Some(f) => {
                out.insert(action, f);
            }
            None => warnings.push(format!("{path}.{k}: expected number, got {}", json_type_name(v))),
        }
    }
    out
}

fn parse_def_action_table(
    map: &serde_json::Map<String, Value>,
    path: &str,
    warnings: &mut Vec<String>,
) -> BTreeMap<DefAction, f64> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        let Some(action) = DefAction::from_key(k) else {
            warnings.push(format!("{path}: unknown defensive action '{k}' ignored"));
            continue;
        };
        match num(v) {
            Some(f) => {
                out.insert(action, f);
            }
            None => warnings.push(format!("{path}.{k}: expected number, got {}", json_type_name(v))),
        }
    }
    out
}

fn parse_scheme_mult_block<S: Copy>(
    map: &serde_json::Map<String, Value>,
    path: &str,
    parse_scheme: impl Fn(&str) -> Option<S>,
    warnings: &mut Vec<String>,
) -> Vec<(S, BTreeMap<Action, BTreeMap<Outcome, f64>>)> {
    let mut out = Vec::new();
    for (scheme_key, actions) in map {
        let Some(scheme) = parse_scheme(scheme_key) else {
            warnings.push(format!("{path}: unknown scheme '{scheme_key}' ignored"));
            continue;
        };
        let Value::Object(actions) = actions else {
            warnings.push(format!("{path}.{scheme_key}: expected object, ignored"));
            continue;
        };
        let mut per_action = BTreeMap::new();
        for (action_key, outcomes) in actions {
            let Some(action) = Action::from_key(action_key) else {
                warnings.push(format!("{path}.{scheme_key}: unknown action '{action_key}' ignored"));
                continue;
            };
            let Value::Object(outcomes) = outcomes else {
                warnings.push(format!("{path}.{scheme_key}.{action_key}: expected object, ignored"));
                continue;
            };
            let table =
                parse_outcome_table(outcomes, &format!("{path}.{scheme_key}.{action_key}"), warnings);
            if !table.is_empty() {
                per_action.insert(action, table);
            }
        }
        out.push((scheme, per_action));
    }
    out
}

/// Validates a raw era record and fills every missing block from the
/// built-in defaults.
pub fn era_from_value(raw: &Value) -> (EraConfig, Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut cfg = defaults::default_era();

    if !raw.is_object() {
        errors.push(format!("era record must be an object (got {})", json_type_name(raw)));
        return (cfg, warnings, errors);
    }

    if let Some(name) = raw.get("name").and_then(Value::as_str) {
        cfg.name = name.to_string();
    }
    if let Some(version) = raw.get("version").and_then(Value::as_str) {
        cfg.version = version.to_string();
    }

    // Presence/type pass over every required block, python-style: missing
    // blocks warn, type-wrong blocks error, both fall back to defaults.
    for key in REQUIRED_BLOCKS {
        let _ = block(raw, key, &mut warnings, &mut errors);
    }

    if let Some(map) = raw.get("knobs").and_then(Value::as_object) {
        for (k, v) in map {
            match (k.as_str(), num(v)) {
                ("mult_lo", Some(f)) => cfg.mult_lo = f,
                ("mult_hi", Some(f)) => cfg.mult_hi = f,
                (_, Some(_)) => {}
                (_, None) => {
                    warnings.push(format!("knobs.{k}: expected number, got {}", json_type_name(v)))
                }
            }
        }
    }

    if let Some(map) = raw.get("prob_model").and_then(Value::as_object) {
        let pm = &mut cfg.prob_model;
        for (k, v) in map {
            let Some(f) = num(v) else {
                warnings.push(format!("prob_model.{k}: expected number, got {}", json_type_name(v)));
                continue;
            };
            match k.as_str() {
                "base_p_min" => pm.base_p_min = f,
                "base_p_max" => pm.base_p_max = f,
                "prob_min" => pm.prob_min = f,
                "prob_max" => pm.prob_max = f,
                "shot_scale" => pm.shot_scale = f,
                "pass_scale" => pm.pass_scale = f,
                "rebound_scale" => pm.rebound_scale = f,
                "orb_base" => pm.orb_base = f,
                "ft_base" => pm.ft_base = f,
                "ft_range" => pm.ft_range = f,
                "ft_min" => pm.ft_min = f,
                "ft_max" => pm.ft_max = f,
                _ => {}
            }
        }
    }

    if let Some(map) = raw.get("logistic_params").and_then(Value::as_object) {
        let mut table = BTreeMap::new();
        for (k, v) in map {
            let Some(kind) = OutcomeKind::from_key(k) else {
                warnings.push(format!("logistic_params: unknown kind '{k}' ignored"));
                continue;
            };
            let Value::Object(spec) = v else {
                warnings.push(format!("logistic_params.{k}: expected object, ignored"));
                continue;
            };
            table.insert(
                kind,
                LogisticSpec {
                    scale: spec.get("scale").and_then(num),
                    sensitivity: spec.get("sensitivity").and_then(num),
                },
            );
        }
        cfg.logistic = table;
    }

    if let Some(map) = raw.get("variance_params").and_then(Value::as_object) {
        let mut vp = VarianceParams {
            logit_noise_std: map.get("logit_noise_std").and_then(num).unwrap_or(0.0),
            kind_mult: BTreeMap::new(),
            team_mult_lo: map.get("team_mult_lo").and_then(num).unwrap_or(0.70),
            team_mult_hi: map.get("team_mult_hi").and_then(num).unwrap_or(1.40),
        };
        if let Some(kinds) = map.get("kind_mult").and_then(Value::as_object) {
            for (k, v) in kinds {
                let Some(kind) = OutcomeKind::from_key(k) else {
                    warnings.push(format!("variance_params.kind_mult: unknown kind '{k}' ignored"));
                    continue;
                };
                if let Some(f) = num(v) {
                    vp.kind_mult.insert(kind, f);
                }
            }
        }
        cfg.variance = vp;
    }

    if let Some(map) = raw.get("role_fit").and_then(Value::as_object) {
        if let Some(f) = map.get("default_strength").and_then(num) {
            cfg.role_fit_default_strength = f.clamp(0.0, 1.0);
        }
    }

    if let Some(map) = raw.get("shot_base").and_then(Value::as_object) {
        cfg.shot_base = parse_outcome_table(map, "shot_base", &mut warnings);
    }
    if let Some(map) = raw.get("pass_base_success").and_then(Value::as_object) {
        cfg.pass_base_success = parse_outcome_table(map, "pass_base_success", &mut warnings);
    }

    if let Some(map) = raw.get("action_outcome_priors").and_then(Value::as_object) {
        let mut priors = BTreeMap::new();
        for (k, v) in map {
            let Some(action) = Action::from_key(k) else {
                warnings.push(format!("action_outcome_priors: unknown action '{k}' ignored"));
                continue;
            };
            let Value::Object(v) = v else {
                warnings.push(format!("action_outcome_priors.{k}: expected object, ignored"));
                continue;
            };
            priors.insert(
                action,
                parse_outcome_table(v, &format!("action_outcome_priors.{k}"), &mut warnings),
            );
        }
        cfg.priors = priors;
    }

    if let Some(map) = raw.get("action_aliases").and_then(Value::as_object) {
        let mut aliases = BTreeMap::new();
        for (k, v) in map {
            let (Some(from), Some(to)) = (
                Action::from_key(k),
                v.as_str().and_then(Action::from_key),
            ) else {
                warnings.push(format!("action_aliases: unknown mapping '{k}' -> {v} ignored"));
                continue;
            };
            aliases.insert(from, to);
        }
        cfg.aliases = aliases;
    }

    if let Some(map) = raw.get("off_scheme_action_weights").and_then(Value::as_object) {
        let mut weights = BTreeMap::new();
        for (k, v) in map {
            let Some(scheme) = OffScheme::from_key(k) else {
                warnings.push(format!("off_scheme_action_weights: unknown scheme '{k}' ignored"));
                continue;
            };
            let Value::Object(v) = v else {
                warnings.push(format!("off_scheme_action_weights.{k}: expected object, ignored"));
                continue;
            };
            weights.insert(
                scheme,
                parse_action_table(v, &format!("off_scheme_action_weights.{k}"), &mut warnings),
            );
        }
        cfg.off_scheme_weights = weights;
    }

    if let Some(map) = raw.get("def_scheme_action_weights").and_then(Value::as_object) {
        let mut weights = BTreeMap::new();
        for (k, v) in map {
            let Some(scheme) = DefScheme::from_key(k) else {
                warnings.push(format!("def_scheme_action_weights: unknown scheme '{k}' ignored"));
                continue;
            };
            let Value::Object(v) = v else {
                warnings.push(format!("def_scheme_action_weights.{k}: expected object, ignored"));
                continue;
            };
            weights.insert(
                scheme,
                parse_def_action_table(v, &format!("def_scheme_action_weights.{k}"), &mut warnings),
            );
        }
        cfg.def_scheme_weights = weights;
    }

    if let Some(map) = raw.get("offense_scheme_mult").and_then(Value::as_object) {
        cfg.off_scheme_mult = parse_scheme_mult_block(
            map,
            "offense_scheme_mult",
            OffScheme::from_key,
            &mut warnings,
        )
        .into_iter()
        .collect();
    }
    if let Some(map) = raw.get("defense_scheme_mult").and_then(Value::as_object) {
        cfg.def_scheme_mult = parse_scheme_mult_block(
            map,
            "defense_scheme_mult",
            DefScheme::from_key,
            &mut warnings,
        )
        .into_iter()
        .collect();
    }

    if let Some(map) = raw.get("rules").and_then(Value::as_object) {
        apply_rules_overrides(&mut cfg, map, &mut warnings);
    }

    (cfg, warnings, errors)
}

fn apply_rules_overrides(
    cfg: &mut EraConfig,
    map: &serde_json::Map<String, Value>,
    warnings: &mut Vec<String>,
) {
    let rules = &mut cfg.rules;
    for (k, v) in map {
        match k.as_str() {
            "quarters" => {
                if let Some(f) = num(v) {
                    rules.quarters = f.max(1.0) as u8;
                }
            }
            "quarter_length" => {
                if let Some(f) = num(v) {
                    rules.quarter_length_sec = f;
                }
            }
            "shot_clock" => {
                if let Some(f) = num(v) {
                    rules.shot_clock_sec = f;
                }
            }
            "orb_reset" => {
                if let Some(f) = num(v) {
                    rules.orb_reset_sec = f;
                }
            }
            "foul_out" => {
                if let Some(f) = num(v) {
                    rules.foul_out = f.max(1.0) as u8;
                }
            }
            "max_steps" => {
                if let Some(f) = num(v) {
                    rules.max_steps = f.max(1.0) as u32;
                }
            }
            "time_costs" => {
                if let Some(costs) = v.as_object() {
                    for (ck, cv) in costs {
                        let Some(f) = num(cv) else {
                            warnings.push(format!("rules.time_costs.{ck}: expected number"));
                            continue;
                        };
                        match ck.as_str() {
                            "Reset" => rules.reset_cost_sec = f,
                            "possession_setup" => rules.setup_cost_sec = f,
                            other => match Action::from_key(other) {
                                Some(action) => {
                                    rules.time_costs.insert(action, f);
                                }
                                None => warnings
                                    .push(format!("rules.time_costs: unknown action '{other}' ignored")),
                            },
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_typed_block_is_an_error_and_falls_back() {
        let raw = json!({"name": "bad", "shot_base": [1, 2, 3]});
        let (cfg, _warnings, errors) = era_from_value(&raw);
        assert!(errors.iter().any(|e| e.contains("shot_base")));
        assert_eq!(cfg.shot_base, defaults::default_shot_base());
    }

    #[test]
    fn unknown_outcome_key_warns_and_is_dropped() {
        let raw = json!({"shot_base": {"SHOT_3_CS": 0.4, "SHOT_HALFCOURT": 0.1}});
        let (cfg, warnings, _) = era_from_value(&raw);
        assert!(warnings.iter().any(|w| w.contains("SHOT_HALFCOURT")));
        assert_eq!(cfg.shot_base.len(), 1);
    }

    #[test]
    fn prob_model_merges_over_defaults() {
        let raw = json!({"prob_model": {"orb_base": 0.30}});
        let (cfg, _, _) = era_from_value(&raw);
        assert_eq!(cfg.prob_model.orb_base, 0.30);
        assert_eq!(cfg.prob_model.ft_base, 0.45);
    }

    #[test]
    fn non_numeric_knob_warns() {
        let raw = json!({"knobs": {"mult_lo": "wide"}});
        let (cfg, warnings, _) = era_from_value(&raw);
        assert!(warnings.iter().any(|w| w.contains("mult_lo")));
        assert_eq!(cfg.mult_lo, 0.70);
    }

    #[test]
    fn rules_override_merges() {
        let raw = json!({"rules": {"quarter_length": 600, "time_costs": {"Reset": 3, "PnR": 8}}});
        let (cfg, _, _) = era_from_value(&raw);
        assert_eq!(cfg.rules.quarter_length_sec, 600.0);
        assert_eq!(cfg.rules.reset_cost_sec, 3.0);
        assert_eq!(cfg.rules.time_cost(Action::PnR), 8.0);
        assert_eq!(cfg.rules.time_cost(Action::Drive), 5.0);
    }
}
