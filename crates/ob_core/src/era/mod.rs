//! Era registry: loading, validation, activation and caching of the
//! tunable parameter tables.
//!
//! An era is a named snapshot of every tuning table the engine consumes.
//! Activation swaps a process-wide `Arc` snapshot atomically; games take
//! one `Arc` clone at tip-off and never touch the lock again, so parallel
//! games under a single activated era share the tables copy-free.

mod defaults;
mod parse;
pub mod tunables;

pub use defaults::default_era;
pub use tunables::{TunableKey, Tunables};

use crate::ids::{Action, DefAction, DefScheme, OffScheme, Outcome, OutcomeKind};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Clamp bounds and slopes of the success-probability model.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbModel {
    pub base_p_min: f64,
    pub base_p_max: f64,
    pub prob_min: f64,
    pub prob_max: f64,
    pub shot_scale: f64,
    pub pass_scale: f64,
    pub rebound_scale: f64,
    pub orb_base: f64,
    pub ft_base: f64,
    pub ft_range: f64,
    pub ft_min: f64,
    pub ft_max: f64,
}

/// Logistic slope for one outcome kind. `sensitivity` wins when both are
/// present; `scale` alone means `sensitivity = 1/scale`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogisticSpec {
    pub scale: Option<f64>,
    pub sensitivity: Option<f64>,
}

/// Logit-space noise parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceParams {
    pub logit_noise_std: f64,
    pub kind_mult: BTreeMap<OutcomeKind, f64>,
    pub team_mult_lo: f64,
    pub team_mult_hi: f64,
}

/// Minute targets by lineup slot, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinuteTargets {
    pub starter_sec: u64,
    pub rotation_sec: u64,
    pub bench_high_sec: u64,
    pub bench_low_sec: u64,
}

/// Per-possession freshness decay amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreshnessLoss {
    pub handler: f64,
    pub wing: f64,
    pub big: f64,
    pub transition_emphasis: f64,
    pub heavy_pnr: f64,
}

/// Substitution trigger thresholds on normalized freshness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreshnessThresholds {
    pub sub_out: f64,
    pub sub_in: f64,
}

/// How freshness feeds back into resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueEffects {
    pub def_mult_min: f64,
    pub logit_delta_max: f64,
}

/// Clock, foul and rotation rules. Era-overrideable through the optional
/// `rules` block.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub quarters: u8,
    pub quarter_length_sec: f64,
    pub shot_clock_sec: f64,
    pub orb_reset_sec: f64,
    pub foul_out: u8,
    pub max_steps: u32,
    /// Time cost per base action, in game seconds.
    pub time_costs: BTreeMap<Action, f64>,
    pub reset_cost_sec: f64,
    pub setup_cost_sec: f64,
    pub targets: MinuteTargets,
    pub freshness_loss: FreshnessLoss,
    pub freshness_thresholds: FreshnessThresholds,
    pub fatigue_effects: FatigueEffects,
}

impl GameRules {
    pub fn time_cost(&self, action: Action) -> f64 {
        self.time_costs.get(&action).copied().unwrap_or(0.0)
    }
}

/// Immutable tuning snapshot. Built once per era, shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EraConfig {
    pub name: String,
    pub version: String,
    pub mult_lo: f64,
    pub mult_hi: f64,
    pub prob_model: ProbModel,
    pub logistic: BTreeMap<OutcomeKind, LogisticSpec>,
    pub variance: VarianceParams,
    pub role_fit_default_strength: f64,
    pub shot_base: BTreeMap<Outcome, f64>,
    pub pass_base_success: BTreeMap<Outcome, f64>,
    pub priors: BTreeMap<Action, BTreeMap<Outcome, f64>>,
    pub aliases: BTreeMap<Action, Action>,
    pub off_scheme_weights: BTreeMap<OffScheme, BTreeMap<Action, f64>>,
    pub def_scheme_weights: BTreeMap<DefScheme, BTreeMap<DefAction, f64>>,
    pub off_scheme_mult: BTreeMap<OffScheme, BTreeMap<Action, BTreeMap<Outcome, f64>>>,
    pub def_scheme_mult: BTreeMap<DefScheme, BTreeMap<Action, BTreeMap<Outcome, f64>>>,
    pub rules: GameRules,
}

impl EraConfig {
    /// Alias resolution: folds short action names onto their base action.
    pub fn action_base(&self, action: Action) -> Action {
        self.aliases.get(&action).copied().unwrap_or(action)
    }

    /// Logistic sensitivity for a kind, with the documented fallbacks:
    /// explicit sensitivity, then 1/scale, then the old single-scale knobs.
    pub fn sensitivity(&self, kind: OutcomeKind) -> f64 {
        let spec = self
            .logistic
            .get(&kind)
            .or_else(|| self.logistic.get(&OutcomeKind::Default))
            .copied()
            .unwrap_or_default();
        if let Some(s) = spec.sensitivity {
            return s;
        }
        if let Some(scale) = spec.scale {
            if scale > 1e-9 {
                return 1.0 / scale;
            }
        }
        let pm = &self.prob_model;
        match kind {
            OutcomeKind::Pass => 1.0 / pm.pass_scale,
            OutcomeKind::Rebound => 1.0 / pm.rebound_scale,
            _ => 1.0 / pm.shot_scale,
        }
    }
}

/// Activated era plus the derived allowed sets the validator consults.
#[derive(Debug, Clone)]
pub struct EraRuntime {
    pub cfg: EraConfig,
    pub allowed_off_actions: BTreeSet<Action>,
    pub allowed_def_actions: BTreeSet<DefAction>,
    pub allowed_outcomes: BTreeSet<Outcome>,
}

impl EraRuntime {
    pub fn from_config(cfg: EraConfig) -> Self {
        let mut allowed_off_actions: BTreeSet<Action> = BTreeSet::new();
        for table in cfg.off_scheme_weights.values() {
            allowed_off_actions.extend(table.keys().copied());
        }
        allowed_off_actions.extend(cfg.priors.keys().copied());
        allowed_off_actions.extend(cfg.aliases.keys().copied());
        allowed_off_actions.extend(cfg.aliases.values().copied());

        let mut allowed_def_actions: BTreeSet<DefAction> = BTreeSet::new();
        for table in cfg.def_scheme_weights.values() {
            allowed_def_actions.extend(table.keys().copied());
        }

        let mut allowed_outcomes: BTreeSet<Outcome> = BTreeSet::new();
        allowed_outcomes.extend(cfg.shot_base.keys().copied());
        allowed_outcomes.extend(cfg.pass_base_success.keys().copied());
        for pri in cfg.priors.values() {
            allowed_outcomes.extend(pri.keys().copied());
        }
        // every outcome with a resolution profile stays addressable
        allowed_outcomes.extend(Outcome::ALL);

        EraRuntime { cfg, allowed_off_actions, allowed_def_actions, allowed_outcomes }
    }
}

static ACTIVE_ERA: Lazy<RwLock<Arc<EraRuntime>>> =
    Lazy::new(|| RwLock::new(Arc::new(EraRuntime::from_config(default_era()))));

/// Cache entry: the runtime plus the load-time report, replayed on every
/// hit so repeated loads produce identical output records.
#[derive(Clone)]
struct CachedEra {
    runtime: Arc<EraRuntime>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

static ERA_CACHE: Lazy<Mutex<HashMap<String, CachedEra>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

static ERA_BASE_DIR: Lazy<RwLock<PathBuf>> = Lazy::new(|| RwLock::new(PathBuf::from(".")));

/// Era input: a name resolved against disk (falling back to built-in
/// defaults) or an inline JSON record.
#[derive(Debug, Clone)]
pub enum EraSelector {
    Name(String),
    Inline(Value),
}

impl From<&str> for EraSelector {
    fn from(name: &str) -> Self {
        EraSelector::Name(name.to_string())
    }
}

impl EraSelector {
    pub fn label(&self) -> String {
        match self {
            EraSelector::Name(n) => n.clone(),
            EraSelector::Inline(v) => v
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("custom")
                .to_string(),
        }
    }
}

/// Directory era files are resolved against. The harness points this at
/// its data directory; the default is the working directory.
pub fn set_base_dir(dir: impl Into<PathBuf>) {
    *ERA_BASE_DIR.write().expect("era base dir lock") = dir.into();
}

fn resolve_era_path(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.ends_with(".json") || name.contains('/') || name.contains('\\') {
        let p = PathBuf::from(name);
        return p.exists().then_some(p);
    }
    let base = ERA_BASE_DIR.read().expect("era base dir lock").clone();
    let lower = name.to_lowercase();
    let candidates = [
        base.join(format!("era_{name}.json")),
        base.join(format!("era_{lower}.json")),
        base.join("eras").join(format!("era_{name}.json")),
        base.join("eras").join(format!("era_{lower}.json")),
    ];
    candidates.into_iter().find(|p| p.exists())
}

/// Loads an era and returns the runtime plus accumulated warnings/errors.
/// Name lookups hit the cache; inline records are always re-validated.
pub fn load_era(selector: &EraSelector) -> (Arc<EraRuntime>, Vec<String>, Vec<String>) {
    match selector {
        EraSelector::Inline(raw) => {
            let (cfg, warnings, errors) = parse::era_from_value(raw);
            (Arc::new(EraRuntime::from_config(cfg)), warnings, errors)
        }
        EraSelector::Name(name) => {
            if let Some(hit) = ERA_CACHE.lock().expect("era cache lock").get(name) {
                return (Arc::clone(&hit.runtime), hit.warnings.clone(), hit.errors.clone());
            }
            let mut warnings = Vec::new();
            let mut errors = Vec::new();
            let lookup = if name == "default" { "default" } else { name.as_str() };
            let cfg = match resolve_era_path(lookup) {
                None => {
                    warnings.push(format!(
                        "era file not found for '{name}', using built-in defaults"
                    ));
                    let mut cfg = default_era();
                    cfg.name = name.clone();
                    cfg
                }
                Some(path) => match read_era_file(&path) {
                    Ok(raw) => {
                        let (mut cfg, w, e) = parse::era_from_value(&raw);
                        warnings.extend(w);
                        errors.extend(e);
                        if cfg.name == "builtin_default" {
                            cfg.name = name.clone();
                        }
                        cfg
                    }
                    Err(err) => {
                        errors.push(format!(
                            "failed to read era json ({}): {err}",
                            path.display()
                        ));
                        let mut cfg = default_era();
                        cfg.name = name.clone();
                        cfg
                    }
                },
            };
            let runtime = Arc::new(EraRuntime::from_config(cfg));
            let entry = CachedEra {
                runtime: Arc::clone(&runtime),
                warnings: warnings.clone(),
                errors: errors.clone(),
            };
            let mut cache = ERA_CACHE.lock().expect("era cache lock");
            cache.insert(runtime.cfg.name.clone(), entry.clone());
            if runtime.cfg.name != *name {
                cache.insert(name.clone(), entry);
            }
            drop(cache);
            (runtime, warnings, errors)
        }
    }
}

fn read_era_file(path: &Path) -> Result<Value, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    if raw.is_object() {
        Ok(raw)
    } else {
        Err("era json root must be an object".to_string())
    }
}

/// Makes the given runtime the process-wide active era. Idempotent.
pub fn activate(runtime: Arc<EraRuntime>) {
    log::debug!("activating era '{}' v{}", runtime.cfg.name, runtime.cfg.version);
    *ACTIVE_ERA.write().expect("active era lock") = runtime;
}

/// Current activated era snapshot.
pub fn active() -> Arc<EraRuntime> {
    Arc::clone(&ACTIVE_ERA.read().expect("active era lock"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_era_is_complete() {
        let era = default_era();
        assert_eq!(era.name, "builtin_default");
        assert_eq!(era.shot_base.len(), 9);
        assert_eq!(era.pass_base_success.len(), 4);
        assert_eq!(era.off_scheme_weights.len(), OffScheme::ALL.len());
        assert_eq!(era.def_scheme_weights.len(), DefScheme::ALL.len());
        assert_eq!(era.priors.len(), 10);
        // priors exist for every base action of the alias map
        for base in era.aliases.values() {
            assert!(era.priors.contains_key(base), "missing priors for {base}");
        }
    }

    #[test]
    fn sensitivity_fallback_chain() {
        let mut era = default_era();
        assert!((era.sensitivity(OutcomeKind::Shot3) - 1.0 / 30.0).abs() < 1e-12);
        era.logistic.insert(OutcomeKind::Shot3, LogisticSpec { scale: Some(10.0), sensitivity: None });
        assert!((era.sensitivity(OutcomeKind::Shot3) - 0.1).abs() < 1e-12);
        era.logistic.remove(&OutcomeKind::Shot3);
        era.logistic.remove(&OutcomeKind::Default);
        assert!((era.sensitivity(OutcomeKind::Pass) - 1.0 / era.prob_model.pass_scale).abs() < 1e-12);
    }

    #[test]
    fn unknown_name_falls_back_and_cache_hits_replay_the_report() {
        let (runtime, warnings, errors) =
            load_era(&EraSelector::Name("no_such_era_xyz".to_string()));
        assert!(errors.is_empty());
        assert_eq!(runtime.cfg.name, "no_such_era_xyz");
        assert!(warnings.iter().any(|w| w.contains("not found")));
        // cache hits replay the original report so outputs stay identical
        let (_, w2, e2) = load_era(&EraSelector::Name("no_such_era_xyz".to_string()));
        assert_eq!(w2, warnings);
        assert!(e2.is_empty());
    }

    #[test]
    fn inline_era_overrides_block() {
        let raw = json!({
            "name": "test_inline",
            "shot_base": {"SHOT_3_CS": 0.50},
        });
        let (runtime, warnings, errors) = load_era(&EraSelector::Inline(raw));
        assert!(errors.is_empty(), "{errors:?}");
        // replaced wholesale, so only the listed key remains
        assert_eq!(runtime.cfg.shot_base.len(), 1);
        assert_eq!(runtime.cfg.shot_base.get(&Outcome::Shot3Cs), Some(&0.50));
        // every other block is filled from defaults with a warning
        assert!(warnings.iter().any(|w| w.contains("pass_base_success")));
    }

    #[test]
    fn allowed_sets_follow_tables() {
        let runtime = EraRuntime::from_config(default_era());
        assert!(runtime.allowed_off_actions.contains(&Action::PnR));
        assert!(runtime.allowed_off_actions.contains(&Action::Chicago));
        assert!(runtime.allowed_def_actions.contains(&DefAction::BlitzTrap));
        assert!(runtime.allowed_outcomes.contains(&Outcome::ToShotclock));
    }
}
