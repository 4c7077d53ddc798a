//! Tactical configuration: schemes, knobs, multiplier maps and the
//! recognized context options.

use crate::ids::{Action, DefAction, DefScheme, OffScheme, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw tactics as supplied by the caller. String keys are the boundary
/// form; the validator resolves them into [`ResolvedTactics`] and drops
/// anything it does not recognize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticsConfig {
    #[serde(default = "default_offense_scheme")]
    pub offense_scheme: String,
    #[serde(default = "default_defense_scheme")]
    pub defense_scheme: String,

    #[serde(default = "one")]
    pub scheme_weight_sharpness: f64,
    #[serde(default = "one")]
    pub scheme_outcome_strength: f64,
    #[serde(default = "one")]
    pub def_scheme_weight_sharpness: f64,
    #[serde(default = "one")]
    pub def_scheme_outcome_strength: f64,

    #[serde(default)]
    pub action_weight_mult: BTreeMap<String, f64>,
    #[serde(default)]
    pub outcome_global_mult: BTreeMap<String, f64>,
    #[serde(default)]
    pub outcome_by_action_mult: BTreeMap<String, BTreeMap<String, f64>>,

    #[serde(default)]
    pub def_action_weight_mult: BTreeMap<String, f64>,
    #[serde(default)]
    pub opp_action_weight_mult: BTreeMap<String, f64>,
    #[serde(default)]
    pub opp_outcome_global_mult: BTreeMap<String, f64>,
    #[serde(default)]
    pub opp_outcome_by_action_mult: BTreeMap<String, BTreeMap<String, f64>>,

    #[serde(default)]
    pub context: BTreeMap<String, serde_json::Value>,

    #[serde(skip)]
    pub resolved: ResolvedTactics,
}

fn default_offense_scheme() -> String {
    OffScheme::SpreadHeavyPnr.as_str().to_string()
}

fn default_defense_scheme() -> String {
    DefScheme::Drop.as_str().to_string()
}

fn one() -> f64 {
    1.0
}

impl Default for TacticsConfig {
    fn default() -> Self {
        TacticsConfig {
            offense_scheme: default_offense_scheme(),
            defense_scheme: default_defense_scheme(),
            scheme_weight_sharpness: 1.0,
            scheme_outcome_strength: 1.0,
            def_scheme_weight_sharpness: 1.0,
            def_scheme_outcome_strength: 1.0,
            action_weight_mult: BTreeMap::new(),
            outcome_global_mult: BTreeMap::new(),
            outcome_by_action_mult: BTreeMap::new(),
            def_action_weight_mult: BTreeMap::new(),
            opp_action_weight_mult: BTreeMap::new(),
            opp_outcome_global_mult: BTreeMap::new(),
            opp_outcome_by_action_mult: BTreeMap::new(),
            context: BTreeMap::new(),
            resolved: ResolvedTactics::default(),
        }
    }
}

/// Validated tactics the engine reads. Built in place by the validator;
/// all multipliers are clamped and keyed by closed enums.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTactics {
    pub offense_scheme: OffScheme,
    pub defense_scheme: DefScheme,
    pub scheme_weight_sharpness: f64,
    pub scheme_outcome_strength: f64,
    pub def_scheme_weight_sharpness: f64,
    pub def_scheme_outcome_strength: f64,
    pub action_weight_mult: BTreeMap<Action, f64>,
    pub outcome_global_mult: BTreeMap<Outcome, f64>,
    pub outcome_by_action_mult: BTreeMap<Action, BTreeMap<Outcome, f64>>,
    pub def_action_weight_mult: BTreeMap<DefAction, f64>,
    pub opp_action_weight_mult: BTreeMap<Action, f64>,
    pub opp_outcome_global_mult: BTreeMap<Outcome, f64>,
    pub opp_outcome_by_action_mult: BTreeMap<Action, BTreeMap<Outcome, f64>>,
    pub context: ContextBag,
}

impl Default for ResolvedTactics {
    fn default() -> Self {
        ResolvedTactics {
            offense_scheme: OffScheme::SpreadHeavyPnr,
            defense_scheme: DefScheme::Drop,
            scheme_weight_sharpness: 1.0,
            scheme_outcome_strength: 1.0,
            def_scheme_weight_sharpness: 1.0,
            def_scheme_outcome_strength: 1.0,
            action_weight_mult: BTreeMap::new(),
            outcome_global_mult: BTreeMap::new(),
            outcome_by_action_mult: BTreeMap::new(),
            def_action_weight_mult: BTreeMap::new(),
            opp_action_weight_mult: BTreeMap::new(),
            opp_outcome_global_mult: BTreeMap::new(),
            opp_outcome_by_action_mult: BTreeMap::new(),
            context: ContextBag::default(),
        }
    }
}

/// Recognized context options. The validator drops every other key.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBag {
    pub pace_mult: f64,
    pub orb_mult: f64,
    pub drb_mult: f64,
    pub variance_mult: f64,
    /// None means "use the era default".
    pub role_fit_strength: Option<f64>,
    pub transition_emphasis: bool,
    pub heavy_pnr: bool,
}

impl Default for ContextBag {
    fn default() -> Self {
        ContextBag {
            pace_mult: 1.0,
            orb_mult: 1.0,
            drb_mult: 1.0,
            variance_mult: 1.0,
            role_fit_strength: None,
            transition_emphasis: false,
            heavy_pnr: false,
        }
    }
}

impl ContextBag {
    /// Context keys the validator recognizes.
    pub const KNOWN_KEYS: [&'static str; 7] = [
        "PACE_MULT",
        "ORB_MULT",
        "DRB_MULT",
        "VARIANCE_MULT",
        "ROLE_FIT_STRENGTH",
        "TRANSITION_EMPHASIS",
        "HEAVY_PNR",
    ];
}
