//! Calibration support: structured dummy rosters, style-directed tactic
//! sampling, per-game metric extraction and batch aggregation.
//!
//! The harness binary drives tens of thousands of games through these
//! helpers; the engine itself stays unaware of them.

pub mod aggregate;
pub mod generate;
pub mod metrics;

pub use aggregate::{StatsAccumulator, SummaryStats};
pub use generate::{build_team, style_profile, Archetype, StyleProfile};
pub use metrics::{compute_game_metrics, GameMetrics};
