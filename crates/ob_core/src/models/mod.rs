//! Input and output data structures.

pub mod game_state;
pub mod player;
pub mod summary;
pub mod tactics;
pub mod team;

pub use game_state::{GameContext, GameState, TeamSide};
pub use player::{AbilityTable, Player, DERIVED_DEFAULT};
pub use summary::{GameMeta, GameResult, GameStateOut, TeamSummary};
pub use tactics::{ContextBag, ResolvedTactics, TacticsConfig};
pub use team::{BadOutcomeCounts, PlayerBox, RoleFitDiagnostics, RoleFitStepLog, TeamState, TeamTotals};
