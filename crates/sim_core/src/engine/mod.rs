pub mod attribute_calc; // lane × phase contributions + per-side cache
pub mod condition; // fitness decay / recovery / performance multiplier
pub mod config;
pub mod duel; // logistic duel primitive + weighted draws
pub mod injury;
pub mod match_sim;
pub mod set_pieces;
pub mod stats;
pub mod team_state; // live team: fitness, cards, snapshot
pub mod tuning; // balance tables (single source for all percentages)
pub mod types;

pub use attribute_calc::AttributeCalculator;
pub use condition::ConditionSystem;
pub use config::EngineConfig;
pub use injury::{InjuryAction, InjuryResult, InjurySystem, InjuryType};
pub use match_sim::{DiagnosticHook, MatchEngine, SideState, SkipReason, SkippedInstruction};
pub use team_state::{LaneStrength, Snapshot, TacticalPlayer, Team};
pub use types::{AttackType, FinalResult, Lane, Phase, SetPieceKind, ShotType, Side};
