pub mod events;
pub mod instructions;
pub mod match_result;
pub mod player;
pub mod team;

pub use events::{
    AttackDetails, CardDetails, EventDetails, EventType, InjuryDetails, MatchEvent, MidfieldDuel,
    PushDuel, ScoreLine, SetPieceDetails, ShootoutKickDetails, ShotDetails, SnapshotDetails,
    SubstitutionDetails, SubstitutionReason, TacticalChangeDetails,
};
pub use instructions::{InstructionKind, ScoreStatus, TacticalInstruction};
pub use match_result::{
    MatchResult, MatchStatistics, OutcomeCounter, SetPieceCounter, SetPieceSummary,
    ShootoutSummary,
};
pub use player::{Player, PlayerAttributes, PlayerId, Position, PositionGroup};
pub use team::{BenchBucket, BenchConfig, LineupEntry, MatchSetup, TeamId, TeamSheet};
