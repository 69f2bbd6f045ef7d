use serde::{Deserialize, Serialize};

use super::instructions::InstructionKind;
use super::player::{PlayerId, Position};
use super::team::TeamId;
use crate::engine::injury::InjuryResult;
use crate::engine::team_state::Snapshot;
use crate::engine::types::{AttackType, FinalResult, Lane, SetPieceKind, ShotType, Side};

/// One entry of the append-only match timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Primary actor (scorer, fouler, player coming off, kicker ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    /// Secondary actor (assist, player coming on, swap partner ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[serde(rename = "kickoff")]
    KickOff,
    HalfTime,
    SecondHalf,
    FullTime,
    ExtraTimeStart,
    ExtraTimeHalfTime,
    ExtraTimeSecondHalf,
    ExtraTimeEnd,
    /// Periodic strength summary of both teams
    Snapshot,
    Goal,
    Save,
    ShotBlocked,
    Miss,
    DefenseStopped,
    Foul,
    YellowCard,
    RedCard,
    Corner,
    FreeKick,
    IndirectFreeKick,
    Penalty,
    Substitution,
    TacticalChange,
    Injury,
    ShootoutStart,
    ShootoutKick,
    ShootoutEnd,
}

impl EventType {
    /// Timeline tag for an attack that ended with `result`.
    pub fn for_result(result: FinalResult) -> Self {
        match result {
            FinalResult::Goal => EventType::Goal,
            FinalResult::Save => EventType::Save,
            FinalResult::Blocked => EventType::ShotBlocked,
            FinalResult::Miss => EventType::Miss,
            FinalResult::DefenseStopped => EventType::DefenseStopped,
        }
    }

    /// Timeline tag for a set piece that did not produce a goal.
    pub fn for_set_piece(kind: SetPieceKind) -> Self {
        match kind {
            SetPieceKind::Corner => EventType::Corner,
            SetPieceKind::IndirectFreeKick => EventType::IndirectFreeKick,
            SetPieceKind::DirectFreeKick => EventType::FreeKick,
            SetPieceKind::Penalty => EventType::Penalty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventDetails {
    /// Score after the event (goals, period boundaries)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<AttackDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPieceDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution: Option<SubstitutionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactical_change: Option<TacticalChangeDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injury: Option<InjuryDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutKickDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    /// Final shootout tally (shootout end only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout_score: Option<ScoreLine>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreLine {
    pub home: u8,
    pub away: u8,
}

/// Full breakdown of one key-moment attack
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttackDetails {
    pub lane: Lane,
    pub attack_type: AttackType,
    pub duel: MidfieldDuel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<PushDuel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotDetails>,
    pub final_result: FinalResult,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MidfieldDuel {
    pub home_value: f32,
    pub away_value: f32,
    pub winner: Side,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PushDuel {
    pub attack_power: f32,
    pub defense_power: f32,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ShotDetails {
    pub shot_type: ShotType,
    pub shooter_rating: f32,
    pub gk_rating: f32,
    /// Shot distance in metres (long shots only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Random variance multiplier (all but long shots)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetPieceDetails {
    pub kind: SetPieceKind,
    pub lane: Lane,
    pub scored: bool,
    pub probability: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDetails {
    pub yellow_cards: u8,
    pub second_yellow: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionReason {
    Tactical,
    Injury,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubstitutionDetails {
    pub player_in_name: String,
    pub player_out_name: String,
    pub position: Position,
    pub reason: SubstitutionReason,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticalChangeDetails {
    pub kind: InstructionKind,
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjuryDetails {
    pub result: InjuryResult,
    pub treatment_seconds: u32,
    pub replaced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotDetails {
    pub home: Snapshot,
    pub away: Snapshot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShootoutKickDetails {
    pub round: u8,
    pub scored: bool,
    pub sudden_death: bool,
    pub home_score: u8,
    pub away_score: u8,
}

impl MatchEvent {
    /// Event without team or player attribution (period markers).
    pub fn marker(minute: u8, event_type: EventType) -> Self {
        Self {
            minute,
            event_type,
            team_name: None,
            team_id: None,
            player_id: None,
            related_player_id: None,
            details: None,
        }
    }

    pub fn for_team(minute: u8, event_type: EventType, team_name: &str, team_id: TeamId) -> Self {
        Self {
            minute,
            event_type,
            team_name: Some(team_name.to_string()),
            team_id: Some(team_id),
            player_id: None,
            related_player_id: None,
            details: None,
        }
    }

    pub fn with_player(mut self, player_id: Option<PlayerId>) -> Self {
        self.player_id = player_id;
        self
    }

    pub fn with_related(mut self, related_player_id: Option<PlayerId>) -> Self {
        self.related_player_id = related_player_id;
        self
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_goal(&self) -> bool {
        self.event_type == EventType::Goal
    }
}
