use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::events::{EventType, MatchEvent};
use crate::engine::types::{AttackType, SetPieceKind, ShotType, Side};

/// Everything a finished simulation hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub score_home: u8,
    pub score_away: u8,
    pub extra_time_played: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutSummary>,
    /// Decided winner, `None` for a draw in a non-knockout match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    pub events: Vec<MatchEvent>,
    pub statistics: MatchStatistics,
}

impl MatchResult {
    pub fn goals(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| e.event_type == EventType::Goal)
    }

    pub fn count_events(&self, event_type: EventType) -> usize {
        self.events.iter().filter(|e| e.event_type == event_type).count()
    }

    pub fn total_goals(&self) -> u32 {
        self.score_home as u32 + self.score_away as u32
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShootoutSummary {
    pub home: u8,
    pub away: u8,
    pub rounds: u8,
    pub winner: Side,
}

/// Attempt/outcome tally for one attack or shot type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutcomeCounter {
    pub attempts: u32,
    pub goals: u32,
    pub saves: u32,
    pub misses: u32,
    pub blocked: u32,
    /// Attack never reached a shot (attack types only)
    pub stopped: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SetPieceCounter {
    pub triggered: u32,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SetPieceSummary {
    pub by_kind: BTreeMap<SetPieceKind, SetPieceCounter>,
}

impl SetPieceSummary {
    pub fn get(&self, kind: SetPieceKind) -> SetPieceCounter {
        self.by_kind.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_goals(&self) -> u32 {
        self.by_kind.values().map(|c| c.goals).sum()
    }
}

/// Aggregated statistics for a simulated match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MatchStatistics {
    pub attack_types: BTreeMap<AttackType, OutcomeCounter>,
    pub shot_types: BTreeMap<ShotType, OutcomeCounter>,
    /// Key moments in which each side won the midfield duel
    pub possession_home: u32,
    pub possession_away: u32,
    pub possession_home_pct: f32,
    pub possession_away_pct: f32,
    pub fouls_home: u32,
    pub fouls_away: u32,
    pub yellow_cards_home: u32,
    pub yellow_cards_away: u32,
    pub red_cards_home: u32,
    pub red_cards_away: u32,
    pub shots_home: u32,
    pub shots_away: u32,
    pub set_pieces: SetPieceSummary,
}

impl MatchStatistics {
    pub fn attack(&self, attack_type: AttackType) -> OutcomeCounter {
        self.attack_types.get(&attack_type).copied().unwrap_or_default()
    }

    pub fn shot(&self, shot_type: ShotType) -> OutcomeCounter {
        self.shot_types.get(&shot_type).copied().unwrap_or_default()
    }
}
