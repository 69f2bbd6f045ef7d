//! Pre-submitted tactical instructions
//!
//! Instructions are fixed before kickoff and applied at most once, at the
//! start of the minute they are scheduled for.

use super::player::{PlayerId, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// Move `player_id` to `new_position` (slot must be free)
    Move,
    /// Substitute `player_id` out for `target_id` from the pool
    Swap,
    /// Exchange the positions of `player_id` and `target_id`
    PositionSwap,
}

/// Score condition gating an instruction, seen from the instructing team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Leading,
    Draw,
    Trailing,
}

impl ScoreStatus {
    pub fn from_scores(own: u8, opponent: u8) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => ScoreStatus::Leading,
            std::cmp::Ordering::Equal => ScoreStatus::Draw,
            std::cmp::Ordering::Less => ScoreStatus::Trailing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TacticalInstruction {
    pub minute: u8,
    #[serde(rename = "type")]
    pub kind: InstructionKind,
    pub player_id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_status: Option<ScoreStatus>,
}

impl TacticalInstruction {
    pub fn move_to(minute: u8, player_id: PlayerId, new_position: Position) -> Self {
        Self {
            minute,
            kind: InstructionKind::Move,
            player_id,
            target_id: None,
            new_position: Some(new_position),
            score_status: None,
        }
    }

    pub fn substitute(minute: u8, player_out: PlayerId, player_in: PlayerId) -> Self {
        Self {
            minute,
            kind: InstructionKind::Swap,
            player_id: player_out,
            target_id: Some(player_in),
            new_position: None,
            score_status: None,
        }
    }

    pub fn position_swap(minute: u8, first: PlayerId, second: PlayerId) -> Self {
        Self {
            minute,
            kind: InstructionKind::PositionSwap,
            player_id: first,
            target_id: Some(second),
            new_position: None,
            score_status: None,
        }
    }

    pub fn when(mut self, status: ScoreStatus) -> Self {
        self.score_status = Some(status);
        self
    }

    /// Whether the score condition (if any) holds for the given score.
    pub fn condition_met(&self, own: u8, opponent: u8) -> bool {
        match self.score_status {
            Some(required) => required == ScoreStatus::from_scores(own, opponent),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_status() {
        assert_eq!(ScoreStatus::from_scores(2, 1), ScoreStatus::Leading);
        assert_eq!(ScoreStatus::from_scores(0, 0), ScoreStatus::Draw);
        assert_eq!(ScoreStatus::from_scores(0, 3), ScoreStatus::Trailing);
    }

    #[test]
    fn test_condition_gate() {
        let ins = TacticalInstruction::substitute(60, 9, 19).when(ScoreStatus::Trailing);
        assert!(ins.condition_met(0, 1));
        assert!(!ins.condition_met(1, 1));

        let ungated = TacticalInstruction::move_to(70, 4, Position::DM);
        assert!(ungated.condition_met(3, 0));
    }

    #[test]
    fn test_instruction_json_shape() {
        let json = r#"{"minute": 55, "type": "position_swap", "player_id": 3, "target_id": 8,
                       "score_status": "leading"}"#;
        let ins: TacticalInstruction = serde_json::from_str(json).unwrap();
        assert_eq!(ins.kind, InstructionKind::PositionSwap);
        assert_eq!(ins.target_id, Some(8));
        assert_eq!(ins.score_status, Some(ScoreStatus::Leading));
        assert!(ins.new_position.is_none());
    }
}
