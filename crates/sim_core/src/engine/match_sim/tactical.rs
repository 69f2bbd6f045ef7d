//! Scheduled tactical instructions
//!
//! Instructions are applied at the start of their minute, gated by the live
//! score. An illegal instruction never changes the match: it is logged at
//! debug level, handed to the diagnostic hook and otherwise ignored.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::MatchEngine;
use crate::engine::types::Side;
use crate::models::{
    EventDetails, EventType, InstructionKind, PlayerId, Position, SubstitutionDetails,
    SubstitutionReason, TacticalChangeDetails, TacticalInstruction, TeamId,
};

/// Why an instruction was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    ScoreConditionNotMet,
    /// Instructed player is sent off or no longer on the pitch
    PlayerNotActive,
    TargetPositionOccupied,
    /// Move without a `new_position`
    MissingPosition,
    /// Swap or position swap without a `target_id`
    MissingTarget,
    /// Substitute not in the remaining pool
    SubstituteUnavailable,
    SubstitutionLimit,
    SwapPartnerInactive,
}

/// Diagnostic record for a skipped instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInstruction {
    pub side: Side,
    pub team_id: TeamId,
    pub minute: u8,
    pub instruction: TacticalInstruction,
    pub reason: SkipReason,
}

impl<R: Rng> MatchEngine<R> {
    /// Apply every instruction scheduled for `minute`, home side first.
    pub(super) fn apply_instructions(&mut self, minute: u8) {
        for side in [Side::Home, Side::Away] {
            let due: Vec<TacticalInstruction> = self
                .side(side)
                .instructions
                .iter()
                .filter(|i| i.minute == minute)
                .cloned()
                .collect();

            for instruction in due {
                if let Err(reason) = self.apply_instruction(side, &instruction) {
                    self.report_skip(side, instruction, reason);
                }
            }
        }
    }

    fn apply_instruction(&mut self, side: Side, instruction: &TacticalInstruction) -> Result<(), SkipReason> {
        let (own_score, opp_score) = self.score_for(side);
        if !instruction.condition_met(own_score, opp_score) {
            return Err(SkipReason::ScoreConditionNotMet);
        }
        if !self.side(side).team.is_active(instruction.player_id) {
            return Err(SkipReason::PlayerNotActive);
        }

        match instruction.kind {
            InstructionKind::Move => {
                let to = instruction.new_position.ok_or(SkipReason::MissingPosition)?;
                if self.side(side).team.is_position_occupied(to) {
                    return Err(SkipReason::TargetPositionOccupied);
                }
                let from = self.position_of(side, instruction.player_id)?;

                let state = self.side_mut(side);
                if !state.team.move_player(instruction.player_id, to, &mut state.calc) {
                    return Err(SkipReason::PlayerNotActive);
                }
                state.refresh_snapshot();
                self.push_tactical_change(side, instruction, None, from, to);
            }
            InstructionKind::Swap => {
                let sub_id = instruction.target_id.ok_or(SkipReason::MissingTarget)?;
                self.substitution_check(side, sub_id)?;
                if !self.perform_substitution(side, instruction.player_id, sub_id, SubstitutionReason::Tactical) {
                    return Err(SkipReason::SubstituteUnavailable);
                }
            }
            InstructionKind::PositionSwap => {
                let partner = instruction.target_id.ok_or(SkipReason::MissingTarget)?;
                if !self.side(side).team.is_active(partner) {
                    return Err(SkipReason::SwapPartnerInactive);
                }
                let from = self.position_of(side, instruction.player_id)?;
                let to = self.position_of(side, partner)?;

                let state = self.side_mut(side);
                if !state.team.swap_positions(instruction.player_id, partner, &mut state.calc) {
                    return Err(SkipReason::SwapPartnerInactive);
                }
                state.refresh_snapshot();
                self.push_tactical_change(side, instruction, Some(partner), from, to);
            }
        }
        Ok(())
    }

    fn position_of(&self, side: Side, id: PlayerId) -> Result<Position, SkipReason> {
        self.side(side)
            .team
            .player(id)
            .map(|p| p.position)
            .ok_or(SkipReason::PlayerNotActive)
    }

    fn push_tactical_change(
        &mut self,
        side: Side,
        instruction: &TacticalInstruction,
        related: Option<PlayerId>,
        from: Position,
        to: Position,
    ) {
        let details = EventDetails {
            tactical_change: Some(TacticalChangeDetails { kind: instruction.kind, from, to }),
            ..Default::default()
        };
        let event = self
            .team_event(self.minute, EventType::TacticalChange, side)
            .with_player(Some(instruction.player_id))
            .with_related(related)
            .with_details(details);
        self.push_event(event);
    }

    fn report_skip(&mut self, side: Side, instruction: TacticalInstruction, reason: SkipReason) {
        let team_id = self.side(side).team.id;
        debug!(
            team = team_id,
            minute = self.minute,
            player = instruction.player_id,
            ?reason,
            "instruction skipped"
        );
        if let Some(hook) = self.diagnostic_hook.as_mut() {
            let skipped = SkippedInstruction { side, team_id, minute: self.minute, instruction, reason };
            hook(&skipped);
        }
    }

    // ========== Substitutions ==========

    /// Whether `sub_id` may come on for `side` right now.
    pub(super) fn substitution_check(&self, side: Side, sub_id: PlayerId) -> Result<(), SkipReason> {
        let state = self.side(side);
        if state.substitutions_made >= self.config.max_substitutions {
            return Err(SkipReason::SubstitutionLimit);
        }
        if !state.pool.iter().any(|p| p.id == sub_id) {
            return Err(SkipReason::SubstituteUnavailable);
        }
        Ok(())
    }

    /// Bring `in_id` from the pool on for `out_id` and emit the event.
    ///
    /// The incoming player leaves the pool and the side's snapshot is
    /// recomputed at once.
    pub(super) fn perform_substitution(
        &mut self,
        side: Side,
        out_id: PlayerId,
        in_id: PlayerId,
        reason: SubstitutionReason,
    ) -> bool {
        let minute = self.minute;
        let state = self.side_mut(side);

        let Some(pool_idx) = state.pool.iter().position(|p| p.id == in_id) else {
            return false;
        };
        let Some((out_name, position)) = state.team.player(out_id).map(|p| (p.player.name.clone(), p.position))
        else {
            return false;
        };
        let incoming = state.pool[pool_idx].clone();
        let in_name = incoming.name.clone();

        if !state.team.substitute_player(out_id, incoming, minute, &mut state.calc) {
            return false;
        }
        state.pool.remove(pool_idx);
        state.substitutions_made += 1;
        state.refresh_snapshot();
        info!(team = %state.team.name, minute, outgoing = out_id, incoming = in_id, ?reason, "substitution");

        let details = EventDetails {
            substitution: Some(SubstitutionDetails {
                player_in_name: in_name,
                player_out_name: out_name,
                position,
                reason,
            }),
            ..Default::default()
        };
        let event = self
            .team_event(minute, EventType::Substitution, side)
            .with_player(Some(out_id))
            .with_related(Some(in_id))
            .with_details(details);
        self.push_event(event);
        true
    }
}
