//! Set piece resolution (corners, free kicks, penalties)
//!
//! Pure functions: the caller passes the random roll in, so every curve can
//! be unit tested without an RNG.
//!
//! `P(goal) = 1 / (1 + exp(-diff·k + c))` where
//! `diff = (team average skill + best taker skill) - (opponent average defending + GK rating)`.

use super::team_state::Team;
use super::tuning::{set_piece_curve, DIRECT_FREE_KICK_SHARE, PENALTY_SHARE};
use super::types::{Lane, SetPieceKind};
use crate::models::PlayerId;

// ============================================================================
// Context
// ============================================================================

/// 세트피스 실행 컨텍스트
#[derive(Debug, Clone, PartialEq)]
pub struct SetPieceContext {
    pub kind: SetPieceKind,
    pub taker_id: Option<PlayerId>,
    /// Attacking team's average of the relevant skill
    pub team_skill: f32,
    pub taker_skill: f32,
    /// Defending team's average defending
    pub defending: f32,
    /// Defending keeper's set-piece rating
    pub gk_rating: f32,
}

impl SetPieceContext {
    pub fn from_teams(kind: SetPieceKind, attacking: &Team, defending: &Team) -> Self {
        let taker = attacking.best_set_piece_taker(kind);
        let team_skill = match kind {
            SetPieceKind::Penalty => attacking.avg_penalties(),
            _ => attacking.avg_free_kicks(),
        };

        Self {
            kind,
            taker_id: taker.map(|t| t.id()),
            team_skill,
            taker_skill: taker.map(|t| Team::set_piece_skill(&t.player, kind) as f32).unwrap_or(0.0),
            defending: defending.avg_defending(),
            gk_rating: defending.goalkeeper_set_piece_rating(),
        }
    }

    pub fn attack_score(&self) -> f32 {
        self.team_skill + self.taker_skill
    }

    pub fn defense_score(&self) -> f32 {
        self.defending + self.gk_rating
    }

    pub fn diff(&self) -> f32 {
        self.attack_score() - self.defense_score()
    }
}

/// Goal probability of a set piece
pub fn set_piece_probability(ctx: &SetPieceContext) -> f32 {
    let curve = set_piece_curve(ctx.kind);
    1.0 / (1.0 + (-ctx.diff() * curve.k + curve.c).exp())
}

/// 세트피스 결과 결정 (roll ∈ [0, 1))
pub fn resolve_set_piece(ctx: &SetPieceContext, roll: f32) -> bool {
    roll < set_piece_probability(ctx)
}

// ============================================================================
// Foul routing
// ============================================================================

/// Set piece awarded for a foul in `lane`.
///
/// The central lane stands in for the penalty area: penalty or indirect free
/// kick. A wide foul gives a direct free kick or nothing.
pub fn route_foul(lane: Lane, roll: f32) -> Option<SetPieceKind> {
    match lane {
        Lane::Center => {
            if roll < PENALTY_SHARE {
                Some(SetPieceKind::Penalty)
            } else {
                Some(SetPieceKind::IndirectFreeKick)
            }
        }
        Lane::Left | Lane::Right => {
            if roll < DIRECT_FREE_KICK_SHARE {
                Some(SetPieceKind::DirectFreeKick)
            } else {
                None
            }
        }
    }
}

/// Whether the taker is credited as the scorer (otherwise the taker assists).
pub fn taker_scores(kind: SetPieceKind) -> bool {
    matches!(kind, SetPieceKind::Penalty | SetPieceKind::DirectFreeKick)
}
