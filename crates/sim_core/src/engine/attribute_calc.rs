//! Attribute Calculator
//!
//! 선수 능력치를 (lane, phase) 기여도로 변환하고 결과를 캐시한다.
//!
//! ## 공식
//! `contribution = lane_presence(position)[lane] × involvement(group)[phase] × Σ(attr × phase_weight)`
//!
//! Goalkeepers contribute nothing to lane totals; their shot-stopping is a
//! separate rating ([`AttributeCalculator::gk_save_rating`]).
//!
//! ## 캐시 규칙
//! - Keyed by `(player_id, position, lane, phase)`, so a position change
//!   naturally misses. Call [`AttributeCalculator::warm`] after a move or
//!   substitution to pay the cost up front.
//! - One calculator per match. [`AttributeCalculator::clear`] runs before
//!   every regular-time simulation because player ids are not unique across
//!   fixtures.

use fxhash::FxHashMap;

use super::types::{Lane, Phase};
use crate::models::{Player, PlayerAttributes, PlayerId, Position, PositionGroup};

// ============================================================================
// Position profile tables
// ============================================================================

/// Share of a position's presence in [left, center, right]
pub fn lane_presence(position: Position) -> [f32; 3] {
    match position {
        Position::GK => [0.0, 0.0, 0.0],
        Position::LB | Position::WBL | Position::LM | Position::LW => [1.0, 0.3, 0.0],
        Position::RB | Position::WBR | Position::RM | Position::RW => [0.0, 0.3, 1.0],
        Position::CBL | Position::DML | Position::CML | Position::AML | Position::CFL => {
            [0.5, 0.8, 0.1]
        }
        Position::CBR | Position::DMR | Position::CMR | Position::AMR | Position::CFR => {
            [0.1, 0.8, 0.5]
        }
        Position::CB | Position::DM | Position::CM | Position::AM | Position::CF => {
            [0.25, 1.0, 0.25]
        }
    }
}

/// Role involvement in [attack, defense, possession]
pub fn phase_involvement(group: PositionGroup) -> [f32; 3] {
    match group {
        PositionGroup::Goalkeeper => [0.0, 0.0, 0.0],
        PositionGroup::CenterBack => [0.2, 1.0, 0.5],
        PositionGroup::Fullback => [0.5, 0.8, 0.6],
        PositionGroup::WingBack => [0.7, 0.6, 0.6],
        PositionGroup::DefensiveMid => [0.4, 0.8, 0.9],
        PositionGroup::CentralMid => [0.6, 0.5, 1.0],
        PositionGroup::WideMid => [0.8, 0.4, 0.8],
        PositionGroup::AttackingMid => [0.9, 0.2, 0.9],
        PositionGroup::Winger => [1.0, 0.2, 0.7],
        PositionGroup::Forward => [1.0, 0.1, 0.5],
    }
}

/// Weighted attribute sum for one phase. Weights per phase sum to 1.
pub fn phase_score(attrs: &PlayerAttributes, phase: Phase) -> f32 {
    let a = |v: u8| v as f32;
    match phase {
        Phase::Attack => {
            a(attrs.finishing) * 0.25
                + a(attrs.dribbling) * 0.2
                + a(attrs.pace) * 0.2
                + a(attrs.passing) * 0.15
                + a(attrs.positioning) * 0.1
                + a(attrs.composure) * 0.1
        }
        Phase::Defense => {
            a(attrs.defending) * 0.4
                + a(attrs.positioning) * 0.25
                + a(attrs.strength) * 0.2
                + a(attrs.pace) * 0.15
        }
        Phase::Possession => {
            a(attrs.passing) * 0.4
                + a(attrs.dribbling) * 0.25
                + a(attrs.composure) * 0.2
                + a(attrs.positioning) * 0.15
        }
    }
}

/// GK 선방 능력 (reflexes 40 / handling 30 / positioning 15 / composure 15)
pub fn gk_save_score(attrs: &PlayerAttributes) -> f32 {
    attrs.gk_reflexes as f32 * 0.4
        + attrs.gk_handling as f32 * 0.3
        + attrs.positioning as f32 * 0.15
        + attrs.composure as f32 * 0.15
}

// ============================================================================
// Calculator
// ============================================================================

type ContributionKey = (PlayerId, Position, Lane, Phase);

/// Memoizing calculator owned by one match engine
#[derive(Debug, Default)]
pub struct AttributeCalculator {
    contributions: FxHashMap<ContributionKey, f32>,
    gk_ratings: FxHashMap<PlayerId, f32>,
    hits: u64,
    misses: u64,
}

impl AttributeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached value.
    pub fn clear(&mut self) {
        self.contributions.clear();
        self.gk_ratings.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Base (condition-free) contribution of `player` at `position`.
    pub fn contribution(&mut self, player: &Player, position: Position, lane: Lane, phase: Phase) -> f32 {
        let key = (player.id, position, lane, phase);
        if let Some(v) = self.contributions.get(&key) {
            self.hits += 1;
            return *v;
        }
        self.misses += 1;
        let value = Self::compute_contribution(player, position, lane, phase);
        self.contributions.insert(key, value);
        value
    }

    /// Uncached formula
    pub fn compute_contribution(player: &Player, position: Position, lane: Lane, phase: Phase) -> f32 {
        if position.is_goalkeeper() {
            return 0.0;
        }
        let weight = lane_presence(position)[lane.index()] * phase_involvement(position.group())[phase.index()];
        if weight == 0.0 {
            return 0.0;
        }
        weight * phase_score(&player.attributes, phase)
    }

    pub fn gk_save_rating(&mut self, player: &Player) -> f32 {
        if let Some(v) = self.gk_ratings.get(&player.id) {
            self.hits += 1;
            return *v;
        }
        self.misses += 1;
        let value = gk_save_score(&player.attributes);
        self.gk_ratings.insert(player.id, value);
        value
    }

    /// Pre-compute all nine lane × phase entries (and the GK rating) for
    /// `player` at `position`.
    pub fn warm(&mut self, player: &Player, position: Position) {
        for lane in Lane::ALL {
            for phase in Phase::ALL {
                self.contribution(player, position, lane, phase);
            }
        }
        self.gk_save_rating(player);
    }

    /// Number of cached contribution entries
    pub fn cached_entries(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_cached(&self, player_id: PlayerId, position: Position) -> bool {
        self.contributions.contains_key(&(player_id, position, Lane::Center, Phase::Attack))
    }

    /// (hits, misses) since the last clear
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
