//! Penalty shootout
//!
//! Best-of-N rounds (home kicks first) that stop as soon as the trailing
//! side can no longer catch up, followed by sudden-death rounds until one
//! side scores and the other misses.

use rand::Rng;
use tracing::info;

use super::MatchEngine;
use crate::engine::condition::ConditionSystem;
use crate::engine::duel::{chance, logistic};
use crate::engine::team_state::Team;
use crate::engine::tuning::{SHOOTOUT_BASE_LOGIT, SHOOTOUT_CONVERSION_MAX, SHOOTOUT_CONVERSION_MIN, SHOOTOUT_K};
use crate::engine::types::Side;
use crate::models::{
    EventDetails, EventType, Player, PlayerId, ScoreLine, ShootoutKickDetails, ShootoutSummary,
};

// ============================================================================
// Ratings
// ============================================================================

/// 키커 능력치 (finishing 0.6 + composure 0.4) × penalty multiplier
pub fn kicker_rating(player: &Player) -> f32 {
    let a = &player.attributes;
    let base = a.finishing as f32 * 0.6 + a.composure as f32 * 0.4;
    base * ConditionSystem::penalty_multiplier(player.form, player.experience)
}

/// 골키퍼 능력치 (reflexes 0.4 + handling 0.3 + composure 0.3) × penalty multiplier
pub fn keeper_rating(player: &Player) -> f32 {
    let a = &player.attributes;
    let base = a.gk_reflexes as f32 * 0.4 + a.gk_handling as f32 * 0.3 + a.composure as f32 * 0.3;
    base * ConditionSystem::penalty_multiplier(player.form, player.experience)
}

pub fn conversion_probability(kicker: f32, keeper: f32) -> f32 {
    logistic((kicker - keeper) * SHOOTOUT_K + SHOOTOUT_BASE_LOGIT)
        .clamp(SHOOTOUT_CONVERSION_MIN, SHOOTOUT_CONVERSION_MAX)
}

/// True once the side behind cannot draw level with its remaining kicks.
pub fn is_decided(home: u8, away: u8, home_left: u8, away_left: u8) -> bool {
    home as u16 > away as u16 + away_left as u16 || away as u16 > home as u16 + home_left as u16
}

// ============================================================================
// Per-side state
// ============================================================================

/// Kick order and running tally for one side
#[derive(Debug, Clone)]
struct ShootoutSide {
    /// (player, kicker rating), best penalty taker first
    order: Vec<(PlayerId, f32)>,
    /// Rating of this side's keeper, faced by the opponent's kickers
    keeper: f32,
    kicks: u8,
    scored: u8,
}

impl ShootoutSide {
    fn new(team: &Team) -> Self {
        Self {
            order: team.shootout_order().iter().map(|p| (p.id(), kicker_rating(&p.player))).collect(),
            keeper: team.goalkeeper().map(|gk| keeper_rating(&gk.player)).unwrap_or(0.0),
            kicks: 0,
            scored: 0,
        }
    }

    /// Next kicker in rotation. With nobody left to kick the attempt is
    /// taken at rating zero.
    fn next_kicker(&self) -> (Option<PlayerId>, f32) {
        if self.order.is_empty() {
            return (None, 0.0);
        }
        let (id, rating) = self.order[self.kicks as usize % self.order.len()];
        (Some(id), rating)
    }
}

struct Tally {
    home: ShootoutSide,
    away: ShootoutSide,
}

impl Tally {
    fn kicking(&mut self, side: Side) -> (&mut ShootoutSide, &ShootoutSide) {
        match side {
            Side::Home => (&mut self.home, &self.away),
            Side::Away => (&mut self.away, &self.home),
        }
    }

    fn decided_within(&self, rounds: u8) -> bool {
        is_decided(
            self.home.scored,
            self.away.scored,
            rounds.saturating_sub(self.home.kicks),
            rounds.saturating_sub(self.away.kicks),
        )
    }
}

// ============================================================================
// Engine integration
// ============================================================================

impl<R: Rng> MatchEngine<R> {
    /// Run the shootout, record it on the engine and return the summary.
    pub fn simulate_penalty_shootout(&mut self) -> ShootoutSummary {
        let minute = self.minute;
        let rounds = self.config.shootout_rounds;
        self.push_marker(minute, EventType::ShootoutStart);

        let mut tally = Tally { home: ShootoutSide::new(&self.home.team), away: ShootoutSide::new(&self.away.team) };

        let mut round = 0;
        'regular: for r in 1..=rounds {
            round = r;
            for side in [Side::Home, Side::Away] {
                self.take_kick(&mut tally, side, r, false);
                if tally.decided_within(rounds) {
                    break 'regular;
                }
            }
        }

        while tally.home.scored == tally.away.scored {
            round += 1;
            self.take_kick(&mut tally, Side::Home, round, true);
            self.take_kick(&mut tally, Side::Away, round, true);
        }

        let winner = if tally.home.scored > tally.away.scored { Side::Home } else { Side::Away };
        let summary = ShootoutSummary { home: tally.home.scored, away: tally.away.scored, rounds: round, winner };

        let details = EventDetails {
            score: Some(ScoreLine { home: self.score_home, away: self.score_away }),
            winner: Some(winner),
            shootout_score: Some(ScoreLine { home: summary.home, away: summary.away }),
            ..Default::default()
        };
        let end = self.team_event(minute, EventType::ShootoutEnd, winner).with_details(details);
        self.push_event(end);
        info!(
            winner = %self.side(winner).team.name,
            home = summary.home,
            away = summary.away,
            rounds = summary.rounds,
            "shootout decided"
        );

        self.shootout = Some(summary);
        summary
    }

    fn take_kick(&mut self, tally: &mut Tally, side: Side, round: u8, sudden_death: bool) {
        let (kicking, defending) = tally.kicking(side);
        let (kicker, rating) = kicking.next_kicker();
        let scored = chance(&mut self.rng, conversion_probability(rating, defending.keeper));

        kicking.kicks += 1;
        if scored {
            kicking.scored += 1;
        }

        let details = EventDetails {
            shootout: Some(ShootoutKickDetails {
                round,
                scored,
                sudden_death,
                home_score: tally.home.scored,
                away_score: tally.away.scored,
            }),
            ..Default::default()
        };
        let event = self
            .team_event(self.minute, EventType::ShootoutKick, side)
            .with_player(kicker)
            .with_details(details);
        self.push_event(event);
    }
}
