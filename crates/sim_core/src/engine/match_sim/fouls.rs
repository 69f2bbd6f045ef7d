//! Fouls, cards, foul injuries and set pieces
//!
//! A foul key moment picks a random fouler, rolls for a card, rolls for an
//! injury to the fouled side and finally routes to a set piece by lane.
//! Dismissals (straight red or second yellow) end the moment without a set
//! piece.

use rand::Rng;
use tracing::debug;

use super::attack::select_shooter;
use super::MatchEngine;
use crate::engine::duel::{chance, pick_uniform};
use crate::engine::injury::{InjuryAction, InjuryResult, InjurySystem};
use crate::engine::set_pieces::{self, route_foul, set_piece_probability, taker_scores, SetPieceContext};
use crate::engine::tuning::{STRAIGHT_RED_THRESHOLD, YELLOW_THRESHOLD};
use crate::engine::types::{Lane, SetPieceKind, Side};
use crate::models::{
    BenchBucket, CardDetails, EventDetails, EventType, InjuryDetails, PlayerId, Position,
    ScoreLine, SetPieceDetails, SubstitutionReason,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Yellow,
    Red,
}

/// Card shown for a foul roll in `[0, 1)`
pub fn card_for_roll(roll: f32) -> Option<CardType> {
    if roll < STRAIGHT_RED_THRESHOLD {
        Some(CardType::Red)
    } else if roll < YELLOW_THRESHOLD {
        Some(CardType::Yellow)
    } else {
        None
    }
}

impl<R: Rng> MatchEngine<R> {
    pub(super) fn resolve_foul(&mut self, lane: Lane) {
        let minute = self.minute;
        let fouling = if chance(&mut self.rng, 0.5) { Side::Home } else { Side::Away };
        let fouled = fouling.opponent();

        let (own, _, rng) = self.split(fouling);
        let candidates: Vec<PlayerId> = own.team.active_players().map(|p| p.id()).collect();
        let Some(fouler) = pick_uniform(rng, &candidates) else {
            return;
        };
        self.stats.record_foul(fouling);

        let foul = self.team_event(minute, EventType::Foul, fouling).with_player(Some(fouler));
        self.push_event(foul);

        let card = card_for_roll(self.rng.gen());
        if self.apply_card(fouling, fouler, card) {
            return;
        }

        if self.config.injury_base_chance > 0.0 {
            self.roll_foul_injury(fouled);
        }

        if let Some(kind) = route_foul(lane, self.rng.gen()) {
            self.resolve_set_piece(fouled, kind, lane);
        }
    }

    /// Book or dismiss the fouler. Returns true when the player was sent off.
    fn apply_card(&mut self, side: Side, fouler: PlayerId, card: Option<CardType>) -> bool {
        let minute = self.minute;
        let (event_type, details) = match card {
            None => return false,
            Some(CardType::Red) => {
                self.dismiss(side, fouler);
                let yellow_cards = self.side(side).team.player(fouler).map_or(0, |p| p.yellow_cards);
                (EventType::RedCard, CardDetails { yellow_cards, second_yellow: false })
            }
            Some(CardType::Yellow) => {
                let count = self.side_mut(side).team.book(fouler).unwrap_or(1);
                self.stats.record_yellow(side);
                if count >= 2 {
                    self.dismiss(side, fouler);
                    (EventType::RedCard, CardDetails { yellow_cards: count, second_yellow: true })
                } else {
                    (EventType::YellowCard, CardDetails { yellow_cards: count, second_yellow: false })
                }
            }
        };

        debug!(minute, player = fouler, card = ?event_type, "card shown");
        let event = self
            .team_event(minute, event_type, side)
            .with_player(Some(fouler))
            .with_details(EventDetails { card: Some(details), ..Default::default() });
        self.push_event(event);
        event_type == EventType::RedCard
    }

    fn dismiss(&mut self, side: Side, player: PlayerId) {
        let state = self.side_mut(side);
        if state.team.send_off(player) {
            state.refresh_snapshot();
        }
        self.stats.record_red(side);
    }

    /// Injury roll for a random active player of the fouled side.
    fn roll_foul_injury(&mut self, side: Side) {
        let minute = self.minute;
        let base_chance = self.config.injury_base_chance;

        let (own, _, rng) = self.split(side);
        let candidates: Vec<PlayerId> = own.team.active_players().map(|p| p.id()).collect();
        let Some(victim) = pick_uniform(rng, &candidates) else {
            return;
        };
        let Some(slot) = own.team.player(victim) else {
            return;
        };
        let (age, stamina, position) = (slot.player.age, slot.player.stamina, slot.position);

        let result = InjurySystem::generate_injury(rng, base_chance, age, stamina, side.is_home(), InjuryAction::Tackle);
        if !result.will_injure {
            return;
        }

        let replacement = self.injury_replacement(side, position);
        self.push_injury_event(side, victim, result, replacement.is_some());
        debug!(minute, player = victim, severity = ?result.severity, "injury");

        if let Some(sub_id) = replacement {
            self.perform_substitution(side, victim, sub_id, SubstitutionReason::Injury);
        }
    }

    /// Bench-bucket substitute for an injured player in `position`, if one is
    /// still available and the substitution limit allows it.
    fn injury_replacement(&self, side: Side, position: Position) -> Option<PlayerId> {
        let state = self.side(side);
        let sub_id = state.bench.as_ref()?.substitute_for(BenchBucket::for_position(position))?;
        self.substitution_check(side, sub_id).ok()?;
        Some(sub_id)
    }

    fn push_injury_event(&mut self, side: Side, victim: PlayerId, result: InjuryResult, replaced: bool) {
        let details = EventDetails {
            injury: Some(InjuryDetails {
                result,
                treatment_seconds: InjurySystem::treatment_time(result.severity.unwrap_or(1)),
                replaced,
            }),
            ..Default::default()
        };
        let event = self
            .team_event(self.minute, EventType::Injury, side)
            .with_player(Some(victim))
            .with_details(details);
        self.push_event(event);
    }

    // ========== Set pieces ==========

    /// Resolve a set piece for `side` and emit its event.
    pub(super) fn resolve_set_piece(&mut self, side: Side, kind: SetPieceKind, lane: Lane) {
        let (own, opp, rng) = self.split(side);
        let ctx = SetPieceContext::from_teams(kind, &own.team, &opp.team);
        let probability = set_piece_probability(&ctx);
        let scored = set_pieces::resolve_set_piece(&ctx, rng.gen());

        let (player, related) = if scored && !taker_scores(kind) {
            // Delivered set piece: someone else finishes, the taker assists
            let scorer = select_shooter(&own.team, rng, false).or(ctx.taker_id);
            let assist = ctx.taker_id.filter(|t| Some(*t) != scorer);
            (scorer, assist)
        } else {
            (ctx.taker_id, None)
        };

        self.stats.record_set_piece(kind, scored);
        let event_type = if scored {
            self.add_goal(side);
            EventType::Goal
        } else {
            EventType::for_set_piece(kind)
        };

        let details = EventDetails {
            score: scored.then(|| ScoreLine { home: self.score_home, away: self.score_away }),
            set_piece: Some(SetPieceDetails { kind, lane, scored, probability }),
            ..Default::default()
        };
        let event = self
            .team_event(self.minute, event_type, side)
            .with_player(player)
            .with_related(related)
            .with_details(details);
        self.push_event(event);
    }
}
