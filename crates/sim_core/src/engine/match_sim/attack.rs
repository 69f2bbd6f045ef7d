//! Key moment attack resolution
//!
//! lane → (foul?) → midfield duel → attack type → push duel → shot type →
//! shooter → shot rating → GK duel → outcome. One aggregated event per
//! key moment carries the whole breakdown.

use rand::Rng;

use super::MatchEngine;
use crate::engine::duel::{chance, pick_uniform, pick_weighted, resolve_duel_with};
use crate::engine::team_state::{TacticalPlayer, Team};
use crate::engine::tuning::{
    assist_weight, gk_duel, push_duel, shot_type_weights, shot_weights, ShooterGroup,
    ASSIST_CHANCE, ATTACK_POWER_MULTIPLIER, ATTACK_TYPE_WEIGHTS, BLOCKED_SHARE,
    BLOCKED_TO_CORNER, FOUL_CHANCE, LONG_SHOT_DISTANCE_DECAY, LONG_SHOT_DISTANCE_MAX,
    LONG_SHOT_DISTANCE_MIN, LONG_SHOT_SHOOTER_SHARES, MIDFIELD_DUEL, SHOOTER_SHARES,
    SHOT_VARIANCE_MAX, SHOT_VARIANCE_MIN,
};
use crate::engine::types::{AttackType, FinalResult, Lane, Phase, SetPieceKind, ShotType, Side};
use crate::models::{
    AttackDetails, EventDetails, EventType, MidfieldDuel, PlayerAttributes, PlayerId, PositionGroup,
    PushDuel, ScoreLine, ShotDetails,
};

// ============================================================================
// Shooter / assist selection
// ============================================================================

/// Shooter-table bucket of a position group
pub fn shooter_group(group: PositionGroup) -> ShooterGroup {
    match group {
        PositionGroup::Forward => ShooterGroup::Forward,
        PositionGroup::Winger | PositionGroup::WideMid => ShooterGroup::Wide,
        PositionGroup::AttackingMid => ShooterGroup::AttackingMid,
        PositionGroup::CentralMid => ShooterGroup::CentralMid,
        _ => ShooterGroup::Other,
    }
}

/// Position-weighted shooter draw over active outfield players.
///
/// Groups without an active member drop out and the remaining shares are
/// renormalized. Groups the table does not list count as `Other`.
pub fn select_shooter(team: &Team, rng: &mut impl Rng, long_shot: bool) -> Option<PlayerId> {
    let table: &[(ShooterGroup, f32)] = if long_shot { &LONG_SHOT_SHOOTER_SHARES } else { &SHOOTER_SHARES };
    let bucket = |p: &TacticalPlayer| {
        let g = shooter_group(p.position.group());
        if table.iter().any(|(t, _)| *t == g) {
            g
        } else {
            ShooterGroup::Other
        }
    };

    let pool: Vec<(ShooterGroup, PlayerId)> = team
        .active_players()
        .filter(|p| !p.position.is_goalkeeper())
        .map(|p| (bucket(p), p.id()))
        .collect();

    let present: Vec<(ShooterGroup, f32)> = table
        .iter()
        .copied()
        .filter(|(g, _)| pool.iter().any(|(pg, _)| pg == g))
        .collect();
    let group = pick_weighted(rng, &present)?;

    let members: Vec<PlayerId> = pool.iter().filter(|(g, _)| *g == group).map(|(_, id)| *id).collect();
    pick_uniform(rng, &members)
}

/// Assist provider for a goal, if any.
///
/// Headers always come from a wide provider, rebounds never have one, and
/// everything else has a weighted chance toward AM > CM = W.
pub fn select_assist(team: &Team, rng: &mut impl Rng, shot_type: ShotType, scorer: PlayerId) -> Option<PlayerId> {
    let candidates = team
        .active_players()
        .filter(|p| p.id() != scorer && !p.position.is_goalkeeper());

    match shot_type {
        ShotType::Rebound => None,
        ShotType::Header => {
            let wide: Vec<PlayerId> = candidates.filter(|p| p.position.is_wide_provider()).map(|p| p.id()).collect();
            pick_uniform(rng, &wide)
        }
        _ => {
            if !chance(rng, ASSIST_CHANCE) {
                return None;
            }
            let weighted: Vec<(PlayerId, f32)> = candidates
                .map(|p| (p.id(), assist_weight(shooter_group(p.position.group()))))
                .collect();
            pick_weighted(rng, &weighted)
        }
    }
}

/// Raw shot rating before distance decay or variance
pub fn shot_rating(attrs: &PlayerAttributes, shot_type: ShotType) -> f32 {
    let w = shot_weights(shot_type);
    attrs.finishing as f32 * w.finishing
        + attrs.composure as f32 * w.composure
        + attrs.positioning as f32 * w.positioning
        + attrs.strength as f32 * w.strength
        + attrs.pace as f32 * w.pace
}

/// Long-shot rating factor at `distance` metres (1.0 at 18m, 0.7 at 30m)
pub fn long_shot_factor(distance: f32) -> f32 {
    let span = LONG_SHOT_DISTANCE_MAX - LONG_SHOT_DISTANCE_MIN;
    let t = ((distance - LONG_SHOT_DISTANCE_MIN) / span).clamp(0.0, 1.0);
    1.0 - t * LONG_SHOT_DISTANCE_DECAY
}

// ============================================================================
// Engine integration
// ============================================================================

/// Shot outcome breakdown carried into the event
struct ShotOutcome {
    shooter: Option<PlayerId>,
    details: Option<ShotDetails>,
    result: FinalResult,
}

impl<R: Rng> MatchEngine<R> {
    pub(super) fn resolve_key_moment(&mut self) {
        let lane = pick_uniform(&mut self.rng, &Lane::ALL).unwrap_or(Lane::Center);
        if chance(&mut self.rng, FOUL_CHANCE) {
            self.resolve_foul(lane);
        } else {
            self.resolve_attack(lane);
        }
    }

    fn resolve_attack(&mut self, lane: Lane) {
        // Midfield duel decides who attacks
        let home_value = self.home.team.snapshot().strength(lane, Phase::Possession);
        let away_value = self.away.team.snapshot().strength(lane, Phase::Possession);
        let attacking = if resolve_duel_with(&mut self.rng, home_value, away_value, MIDFIELD_DUEL) {
            Side::Home
        } else {
            Side::Away
        };
        self.stats.record_possession(attacking);
        let duel = MidfieldDuel { home_value, away_value, winner: attacking };

        let attack_type = pick_weighted(&mut self.rng, &ATTACK_TYPE_WEIGHTS).unwrap_or(AttackType::ShortPass);

        let (own, opp, rng) = self.split(attacking);
        let attack_power = own.team.snapshot().strength(lane, Phase::Attack) * ATTACK_POWER_MULTIPLIER;
        let defense_power = opp.team.snapshot().strength(lane, Phase::Defense);

        let mut push = None;
        if let Some(params) = push_duel(attack_type) {
            let success = resolve_duel_with(rng, attack_power, defense_power, params);
            push = Some(PushDuel { attack_power, defense_power, success });
            if !success {
                self.finish_attack(attacking, lane, attack_type, duel, push, ShotOutcome {
                    shooter: None,
                    details: None,
                    result: FinalResult::DefenseStopped,
                });
                return;
            }
        }

        let shot_type = pick_weighted(rng, shot_type_weights(attack_type)).unwrap_or(ShotType::Normal);
        let is_long = shot_type == ShotType::LongShot;

        let outcome = match select_shooter(&own.team, rng, is_long) {
            // Nobody left to shoot: treat as blocked
            None => ShotOutcome { shooter: None, details: None, result: FinalResult::Blocked },
            Some(shooter_id) => {
                let attrs = own
                    .team
                    .player(shooter_id)
                    .map(|p| p.player.attributes)
                    .unwrap_or_else(|| PlayerAttributes::uniform(1));
                let mut rating = shot_rating(&attrs, shot_type);
                let (mut distance, mut variance) = (None, None);
                if is_long {
                    let d = rng.gen_range(LONG_SHOT_DISTANCE_MIN..LONG_SHOT_DISTANCE_MAX);
                    rating *= long_shot_factor(d);
                    distance = Some(d);
                } else {
                    let v = rng.gen_range(SHOT_VARIANCE_MIN..SHOT_VARIANCE_MAX);
                    rating *= v;
                    variance = Some(v);
                }

                let gk_rating = opp.team.snapshot().gk_rating;
                let result = if resolve_duel_with(rng, rating, gk_rating, gk_duel(shot_type)) {
                    FinalResult::Goal
                } else if chance(rng, BLOCKED_SHARE) {
                    FinalResult::Blocked
                } else {
                    FinalResult::Save
                };

                ShotOutcome {
                    shooter: Some(shooter_id),
                    details: Some(ShotDetails { shot_type, shooter_rating: rating, gk_rating, distance, variance }),
                    result,
                }
            }
        };

        if let Some(shot) = &outcome.details {
            self.stats.record_shot(attacking, shot.shot_type, outcome.result);
        }
        let result = outcome.result;
        self.finish_attack(attacking, lane, attack_type, duel, push, outcome);

        if result == FinalResult::Blocked && chance(&mut self.rng, BLOCKED_TO_CORNER) {
            self.resolve_set_piece(attacking, SetPieceKind::Corner, lane);
        }
    }

    /// Score update, statistics and the aggregated key-moment event.
    fn finish_attack(
        &mut self,
        attacking: Side,
        lane: Lane,
        attack_type: AttackType,
        duel: MidfieldDuel,
        push: Option<PushDuel>,
        outcome: ShotOutcome,
    ) {
        self.stats.record_attack(attack_type, outcome.result);

        let mut assist = None;
        let mut score = None;
        if outcome.result == FinalResult::Goal {
            self.add_goal(attacking);
            if let (Some(scorer), Some(shot)) = (outcome.shooter, outcome.details.as_ref()) {
                let (own, _, rng) = self.split(attacking);
                assist = select_assist(&own.team, rng, shot.shot_type, scorer);
            }
            score = Some(ScoreLine { home: self.score_home, away: self.score_away });
        }

        let details = EventDetails {
            score,
            attack: Some(AttackDetails {
                lane,
                attack_type,
                duel,
                push,
                shot: outcome.details,
                final_result: outcome.result,
            }),
            ..Default::default()
        };
        let event = self
            .team_event(self.minute, EventType::for_result(outcome.result), attacking)
            .with_player(outcome.shooter)
            .with_related(assist)
            .with_details(details);
        self.push_event(event);
    }
}
