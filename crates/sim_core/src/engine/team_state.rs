//! In-match team state
//!
//! [`Team`] owns the tactical-player slots of one side, a parallel fitness
//! array (index-aligned with the slots) and the last computed [`Snapshot`].
//! The snapshot is a read cache: any fitness, position or roster mutation
//! leaves it stale until [`Team::update_snapshot`] runs again.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::attribute_calc::{gk_save_score, AttributeCalculator};
use super::condition::{ConditionSystem, FITNESS_MIN};
use super::types::{Lane, Phase, SetPieceKind};
use crate::error::Result;
use crate::models::{Player, PlayerId, Position, TeamId, TeamSheet};

// ============================================================================
// Tactical player
// ============================================================================

/// A player bound to a position slot for the current match
#[derive(Debug, Clone, PartialEq)]
pub struct TacticalPlayer {
    pub player: Player,
    pub position: Position,
    pub is_sent_off: bool,
    pub yellow_cards: u8,
    /// 0 for starters
    pub entry_minute: u8,
}

impl TacticalPlayer {
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position, is_sent_off: false, yellow_cards: 0, entry_minute: 0 }
    }

    pub fn id(&self) -> PlayerId {
        self.player.id
    }

    pub fn is_active(&self) -> bool {
        !self.is_sent_off
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Attack / defense / possession totals of one lane
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LaneStrength {
    pub attack: f32,
    pub defense: f32,
    pub possession: f32,
}

impl LaneStrength {
    pub fn get(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Attack => self.attack,
            Phase::Defense => self.defense,
            Phase::Possession => self.possession,
        }
    }

    fn add(&mut self, phase: Phase, value: f32) {
        match phase {
            Phase::Attack => self.attack += value,
            Phase::Defense => self.defense += value,
            Phase::Possession => self.possession += value,
        }
    }
}

/// Cached lane × phase strength plus the goalkeeper rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Snapshot {
    pub left: LaneStrength,
    pub center: LaneStrength,
    pub right: LaneStrength,
    pub gk_rating: f32,
}

impl Snapshot {
    pub fn lane(&self, lane: Lane) -> &LaneStrength {
        match lane {
            Lane::Left => &self.left,
            Lane::Center => &self.center,
            Lane::Right => &self.right,
        }
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut LaneStrength {
        match lane {
            Lane::Left => &mut self.left,
            Lane::Center => &mut self.center,
            Lane::Right => &mut self.right,
        }
    }

    pub fn strength(&self, lane: Lane, phase: Phase) -> f32 {
        self.lane(lane).get(phase)
    }

    /// Sum of all nine lane × phase values
    pub fn total(&self) -> f32 {
        Lane::ALL
            .iter()
            .flat_map(|l| Phase::ALL.iter().map(move |p| self.strength(*l, *p)))
            .sum()
    }
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    players: Vec<TacticalPlayer>,
    fitness: Vec<f32>,
    index: FxHashMap<PlayerId, usize>,
    snapshot: Snapshot,
}

impl Team {
    /// Build from a validated team sheet and warm the calculator for every
    /// starter.
    pub fn new(sheet: &TeamSheet, calc: &mut AttributeCalculator) -> Result<Self> {
        sheet.validate()?;

        let mut players = Vec::with_capacity(sheet.lineup.len());
        let mut fitness = Vec::with_capacity(sheet.lineup.len());
        let mut index = FxHashMap::default();

        for (i, entry) in sheet.lineup.iter().enumerate() {
            calc.warm(&entry.player, entry.position);
            fitness.push(entry.player.base_stamina());
            index.insert(entry.player.id, i);
            players.push(TacticalPlayer::new(entry.player.clone(), entry.position));
        }

        let mut team = Self {
            id: sheet.id,
            name: sheet.name.clone(),
            players,
            fitness,
            index,
            snapshot: Snapshot::default(),
        };
        team.update_snapshot(calc);
        Ok(team)
    }

    // ========== Queries ==========

    pub fn players(&self) -> &[TacticalPlayer] {
        &self.players
    }

    pub fn active_players(&self) -> impl Iterator<Item = &TacticalPlayer> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    pub fn player(&self, id: PlayerId) -> Option<&TacticalPlayer> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn is_active(&self, id: PlayerId) -> bool {
        self.player(id).map(|p| p.is_active()).unwrap_or(false)
    }

    pub fn fitness(&self, id: PlayerId) -> Option<f32> {
        self.index.get(&id).map(|&i| self.fitness[i])
    }

    pub fn fitness_values(&self) -> &[f32] {
        &self.fitness
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// True if an active player already holds `position`.
    pub fn is_position_occupied(&self, position: Position) -> bool {
        self.active_players().any(|p| p.position == position)
    }

    /// Active player in goal, or the best emergency keeper when the GK slot
    /// is empty.
    pub fn goalkeeper(&self) -> Option<&TacticalPlayer> {
        self.active_players().find(|p| p.position.is_goalkeeper()).or_else(|| {
            self.active_players().max_by(|a, b| {
                gk_save_score(&a.player.attributes).total_cmp(&gk_save_score(&b.player.attributes))
            })
        })
    }

    fn multiplier_at(&self, idx: usize) -> f32 {
        let p = &self.players[idx].player;
        ConditionSystem::multiplier(self.fitness[idx], p.base_stamina(), p.form, p.experience)
    }

    /// Current condition multiplier of a player
    pub fn multiplier(&self, id: PlayerId) -> Option<f32> {
        self.index.get(&id).map(|&i| self.multiplier_at(i))
    }

    // ========== Condition & snapshot ==========

    /// Burn `minutes_delta` minutes of fitness; add break recovery when
    /// `is_half_time`. Sent-off players are skipped.
    pub fn update_condition(&mut self, minutes_delta: u32, is_half_time: bool) {
        let decay = ConditionSystem::fitness_decay(minutes_delta);
        for (slot, fitness) in self.players.iter().zip(self.fitness.iter_mut()) {
            if slot.is_sent_off {
                continue;
            }
            let mut value = *fitness - decay;
            if is_half_time {
                value += ConditionSystem::recovery(slot.player.base_stamina());
            }
            *fitness = ConditionSystem::clamp_fitness(value);
        }
    }

    /// Recompute all nine lane × phase totals and the GK rating.
    pub fn update_snapshot(&mut self, calc: &mut AttributeCalculator) {
        let mut snapshot = Snapshot::default();

        for (idx, slot) in self.players.iter().enumerate() {
            if slot.is_sent_off {
                continue;
            }
            let m = self.multiplier_at(idx);
            for lane in Lane::ALL {
                for phase in Phase::ALL {
                    let base = calc.contribution(&slot.player, slot.position, lane, phase);
                    snapshot.lane_mut(lane).add(phase, base * m);
                }
            }
        }

        if let Some(keeper) = self.goalkeeper() {
            let id = keeper.id();
            let rating = calc.gk_save_rating(&keeper.player);
            snapshot.gk_rating = rating * self.multiplier(id).unwrap_or(1.0);
        }

        self.snapshot = snapshot;
    }

    /// Live (uncached) lane strength, bypassing the snapshot.
    pub fn calculate_lane_strength(&self, calc: &mut AttributeCalculator, lane: Lane, phase: Phase) -> f32 {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, p)| calc.contribution(&p.player, p.position, lane, phase) * self.multiplier_at(i))
            .sum()
    }

    // ========== Roster mutation ==========

    /// Flag a player as sent off. Returns false for unknown or already
    /// dismissed players.
    pub fn send_off(&mut self, id: PlayerId) -> bool {
        let Some(&idx) = self.index.get(&id) else {
            return false;
        };
        if self.players[idx].is_sent_off {
            return false;
        }
        self.players[idx].is_sent_off = true;
        self.fitness[idx] = FITNESS_MIN;
        debug!(team = %self.name, player = id, "sent off");
        true
    }

    /// Record a yellow card and return the new count.
    pub fn book(&mut self, id: PlayerId) -> Option<u8> {
        let idx = *self.index.get(&id)?;
        let slot = &mut self.players[idx];
        slot.yellow_cards = slot.yellow_cards.saturating_add(1);
        Some(slot.yellow_cards)
    }

    /// Put `incoming` into the slot of `out_id`.
    ///
    /// The incoming player inherits the slot's position, starts at their own
    /// stamina and has their contributions cached for that position.
    pub fn substitute_player(
        &mut self,
        out_id: PlayerId,
        incoming: Player,
        minute: u8,
        calc: &mut AttributeCalculator,
    ) -> bool {
        let Some(&idx) = self.index.get(&out_id) else {
            return false;
        };
        if self.players[idx].is_sent_off || self.index.contains_key(&incoming.id) {
            return false;
        }

        let position = self.players[idx].position;
        calc.warm(&incoming, position);

        self.index.remove(&out_id);
        self.index.insert(incoming.id, idx);
        self.fitness[idx] = incoming.base_stamina();
        self.players[idx] = TacticalPlayer {
            player: incoming,
            position,
            is_sent_off: false,
            yellow_cards: 0,
            entry_minute: minute,
        };
        true
    }

    /// Reassign a player's position and warm the cache for it.
    pub fn move_player(&mut self, id: PlayerId, new_position: Position, calc: &mut AttributeCalculator) -> bool {
        let Some(&idx) = self.index.get(&id) else {
            return false;
        };
        if self.players[idx].is_sent_off {
            return false;
        }
        self.players[idx].position = new_position;
        calc.warm(&self.players[idx].player, new_position);
        true
    }

    /// Exchange the positions of two active players.
    pub fn swap_positions(&mut self, a: PlayerId, b: PlayerId, calc: &mut AttributeCalculator) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(&a), self.index.get(&b)) else {
            return false;
        };
        if ia == ib || self.players[ia].is_sent_off || self.players[ib].is_sent_off {
            return false;
        }
        let pa = self.players[ia].position;
        let pb = self.players[ib].position;
        self.players[ia].position = pb;
        self.players[ib].position = pa;
        calc.warm(&self.players[ia].player, pb);
        calc.warm(&self.players[ib].player, pa);
        true
    }

    // ========== Set-piece support ==========

    fn active_outfield(&self) -> impl Iterator<Item = &TacticalPlayer> {
        self.active_players().filter(|p| !p.position.is_goalkeeper())
    }

    fn outfield_average(&self, skill: impl Fn(&TacticalPlayer) -> u8) -> f32 {
        let (sum, n) = self
            .active_outfield()
            .fold((0.0f32, 0u32), |(s, n), p| (s + skill(p) as f32, n + 1));
        if n == 0 {
            0.0
        } else {
            sum / n as f32
        }
    }

    pub fn avg_free_kicks(&self) -> f32 {
        self.outfield_average(|p| p.player.attributes.free_kicks)
    }

    pub fn avg_penalties(&self) -> f32 {
        self.outfield_average(|p| p.player.attributes.penalties)
    }

    pub fn avg_defending(&self) -> f32 {
        self.outfield_average(|p| p.player.attributes.defending)
    }

    /// Relevant skill of a taker for `kind`
    pub fn set_piece_skill(player: &Player, kind: SetPieceKind) -> u8 {
        match kind {
            SetPieceKind::Penalty => player.attributes.penalties,
            _ => player.attributes.free_kicks,
        }
    }

    /// Best active outfield taker for `kind`. Ties go to the earlier slot.
    pub fn best_set_piece_taker(&self, kind: SetPieceKind) -> Option<&TacticalPlayer> {
        self.active_outfield().fold(None, |best: Option<&TacticalPlayer>, p| match best {
            Some(b) if Self::set_piece_skill(&b.player, kind) >= Self::set_piece_skill(&p.player, kind) => {
                Some(b)
            }
            _ => Some(p),
        })
    }

    /// (reflexes + handling + composure) / 3 of the current keeper
    pub fn goalkeeper_set_piece_rating(&self) -> f32 {
        self.goalkeeper()
            .map(|gk| {
                let a = &gk.player.attributes;
                (a.gk_reflexes as f32 + a.gk_handling as f32 + a.composure as f32) / 3.0
            })
            .unwrap_or(0.0)
    }

    /// Active players ordered by penalty skill, best first
    pub fn shootout_order(&self) -> Vec<&TacticalPlayer> {
        let mut kickers: Vec<&TacticalPlayer> = self.active_players().collect();
        kickers.sort_by(|a, b| b.player.attributes.penalties.cmp(&a.player.attributes.penalties));
        kickers
    }
}
