use crate::engine::types::{AttackType, FinalResult, SetPieceKind, ShotType, Side};
use crate::models::{MatchStatistics, OutcomeCounter};

/// Running statistics for one match.
///
/// Counters are bumped as key moments resolve; [`StatsCalculator::finalize`]
/// derives the percentages once the final whistle has gone.
#[derive(Debug, Default)]
pub struct StatsCalculator {
    stats: MatchStatistics,
}

fn tally(counter: &mut OutcomeCounter, result: FinalResult) {
    counter.attempts += 1;
    match result {
        FinalResult::Goal => counter.goals += 1,
        FinalResult::Save => counter.saves += 1,
        FinalResult::Miss => counter.misses += 1,
        FinalResult::Blocked => counter.blocked += 1,
        FinalResult::DefenseStopped => counter.stopped += 1,
    }
}

impl StatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statistics(&self) -> &MatchStatistics {
        &self.stats
    }

    /// Side that won a midfield duel
    pub fn record_possession(&mut self, side: Side) {
        match side {
            Side::Home => self.stats.possession_home += 1,
            Side::Away => self.stats.possession_away += 1,
        }
    }

    pub fn record_attack(&mut self, attack_type: AttackType, result: FinalResult) {
        tally(self.stats.attack_types.entry(attack_type).or_default(), result);
    }

    pub fn record_shot(&mut self, side: Side, shot_type: ShotType, result: FinalResult) {
        tally(self.stats.shot_types.entry(shot_type).or_default(), result);
        match side {
            Side::Home => self.stats.shots_home += 1,
            Side::Away => self.stats.shots_away += 1,
        }
    }

    pub fn record_foul(&mut self, side: Side) {
        match side {
            Side::Home => self.stats.fouls_home += 1,
            Side::Away => self.stats.fouls_away += 1,
        }
    }

    pub fn record_yellow(&mut self, side: Side) {
        match side {
            Side::Home => self.stats.yellow_cards_home += 1,
            Side::Away => self.stats.yellow_cards_away += 1,
        }
    }

    pub fn record_red(&mut self, side: Side) {
        match side {
            Side::Home => self.stats.red_cards_home += 1,
            Side::Away => self.stats.red_cards_away += 1,
        }
    }

    pub fn record_set_piece(&mut self, kind: SetPieceKind, scored: bool) {
        let counter = self.stats.set_pieces.by_kind.entry(kind).or_default();
        counter.triggered += 1;
        if scored {
            counter.goals += 1;
        }
    }

    /// Possession percentages from the duel tallies. An empty match splits
    /// 50/50.
    pub fn finalize(mut self) -> MatchStatistics {
        let total = self.stats.possession_home + self.stats.possession_away;
        if total > 0 {
            self.stats.possession_home_pct = self.stats.possession_home as f32 / total as f32 * 100.0;
            self.stats.possession_away_pct = 100.0 - self.stats.possession_home_pct;
        } else {
            self.stats.possession_home_pct = 50.0;
            self.stats.possession_away_pct = 50.0;
        }
        self.stats
    }
}
