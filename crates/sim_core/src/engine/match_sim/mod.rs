//! Match Engine
//!
//! Minute-stepped state machine: pre-kickoff → regular time (1..=90) →
//! optional extra time (91..=120) → optional penalty shootout → full time.
//!
//! ## 분 단위 처리 순서
//! 1. Tactical instructions scheduled for the minute ([`tactical`])
//! 2. One minute of fitness decay (break recovery at 46 / 91 / 106)
//! 3. Snapshot recompute on the fixed cadence
//! 4. Key moments drawn for the minute ([`attack`], [`fouls`])
//!
//! Every random draw goes through the engine's single RNG, so a seed and
//! a setup fully determine the event stream.

pub mod attack;
pub mod extra_time;
pub mod fouls;
pub mod key_moments;
pub mod shootout;
pub mod tactical;

#[cfg(test)]
mod calibration_tests;
#[cfg(test)]
pub mod test_fixtures;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::attribute_calc::AttributeCalculator;
use super::config::EngineConfig;
use super::stats::StatsCalculator;
use super::team_state::Team;
use super::tuning::{is_recovery_minute, is_snapshot_minute};
use super::types::Side;
use crate::error::Result;
use crate::models::{
    BenchConfig, EventDetails, EventType, MatchEvent, MatchResult, MatchSetup, MatchStatistics,
    Player, ScoreLine, ShootoutSummary, SnapshotDetails, TacticalInstruction, TeamSheet,
};

pub use tactical::{SkipReason, SkippedInstruction};

/// Callback receiving every instruction the engine had to skip
pub type DiagnosticHook = Box<dyn FnMut(&SkippedInstruction) + Send>;

// ============================================================================
// Side state
// ============================================================================

/// Everything the engine tracks for one team
pub struct SideState {
    pub team: Team,
    /// Per-side cache; ids only need to be unique within a team
    pub(crate) calc: AttributeCalculator,
    /// Substitutes not yet used
    pub(crate) pool: Vec<Player>,
    pub(crate) bench: Option<BenchConfig>,
    pub(crate) instructions: Vec<TacticalInstruction>,
    pub(crate) substitutions_made: u8,
}

impl SideState {
    fn new(sheet: &TeamSheet) -> Result<Self> {
        let mut calc = AttributeCalculator::new();
        let team = Team::new(sheet, &mut calc)?;
        Ok(Self {
            team,
            calc,
            pool: sheet.substitutes.clone(),
            bench: sheet.bench.clone(),
            instructions: sheet.instructions.clone(),
            substitutions_made: 0,
        })
    }

    /// Clear the cache and warm it again for the current lineup.
    fn reset_cache(&mut self) {
        self.calc.clear();
        for slot in self.team.players() {
            self.calc.warm(&slot.player, slot.position);
        }
        self.team.update_snapshot(&mut self.calc);
    }

    pub(crate) fn refresh_snapshot(&mut self) {
        self.team.update_snapshot(&mut self.calc);
    }

    pub fn substitutions_made(&self) -> u8 {
        self.substitutions_made
    }

    pub fn remaining_substitutes(&self) -> &[Player] {
        &self.pool
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Single-use match simulator
pub struct MatchEngine<R: Rng = ChaCha8Rng> {
    config: EngineConfig,
    rng: R,
    home: SideState,
    away: SideState,
    minute: u8,
    score_home: u8,
    score_away: u8,
    events: Vec<MatchEvent>,
    stats: StatsCalculator,
    extra_time_played: bool,
    shootout: Option<ShootoutSummary>,
    diagnostic_hook: Option<DiagnosticHook>,
}

impl MatchEngine<ChaCha8Rng> {
    /// Seeded engine. Same seed and setup give the same event stream.
    pub fn new(setup: MatchSetup, config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_rng(setup, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchEngine<R> {
    pub fn with_rng(setup: MatchSetup, config: EngineConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let home = SideState::new(&setup.home)?;
        let away = SideState::new(&setup.away)?;

        Ok(Self {
            config,
            rng,
            home,
            away,
            minute: 0,
            score_home: 0,
            score_away: 0,
            events: Vec::with_capacity(128),
            stats: StatsCalculator::new(),
            extra_time_played: false,
            shootout: None,
            diagnostic_hook: None,
        })
    }

    /// Install a hook that sees every skipped tactical instruction.
    pub fn set_diagnostic_hook(&mut self, hook: impl FnMut(&SkippedInstruction) + Send + 'static) {
        self.diagnostic_hook = Some(Box::new(hook));
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn score(&self) -> (u8, u8) {
        (self.score_home, self.score_away)
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn statistics(&self) -> &MatchStatistics {
        self.stats.statistics()
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn home_team(&self) -> &Team {
        &self.home.team
    }

    pub fn away_team(&self) -> &Team {
        &self.away.team
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// (own, opponent, rng) with disjoint borrows
    fn split(&mut self, side: Side) -> (&mut SideState, &mut SideState, &mut R) {
        match side {
            Side::Home => (&mut self.home, &mut self.away, &mut self.rng),
            Side::Away => (&mut self.away, &mut self.home, &mut self.rng),
        }
    }

    /// (own, opponent) score from `side`'s point of view
    fn score_for(&self, side: Side) -> (u8, u8) {
        match side {
            Side::Home => (self.score_home, self.score_away),
            Side::Away => (self.score_away, self.score_home),
        }
    }

    fn add_goal(&mut self, side: Side) {
        match side {
            Side::Home => self.score_home = self.score_home.saturating_add(1),
            Side::Away => self.score_away = self.score_away.saturating_add(1),
        }
    }

    fn is_level(&self) -> bool {
        self.score_home == self.score_away
    }

    fn score_details(&self) -> EventDetails {
        EventDetails {
            score: Some(ScoreLine { home: self.score_home, away: self.score_away }),
            ..Default::default()
        }
    }

    fn push_event(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    fn push_marker(&mut self, minute: u8, event_type: EventType) {
        let details = self.score_details();
        self.push_event(MatchEvent::marker(minute, event_type).with_details(details));
    }

    /// Team-attributed event for `side`
    fn team_event(&self, minute: u8, event_type: EventType, side: Side) -> MatchEvent {
        let team = &self.side(side).team;
        MatchEvent::for_team(minute, event_type, &team.name, team.id)
    }

    fn emit_snapshot_event(&mut self, minute: u8) {
        if !self.config.emit_snapshot_events {
            return;
        }
        let details = EventDetails {
            snapshot: Some(SnapshotDetails {
                home: *self.home.team.snapshot(),
                away: *self.away.team.snapshot(),
            }),
            ..Default::default()
        };
        self.push_event(MatchEvent::marker(minute, EventType::Snapshot).with_details(details));
    }

    // ========== Orchestration ==========

    /// Regular time: kickoff at 0 through full time at 90.
    pub fn simulate_match(&mut self) {
        self.home.reset_cache();
        self.away.reset_cache();

        let schedule = key_moments::schedule(&mut self.rng, self.config.key_moments, 1, 90);
        info!(
            home = %self.home.team.name,
            away = %self.away.team.name,
            key_moments = schedule.len(),
            "kickoff"
        );

        self.minute = 0;
        self.push_marker(0, EventType::KickOff);

        for minute in 1..=90u8 {
            if minute == 46 {
                self.push_marker(46, EventType::SecondHalf);
            }
            self.tick(minute, &schedule);
            if minute == 45 {
                self.emit_snapshot_event(45);
                self.push_marker(45, EventType::HalfTime);
            }
        }

        self.emit_snapshot_event(90);
        self.push_marker(90, EventType::FullTime);
        info!(
            home = %self.home.team.name,
            away = %self.away.team.name,
            score_home = self.score_home,
            score_away = self.score_away,
            "full time"
        );
    }

    /// One simulated minute.
    fn tick(&mut self, minute: u8, schedule: &[u8]) {
        self.minute = minute;

        self.apply_instructions(minute);

        let recovery = is_recovery_minute(minute);
        self.home.team.update_condition(1, recovery);
        self.away.team.update_condition(1, recovery);

        if is_snapshot_minute(minute) {
            self.home.refresh_snapshot();
            self.away.refresh_snapshot();
            debug!(minute, "snapshots recomputed");
        }

        let moments = schedule.iter().filter(|&&m| m == minute).count();
        for _ in 0..moments {
            trace!(minute, "key moment");
            self.resolve_key_moment();
        }
    }

    /// Regular time, then extra time and a shootout when a knockout tie is
    /// still level.
    pub fn play(mut self, knockout: bool) -> MatchResult {
        self.simulate_match();
        if knockout && self.is_level() {
            self.simulate_extra_time();
            if self.is_level() {
                self.simulate_penalty_shootout();
            }
        }
        self.into_result()
    }

    pub fn into_result(self) -> MatchResult {
        let winner = match self.score_home.cmp(&self.score_away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => self.shootout.map(|s| s.winner),
        };

        MatchResult {
            home_team: self.home.team.name,
            away_team: self.away.team.name,
            score_home: self.score_home,
            score_away: self.score_away,
            extra_time_played: self.extra_time_played,
            shootout: self.shootout,
            winner,
            events: self.events,
            statistics: self.stats.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;
    use crate::models::TacticalInstruction;

    fn engine(seed: u64) -> MatchEngine {
        MatchEngine::new(uniform_setup(12, 12), EngineConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_construction_rejects_malformed_roster() {
        let mut setup = uniform_setup(12, 12);
        setup.away.lineup.clear();
        assert!(MatchEngine::new(setup, EngineConfig::default(), 1).is_err());
    }

    #[test]
    fn test_period_markers() {
        for seed in 0..20 {
            let mut eng = engine(seed);
            eng.simulate_match();
            let events = eng.events();

            let count = |t: EventType| events.iter().filter(|e| e.event_type == t).count();
            assert_eq!(count(EventType::KickOff), 1);
            assert_eq!(count(EventType::HalfTime), 1);
            assert_eq!(count(EventType::SecondHalf), 1);
            assert_eq!(count(EventType::FullTime), 1);

            let minute_of = |t: EventType| events.iter().find(|e| e.event_type == t).map(|e| e.minute);
            assert_eq!(minute_of(EventType::KickOff), Some(0));
            assert_eq!(minute_of(EventType::HalfTime), Some(45));
            assert_eq!(minute_of(EventType::SecondHalf), Some(46));
            assert_eq!(minute_of(EventType::FullTime), Some(90));

            assert_eq!(events.first().map(|e| e.event_type), Some(EventType::KickOff));
            assert_eq!(events.last().map(|e| e.event_type), Some(EventType::FullTime));
        }
    }

    #[test]
    fn test_events_are_ordered_by_minute() {
        let mut eng = engine(3);
        eng.simulate_match();
        assert!(eng.events().windows(2).all(|w| w[0].minute <= w[1].minute));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = engine(42).play(true);
        let b = engine(42).play(true);
        assert_eq!(a, b);

        let c = engine(43).play(true);
        assert_ne!(a.events, c.events);
    }

    #[test]
    fn test_score_matches_goal_events() {
        for seed in 0..30 {
            let result = engine(seed).play(false);
            let home_goals = result
                .goals()
                .filter(|e| e.team_name.as_deref() == Some("Home"))
                .count();
            let away_goals = result
                .goals()
                .filter(|e| e.team_name.as_deref() == Some("Away"))
                .count();
            assert_eq!(home_goals, result.score_home as usize);
            assert_eq!(away_goals, result.score_away as usize);
        }
    }

    #[test]
    fn test_snapshot_events_follow_config() {
        let mut eng = engine(5);
        eng.simulate_match();
        let minutes: Vec<u8> = eng
            .events()
            .iter()
            .filter(|e| e.event_type == EventType::Snapshot)
            .map(|e| e.minute)
            .collect();
        assert_eq!(minutes, vec![45, 90]);

        let mut quiet = MatchEngine::new(uniform_setup(12, 12), quiet_config(), 5).unwrap();
        quiet.simulate_match();
        assert!(quiet.events().iter().all(|e| e.event_type != EventType::Snapshot));
    }

    #[test]
    fn test_non_knockout_draw_has_no_winner() {
        for seed in 0..200 {
            let result = engine(seed).play(false);
            assert!(!result.extra_time_played);
            assert!(result.shootout.is_none());
            if result.score_home == result.score_away {
                assert!(result.winner.is_none());
                return;
            }
        }
        panic!("no draw in 200 seeds");
    }

    #[test]
    fn test_knockout_always_has_winner() {
        for seed in 0..100 {
            let result = engine(seed).play(true);
            assert!(result.winner.is_some(), "seed {} produced no winner", seed);
            if result.shootout.is_some() {
                assert!(result.extra_time_played);
                assert_eq!(result.score_home, result.score_away);
            }
        }
    }

    #[test]
    fn test_cache_cleared_per_simulation() {
        let mut eng = engine(8);
        eng.simulate_match();
        // 11 players × 9 entries after the reset, plus any movers/subs
        assert!(eng.home.calc.cached_entries() >= 99);
        eng.home.reset_cache();
        assert_eq!(eng.home.calc.cached_entries(), 99);
    }

    #[test]
    fn test_score_gated_instruction_sees_live_score() {
        use std::sync::{Arc, Mutex};

        // Trailing-gated move at 89: applies only if the home side is behind
        for seed in 0..40 {
            let mut setup = uniform_setup(12, 12);
            setup.home.instructions.push(
                TacticalInstruction::move_to(89, 10, crate::models::Position::CF)
                    .when(crate::models::ScoreStatus::Trailing),
            );
            let mut eng = MatchEngine::new(setup, EngineConfig::default(), seed).unwrap();
            let skipped = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&skipped);
            eng.set_diagnostic_hook(move |s| sink.lock().unwrap().push(s.reason));
            eng.simulate_match();

            let moved = eng
                .events()
                .iter()
                .any(|e| e.event_type == EventType::TacticalChange && e.player_id == Some(10));
            let goals_before = |team: &str| {
                eng.events()
                    .iter()
                    .filter(|e| e.is_goal() && e.minute < 89 && e.team_name.as_deref() == Some(team))
                    .count()
            };
            let trailing = goals_before("Home") < goals_before("Away");
            let reasons = skipped.lock().unwrap().clone();

            if trailing {
                assert!(moved || reasons == vec![SkipReason::PlayerNotActive], "seed {}", seed);
            } else {
                assert!(!moved, "seed {}", seed);
                assert_eq!(reasons, vec![SkipReason::ScoreConditionNotMet], "seed {}", seed);
            }
        }
    }
}
