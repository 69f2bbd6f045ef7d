//! Parallel batch simulation
//!
//! Each match builds its own engine, so every simulation owns its attribute
//! caches and nothing is shared between rayon workers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{EngineConfig, MatchEngine, Side};
use crate::error::Result;
use crate::models::{MatchResult, MatchSetup};

/// Aggregate over a batch of matches between the same two sides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchSummary {
    pub matches: u32,
    pub home_goals: u32,
    pub away_goals: u32,
    pub avg_home_goals: f32,
    pub avg_away_goals: f32,
    pub avg_total_goals: f32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    /// Knockout ties settled on penalties
    pub shootouts: u32,
}

impl BatchSummary {
    fn add(&mut self, result: &MatchResult) {
        self.matches += 1;
        self.home_goals += result.score_home as u32;
        self.away_goals += result.score_away as u32;
        match result.winner {
            Some(Side::Home) => self.home_wins += 1,
            Some(Side::Away) => self.away_wins += 1,
            None => self.draws += 1,
        }
        if result.shootout.is_some() {
            self.shootouts += 1;
        }
    }

    fn finish(mut self) -> Self {
        if self.matches > 0 {
            let n = self.matches as f32;
            self.avg_home_goals = self.home_goals as f32 / n;
            self.avg_away_goals = self.away_goals as f32 / n;
            self.avg_total_goals = (self.home_goals + self.away_goals) as f32 / n;
        }
        self
    }
}

/// Play one match per seed in parallel and summarize.
///
/// Setup and config are validated once up front; per-match construction
/// cannot fail after that.
pub fn simulate_batch(setup: &MatchSetup, config: &EngineConfig, seeds: &[u64], knockout: bool) -> Result<BatchSummary> {
    setup.validate()?;
    config.validate()?;

    let results: Vec<MatchResult> = seeds
        .par_iter()
        .map(|&seed| MatchEngine::new(setup.clone(), config.clone(), seed).map(|engine| engine.play(knockout)))
        .collect::<Result<Vec<_>>>()?;

    let summary = results
        .iter()
        .fold(BatchSummary::default(), |mut summary, result| {
            summary.add(result);
            summary
        })
        .finish();

    info!(
        matches = summary.matches,
        avg_total_goals = summary.avg_total_goals,
        home_wins = summary.home_wins,
        draws = summary.draws,
        away_wins = summary.away_wins,
        "batch complete"
    );
    Ok(summary)
}
