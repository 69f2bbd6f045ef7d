//! Goal-rate calibration over fixed seed ranges.
//!
//! These guard the balance tables as a whole: a change to any duel constant
//! or distribution in `tuning` should keep them green.

use super::test_fixtures::*;
use super::MatchEngine;
use crate::engine::config::EngineConfig;
use crate::models::{EventType, MatchResult};

const MATCHES: u64 = 1000;

fn run(home: u8, away: u8, seeds: std::ops::Range<u64>) -> Vec<MatchResult> {
    seeds
        .map(|seed| {
            MatchEngine::new(uniform_setup(home, away), quiet_config(), seed)
                .unwrap()
                .play(false)
        })
        .collect()
}

fn totals(results: &[MatchResult]) -> (u32, u32) {
    results.iter().fold((0, 0), |(h, a), r| (h + r.score_home as u32, a + r.score_away as u32))
}

#[test]
fn test_balanced_goal_rate() {
    let results = run(12, 12, 0..MATCHES);
    let (home, away) = totals(&results);
    let total = home + away;
    let avg = total as f32 / MATCHES as f32;

    assert!((3.5..=5.5).contains(&avg), "average goals per match {:.2}", avg);
    let gap = (home as f32 - away as f32).abs();
    assert!(gap < total as f32 * 0.15, "home {} away {}", home, away);
}

#[test]
fn test_mismatched_teams() {
    // 16 vs 8: rating ratio 2:1
    let results = run(16, 8, 1000..1000 + MATCHES);
    let (strong, weak) = totals(&results);
    assert!(strong >= weak * 2, "strong {} weak {}", strong, weak);
}

#[test]
fn test_stronger_team_outscores_and_goals_are_attributed() {
    let results = run(18, 11, 5000..5200);
    let (strong, weak) = totals(&results);
    assert!(strong > weak);

    for result in &results {
        for goal in result.goals() {
            assert!(goal.player_id.is_some(), "goal at {} without scorer", goal.minute);
            let team = goal.team_name.as_deref();
            assert!(team == Some("Home") || team == Some("Away"));
        }
    }
}

#[test]
fn test_foul_share_of_key_moments() {
    let results = run(12, 12, 9000..9300);
    let fouls: usize = results.iter().map(|r| r.count_events(EventType::Foul)).sum();
    let key_moments = results.len() * EngineConfig::default().key_moments;
    let share = fouls as f32 / key_moments as f32;
    assert!((0.07..=0.13).contains(&share), "foul share {:.3}", share);
}

#[test]
fn test_balanced_possession_split() {
    let results = run(12, 12, 12000..12300);
    let home: u32 = results.iter().map(|r| r.statistics.possession_home).sum();
    let away: u32 = results.iter().map(|r| r.statistics.possession_away).sum();
    let share = home as f32 / (home + away) as f32;
    assert!((0.46..=0.54).contains(&share), "home possession {:.3}", share);
}
