//! Test Fixtures Module
//!
//! Shared team and player builders for engine tests.
//!
//! ## Usage
//! ```rust,ignore
//! use crate::engine::match_sim::test_fixtures::*;
//! ```
//!
//! Player ids are `(team_id - 1) * 100 + slot`, so team 1 fields ids 1..=11
//! and team 2 fields 101..=111. Substitutes start at `+ 12`.

use crate::engine::config::EngineConfig;
use crate::models::{
    BenchConfig, LineupEntry, MatchSetup, Player, PlayerAttributes, PlayerId, Position, TeamId,
    TeamSheet,
};

// =============================================================================
// Player Helpers
// =============================================================================

/// Player with stamina 4, neutral form, 50 experience, age 27.
pub fn test_player(id: PlayerId, name: &str, attributes: PlayerAttributes) -> Player {
    Player {
        id,
        name: name.to_string(),
        age: 27,
        stamina: 4,
        form: 5,
        experience: 50,
        attributes,
    }
}

/// GK, LB, CBL, CBR, RB, LM, CML, CMR, RM, CFL, CFR
pub fn standard_442_positions() -> [Position; 11] {
    [
        Position::GK,
        Position::LB,
        Position::CBL,
        Position::CBR,
        Position::RB,
        Position::LM,
        Position::CML,
        Position::CMR,
        Position::RM,
        Position::CFL,
        Position::CFR,
    ]
}

fn id_base(team_id: TeamId) -> PlayerId {
    team_id.saturating_sub(1) * 100
}

// =============================================================================
// Team Creation Helpers
// =============================================================================

/// 4-4-2 sheet where every attribute of every player equals `value`.
pub fn uniform_sheet(team_id: TeamId, name: &str, value: u8) -> TeamSheet {
    let base = id_base(team_id);
    let lineup = standard_442_positions()
        .iter()
        .enumerate()
        .map(|(i, &position)| LineupEntry {
            player: test_player(
                base + i as PlayerId + 1,
                &format!("{} Player {}", name, i + 1),
                PlayerAttributes::uniform(value),
            ),
            position,
        })
        .collect();
    TeamSheet::new(team_id, name, lineup)
}

/// [`uniform_sheet`] plus a seven-man bench with every bucket filled.
///
/// Bench ids: GK +12, CB +13, FB +14, W +15, CM +16, FW +17, spare +18.
pub fn sheet_with_bench(team_id: TeamId, name: &str, value: u8) -> TeamSheet {
    let mut sheet = uniform_sheet(team_id, name, value);
    let base = id_base(team_id);
    sheet.substitutes = (12..=18)
        .map(|slot| {
            test_player(
                base + slot,
                &format!("{} Sub {}", name, slot),
                PlayerAttributes::uniform(value),
            )
        })
        .collect();
    sheet.bench = Some(BenchConfig {
        goalkeeper: Some(base + 12),
        center_back: Some(base + 13),
        fullback: Some(base + 14),
        winger: Some(base + 15),
        central_midfield: Some(base + 16),
        forward: Some(base + 17),
    });
    sheet
}

/// Home (id 1) vs away (id 2) with uniform attributes
pub fn uniform_setup(home_value: u8, away_value: u8) -> MatchSetup {
    MatchSetup::new(uniform_sheet(1, "Home", home_value), uniform_sheet(2, "Away", away_value))
}

pub fn quiet_config() -> EngineConfig {
    EngineConfig { emit_snapshot_events: false, ..EngineConfig::default() }
}
