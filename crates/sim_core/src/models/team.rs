use super::instructions::TacticalInstruction;
use super::player::{Player, PlayerId, Position, PositionGroup};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type TeamId = u32;

/// Pre-match team sheet: lineup, scheduled instructions and the bench.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSheet {
    pub id: TeamId,
    pub name: String,
    pub lineup: Vec<LineupEntry>,
    #[serde(default)]
    pub instructions: Vec<TacticalInstruction>,
    /// Substitute pool. Ids are looked up when a swap or injury replacement
    /// is applied.
    #[serde(default)]
    pub substitutes: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bench: Option<BenchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupEntry {
    pub player: Player,
    pub position: Position,
}

/// Broad bench buckets used for automatic replacements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BenchBucket {
    Goalkeeper,
    CenterBack,
    Fullback,
    Winger,
    CentralMidfield,
    Forward,
}

impl BenchBucket {
    pub fn for_position(position: Position) -> Self {
        match position.group() {
            PositionGroup::Goalkeeper => BenchBucket::Goalkeeper,
            PositionGroup::CenterBack => BenchBucket::CenterBack,
            PositionGroup::Fullback | PositionGroup::WingBack => BenchBucket::Fullback,
            PositionGroup::WideMid | PositionGroup::Winger => BenchBucket::Winger,
            PositionGroup::DefensiveMid
            | PositionGroup::CentralMid
            | PositionGroup::AttackingMid => BenchBucket::CentralMidfield,
            PositionGroup::Forward => BenchBucket::Forward,
        }
    }
}

/// Bucket → substitute id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BenchConfig {
    #[serde(default)]
    pub goalkeeper: Option<PlayerId>,
    #[serde(default)]
    pub center_back: Option<PlayerId>,
    #[serde(default)]
    pub fullback: Option<PlayerId>,
    #[serde(default)]
    pub winger: Option<PlayerId>,
    #[serde(default)]
    pub central_midfield: Option<PlayerId>,
    #[serde(default)]
    pub forward: Option<PlayerId>,
}

impl BenchConfig {
    pub fn substitute_for(&self, bucket: BenchBucket) -> Option<PlayerId> {
        match bucket {
            BenchBucket::Goalkeeper => self.goalkeeper,
            BenchBucket::CenterBack => self.center_back,
            BenchBucket::Fullback => self.fullback,
            BenchBucket::Winger => self.winger,
            BenchBucket::CentralMidfield => self.central_midfield,
            BenchBucket::Forward => self.forward,
        }
    }
}

impl TeamSheet {
    pub fn new(id: TeamId, name: impl Into<String>, lineup: Vec<LineupEntry>) -> Self {
        Self {
            id,
            name: name.into(),
            lineup,
            instructions: Vec::new(),
            substitutes: Vec::new(),
            bench: None,
        }
    }

    /// Structural checks only: non-empty, exactly one GK, unique ids across
    /// the lineup and the substitute pool.
    ///
    /// Attribute ranges and lineup size are the caller's business.
    pub fn validate(&self) -> Result<()> {
        if self.lineup.is_empty() {
            return Err(SimError::EmptyRoster { team: self.name.clone() });
        }

        let gk_count = self.lineup.iter().filter(|e| e.position.is_goalkeeper()).count();
        match gk_count {
            0 => return Err(SimError::MissingGoalkeeper { team: self.name.clone() }),
            1 => {}
            count => {
                return Err(SimError::MultipleGoalkeepers { team: self.name.clone(), count })
            }
        }

        let mut seen = HashSet::with_capacity(self.lineup.len() + self.substitutes.len());
        let ids = self.lineup.iter().map(|e| e.player.id).chain(self.substitutes.iter().map(|p| p.id));
        for player_id in ids {
            if !seen.insert(player_id) {
                return Err(SimError::DuplicatePlayer { team: self.name.clone(), player_id });
            }
        }

        Ok(())
    }
}

/// Both team sheets for one fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub home: TeamSheet,
    pub away: TeamSheet,
}

impl MatchSetup {
    pub fn new(home: TeamSheet, away: TeamSheet) -> Self {
        Self { home, away }
    }

    pub fn validate(&self) -> Result<()> {
        self.home.validate()?;
        self.away.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PlayerAttributes;

    fn entry(id: PlayerId, position: Position) -> LineupEntry {
        LineupEntry {
            player: Player::new(id, format!("P{}", id), PlayerAttributes::uniform(12)),
            position,
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_keeperless() {
        let empty = TeamSheet::new(1, "Empty", vec![]);
        assert!(matches!(empty.validate(), Err(SimError::EmptyRoster { .. })));

        let no_gk = TeamSheet::new(1, "NoKeeper", vec![entry(1, Position::CB), entry(2, Position::CF)]);
        assert!(matches!(no_gk.validate(), Err(SimError::MissingGoalkeeper { .. })));

        let two_gk = TeamSheet::new(1, "TwoKeepers", vec![entry(1, Position::GK), entry(2, Position::GK)]);
        assert!(matches!(two_gk.validate(), Err(SimError::MultipleGoalkeepers { count: 2, .. })));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let sheet = TeamSheet::new(1, "Dupes", vec![entry(1, Position::GK), entry(1, Position::CB)]);
        assert!(matches!(sheet.validate(), Err(SimError::DuplicatePlayer { player_id: 1, .. })));

        let mut bench_clash = TeamSheet::new(1, "Bench", vec![entry(1, Position::GK), entry(2, Position::CB)]);
        bench_clash.substitutes.push(entry(2, Position::CB).player);
        assert!(matches!(bench_clash.validate(), Err(SimError::DuplicatePlayer { player_id: 2, .. })));
    }

    #[test]
    fn test_bench_bucket_mapping() {
        assert_eq!(BenchBucket::for_position(Position::GK), BenchBucket::Goalkeeper);
        assert_eq!(BenchBucket::for_position(Position::CBR), BenchBucket::CenterBack);
        assert_eq!(BenchBucket::for_position(Position::WBL), BenchBucket::Fullback);
        assert_eq!(BenchBucket::for_position(Position::RM), BenchBucket::Winger);
        assert_eq!(BenchBucket::for_position(Position::DM), BenchBucket::CentralMidfield);
        assert_eq!(BenchBucket::for_position(Position::CFL), BenchBucket::Forward);
    }

    #[test]
    fn test_bench_config_json_uses_camel_case() {
        let bench: BenchConfig =
            serde_json::from_str(r#"{"centerBack": 21, "centralMidfield": 22}"#).unwrap();
        assert_eq!(bench.substitute_for(BenchBucket::CenterBack), Some(21));
        assert_eq!(bench.substitute_for(BenchBucket::CentralMidfield), Some(22));
        assert_eq!(bench.substitute_for(BenchBucket::Forward), None);
    }
}
