//! Small shared enums for the match loop

use serde::{Deserialize, Serialize};

/// Pitch sector used to localize aggregation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }
}

/// Tactical dimension evaluated within a lane
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Attack,
    Defense,
    Possession,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Attack, Phase::Defense, Phase::Possession];

    pub fn index(self) -> usize {
        match self {
            Phase::Attack => 0,
            Phase::Defense => 1,
            Phase::Possession => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(self) -> bool {
        matches!(self, Side::Home)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    Cross,
    ShortPass,
    ThroughPass,
    Dribble,
    LongShot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Normal,
    Header,
    OneOnOne,
    Rebound,
    LongShot,
}

/// Outcome of one key moment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FinalResult {
    Goal,
    Save,
    Blocked,
    /// Off target. Open-play shots resolve to save or blocked instead.
    Miss,
    DefenseStopped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SetPieceKind {
    Corner,
    IndirectFreeKick,
    DirectFreeKick,
    Penalty,
}
