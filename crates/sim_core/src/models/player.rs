use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type PlayerId = u32;

/// Player data for the match engine.
///
/// Immutable for the duration of a match. Everything that changes during play
/// (fitness, cards, position) lives on the engine-side `TacticalPlayer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u8,

    /// Intrinsic stamina rating (1..=6). Also the starting fitness.
    #[serde(default = "default_stamina")]
    pub stamina: u8,

    /// Match-day form (1..=10, 5 = neutral)
    #[serde(default = "default_form")]
    pub form: u8,

    /// Experience (0..=100)
    #[serde(default)]
    pub experience: u8,

    pub attributes: PlayerAttributes,
}

fn default_age() -> u8 {
    25
}

fn default_stamina() -> u8 {
    4
}

fn default_form() -> u8 {
    5
}

/// 능력치 묶음 (1-20 스케일)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAttributes {
    pub finishing: u8,
    pub composure: u8,
    pub positioning: u8,
    pub strength: u8,
    pub pace: u8,
    pub dribbling: u8,
    pub passing: u8,
    pub defending: u8,
    pub free_kicks: u8,
    pub penalties: u8,
    pub gk_reflexes: u8,
    pub gk_handling: u8,
    pub gk_distribution: u8,
}

impl PlayerAttributes {
    /// Every attribute set to the same value. Handy for fixtures and tooling.
    pub fn uniform(value: u8) -> Self {
        Self {
            finishing: value,
            composure: value,
            positioning: value,
            strength: value,
            pace: value,
            dribbling: value,
            passing: value,
            defending: value,
            free_kicks: value,
            penalties: value,
            gk_reflexes: value,
            gk_handling: value,
            gk_distribution: value,
        }
    }
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, attributes: PlayerAttributes) -> Self {
        Self {
            id,
            name: name.into(),
            age: default_age(),
            stamina: default_stamina(),
            form: default_form(),
            experience: 0,
            attributes,
        }
    }

    /// Stamina as a fitness value, clamped into the legal fitness band.
    pub fn base_stamina(&self) -> f32 {
        (self.stamina as f32).clamp(1.0, 6.0)
    }
}

/// Tactical position key.
///
/// Serialized as the bare key string (`"CML"`, `"GK"`, ...). Left/right
/// variants sit in the half-spaces; unsuffixed keys are central.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CBL,
    CB,
    CBR,
    RB,
    WBL,
    WBR,
    DML,
    DM,
    DMR,
    LM,
    CML,
    CM,
    CMR,
    RM,
    AML,
    AM,
    AMR,
    LW,
    RW,
    CFL,
    CF,
    CFR,
}

/// Broad role group of a position key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PositionGroup {
    Goalkeeper,
    CenterBack,
    Fullback,
    WingBack,
    DefensiveMid,
    CentralMid,
    WideMid,
    AttackingMid,
    Winger,
    Forward,
}

impl Position {
    pub const ALL: [Position; 24] = [
        Position::GK,
        Position::LB,
        Position::CBL,
        Position::CB,
        Position::CBR,
        Position::RB,
        Position::WBL,
        Position::WBR,
        Position::DML,
        Position::DM,
        Position::DMR,
        Position::LM,
        Position::CML,
        Position::CM,
        Position::CMR,
        Position::RM,
        Position::AML,
        Position::AM,
        Position::AMR,
        Position::LW,
        Position::RW,
        Position::CFL,
        Position::CF,
        Position::CFR,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CBL => "CBL",
            Position::CB => "CB",
            Position::CBR => "CBR",
            Position::RB => "RB",
            Position::WBL => "WBL",
            Position::WBR => "WBR",
            Position::DML => "DML",
            Position::DM => "DM",
            Position::DMR => "DMR",
            Position::LM => "LM",
            Position::CML => "CML",
            Position::CM => "CM",
            Position::CMR => "CMR",
            Position::RM => "RM",
            Position::AML => "AML",
            Position::AM => "AM",
            Position::AMR => "AMR",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CFL => "CFL",
            Position::CF => "CF",
            Position::CFR => "CFR",
        }
    }

    pub fn group(&self) -> PositionGroup {
        match self {
            Position::GK => PositionGroup::Goalkeeper,
            Position::CBL | Position::CB | Position::CBR => PositionGroup::CenterBack,
            Position::LB | Position::RB => PositionGroup::Fullback,
            Position::WBL | Position::WBR => PositionGroup::WingBack,
            Position::DML | Position::DM | Position::DMR => PositionGroup::DefensiveMid,
            Position::CML | Position::CM | Position::CMR => PositionGroup::CentralMid,
            Position::LM | Position::RM => PositionGroup::WideMid,
            Position::AML | Position::AM | Position::AMR => PositionGroup::AttackingMid,
            Position::LW | Position::RW => PositionGroup::Winger,
            Position::CFL | Position::CF | Position::CFR => PositionGroup::Forward,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    /// Fullbacks, wing-backs and wingers: the players who deliver crosses.
    pub fn is_wide_provider(&self) -> bool {
        matches!(
            self,
            Position::LB | Position::RB | Position::WBL | Position::WBR | Position::LW | Position::RW
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.key() == upper)
            .ok_or_else(|| format!("Unknown position key: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key_roundtrip() {
        for pos in Position::ALL {
            assert_eq!(pos.key().parse::<Position>().unwrap(), pos);
            let json = serde_json::to_string(&pos).unwrap();
            assert_eq!(json, format!("\"{}\"", pos.key()));
        }
        assert_eq!("cml".parse::<Position>().unwrap(), Position::CML);
        assert!("XYZ".parse::<Position>().is_err());
    }

    #[test]
    fn test_goalkeeper_is_derived_from_key() {
        let keepers: Vec<_> = Position::ALL.iter().filter(|p| p.is_goalkeeper()).collect();
        assert_eq!(keepers, vec![&Position::GK]);
    }

    #[test]
    fn test_wide_providers() {
        assert!(Position::WBL.is_wide_provider());
        assert!(Position::RW.is_wide_provider());
        assert!(!Position::LM.is_wide_provider());
    }

    #[test]
    fn test_player_defaults_from_json() {
        let json = r#"{
            "id": 7,
            "name": "Winger",
            "attributes": {
                "finishing": 12, "composure": 11, "positioning": 10, "strength": 9,
                "pace": 17, "dribbling": 15, "passing": 12, "defending": 6,
                "free_kicks": 10, "penalties": 9, "gk_reflexes": 2, "gk_handling": 2,
                "gk_distribution": 3
            }
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.stamina, 4);
        assert_eq!(player.form, 5);
        assert_eq!(player.age, 25);
        assert_eq!(player.base_stamina(), 4.0);
    }
}
