//! Balance tables
//!
//! Every distribution percentage and duel constant of the match loop lives
//! here. Goal-rate calibration (≈4-4.5 goals per balanced match, strong sides
//! scoring well over twice the weak side's total) depends on these values as
//! a set; change them together and re-run the calibration tests.

use super::types::{AttackType, SetPieceKind, ShotType};

// ============================================================================
// Duel primitive
// ============================================================================

/// Damping divisor applied to every duel difference
pub const DUEL_DAMPING: f32 = 1.5;

/// (k, offset) pair for the logistic duel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelParams {
    pub k: f32,
    pub offset: f32,
}

impl DuelParams {
    pub const fn new(k: f32, offset: f32) -> Self {
        Self { k, offset }
    }
}

/// Lane possession duel deciding who attacks
pub const MIDFIELD_DUEL: DuelParams = DuelParams::new(0.02, 0.0);

// ============================================================================
// Key moments
// ============================================================================

pub const KEY_MOMENTS_REGULAR: usize = 20;
pub const KEY_MOMENTS_EXTRA_TIME: usize = 7;

/// Share of key moments that turn into a foul instead of an attack
pub const FOUL_CHANCE: f32 = 0.10;

/// Lane attack strength multiplier for the team in possession
pub const ATTACK_POWER_MULTIPLIER: f32 = 1.15;

// ============================================================================
// Attack types
// ============================================================================

/// "Balanced" attack profile
pub const ATTACK_TYPE_WEIGHTS: [(AttackType, f32); 5] = [
    (AttackType::Cross, 0.15),
    (AttackType::ShortPass, 0.30),
    (AttackType::ThroughPass, 0.15),
    (AttackType::Dribble, 0.30),
    (AttackType::LongShot, 0.10),
];

/// Push duel per attack type. Long shots never push.
pub fn push_duel(attack_type: AttackType) -> Option<DuelParams> {
    match attack_type {
        AttackType::Cross => Some(DuelParams::new(0.10, 0.0)),
        AttackType::ShortPass => Some(DuelParams::new(0.10, 3.0)),
        AttackType::ThroughPass => Some(DuelParams::new(0.10, 12.0)),
        AttackType::Dribble => Some(DuelParams::new(0.10, 6.0)),
        AttackType::LongShot => None,
    }
}

/// Conditional shot-type distribution. Long shots are forced.
pub fn shot_type_weights(attack_type: AttackType) -> &'static [(ShotType, f32)] {
    match attack_type {
        AttackType::Cross => &[(ShotType::Header, 0.5), (ShotType::Normal, 0.3), (ShotType::Rebound, 0.2)],
        AttackType::ThroughPass => &[(ShotType::OneOnOne, 0.5), (ShotType::Normal, 0.5)],
        AttackType::ShortPass => &[(ShotType::Normal, 0.7), (ShotType::Rebound, 0.3)],
        AttackType::Dribble => &[(ShotType::Normal, 0.8), (ShotType::Rebound, 0.2)],
        AttackType::LongShot => &[(ShotType::LongShot, 1.0)],
    }
}

// ============================================================================
// Shots
// ============================================================================

/// Shooter vs goalkeeper duel per shot type
pub fn gk_duel(shot_type: ShotType) -> DuelParams {
    match shot_type {
        ShotType::Normal => DuelParams::new(0.3, 1.7),
        ShotType::Header => DuelParams::new(0.3, 3.0),
        ShotType::OneOnOne => DuelParams::new(0.3, -1.75),
        ShotType::Rebound => DuelParams::new(0.3, 0.25),
        ShotType::LongShot => DuelParams::new(0.3, 7.6),
    }
}

/// Attribute weights of a shot rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotWeights {
    pub finishing: f32,
    pub composure: f32,
    pub positioning: f32,
    pub strength: f32,
    pub pace: f32,
}

pub fn shot_weights(shot_type: ShotType) -> ShotWeights {
    match shot_type {
        ShotType::Normal => ShotWeights {
            finishing: 0.45,
            composure: 0.25,
            positioning: 0.2,
            strength: 0.0,
            pace: 0.1,
        },
        ShotType::Header => ShotWeights {
            finishing: 0.2,
            composure: 0.1,
            positioning: 0.3,
            strength: 0.4,
            pace: 0.0,
        },
        ShotType::OneOnOne => ShotWeights {
            finishing: 0.4,
            composure: 0.3,
            positioning: 0.0,
            strength: 0.0,
            pace: 0.3,
        },
        ShotType::Rebound => ShotWeights {
            finishing: 0.35,
            composure: 0.25,
            positioning: 0.4,
            strength: 0.0,
            pace: 0.0,
        },
        ShotType::LongShot => ShotWeights {
            finishing: 0.5,
            composure: 0.2,
            positioning: 0.0,
            strength: 0.3,
            pace: 0.0,
        },
    }
}

/// Long-shot distance window in metres
pub const LONG_SHOT_DISTANCE_MIN: f32 = 18.0;
pub const LONG_SHOT_DISTANCE_MAX: f32 = 30.0;
/// Rating lost across the full distance window
pub const LONG_SHOT_DISTANCE_DECAY: f32 = 0.3;

/// Variance multiplier window for every shot but long shots
pub const SHOT_VARIANCE_MIN: f32 = 0.6;
pub const SHOT_VARIANCE_MAX: f32 = 1.1;

/// Non-goals reclassified as blocked
pub const BLOCKED_SHARE: f32 = 0.15;
/// Blocked shots that are turned behind for a corner
pub const BLOCKED_TO_CORNER: f32 = 0.87;

// ============================================================================
// Shooter / assist selection
// ============================================================================

/// Shooter pool bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShooterGroup {
    Forward,
    Wide,
    AttackingMid,
    CentralMid,
    Other,
}

pub const SHOOTER_SHARES: [(ShooterGroup, f32); 4] = [
    (ShooterGroup::Forward, 0.40),
    (ShooterGroup::Wide, 0.20),
    (ShooterGroup::AttackingMid, 0.15),
    (ShooterGroup::Other, 0.25),
];

pub const LONG_SHOT_SHOOTER_SHARES: [(ShooterGroup, f32); 4] = [
    (ShooterGroup::AttackingMid, 0.45),
    (ShooterGroup::Wide, 0.25),
    (ShooterGroup::CentralMid, 0.20),
    (ShooterGroup::Other, 0.10),
];

pub const ASSIST_CHANCE: f32 = 0.65;

/// Relative assist weight per group (AM > CM = W > rest)
pub fn assist_weight(group: ShooterGroup) -> f32 {
    match group {
        ShooterGroup::AttackingMid => 3.0,
        ShooterGroup::CentralMid | ShooterGroup::Wide => 2.0,
        ShooterGroup::Forward | ShooterGroup::Other => 1.0,
    }
}

// ============================================================================
// Fouls & set pieces
// ============================================================================

/// Roll below → straight red
pub const STRAIGHT_RED_THRESHOLD: f32 = 0.10;
/// Roll below (cumulative) → yellow
pub const YELLOW_THRESHOLD: f32 = 0.40;

/// Foul in the central lane (penalty-area proxy)
pub const PENALTY_SHARE: f32 = 0.30;
/// Foul in a wide lane
pub const DIRECT_FREE_KICK_SHARE: f32 = 0.65;

/// Logistic set-piece curve: P = 1 / (1 + exp(-diff·k + c))
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetPieceCurve {
    pub k: f32,
    pub c: f32,
}

pub fn set_piece_curve(kind: SetPieceKind) -> SetPieceCurve {
    match kind {
        SetPieceKind::Corner => SetPieceCurve { k: 0.1, c: 2.94 },
        SetPieceKind::IndirectFreeKick => SetPieceCurve { k: 0.1, c: 2.75 },
        SetPieceKind::DirectFreeKick => SetPieceCurve { k: 0.1, c: 2.44 },
        SetPieceKind::Penalty => SetPieceCurve { k: 0.1, c: -1.15 },
    }
}

// ============================================================================
// Penalty shootout
// ============================================================================

pub const SHOOTOUT_ROUNDS: u8 = 5;
/// Base conversion logit (≈75% for evenly matched kicker and keeper)
pub const SHOOTOUT_BASE_LOGIT: f32 = 1.1;
pub const SHOOTOUT_K: f32 = 0.15;
/// Per-kick conversion probability bounds
pub const SHOOTOUT_CONVERSION_MIN: f32 = 0.01;
pub const SHOOTOUT_CONVERSION_MAX: f32 = 0.99;

// ============================================================================
// Snapshot cadence
// ============================================================================

/// Regular-time minutes that force a snapshot recompute
pub fn is_snapshot_minute(minute: u8) -> bool {
    if minute > 90 {
        return matches!(minute, 95 | 100 | 105 | 110 | 115 | 120);
    }
    minute % 5 == 0 || matches!(minute, 45 | 46 | 90)
}

/// Minutes at which the break's bonus recovery is applied
pub fn is_recovery_minute(minute: u8) -> bool {
    matches!(minute, 46 | 91 | 106)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<T>(weights: &[(T, f32)]) -> f32 {
        weights.iter().map(|(_, w)| w).sum()
    }

    #[test]
    fn test_distributions_sum_to_one() {
        assert!((total(&ATTACK_TYPE_WEIGHTS) - 1.0).abs() < 1e-6);
        assert!((total(&SHOOTER_SHARES) - 1.0).abs() < 1e-6);
        assert!((total(&LONG_SHOT_SHOOTER_SHARES) - 1.0).abs() < 1e-6);
        for (attack_type, _) in ATTACK_TYPE_WEIGHTS {
            assert!((total(shot_type_weights(attack_type)) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_only_long_shots_skip_push() {
        for (attack_type, _) in ATTACK_TYPE_WEIGHTS {
            assert_eq!(push_duel(attack_type).is_none(), attack_type == AttackType::LongShot);
        }
    }

    #[test]
    fn test_snapshot_cadence() {
        let regular: Vec<u8> = (1..=90).filter(|m| is_snapshot_minute(*m)).collect();
        assert!(regular.contains(&45));
        assert!(regular.contains(&46));
        assert!(regular.contains(&90));
        assert!(!regular.contains(&44));
        assert_eq!(regular.len(), 19);

        let extra: Vec<u8> = (91..=120).filter(|m| is_snapshot_minute(*m)).collect();
        assert_eq!(extra, vec![95, 100, 105, 110, 115, 120]);
    }

    #[test]
    fn test_penalty_curve_is_most_generous() {
        let penalty = set_piece_curve(SetPieceKind::Penalty).c;
        for kind in [SetPieceKind::Corner, SetPieceKind::IndirectFreeKick, SetPieceKind::DirectFreeKick] {
            assert!(set_piece_curve(kind).c > penalty);
        }
    }
}
