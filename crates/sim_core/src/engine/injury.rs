//! 부상 시스템
//!
//! Stateless injury model: action-triggered injury rolls during a match and
//! the daily recovery estimate used by the recovery process between
//! matches. Every draw goes through the caller's RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the player was doing when hurt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjuryAction {
    Tackle,
    Sprint,
    Jump,
    Collision,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjuryType {
    Muscle,
    Joint,
    Head,
    /// Has a value table but no action maps to it
    Ligament,
    Other,
}

/// Outcome of one injury roll
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InjuryResult {
    pub will_injure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injury_type: Option<InjuryType>,
    /// 1 (minor) ..= 3 (serious)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    /// Injury points to be worked off by daily recovery
    pub injury_value: f32,
    pub recovery_days_min: u32,
    pub recovery_days_max: u32,
}

impl InjuryResult {
    pub fn none() -> Self {
        Self {
            will_injure: false,
            injury_type: None,
            severity: None,
            injury_value: 0.0,
            recovery_days_min: 0,
            recovery_days_max: 0,
        }
    }
}

/// Daily recovery window used for the in-match estimate (7.5 ± 15%)
const ESTIMATE_DAILY_RECOVERY: f32 = 7.5;
const RECOVERY_FLUCTUATION: f32 = 0.15;

// 나이별 회복 곡선
const RECOVERY_BASE: f32 = 3.0;
const RECOVERY_AMPLITUDE: f32 = 9.0;
const RECOVERY_K: f32 = 0.25;
const RECOVERY_MIDPOINT: f32 = 28.0;

pub struct InjurySystem;

impl InjurySystem {
    /// Age × stamina × home-discount scaled chance.
    pub fn injury_chance(base_chance: f32, age: u8, stamina: u8, is_home: bool) -> f32 {
        let age_mult = match age {
            34..=u8::MAX => 1.5,
            31..=33 => 1.2,
            25..=30 => 1.0,
            _ => 0.8,
        };
        let stamina_mult = match stamina {
            0..=2 => 1.5,
            3 => 1.2,
            4 => 1.0,
            _ => 0.8,
        };
        let home_mult = if is_home { 0.9 } else { 1.0 };
        base_chance * age_mult * stamina_mult * home_mult
    }

    pub fn determine_injury_type(action: InjuryAction) -> InjuryType {
        match action {
            InjuryAction::Tackle | InjuryAction::Sprint => InjuryType::Muscle,
            InjuryAction::Jump => InjuryType::Joint,
            InjuryAction::Collision => InjuryType::Head,
            InjuryAction::Other => InjuryType::Other,
        }
    }

    /// 1 (60%) / 2 (30%) / 3 (10%)
    pub fn determine_severity(rng: &mut impl Rng) -> u8 {
        let roll = rng.gen::<f32>();
        if roll < 0.6 {
            1
        } else if roll < 0.9 {
            2
        } else {
            3
        }
    }

    /// [min, max] injury value for a type and severity
    pub fn injury_value_window(injury_type: InjuryType, severity: u8) -> (f32, f32) {
        let table: [(f32, f32); 3] = match injury_type {
            InjuryType::Muscle => [(10.0, 30.0), (30.0, 60.0), (60.0, 120.0)],
            InjuryType::Joint => [(15.0, 40.0), (40.0, 80.0), (80.0, 150.0)],
            InjuryType::Head => [(5.0, 20.0), (20.0, 50.0), (50.0, 100.0)],
            InjuryType::Ligament => [(40.0, 80.0), (80.0, 160.0), (160.0, 300.0)],
            InjuryType::Other => [(5.0, 15.0), (15.0, 40.0), (40.0, 80.0)],
        };
        table[(severity.clamp(1, 3) - 1) as usize]
    }

    /// Roll for an injury; on a hit, sample its type, severity and value.
    pub fn generate_injury(
        rng: &mut impl Rng,
        base_chance: f32,
        age: u8,
        stamina: u8,
        is_home: bool,
        action: InjuryAction,
    ) -> InjuryResult {
        let chance = Self::injury_chance(base_chance, age, stamina, is_home);
        if chance <= 0.0 || rng.gen::<f32>() >= chance {
            return InjuryResult::none();
        }

        let injury_type = Self::determine_injury_type(action);
        let severity = Self::determine_severity(rng);
        let (lo, hi) = Self::injury_value_window(injury_type, severity);
        let injury_value = rng.gen_range(lo..=hi);
        let (recovery_days_min, recovery_days_max) = Self::recovery_range(injury_value);

        InjuryResult {
            will_injure: true,
            injury_type: Some(injury_type),
            severity: Some(severity),
            injury_value,
            recovery_days_min,
            recovery_days_max,
        }
    }

    /// On-pitch treatment time in seconds
    pub fn treatment_time(severity: u8) -> u32 {
        match severity {
            0 | 1 => 30,
            2 => 90,
            _ => 180,
        }
    }

    /// Injury points recovered per day at `age`, with ±15% fluctuation.
    pub fn daily_recovery(rng: &mut impl Rng, age: u8) -> f32 {
        let base = Self::expected_daily_recovery(age);
        let fluctuation = rng.gen_range(1.0 - RECOVERY_FLUCTUATION..=1.0 + RECOVERY_FLUCTUATION);
        base * fluctuation
    }

    /// Age curve without the random term
    pub fn expected_daily_recovery(age: u8) -> f32 {
        RECOVERY_BASE + RECOVERY_AMPLITUDE / (1.0 + (RECOVERY_K * (age as f32 - RECOVERY_MIDPOINT)).exp())
    }

    /// {min, max} days to work off `injury_value`, independent of age.
    pub fn recovery_range(injury_value: f32) -> (u32, u32) {
        if injury_value <= 0.0 {
            return (0, 0);
        }
        let fastest = ESTIMATE_DAILY_RECOVERY * (1.0 + RECOVERY_FLUCTUATION);
        let slowest = ESTIMATE_DAILY_RECOVERY * (1.0 - RECOVERY_FLUCTUATION);
        (
            (injury_value / fastest).ceil() as u32,
            (injury_value / slowest).ceil() as u32,
        )
    }
}
