//! # Engine Configuration
//!
//! 런타임에 바꿀 수 있는 매치 설정. Balance curves stay in
//! [`crate::engine::tuning`]; this struct only covers match-format knobs.
//!
//! ## 사용법
//! ```rust
//! use sim_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.key_moments > config.key_moments);
//! ```

use serde::{Deserialize, Serialize};

use super::tuning::{KEY_MOMENTS_EXTRA_TIME, KEY_MOMENTS_REGULAR, SHOOTOUT_ROUNDS};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key moments in regular time
    pub key_moments: usize,
    /// Key moments across both extra-time halves
    pub extra_time_key_moments: usize,
    /// Base injury chance for the fouled player (0 disables injuries)
    pub injury_base_chance: f32,
    /// Substitutions per team, tactical and injury combined
    pub max_substitutions: u8,
    /// Regulation shootout rounds before sudden death
    pub shootout_rounds: u8,
    /// Emit `snapshot` events at the period boundaries
    pub emit_snapshot_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_moments: KEY_MOMENTS_REGULAR,
            extra_time_key_moments: KEY_MOMENTS_EXTRA_TIME,
            injury_base_chance: 0.05,
            max_substitutions: 5,
            shootout_rounds: SHOOTOUT_ROUNDS,
            emit_snapshot_events: true,
        }
    }
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 아케이드 스타일 (더 많은 찬스, 더 많은 골)
    pub fn arcade() -> Self {
        Self { key_moments: 28, extra_time_key_moments: 10, ..Self::default() }
    }

    /// Injuries switched off
    pub fn no_injuries() -> Self {
        Self { injury_base_chance: 0.0, ..Self::default() }
    }

    /// Look a preset up by name (`realistic`, `arcade`, `no-injuries`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "no-injuries" => Some(Self::no_injuries()),
            _ => None,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_moments > 90 {
            return Err(SimError::InvalidRequest(format!(
                "key_moments must be at most 90, got {}",
                self.key_moments
            )));
        }
        if self.extra_time_key_moments > 30 {
            return Err(SimError::InvalidRequest(format!(
                "extra_time_key_moments must be at most 30, got {}",
                self.extra_time_key_moments
            )));
        }
        if !(0.0..=1.0).contains(&self.injury_base_chance) {
            return Err(SimError::InvalidRequest(format!(
                "injury_base_chance must be within [0, 1], got {}",
                self.injury_base_chance
            )));
        }
        if self.shootout_rounds == 0 {
            return Err(SimError::InvalidRequest("shootout_rounds must be positive".to_string()));
        }
        Ok(())
    }
}

// ========== Tests ==========
