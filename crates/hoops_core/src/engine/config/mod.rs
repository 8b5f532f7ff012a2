//! # Engine Configuration
//!
//! Every tuning constant of the game simulator lives here.
//!
//! ```rust
//! use hoops_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let fast = EngineConfig::fast_paced();
//! assert!(fast.possession.max_duration_secs < config.possession.max_duration_secs);
//! ```

mod possession_config;
mod rules_config;
mod stamina_config;
mod substitution_config;

pub use possession_config::PossessionConfig;
pub use rules_config::RulesConfig;
pub use stamina_config::StaminaConfig;
pub use substitution_config::SubstitutionConfig;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub possession: PossessionConfig,
    #[serde(default)]
    pub stamina: StaminaConfig,
    #[serde(default)]
    pub substitution: SubstitutionConfig,
}

impl EngineConfig {
    /// Default league pace.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Shorter possessions and heavier legs.
    pub fn fast_paced() -> Self {
        let mut cfg = Self::default();
        cfg.possession.min_duration_secs = 5;
        cfg.possession.max_duration_secs = 16;
        cfg.possession.fast_break_max_secs = 6;
        cfg.stamina.drain_per_possession = 0.65;
        cfg.substitution.checkpoint_interval = 4;
        cfg
    }

    /// Every possession takes the same time, so the possession count per
    /// period is fixed. Used in tests.
    pub fn deterministic_clock() -> Self {
        let mut cfg = Self::default();
        cfg.possession.min_duration_secs = 15;
        cfg.possession.max_duration_secs = 15;
        cfg.possession.fast_break_max_secs = 15;
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.validate().map_err(SimError::InvalidConfig)?;
        self.possession.validate().map_err(SimError::InvalidConfig)?;
        self.stamina.validate().map_err(SimError::InvalidConfig)?;
        self.substitution.validate().map_err(SimError::InvalidConfig)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

// ========== Tests ==========
