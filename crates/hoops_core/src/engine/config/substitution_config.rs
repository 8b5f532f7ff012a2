use serde::{Deserialize, Serialize};

use crate::models::player::PositionTable;

/// When tired players come off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Possessions between checkpoints (default: 6). Period breaks are
    /// always checkpoints.
    pub checkpoint_interval: u32,
    /// Stamina ratio below which a player is subbed out
    pub fatigue_threshold: PositionTable<f32>,
    /// Replacement must be at least this fresh (default: 0.70)
    pub min_replacement_ratio: f32,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 6,
            fatigue_threshold: PositionTable::new(0.45, 0.45, 0.40, 0.38, 0.35),
            min_replacement_ratio: 0.70,
        }
    }
}

impl SubstitutionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.checkpoint_interval == 0 {
            return Err("substitution.checkpoint_interval must be positive".to_string());
        }
        let t = &self.fatigue_threshold;
        for value in [t.pg, t.sg, t.sf, t.pf, t.c, self.min_replacement_ratio] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("substitution ratios must be within 0..=1, got {value}"));
            }
        }
        Ok(())
    }
}
