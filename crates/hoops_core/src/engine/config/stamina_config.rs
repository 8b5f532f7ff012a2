//! Stamina drain and recovery parameters.

use serde::{Deserialize, Serialize};

use crate::models::player::PositionTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    /// Stamina lost per possession on court (default: 0.55)
    pub drain_per_possession: f32,
    /// Per-position drain multiplier
    pub position_drain: PositionTable<f32>,
    /// Extra drain factor for guards in transition (default: 1.6)
    pub fast_break_guard_factor: f32,
    /// Extra drain factor for bigs on rebounding possessions (default: 1.4)
    pub rebound_big_factor: f32,
    /// Stamina regained per possession on the bench (default: 1.1)
    pub recovery_per_possession: f32,
    /// Regained by everyone between periods (default: 4.0)
    pub period_break_recovery: f32,
    /// Rating loss at zero stamina, 0..1 (default: 0.30)
    pub max_penalty: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            drain_per_possession: 0.55,
            position_drain: PositionTable::new(1.10, 1.05, 1.0, 1.0, 1.05),
            fast_break_guard_factor: 1.6,
            rebound_big_factor: 1.4,
            recovery_per_possession: 1.1,
            period_break_recovery: 4.0,
            max_penalty: 0.30,
        }
    }
}

impl StaminaConfig {
    pub fn validate(&self) -> Result<(), String> {
        let factors = [
            ("drain_per_possession", self.drain_per_possession),
            ("fast_break_guard_factor", self.fast_break_guard_factor),
            ("rebound_big_factor", self.rebound_big_factor),
            ("recovery_per_possession", self.recovery_per_possession),
            ("period_break_recovery", self.period_break_recovery),
            ("position_drain.pg", self.position_drain.pg),
            ("position_drain.sg", self.position_drain.sg),
            ("position_drain.sf", self.position_drain.sf),
            ("position_drain.pf", self.position_drain.pf),
            ("position_drain.c", self.position_drain.c),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("stamina.{name} must be a non-negative number, got {value}"));
            }
        }
        if !(0.0..1.0).contains(&self.max_penalty) {
            return Err(format!("stamina.max_penalty must be within 0..1, got {}", self.max_penalty));
        }
        Ok(())
    }
}
