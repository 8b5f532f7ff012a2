//! Score-prediction coefficients.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PredictorConfig {
    /// Points per unit of win-percentage differential (default: 8.0)
    pub quality_scale: f64,
    /// Bound of the quality adjustment (default: 8.0)
    pub quality_cap: f64,
    /// Points per point of plus-minus differential (default: 0.5)
    pub plus_minus_scale: f64,
    pub plus_minus_cap: f64,
    /// Points per unit of FG% differential (default: 20.0)
    pub shooting_scale: f64,
    pub shooting_cap: f64,
    /// Standard deviation of the per-team variance draw (default: 2.0)
    pub variance_sigma: f64,
    /// Bound of the variance term (default: 4.0)
    pub variance_cap: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// Logistic slope turning a predicted margin into a win probability
    pub win_prob_slope: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            quality_scale: 8.0,
            quality_cap: 8.0,
            plus_minus_scale: 0.5,
            plus_minus_cap: 3.0,
            shooting_scale: 20.0,
            shooting_cap: 2.0,
            variance_sigma: 2.0,
            variance_cap: 4.0,
            min_score: 95.0,
            max_score: 135.0,
            win_prob_slope: 0.12,
        }
    }
}

impl PredictorConfig {
    /// No random term. Same inputs give the same scores for every seed.
    pub fn without_variance() -> Self {
        Self { variance_sigma: 0.0, variance_cap: 0.0, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("quality_scale", self.quality_scale),
            ("quality_cap", self.quality_cap),
            ("plus_minus_scale", self.plus_minus_scale),
            ("plus_minus_cap", self.plus_minus_cap),
            ("shooting_scale", self.shooting_scale),
            ("shooting_cap", self.shooting_cap),
            ("variance_sigma", self.variance_sigma),
            ("variance_cap", self.variance_cap),
            ("win_prob_slope", self.win_prob_slope),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "predictor.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.min_score.is_finite() || !self.max_score.is_finite() || self.min_score > self.max_score {
            return Err(SimError::InvalidConfig(format!(
                "predictor score range {}..{} is invalid",
                self.min_score, self.max_score
            )));
        }
        Ok(())
    }
}
