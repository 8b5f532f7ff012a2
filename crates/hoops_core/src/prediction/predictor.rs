use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::PredictorConfig;
use super::win_prob::home_win_probability;
use crate::error::{Result, SimError};
use crate::models::season_stats::TeamSeasonStats;
use crate::models::team::TeamSide;

/// Deterministic part of the blend, from the home team's point of view.
/// The away team receives the negation, so identical teams get zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    pub quality: f64,
    pub plus_minus: f64,
    pub shooting: f64,
}

impl Adjustments {
    pub fn total(&self) -> f64 {
        self.quality + self.plus_minus + self.shooting
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePrediction {
    pub home_name: String,
    pub away_name: String,
    pub home_score: f64,
    pub away_score: f64,
    pub adjustments: Adjustments,
    pub home_variance: f64,
    pub away_variance: f64,
    pub total: f64,
    /// Absolute difference of the two scores.
    pub margin: f64,
    /// Ties go to the away team.
    pub winner: TeamSide,
    pub home_win_probability: f64,
}

/// Closed-form score estimator. Owns its RNG, so a fixed seed reproduces the
/// same sequence of predictions.
pub struct ScorePredictor {
    config: PredictorConfig,
    rng: ChaCha8Rng,
    noise: Normal<f64>,
}

impl ScorePredictor {
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_config(seed, PredictorConfig::default())
    }

    pub fn with_config(seed: u64, config: PredictorConfig) -> Result<Self> {
        config.validate()?;
        let noise = Normal::new(0.0, config.variance_sigma)
            .map_err(|e| SimError::InvalidConfig(format!("predictor.variance_sigma: {e}")))?;
        Ok(Self { config, rng: ChaCha8Rng::seed_from_u64(seed), noise })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Bounded quality, plus-minus and shooting terms. Each is monotonic in
    /// its differential and saturates at its cap.
    pub fn adjustments(&self, home: &TeamSeasonStats, away: &TeamSeasonStats) -> Adjustments {
        let cfg = &self.config;
        let bounded = |diff: f64, scale: f64, cap: f64| (diff * scale).clamp(-cap, cap);
        Adjustments {
            quality: bounded(home.win_pct - away.win_pct, cfg.quality_scale, cfg.quality_cap),
            plus_minus: bounded(home.plus_minus - away.plus_minus, cfg.plus_minus_scale, cfg.plus_minus_cap),
            shooting: bounded(home.fg_pct - away.fg_pct, cfg.shooting_scale, cfg.shooting_cap),
        }
    }

    fn variance(&mut self) -> f64 {
        let cap = self.config.variance_cap;
        self.noise.sample(&mut self.rng).clamp(-cap, cap)
    }

    fn clamp_score(&self, raw: f64) -> f64 {
        raw.clamp(self.config.min_score, self.config.max_score)
    }

    /// Rejects out-of-domain stats with `InvalidSeasonStats` before drawing
    /// from the RNG.
    pub fn predict(&mut self, home: &TeamSeasonStats, away: &TeamSeasonStats) -> Result<ScorePrediction> {
        home.validate()?;
        away.validate()?;

        let adjustments = self.adjustments(home, away);
        let home_variance = self.variance();
        let away_variance = self.variance();

        let home_score = self.clamp_score(home.ppg + adjustments.total() + home_variance);
        let away_score = self.clamp_score(away.ppg - adjustments.total() + away_variance);
        let winner = if home_score > away_score { TeamSide::Home } else { TeamSide::Away };

        trace!(home = %home.name, away = %away.name, home_score, away_score, "score prediction");

        Ok(ScorePrediction {
            home_name: home.name.clone(),
            away_name: away.name.clone(),
            home_score,
            away_score,
            adjustments,
            home_variance,
            away_variance,
            total: home_score + away_score,
            margin: (home_score - away_score).abs(),
            winner,
            home_win_probability: home_win_probability(home_score - away_score, self.config.win_prob_slope),
        })
    }
}
