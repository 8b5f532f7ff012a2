//! Predictor validation against observed (or estimated) outcomes.

use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config::PredictorConfig;
use super::predictor::ScorePredictor;
use crate::error::{Result, SimError};
use crate::models::season_stats::TeamSeasonStats;

/// Offset between the prediction seed and the seed of the reference
/// estimate in a backtest.
const REFERENCE_SEED_OFFSET: u64 = 9_999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub home_name: String,
    pub away_name: String,
    pub predicted_home: f64,
    pub predicted_away: f64,
    pub actual_home: f64,
    pub actual_away: f64,
}

impl EvaluationRecord {
    pub fn predicted_total(&self) -> f64 {
        self.predicted_home + self.predicted_away
    }

    pub fn actual_total(&self) -> f64 {
        self.actual_home + self.actual_away
    }

    pub fn total_error(&self) -> f64 {
        (self.predicted_total() - self.actual_total()).abs()
    }

    pub fn margin_error(&self) -> f64 {
        ((self.predicted_home - self.predicted_away).abs() - (self.actual_home - self.actual_away).abs()).abs()
    }

    /// Home wins only on a strictly higher score on both sides.
    pub fn winner_correct(&self) -> bool {
        (self.predicted_home > self.predicted_away) == (self.actual_home > self.actual_away)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub games: usize,
    pub correct_winners: usize,
    pub winner_accuracy: f64,
    pub mean_total_error: f64,
    pub median_total_error: f64,
    pub mean_margin_error: f64,
    /// Pearson correlation of predicted and actual totals. `None` when
    /// either side has no spread.
    pub total_correlation: Option<f64>,
    /// Mean of predicted minus actual total.
    pub mean_bias: f64,
}

/// `None` for an empty slice.
pub fn evaluate(records: &[EvaluationRecord]) -> Option<EvaluationSummary> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let correct_winners = records.iter().filter(|r| r.winner_correct()).count();

    let mut errors: Vec<f64> = records.iter().map(EvaluationRecord::total_error).collect();
    let mean_total_error = errors.iter().sum::<f64>() / n;
    errors.sort_by(f64::total_cmp);
    let mid = errors.len() / 2;
    let median_total_error = if errors.len() % 2 == 0 { (errors[mid - 1] + errors[mid]) / 2.0 } else { errors[mid] };

    let predicted: Vec<f64> = records.iter().map(EvaluationRecord::predicted_total).collect();
    let actual: Vec<f64> = records.iter().map(EvaluationRecord::actual_total).collect();

    Some(EvaluationSummary {
        games: records.len(),
        correct_winners,
        winner_accuracy: correct_winners as f64 / n,
        mean_total_error,
        median_total_error,
        mean_margin_error: records.iter().map(EvaluationRecord::margin_error).sum::<f64>() / n,
        total_correlation: pearson(&predicted, &actual),
        mean_bias: predicted.iter().zip(&actual).map(|(p, a)| p - a).sum::<f64>() / n,
    })
}

fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub records: Vec<EvaluationRecord>,
    pub summary: Option<EvaluationSummary>,
}

/// Every unordered pairing of `teams` teams, lower index at home.
pub fn all_matchups(teams: usize) -> Vec<(usize, usize)> {
    (0..teams).flat_map(|i| (i + 1..teams).map(move |j| (i, j))).collect()
}

/// Predicts each matchup from `prior` season stats and compares it with the
/// estimate from `current` season stats. Both slices are indexed by team.
/// `sample_size` picks that many matchups at random (seeded); `None` uses
/// all of them.
pub fn backtest(
    prior: &[TeamSeasonStats],
    current: &[TeamSeasonStats],
    sample_size: Option<usize>,
    seed: u64,
    config: &PredictorConfig,
) -> Result<BacktestReport> {
    if prior.len() != current.len() {
        return Err(SimError::season_stats(
            "backtest",
            format!("prior has {} teams, current has {}", prior.len(), current.len()),
        ));
    }
    for stats in prior.iter().chain(current) {
        stats.validate()?;
    }

    let mut matchups = all_matchups(prior.len());
    if let Some(size) = sample_size {
        let size = size.min(matchups.len());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        matchups = sample(&mut rng, matchups.len(), size).into_iter().map(|i| matchups[i]).collect();
    }

    let mut predictor = ScorePredictor::with_config(seed, config.clone())?;
    let mut reference = ScorePredictor::with_config(seed.wrapping_add(REFERENCE_SEED_OFFSET), config.clone())?;

    let mut records = Vec::with_capacity(matchups.len());
    for (home, away) in matchups {
        let predicted = predictor.predict(&prior[home], &prior[away])?;
        let actual = reference.predict(&current[home], &current[away])?;
        records.push(EvaluationRecord {
            home_name: current[home].name.clone(),
            away_name: current[away].name.clone(),
            predicted_home: predicted.home_score,
            predicted_away: predicted.away_score,
            actual_home: actual.home_score,
            actual_away: actual.away_score,
        });
    }

    let summary = evaluate(&records);
    Ok(BacktestReport { records, summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ph: f64, pa: f64, ah: f64, aa: f64) -> EvaluationRecord {
        EvaluationRecord {
            home_name: "H".into(),
            away_name: "A".into(),
            predicted_home: ph,
            predicted_away: pa,
            actual_home: ah,
            actual_away: aa,
        }
    }

    #[test]
    fn test_evaluate_empty() {
        assert!(evaluate(&[]).is_none());
    }

    #[test]
    fn test_evaluate_metrics() {
        let records = vec![
            record(110.0, 100.0, 112.0, 104.0),
            record(105.0, 108.0, 110.0, 100.0),
            record(120.0, 115.0, 118.0, 109.0),
        ];
        let summary = evaluate(&records).unwrap();
        assert_eq!(summary.games, 3);
        assert_eq!(summary.correct_winners, 2);
        assert!((summary.winner_accuracy - 2.0 / 3.0).abs() < 1e-12);
        // total errors: 6, 3, 8
        assert!((summary.mean_total_error - 17.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.median_total_error, 6.0);
        assert!((summary.mean_bias - (-6.0 + 3.0 + 8.0) / 3.0).abs() < 1e-12);
        assert!(summary.total_correlation.is_some());
    }

    #[test]
    fn test_correlation_needs_spread() {
        let records = vec![record(100.0, 100.0, 110.0, 100.0), record(100.0, 100.0, 120.0, 100.0)];
        assert!(evaluate(&records).unwrap().total_correlation.is_none());
    }

    #[test]
    fn test_all_matchups() {
        assert_eq!(all_matchups(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert!(all_matchups(1).is_empty());
    }

    fn league() -> Vec<TeamSeasonStats> {
        vec![
            TeamSeasonStats::new("BOS", 120.6, 0.74, 11.3, 0.475),
            TeamSeasonStats::new("DEN", 114.9, 0.70, 5.3, 0.496),
            TeamSeasonStats::new("DET", 109.9, 0.17, -8.9, 0.467),
            TeamSeasonStats::new("OKC", 120.1, 0.70, 7.4, 0.499),
        ]
    }

    #[test]
    fn test_backtest_is_reproducible() {
        let prior = league();
        let current = league();
        let a = backtest(&prior, &current, Some(4), 42, &PredictorConfig::default()).unwrap();
        let b = backtest(&prior, &current, Some(4), 42, &PredictorConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.records.len(), 4);
        assert_eq!(a.summary.unwrap().games, 4);
    }

    #[test]
    fn test_backtest_without_variance_is_exact_on_same_season() {
        let stats = league();
        let report = backtest(&stats, &stats, None, 1, &PredictorConfig::without_variance()).unwrap();
        let summary = report.summary.unwrap();
        assert_eq!(summary.games, 6);
        assert_eq!(summary.mean_total_error, 0.0);
        assert_eq!(summary.winner_accuracy, 1.0);
    }

    #[test]
    fn test_backtest_rejects_mismatched_seasons() {
        let prior = league();
        let current = &league()[..3];
        assert!(backtest(&prior, current, None, 1, &PredictorConfig::default()).is_err());
    }
}
