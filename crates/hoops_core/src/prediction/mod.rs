//! Closed-form final-score prediction from season aggregates.
//!
//! `score = ppg + quality + plus_minus + shooting + variance`, each term
//! bounded, the sum saturated to the configured score range. Independent of
//! the game engine.

pub mod config;
pub mod evaluation;
pub mod predictor;
pub mod win_prob;

pub use config::PredictorConfig;
pub use evaluation::{all_matchups, backtest, evaluate, BacktestReport, EvaluationRecord, EvaluationSummary};
pub use predictor::{Adjustments, ScorePrediction, ScorePredictor};
pub use win_prob::home_win_probability;
