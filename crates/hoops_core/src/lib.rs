//! # hoops_core - Deterministic Basketball Game Simulation
//!
//! Possession-driven game engine plus a closed-form score predictor.
//!
//! ## Features
//! - Same rosters + same seed = byte-identical play-by-play
//! - Fatigue-aware possessions and position-based substitutions
//! - Full box score (splits by zone, rebounds, assists, steals, blocks)
//! - Season batches in parallel with reproducible per-game seeds
//! - JSON API for easy integration

// Engine APIs often take several collaborators at once
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod player;
pub mod prediction;
pub mod season;

pub use api::{predict_score_json, request_schema_json, simulate_game_json, simulate_season_json, SCHEMA_VERSION};
pub use engine::{simulate_game, EngineConfig, GamePhase, GameSimulator, GameState};
pub use error::{Result, SimError};
pub use models::{
    BoxScoreEntry, BoxScoreSnapshot, GameResult, PlayByPlay, PlayEvent, Player, PlayerSeasonLine,
    Position, PossessionOutcome, Ratings, Roster, ShotZone, TeamBoxScore, TeamSeasonStats, TeamSide,
};
pub use player::AttributeMapper;
pub use prediction::{PredictorConfig, ScorePrediction, ScorePredictor};
pub use season::{simulate_season, PlayerAverages, SeasonSummary, TeamRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
