//! Possession-driven game engine.
//!
//! `GameSimulator` drives the quarter/possession loop. Each possession reads
//! fatigue-adjusted ratings through `FatigueModel`, gets its outcome from
//! `PossessionResolver`, is recorded once by `BoxScoreAccumulator`, and
//! every few possessions `SubstitutionScheduler` rotates tired players out.

pub mod box_score;
pub mod config;
pub mod fatigue;
pub mod game_phase;
pub mod game_sim;
pub mod lineup;
pub mod possession;
pub mod probability;
pub mod substitutions;

pub use box_score::BoxScoreAccumulator;
pub use config::{EngineConfig, PossessionConfig, RulesConfig, StaminaConfig, SubstitutionConfig};
pub use fatigue::{Exertion, FatigueModel};
pub use game_phase::{after_period, GamePhase, PeriodTransition};
pub use game_sim::{simulate_game, GameSimulator, GameState};
pub use lineup::Lineup;
pub use possession::{CourtView, PossessionResolver};
pub use substitutions::{CheckpointReport, Substitution, SubstitutionScheduler};
