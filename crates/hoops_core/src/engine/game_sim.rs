//! Quarter and possession loop.
//!
//! One `GameSimulator` owns everything a game mutates: both rosters (for
//! stamina), both lineups, the box score and a ChaCha8 RNG seeded from the
//! caller's seed. Nothing is shared between instances, so games can run on
//! different threads.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::box_score::BoxScoreAccumulator;
use super::config::EngineConfig;
use super::fatigue::{Exertion, FatigueModel};
use super::game_phase::{after_period, GamePhase, PeriodTransition};
use super::lineup::Lineup;
use super::possession::{CourtView, PossessionResolver};
use super::substitutions::SubstitutionScheduler;
use crate::error::{Result, SimError};
use crate::models::box_score::BoxScoreSnapshot;
use crate::models::events::{PlayEvent, PossessionOutcome};
use crate::models::game_result::GameResult;
use crate::models::team::{Roster, TeamSide};

/// Clock, score and possession at a point in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// 1-based; overtimes follow the regulation periods.
    pub period: u8,
    pub clock_remaining: u32,
    pub possession: TeamSide,
    pub score_home: u32,
    pub score_away: u32,
}

impl GameState {
    fn pregame() -> Self {
        Self {
            phase: GamePhase::PreGame,
            period: 0,
            clock_remaining: 0,
            possession: TeamSide::Home,
            score_home: 0,
            score_away: 0,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.score_home,
            TeamSide::Away => self.score_away,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.score_home == self.score_away
    }
}

pub struct GameSimulator {
    config: EngineConfig,
    seed: u64,
    rng: ChaCha8Rng,
    rosters: [Roster; 2],
    lineups: [Lineup; 2],
    fatigue: FatigueModel,
    resolver: PossessionResolver,
    scheduler: SubstitutionScheduler,
    box_score: BoxScoreAccumulator,
    state: GameState,
    events: Vec<PlayEvent>,
    possessions_in_period: u32,
    /// The previous possession ended in a steal, so this one is a fast break.
    transition: bool,
    opening_tip: TeamSide,
}

impl GameSimulator {
    pub fn new(home: Roster, away: Roster, seed: u64) -> Result<Self> {
        Self::with_config(home, away, seed, EngineConfig::default())
    }

    /// Fails with `InvalidRoster` or `InvalidConfig` before any possession
    /// runs.
    pub fn with_config(mut home: Roster, mut away: Roster, seed: u64, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let lineups = [Lineup::starting(&home)?, Lineup::starting(&away)?];
        for player in home.players_mut().iter_mut().chain(away.players_mut().iter_mut()) {
            player.restore_full_stamina();
        }

        let fatigue = FatigueModel::new(config.stamina.clone());
        let resolver = PossessionResolver::new(config.possession.clone(), fatigue.clone());
        let scheduler = SubstitutionScheduler::new(config.substitution.clone());
        let box_score = BoxScoreAccumulator::new(&home, &away);

        Ok(Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            rosters: [home, away],
            lineups,
            fatigue,
            resolver,
            scheduler,
            box_score,
            state: GameState::pregame(),
            events: Vec::new(),
            possessions_in_period: 0,
            transition: false,
            opening_tip: TeamSide::Home,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn roster(&self, side: TeamSide) -> &Roster {
        &self.rosters[side.index()]
    }

    pub fn lineup(&self, side: TeamSide) -> &Lineup {
        &self.lineups[side.index()]
    }

    pub fn box_score(&self) -> BoxScoreSnapshot {
        self.box_score.snapshot()
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    /// Advances by one possession or one phase transition and returns the
    /// new phase. A no-op once the game is over.
    pub fn step(&mut self) -> Result<GamePhase> {
        match self.state.phase {
            GamePhase::PreGame => {
                info!(
                    home = %self.rosters[0].name,
                    away = %self.rosters[1].name,
                    seed = self.seed,
                    "game start"
                );
                self.opening_tip = self.jump_ball();
                self.start_period(1)?;
            }
            GamePhase::QuarterInProgress => self.play_possession()?,
            GamePhase::QuarterEnd => {
                let transition =
                    after_period(self.state.period, self.config.rules.periods, self.state.is_tied());
                debug!(
                    period = self.state.period,
                    home = self.state.score_home,
                    away = self.state.score_away,
                    ?transition,
                    "period end"
                );
                match transition {
                    PeriodTransition::NextQuarter | PeriodTransition::Overtime => {
                        let next = self.state.period.checked_add(1).ok_or_else(|| {
                            SimError::InvalidConfig(format!(
                                "period counter exhausted after {} periods",
                                self.state.period
                            ))
                        })?;
                        self.start_period(next)?;
                    }
                    PeriodTransition::GameOver => {
                        self.state.phase = GamePhase::GameOver;
                        info!(
                            home = self.state.score_home,
                            away = self.state.score_away,
                            periods = self.state.period,
                            possessions = self.events.len(),
                            "game over"
                        );
                    }
                }
            }
            GamePhase::GameOver => {}
        }
        Ok(self.state.phase)
    }

    /// Runs to `GameOver` and freezes the result.
    pub fn finish(mut self) -> Result<GameResult> {
        while !self.state.phase.is_terminal() {
            self.step()?;
        }
        Ok(GameResult::new(
            self.seed,
            self.config.rules.periods,
            self.state.period,
            self.box_score.snapshot(),
            self.events,
        ))
    }

    fn jump_ball(&mut self) -> TeamSide {
        if self.rng.gen_bool(0.5) {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    fn start_period(&mut self, period: u8) -> Result<()> {
        let regulation = self.config.rules.periods;
        self.state.possession = if period > regulation {
            self.jump_ball()
        } else if period % 2 == 1 {
            self.opening_tip
        } else {
            self.opening_tip.opponent()
        };

        if period > 1 {
            for roster in &mut self.rosters {
                for player in roster.players_mut() {
                    self.fatigue.period_break(player);
                }
            }
            self.run_checkpoint()?;
        }

        self.state.period = period;
        self.state.clock_remaining = self.config.rules.period_length(period);
        self.state.phase = GamePhase::QuarterInProgress;
        self.possessions_in_period = 0;
        self.transition = false;
        debug!(period, possession = %self.state.possession, "period start");
        Ok(())
    }

    fn possession_duration(&mut self) -> u32 {
        let cfg = &self.config.possession;
        let (lo, hi) = if self.transition {
            (cfg.min_duration_secs.min(cfg.fast_break_max_secs), cfg.fast_break_max_secs)
        } else {
            (cfg.min_duration_secs, cfg.max_duration_secs)
        };
        self.rng.gen_range(lo..=hi)
    }

    fn play_possession(&mut self) -> Result<()> {
        let offense = self.state.possession;
        let defense = offense.opponent();
        let planned = self.possession_duration();

        let outcome = {
            let offense_view = CourtView {
                side: offense,
                roster: self.rosters[offense.index()].players(),
                lineup: &self.lineups[offense.index()],
            };
            let defense_view = CourtView {
                side: defense,
                roster: self.rosters[defense.index()].players(),
                lineup: &self.lineups[defense.index()],
            };
            self.resolver.resolve(offense_view, defense_view, &mut self.rng)
        };

        let duration = planned.min(self.state.clock_remaining);
        self.state.clock_remaining -= duration;

        let exertion = if self.transition {
            Exertion::FastBreak
        } else if matches!(outcome, PossessionOutcome::MissedShot { .. }) {
            Exertion::Rebounding
        } else {
            Exertion::HalfCourt
        };
        self.apply_fatigue(exertion, duration);

        self.box_score.record(&outcome);
        self.state.score_home = self.box_score.points(TeamSide::Home);
        self.state.score_away = self.box_score.points(TeamSide::Away);

        let event = PlayEvent {
            period: self.state.period,
            clock_remaining: self.state.clock_remaining,
            duration,
            outcome,
            score_home: self.state.score_home,
            score_away: self.state.score_away,
        };
        trace!(?event, "possession");
        self.events.push(event);

        self.state.possession = outcome.next_possession();
        self.transition = outcome.is_live_ball_turnover();
        self.possessions_in_period += 1;

        if self.state.clock_remaining == 0 {
            self.state.phase = GamePhase::QuarterEnd;
        } else if self.scheduler.is_checkpoint(self.possessions_in_period) {
            self.run_checkpoint()?;
        }
        Ok(())
    }

    /// Both teams' on-court players tire and get credited with the seconds;
    /// everyone on the bench recovers.
    fn apply_fatigue(&mut self, exertion: Exertion, seconds: u32) {
        for side in [TeamSide::Home, TeamSide::Away] {
            let lineup = &self.lineups[side.index()];
            let players = self.rosters[side.index()].players_mut();
            for (index, player) in players.iter_mut().enumerate() {
                if lineup.contains(index) {
                    self.fatigue.tick(player, 1, exertion);
                } else {
                    self.fatigue.rest(player, 1);
                }
            }
            self.box_score.add_seconds(side, lineup.slots(), seconds);
        }
    }

    fn run_checkpoint(&mut self) -> Result<()> {
        for side in [TeamSide::Home, TeamSide::Away] {
            let roster = &self.rosters[side.index()];
            let report = self.scheduler.run_checkpoint(&roster.name, roster.players(), &mut self.lineups[side.index()])?;
            self.box_score
                .note_substitutions(side, report.substitutions.len() as u32, report.degenerate);
        }
        Ok(())
    }
}

/// Simulates one full game with the given configuration.
pub fn simulate_game(home: Roster, away: Roster, seed: u64, config: &EngineConfig) -> Result<GameResult> {
    GameSimulator::with_config(home, away, seed, config.clone())?.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Player, Position};

    fn roster(name: &str, size: usize) -> Roster {
        let players = (0..size)
            .map(|i| Player::with_position_defaults(format!("{name} {i}"), Position::ALL[i % 5]))
            .collect();
        Roster::new(name, players).unwrap()
    }

    #[test]
    fn test_pregame_state() {
        let sim = GameSimulator::new(roster("H", 8), roster("A", 8), 1).unwrap();
        assert_eq!(sim.state().phase, GamePhase::PreGame);
        assert_eq!(sim.state().score_home, 0);
        assert_eq!(sim.lineup(TeamSide::Home).slots(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_first_step_starts_first_quarter() {
        let mut sim = GameSimulator::new(roster("H", 8), roster("A", 8), 1).unwrap();
        assert_eq!(sim.step().unwrap(), GamePhase::QuarterInProgress);
        assert_eq!(sim.state().period, 1);
        assert_eq!(sim.state().clock_remaining, 720);
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_game_reaches_game_over_with_matching_totals() {
        let result = simulate_game(roster("H", 8), roster("A", 8), 42, &EngineConfig::default()).unwrap();
        assert!(result.periods_played >= 4);
        assert_ne!(result.home_score, result.away_score);
        assert_eq!(result.home_score, result.box_score.home.points());
        assert_eq!(result.away_score, result.box_score.away.points());
        assert!(result.home_score > 40 && result.away_score > 40);
    }

    #[test]
    fn test_step_is_noop_after_game_over() {
        let mut sim = GameSimulator::new(roster("H", 6), roster("A", 6), 3).unwrap();
        while sim.step().unwrap() != GamePhase::GameOver {}
        let before = sim.state().clone();
        assert_eq!(sim.step().unwrap(), GamePhase::GameOver);
        assert_eq!(sim.state(), &before);
    }

    #[test]
    fn test_deterministic_clock_fixes_possession_count() {
        let config = EngineConfig::deterministic_clock();
        let a = simulate_game(roster("H", 8), roster("A", 8), 1, &config).unwrap();
        let b = simulate_game(roster("H", 8), roster("A", 8), 2, &config).unwrap();
        let regulation = |r: &GameResult| r.events().iter().filter(|e| e.period <= 4).count();
        assert_eq!(regulation(&a), 4 * 48);
        assert_eq!(regulation(&a), regulation(&b));
    }

    #[test]
    fn test_invalid_config_rejected_before_play() {
        let mut config = EngineConfig::default();
        config.rules.period_secs = 0;
        assert!(GameSimulator::with_config(roster("H", 8), roster("A", 8), 1, config).is_err());
    }

    #[test]
    fn test_short_roster_rejected() {
        let players = (0..4).map(|i| Player::with_position_defaults(format!("P{i}"), Position::PG)).collect();
        assert!(Roster::new("Short", players).is_err());
    }

    #[test]
    fn test_seconds_played_sum_to_game_length() {
        let result = simulate_game(roster("H", 8), roster("A", 8), 7, &EngineConfig::default()).unwrap();
        let game_secs = 4 * 720 + result.overtime_periods() as u32 * 300;
        let home_secs: u32 = result.box_score.home.players.iter().map(|p| p.seconds_played).sum();
        assert_eq!(home_secs, 5 * game_secs);
    }
}
