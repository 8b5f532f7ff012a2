//! Batches of independent games between the same two rosters.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::config::EngineConfig;
use crate::engine::game_sim::simulate_game;
use crate::error::Result;
use crate::models::box_score::{BoxScoreEntry, TeamBoxScore};
use crate::models::game_result::GameResult;
use crate::models::player::Position;
use crate::models::team::{Roster, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_pct(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.games() as f64
        }
    }
}

/// Per-game averages over the games a player appeared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAverages {
    pub team: TeamSide,
    pub name: String,
    pub position: Option<Position>,
    pub games_played: u32,
    pub ppg: f64,
    pub apg: f64,
    pub rpg: f64,
    pub spg: f64,
    pub bpg: f64,
    pub fg_pct: Option<f64>,
    pub three_pct: Option<f64>,
    pub mpg: f64,
}

impl PlayerAverages {
    fn from_totals(team: TeamSide, totals: &BoxScoreEntry, games_played: u32) -> Self {
        let per_game = |value: u32| if games_played == 0 { 0.0 } else { value as f64 / games_played as f64 };
        Self {
            team,
            name: totals.name.clone(),
            position: totals.position,
            games_played,
            ppg: per_game(totals.points),
            apg: per_game(totals.assists),
            rpg: per_game(totals.rebounds()),
            spg: per_game(totals.steals),
            bpg: per_game(totals.blocks),
            fg_pct: totals.field_goals_total().pct(),
            three_pct: totals.three_pointers().pct(),
            mpg: per_game(totals.seconds_played) / 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    /// In game order; game `i` used seed `base_seed + i`.
    pub results: Vec<GameResult>,
    pub home_record: TeamRecord,
    pub away_record: TeamRecord,
    pub player_averages: Vec<PlayerAverages>,
}

/// Runs `games` independent games in parallel. Each game owns its own
/// simulator and RNG, so the summary does not depend on thread count.
pub fn simulate_season(
    home: &Roster,
    away: &Roster,
    games: u32,
    base_seed: u64,
    config: &EngineConfig,
) -> Result<SeasonSummary> {
    config.validate()?;
    home.validate()?;
    away.validate()?;

    let results: Vec<GameResult> = (0..games)
        .into_par_iter()
        .map(|i| simulate_game(home.clone(), away.clone(), base_seed.wrapping_add(i as u64), config))
        .collect::<Result<_>>()?;

    let mut home_record = TeamRecord::default();
    let mut away_record = TeamRecord::default();
    for result in &results {
        if result.home_score > result.away_score {
            home_record.wins += 1;
            away_record.losses += 1;
        } else {
            away_record.wins += 1;
            home_record.losses += 1;
        }
    }

    let mut player_averages = averages(TeamSide::Home, results.iter().map(|r| &r.box_score.home));
    player_averages.extend(averages(TeamSide::Away, results.iter().map(|r| &r.box_score.away)));

    info!(
        home = %home.name,
        away = %away.name,
        games,
        home_wins = home_record.wins,
        away_wins = away_record.wins,
        "season complete"
    );

    Ok(SeasonSummary { results, home_record, away_record, player_averages })
}

fn averages<'a>(side: TeamSide, games: impl Iterator<Item = &'a TeamBoxScore>) -> Vec<PlayerAverages> {
    let mut totals: Vec<(BoxScoreEntry, u32)> = Vec::new();
    for team in games {
        if totals.is_empty() {
            totals = team
                .players
                .iter()
                .map(|p| (BoxScoreEntry { name: p.name.clone(), position: p.position, ..Default::default() }, 0))
                .collect();
        }
        for ((total, played), entry) in totals.iter_mut().zip(&team.players) {
            total.merge(entry);
            if entry.played() {
                *played += 1;
            }
        }
    }
    totals.iter().map(|(total, played)| PlayerAverages::from_totals(side, total, *played)).collect()
}
