use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Season aggregates for one team, the only input of the score predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSeasonStats {
    pub name: String,
    /// Average points per game.
    pub ppg: f64,
    /// 0.0..=1.0
    pub win_pct: f64,
    /// Average per-game plus-minus.
    pub plus_minus: f64,
    /// 0.0..=1.0
    pub fg_pct: f64,
}

impl TeamSeasonStats {
    pub fn new(name: impl Into<String>, ppg: f64, win_pct: f64, plus_minus: f64, fg_pct: f64) -> Self {
        Self { name: name.into(), ppg, win_pct, plus_minus, fg_pct }
    }

    /// Builds per-game averages from season totals. `games == 0` yields zero
    /// averages, which `validate` still accepts.
    pub fn from_totals(
        name: impl Into<String>,
        games: u32,
        wins: u32,
        points: f64,
        plus_minus_total: f64,
        fg_pct: f64,
    ) -> Self {
        let (ppg, win_pct, plus_minus) = if games > 0 {
            let g = games as f64;
            (points / g, wins as f64 / g, plus_minus_total / g)
        } else {
            (0.0, 0.0, 0.0)
        };
        Self::new(name, ppg, win_pct, plus_minus, fg_pct)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(SimError::season_stats(self.name.clone(), reason));

        if !self.ppg.is_finite() || self.ppg < 0.0 {
            return fail(format!("ppg must be a non-negative number, got {}", self.ppg));
        }
        if !self.win_pct.is_finite() || !(0.0..=1.0).contains(&self.win_pct) {
            return fail(format!("win_pct must be within 0..=1, got {}", self.win_pct));
        }
        if !self.plus_minus.is_finite() {
            return fail(format!("plus_minus must be finite, got {}", self.plus_minus));
        }
        if !self.fg_pct.is_finite() || !(0.0..=1.0).contains(&self.fg_pct) {
            return fail(format!("fg_pct must be within 0..=1, got {}", self.fg_pct));
        }
        Ok(())
    }
}

/// Per-game averages of one player, consumed by the attribute mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerSeasonLine {
    pub points_per_game: f64,
    pub assists_per_game: f64,
    pub rebounds_per_game: f64,
    pub steals_per_game: f64,
    pub blocks_per_game: f64,
    pub minutes_per_game: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_typical_team() {
        let stats = TeamSeasonStats::new("Celtics", 118.5, 0.78, 11.2, 0.487);
        assert!(stats.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_ppg() {
        let stats = TeamSeasonStats::new("Broken", -1.0, 0.5, 0.0, 0.45);
        assert!(matches!(stats.validate(), Err(SimError::InvalidSeasonStats { .. })));
    }

    #[test]
    fn test_validate_rejects_percentages_out_of_range() {
        let stats = TeamSeasonStats::new("Broken", 110.0, 1.5, 0.0, 0.45);
        assert!(stats.validate().is_err());
        let stats = TeamSeasonStats::new("Broken", 110.0, 0.5, 0.0, 45.0);
        assert!(stats.validate().is_err());
        let stats = TeamSeasonStats::new("Broken", f64::NAN, 0.5, 0.0, 0.45);
        assert!(stats.validate().is_err());
    }

    #[test]
    fn test_from_totals_averages_per_game() {
        let stats = TeamSeasonStats::from_totals("Lakers", 82, 47, 9430.0, 41.0, 0.49);
        assert!((stats.ppg - 115.0).abs() < 1e-9);
        assert!((stats.win_pct - 47.0 / 82.0).abs() < 1e-9);
        assert!((stats.plus_minus - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_from_totals_with_no_games() {
        let stats = TeamSeasonStats::from_totals("Expansion", 0, 0, 0.0, 0.0, 0.0);
        assert_eq!(stats.ppg, 0.0);
        assert!(stats.validate().is_ok());
    }
}
