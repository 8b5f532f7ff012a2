//! Per-game statistics -> 0-100 ratings.
//!
//! The simulator consumes ratings only. This mapper is the reference
//! conversion for callers that hold box-score averages; a missing line maps to
//! the position defaults.

use super::position_profile::position_profile;
use crate::models::player::{Player, Position, Ratings};
use crate::models::season_stats::PlayerSeasonLine;

pub struct AttributeMapper;

fn rating(value: f64, floor: u8) -> u8 {
    if !value.is_finite() {
        return floor;
    }
    (value as i32).clamp(floor as i32, 100) as u8
}

impl AttributeMapper {
    pub fn map(line: Option<&PlayerSeasonLine>, position: Position) -> Ratings {
        let Some(line) = line else {
            return Ratings::position_default(position);
        };
        let profile = position_profile(position);

        let ppg = line.points_per_game.max(0.0);
        let apg = line.assists_per_game.max(0.0);
        let rpg = line.rebounds_per_game.max(0.0);
        let spg = line.steals_per_game.max(0.0);
        let bpg = line.blocks_per_game.max(0.0);

        let fg_pct = line.fg_pct.clamp(0.30, 0.70);
        let fg3_pct = line.fg3_pct.clamp(0.20, 0.50);
        let ft_pct = line.ft_pct.clamp(0.50, 0.95);

        let shooting_base = (fg_pct * 150.0).trunc();
        let scoring_factor = (ppg / 15.0).min(2.0);

        let close_floor = 40.max(profile.layup_base.saturating_sub(10));
        Ratings {
            close_range: rating(shooting_base * 1.2 * scoring_factor, close_floor),
            mid_range: rating(shooting_base * scoring_factor, 40),
            long_range: rating(fg3_pct * 200.0, 0),
            free_throw: rating(ft_pct * 120.0, 0),
            passing: rating(apg * profile.passing_multiplier, profile.min_passing),
            rebounding: rating(rpg * profile.rebound_multiplier, 30),
            blocking: rating(bpg * 60.0, 20),
            stealing: rating(spg * 50.0, 30),
            dribbling: rating(
                profile.base_dribbling as f64 + (apg * 4.0).trunc(),
                profile.min_dribbling,
            ),
            defense: rating(50.0 + ((spg + bpg) * 15.0).trunc(), 40),
        }
    }

    /// Maximum stamina from minutes per game (clamped to 10..=40 first).
    pub fn stamina(line: Option<&PlayerSeasonLine>, position: Position) -> u8 {
        match line {
            Some(line) => {
                let mpg = line.minutes_per_game.clamp(10.0, 40.0);
                rating(mpg * 2.5, 50)
            }
            None => position_profile(position).default_stamina,
        }
    }

    pub fn player(name: impl Into<String>, position: Position, line: Option<&PlayerSeasonLine>) -> Player {
        Player::new(name, position, Self::map(line, position), Self::stamina(line, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PlayerSeasonLine {
        PlayerSeasonLine {
            points_per_game: 15.0,
            assists_per_game: 5.0,
            rebounds_per_game: 4.0,
            steals_per_game: 1.0,
            blocks_per_game: 0.5,
            minutes_per_game: 30.0,
            fg_pct: 0.45,
            fg3_pct: 0.35,
            ft_pct: 0.75,
        }
    }

    #[test]
    fn test_missing_line_uses_defaults() {
        let ratings = AttributeMapper::map(None, Position::C);
        assert_eq!(ratings, Ratings::position_default(Position::C));
        assert_eq!(AttributeMapper::stamina(None, Position::C), 75);
    }

    #[test]
    fn test_reference_conversion() {
        let ratings = AttributeMapper::map(Some(&line()), Position::PG);
        // 0.45 FG% -> 67 base, scoring factor 1.0
        assert_eq!(ratings.mid_range, 67);
        assert_eq!(ratings.close_range, 80);
        assert_eq!(ratings.long_range, 70);
        assert_eq!(ratings.free_throw, 90);
        // 5 apg * 15 = 75
        assert_eq!(ratings.passing, 75);
        // 4 rpg * 8 = 32
        assert_eq!(ratings.rebounding, 32);
        assert_eq!(ratings.stealing, 50);
        assert_eq!(ratings.blocking, 30);
        assert_eq!(AttributeMapper::stamina(Some(&line()), Position::PG), 75);
    }

    #[test]
    fn test_extreme_lines_stay_in_range() {
        let monster = PlayerSeasonLine {
            points_per_game: 60.0,
            assists_per_game: 20.0,
            rebounds_per_game: 25.0,
            steals_per_game: 5.0,
            blocks_per_game: 6.0,
            minutes_per_game: 48.0,
            fg_pct: 0.9,
            fg3_pct: 0.9,
            ft_pct: 1.0,
        };
        for position in Position::ALL {
            let ratings = AttributeMapper::map(Some(&monster), position);
            assert!(ratings.first_out_of_range().is_none());
        }
    }

    #[test]
    fn test_shooting_percentage_is_clamped() {
        let mut cold = line();
        cold.fg_pct = 0.05;
        let ratings = AttributeMapper::map(Some(&cold), Position::SF);
        // clamped to 0.30 -> base 45
        assert_eq!(ratings.mid_range, 45);
    }
}
