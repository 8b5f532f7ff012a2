//! Per-position coefficients and fallback ratings.
//!
//! Everything position-specific that the attribute mapper needs lives in one
//! table so that no caller branches on position to scale a rating.

use crate::models::player::{Position, PositionTable, Ratings};

/// Scaling coefficients and fallback ratings for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionProfile {
    /// Assists per game -> passing rating.
    pub passing_multiplier: f64,
    pub min_passing: u8,
    pub base_dribbling: u8,
    pub min_dribbling: u8,
    /// Rebounds per game -> rebounding rating.
    pub rebound_multiplier: f64,
    /// Floor of the close-range rating for high-volume scorers.
    pub layup_base: u8,
    /// Ratings used when no statistics are available.
    pub default_ratings: Ratings,
    pub default_stamina: u8,
}

const fn ratings(
    close_range: u8,
    mid_range: u8,
    long_range: u8,
    free_throw: u8,
    passing: u8,
    rebounding: u8,
    blocking: u8,
    stealing: u8,
    dribbling: u8,
    defense: u8,
) -> Ratings {
    Ratings {
        close_range,
        mid_range,
        long_range,
        free_throw,
        passing,
        rebounding,
        blocking,
        stealing,
        dribbling,
        defense,
    }
}

pub const POSITION_PROFILES: PositionTable<PositionProfile> = PositionTable::new(
    PositionProfile {
        passing_multiplier: 15.0,
        min_passing: 60,
        base_dribbling: 65,
        min_dribbling: 55,
        rebound_multiplier: 8.0,
        layup_base: 50,
        default_ratings: ratings(65, 70, 75, 80, 85, 45, 30, 70, 80, 65),
        default_stamina: 75,
    },
    PositionProfile {
        passing_multiplier: 12.0,
        min_passing: 45,
        base_dribbling: 60,
        min_dribbling: 50,
        rebound_multiplier: 10.0,
        layup_base: 55,
        default_ratings: ratings(70, 75, 80, 82, 65, 50, 35, 65, 75, 70),
        default_stamina: 75,
    },
    PositionProfile {
        passing_multiplier: 10.0,
        min_passing: 50,
        base_dribbling: 55,
        min_dribbling: 45,
        rebound_multiplier: 12.0,
        layup_base: 60,
        default_ratings: ratings(72, 70, 75, 78, 70, 65, 45, 60, 70, 72),
        default_stamina: 80,
    },
    PositionProfile {
        passing_multiplier: 8.0,
        min_passing: 40,
        base_dribbling: 45,
        min_dribbling: 35,
        rebound_multiplier: 15.0,
        layup_base: 65,
        default_ratings: ratings(75, 65, 60, 75, 55, 80, 65, 50, 60, 75),
        default_stamina: 80,
    },
    PositionProfile {
        passing_multiplier: 6.0,
        min_passing: 35,
        base_dribbling: 40,
        min_dribbling: 30,
        rebound_multiplier: 18.0,
        layup_base: 70,
        default_ratings: ratings(80, 55, 45, 70, 45, 85, 80, 45, 50, 80),
        default_stamina: 75,
    },
);

pub fn position_profile(position: Position) -> PositionProfile {
    POSITION_PROFILES.get(position)
}

impl Ratings {
    pub fn position_default(position: Position) -> Ratings {
        position_profile(position).default_ratings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        for position in Position::ALL {
            let profile = position_profile(position);
            assert!(profile.default_ratings.first_out_of_range().is_none());
            assert!(profile.default_stamina > 0 && profile.default_stamina <= 100);
        }
    }

    #[test]
    fn test_bigs_out_rebound_guards_by_default() {
        let pg = Ratings::position_default(Position::PG);
        let c = Ratings::position_default(Position::C);
        assert!(c.rebounding > pg.rebounding);
        assert!(c.blocking > pg.blocking);
        assert!(pg.passing > c.passing);
        assert!(pg.long_range > c.long_range);
    }

    #[test]
    fn test_passing_multiplier_decreases_with_size() {
        let multipliers: Vec<f64> =
            Position::ALL.iter().map(|p| position_profile(*p).passing_multiplier).collect();
        assert!(multipliers.windows(2).all(|w| w[0] > w[1]));
    }
}
