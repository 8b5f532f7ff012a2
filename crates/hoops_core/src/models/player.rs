use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of every rating and of stamina.
pub const RATING_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] =
        [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    /// Classic 1-5 numbering (1 = point guard, 5 = center).
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Position::PG),
            2 => Some(Position::SG),
            3 => Some(Position::SF),
            4 => Some(Position::PF),
            5 => Some(Position::C),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Position::PG => 1,
            Position::SG => 2,
            Position::SF => 3,
            Position::PF => 4,
            Position::C => 5,
        }
    }

    pub fn is_guard(self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_big(self) -> bool {
        matches!(self, Position::PF | Position::C)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    /// Accepts short codes, long names, league roster codes ("G-F", "F-C")
    /// and hyphenated dual positions, where the first listed one wins.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let position = match trimmed {
            "F-C" | "C-F" => Some(Position::PF),
            "G-F" => Some(Position::SG),
            _ => None,
        };
        if let Some(position) = position {
            return Ok(position);
        }

        let primary = trimmed.split('-').next().unwrap_or(trimmed).trim();
        match primary.to_ascii_uppercase().as_str() {
            "PG" | "POINT GUARD" | "1" => Ok(Position::PG),
            "SG" | "SHOOTING GUARD" | "GUARD" | "G" | "2" => Ok(Position::SG),
            "SF" | "SMALL FORWARD" | "FORWARD" | "F" | "3" => Ok(Position::SF),
            "PF" | "POWER FORWARD" | "4" => Ok(Position::PF),
            "C" | "CENTER" | "CENTRE" | "5" => Ok(Position::C),
            _ => Err(format!("unknown position '{trimmed}'")),
        }
    }
}

/// One value per position. Used for every position-keyed tunable so the
/// per-position numbers live in data rather than in branches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PositionTable<T> {
    pub pg: T,
    pub sg: T,
    pub sf: T,
    pub pf: T,
    pub c: T,
}

impl<T: Copy> PositionTable<T> {
    pub const fn new(pg: T, sg: T, sf: T, pf: T, c: T) -> Self {
        Self { pg, sg, sf, pf, c }
    }

    pub const fn uniform(value: T) -> Self {
        Self { pg: value, sg: value, sf: value, pf: value, c: value }
    }

    pub fn get(&self, position: Position) -> T {
        match position {
            Position::PG => self.pg,
            Position::SG => self.sg,
            Position::SF => self.sf,
            Position::PF => self.pf,
            Position::C => self.c,
        }
    }
}

/// Ability ratings on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Ratings {
    pub close_range: u8,
    pub mid_range: u8,
    pub long_range: u8,
    pub free_throw: u8,
    pub passing: u8,
    pub rebounding: u8,
    pub blocking: u8,
    pub stealing: u8,
    /// Ball security. Low dribbling means more turnovers.
    #[serde(default = "default_secondary")]
    pub dribbling: u8,
    /// On-ball defense, feeds the contest rating.
    #[serde(default = "default_secondary")]
    pub defense: u8,
}

fn default_secondary() -> u8 {
    60
}

impl Ratings {
    fn fields(&self) -> [(&'static str, u8); 10] {
        [
            ("close_range", self.close_range),
            ("mid_range", self.mid_range),
            ("long_range", self.long_range),
            ("free_throw", self.free_throw),
            ("passing", self.passing),
            ("rebounding", self.rebounding),
            ("blocking", self.blocking),
            ("stealing", self.stealing),
            ("dribbling", self.dribbling),
            ("defense", self.defense),
        ]
    }

    /// Returns the first rating above 100, if any.
    pub fn first_out_of_range(&self) -> Option<(&'static str, u8)> {
        self.fields().into_iter().find(|(_, value)| *value > RATING_MAX)
    }

    pub fn shooting_average(&self) -> f32 {
        (self.close_range as f32 + self.mid_range as f32 + self.long_range as f32) / 3.0
    }

    pub fn overall(&self) -> u8 {
        let sum: u32 = self.fields().iter().map(|(_, v)| *v as u32).sum();
        (sum / 10) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub ratings: Ratings,
    /// Current stamina, 0..=max_stamina.
    stamina: f32,
    /// Fixed at creation.
    max_stamina: f32,
}

impl Player {
    /// A fresh player starts the game at full stamina.
    pub fn new(name: impl Into<String>, position: Position, ratings: Ratings, max_stamina: u8) -> Self {
        let max_stamina = max_stamina.min(RATING_MAX) as f32;
        Self { name: name.into(), position, ratings, stamina: max_stamina, max_stamina }
    }

    /// Player carrying the position fallback ratings.
    pub fn with_position_defaults(name: impl Into<String>, position: Position) -> Self {
        let profile = crate::player::position_profile(position);
        Self::new(name, position, profile.default_ratings, profile.default_stamina)
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f32 {
        self.max_stamina
    }

    /// Current stamina as a share of this player's own maximum.
    pub fn stamina_ratio(&self) -> f32 {
        if self.max_stamina <= 0.0 {
            return 0.0;
        }
        (self.stamina / self.max_stamina).clamp(0.0, 1.0)
    }

    /// The only way stamina changes. Keeps 0 <= stamina <= max.
    pub(crate) fn set_stamina(&mut self, value: f32) {
        self.stamina = if value.is_finite() { value.clamp(0.0, self.max_stamina) } else { 0.0 };
    }

    pub(crate) fn restore_full_stamina(&mut self) {
        self.stamina = self.max_stamina;
    }

    pub fn overall(&self) -> u8 {
        self.ratings.overall()
    }

    /// Checks the 0-100 invariants. Stamina fields are private, so only a
    /// deserialized player can violate them.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("player with empty name".to_string());
        }
        if let Some((field, value)) = self.ratings.first_out_of_range() {
            return Err(format!("{}: {field} rating {value} exceeds {RATING_MAX}", self.name));
        }
        if !self.max_stamina.is_finite() || self.max_stamina <= 0.0 || self.max_stamina > 100.0 {
            return Err(format!("{}: max stamina {} outside (0, 100]", self.name, self.max_stamina));
        }
        if !self.stamina.is_finite() || self.stamina < 0.0 || self.stamina > self.max_stamina {
            return Err(format!(
                "{}: stamina {} outside [0, {}]",
                self.name, self.stamina, self.max_stamina
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(value: u8) -> Ratings {
        Ratings {
            close_range: value,
            mid_range: value,
            long_range: value,
            free_throw: value,
            passing: value,
            rebounding: value,
            blocking: value,
            stealing: value,
            dribbling: value,
            defense: value,
        }
    }

    #[test]
    fn test_position_parsing_handles_roster_codes() {
        assert_eq!("PG".parse::<Position>().unwrap(), Position::PG);
        assert_eq!("Point Guard".parse::<Position>().unwrap(), Position::PG);
        assert_eq!("G".parse::<Position>().unwrap(), Position::SG);
        assert_eq!("F-C".parse::<Position>().unwrap(), Position::PF);
        assert_eq!("G-F".parse::<Position>().unwrap(), Position::SG);
        assert_eq!("PG-SG".parse::<Position>().unwrap(), Position::PG);
        assert_eq!("Center".parse::<Position>().unwrap(), Position::C);
        assert!("Goalkeeper".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_numbers_round_trip() {
        for position in Position::ALL {
            assert_eq!(Position::from_number(position.number()), Some(position));
        }
        assert_eq!(Position::from_number(0), None);
        assert_eq!(Position::from_number(6), None);
    }

    #[test]
    fn test_new_player_starts_at_max_stamina() {
        let player = Player::new("Test", Position::SF, ratings(70), 85);
        assert_eq!(player.stamina(), 85.0);
        assert_eq!(player.max_stamina(), 85.0);
        assert!((player.stamina_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_set_stamina_clamps_to_bounds() {
        let mut player = Player::new("Test", Position::C, ratings(70), 80);
        player.set_stamina(-5.0);
        assert_eq!(player.stamina(), 0.0);
        player.set_stamina(120.0);
        assert_eq!(player.stamina(), 80.0);
        player.set_stamina(f32::NAN);
        assert_eq!(player.stamina(), 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let mut bad = ratings(70);
        bad.long_range = 130;
        let player = Player::new("Sniper", Position::SG, bad, 80);
        let err = player.validate().unwrap_err();
        assert!(err.contains("long_range"), "{err}");
    }

    #[test]
    fn test_validate_rejects_zero_max_stamina() {
        let player = Player::new("Ghost", Position::PG, ratings(50), 0);
        assert!(player.validate().is_err());
    }

    #[test]
    fn test_position_table_lookup() {
        let table = PositionTable::new(1, 2, 3, 4, 5);
        for position in Position::ALL {
            assert_eq!(table.get(position), position.number());
        }
    }
}
