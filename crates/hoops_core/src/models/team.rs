use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::Player;
use crate::error::{Result, SimError};

/// Players on court per team.
pub const LINEUP_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("home"),
            TeamSide::Away => f.write_str("away"),
        }
    }
}

/// Ordered roster: the first five players start, the rest form the bench.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Roster {
    pub name: String,
    players: Vec<Player>,
}

impl Roster {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self> {
        let roster = Self { name: name.into(), players };
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<()> {
        if self.players.len() < LINEUP_SIZE {
            return Err(SimError::roster(
                self.name.clone(),
                format!("need at least {LINEUP_SIZE} players, found {}", self.players.len()),
            ));
        }
        for player in &self.players {
            player.validate().map_err(|reason| SimError::roster(self.name.clone(), reason))?;
        }
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Stamina updates only; the roster itself never grows or shrinks.
    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn starters(&self) -> &[Player] {
        &self.players[..LINEUP_SIZE.min(self.players.len())]
    }

    pub fn bench(&self) -> &[Player] {
        &self.players[LINEUP_SIZE.min(self.players.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;

    fn players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::with_position_defaults(format!("P{i}"), Position::ALL[i % 5]))
            .collect()
    }

    #[test]
    fn test_roster_requires_five_players() {
        let err = Roster::new("Short", players(4)).unwrap_err();
        assert!(matches!(err, SimError::InvalidRoster { .. }));
        assert!(Roster::new("Full", players(5)).is_ok());
    }

    #[test]
    fn test_starters_and_bench_split() {
        let roster = Roster::new("Deep", players(8)).unwrap();
        assert_eq!(roster.starters().len(), 5);
        assert_eq!(roster.bench().len(), 3);
        assert_eq!(roster.bench()[0].name, "P5");
    }

    #[test]
    fn test_roster_rejects_invalid_player() {
        let mut list = players(5);
        list[2].ratings.blocking = 101;
        assert!(Roster::new("Bad", list).is_err());
    }

    #[test]
    fn test_team_side_opponent() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.opponent().opponent(), TeamSide::Away);
    }
}
