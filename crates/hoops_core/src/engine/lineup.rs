use crate::error::{Result, SimError};
use crate::models::player::Player;
use crate::models::team::{Roster, LINEUP_SIZE};

/// The five roster indices on court. Everyone else on the roster is on the
/// bench; nobody leaves the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup {
    slots: [usize; LINEUP_SIZE],
    roster_len: usize,
}

impl Lineup {
    /// First five players of the roster.
    pub fn starting(roster: &Roster) -> Result<Self> {
        roster.validate()?;
        Ok(Self { slots: [0, 1, 2, 3, 4], roster_len: roster.len() })
    }

    pub fn slots(&self) -> &[usize; LINEUP_SIZE] {
        &self.slots
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains(&index)
    }

    pub fn bench(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.roster_len).filter(move |i| !self.contains(*i))
    }

    pub fn players<'a>(&'a self, roster: &'a [Player]) -> impl Iterator<Item = (usize, &'a Player)> + 'a {
        self.slots.iter().map(move |&i| (i, &roster[i]))
    }

    /// Replaces `out` (on court) with `incoming` (on the bench).
    pub fn swap(&mut self, team: &str, out: usize, incoming: usize) -> Result<()> {
        if incoming >= self.roster_len {
            return Err(SimError::roster(team, format!("player {incoming} is not on the roster")));
        }
        if self.contains(incoming) {
            return Err(SimError::roster(team, format!("player {incoming} is already on court")));
        }
        let slot = self
            .slots
            .iter()
            .position(|&i| i == out)
            .ok_or_else(|| SimError::roster(team, format!("player {out} is not on court")))?;
        self.slots[slot] = incoming;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;

    fn roster(n: usize) -> Roster {
        let players = (0..n)
            .map(|i| Player::with_position_defaults(format!("P{i}"), Position::ALL[i % 5]))
            .collect();
        Roster::new("Team", players).unwrap()
    }

    #[test]
    fn test_starting_lineup_and_bench() {
        let lineup = Lineup::starting(&roster(8)).unwrap();
        assert_eq!(lineup.slots(), &[0, 1, 2, 3, 4]);
        assert_eq!(lineup.bench().collect::<Vec<_>>(), vec![5, 6, 7]);
    }

    #[test]
    fn test_swap_moves_player_to_bench() {
        let mut lineup = Lineup::starting(&roster(7)).unwrap();
        lineup.swap("Team", 2, 6).unwrap();
        assert!(lineup.contains(6));
        assert!(!lineup.contains(2));
        assert_eq!(lineup.bench().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_invalid_swaps_are_rejected() {
        let mut lineup = Lineup::starting(&roster(6)).unwrap();
        assert!(lineup.swap("Team", 5, 0).is_err());
        assert!(lineup.swap("Team", 0, 1).is_err());
        assert!(lineup.swap("Team", 0, 9).is_err());
        assert_eq!(lineup.slots(), &[0, 1, 2, 3, 4]);
    }
}
