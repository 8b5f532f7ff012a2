//! Applies possession outcomes to per-player counters.

use crate::models::box_score::{BoxScoreEntry, BoxScoreSnapshot, TeamBoxScore};
use crate::models::events::{PlayerRef, PossessionOutcome};
use crate::models::team::{Roster, TeamSide};

/// Owns the counters of one game. Team points are never stored; they are
/// the sum of player points.
#[derive(Debug, Clone)]
pub struct BoxScoreAccumulator {
    teams: [TeamBoxScore; 2],
}

impl BoxScoreAccumulator {
    pub fn new(home: &Roster, away: &Roster) -> Self {
        let team = |roster: &Roster| TeamBoxScore {
            name: roster.name.clone(),
            players: roster.players().iter().map(|p| BoxScoreEntry::new(p.name.clone(), p.position)).collect(),
            ..Default::default()
        };
        Self { teams: [team(home), team(away)] }
    }

    fn entry(&mut self, player: PlayerRef) -> &mut BoxScoreEntry {
        &mut self.teams[player.side.index()].players[player.index]
    }

    /// Applies exactly the counters implied by `outcome`. Call once per
    /// outcome.
    pub fn record(&mut self, outcome: &PossessionOutcome) {
        match *outcome {
            PossessionOutcome::MadeShot { zone, scorer, assist } => {
                let entry = self.entry(scorer);
                entry.points += zone.points();
                let split = entry.field_goals.get_mut(zone);
                split.attempts += 1;
                split.makes += 1;
                if let Some(assist) = assist {
                    self.entry(assist).assists += 1;
                }
            }
            PossessionOutcome::MissedShot { zone, shooter, rebounder, blocked_by } => {
                self.entry(shooter).field_goals.get_mut(zone).attempts += 1;
                if let Some(blocker) = blocked_by {
                    self.entry(blocker).blocks += 1;
                }
                let offensive = rebounder.side == shooter.side;
                let entry = self.entry(rebounder);
                if offensive {
                    entry.offensive_rebounds += 1;
                } else {
                    entry.defensive_rebounds += 1;
                }
            }
            PossessionOutcome::Turnover { player, stolen_by } => {
                self.entry(player).turnovers += 1;
                if let Some(stealer) = stolen_by {
                    self.entry(stealer).steals += 1;
                }
            }
            PossessionOutcome::Foul { shooter, made, attempted, .. } => {
                let entry = self.entry(shooter);
                entry.points += made as u32;
                entry.free_throws.attempts += attempted as u32;
                entry.free_throws.makes += made as u32;
            }
        }
    }

    pub fn add_seconds(&mut self, side: TeamSide, on_court: &[usize], seconds: u32) {
        let team = &mut self.teams[side.index()];
        for &index in on_court {
            team.players[index].seconds_played += seconds;
        }
    }

    pub fn note_substitutions(&mut self, side: TeamSide, substitutions: u32, degenerate: u32) {
        let team = &mut self.teams[side.index()];
        team.substitutions += substitutions;
        team.degenerate_substitutions += degenerate;
    }

    pub fn points(&self, side: TeamSide) -> u32 {
        self.teams[side.index()].points()
    }

    pub fn snapshot(&self) -> BoxScoreSnapshot {
        let [home, away] = &self.teams;
        BoxScoreSnapshot { home: home.clone(), away: away.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::ShotZone;
    use crate::models::player::{Player, Position};

    fn roster(name: &str) -> Roster {
        let players = (0..7)
            .map(|i| Player::with_position_defaults(format!("{name}{i}"), Position::ALL[i % 5]))
            .collect();
        Roster::new(name, players).unwrap()
    }

    fn home(i: usize) -> PlayerRef {
        PlayerRef::new(TeamSide::Home, i)
    }

    fn away(i: usize) -> PlayerRef {
        PlayerRef::new(TeamSide::Away, i)
    }

    fn accumulator() -> BoxScoreAccumulator {
        BoxScoreAccumulator::new(&roster("H"), &roster("A"))
    }

    #[test]
    fn test_made_three_with_assist() {
        let mut acc = accumulator();
        acc.record(&PossessionOutcome::MadeShot { zone: ShotZone::Long, scorer: home(1), assist: Some(home(0)) });
        let snap = acc.snapshot();
        assert_eq!(snap.home.players[1].points, 3);
        assert_eq!(snap.home.players[1].three_pointers().makes, 1);
        assert_eq!(snap.home.players[0].assists, 1);
        assert_eq!(snap.points(TeamSide::Home), 3);
        assert_eq!(snap.points(TeamSide::Away), 0);
    }

    #[test]
    fn test_miss_block_and_rebound() {
        let mut acc = accumulator();
        acc.record(&PossessionOutcome::MissedShot {
            zone: ShotZone::Close,
            shooter: home(4),
            rebounder: away(3),
            blocked_by: Some(away(4)),
        });
        acc.record(&PossessionOutcome::MissedShot {
            zone: ShotZone::Mid,
            shooter: home(2),
            rebounder: home(4),
            blocked_by: None,
        });
        let snap = acc.snapshot();
        assert_eq!(snap.home.players[4].field_goals.close.attempts, 1);
        assert_eq!(snap.home.players[4].field_goals.close.makes, 0);
        assert_eq!(snap.home.players[4].offensive_rebounds, 1);
        assert_eq!(snap.away.players[4].blocks, 1);
        assert_eq!(snap.away.players[3].defensive_rebounds, 1);
        assert_eq!(snap.points(TeamSide::Home), 0);
    }

    #[test]
    fn test_turnover_and_free_throws() {
        let mut acc = accumulator();
        acc.record(&PossessionOutcome::Turnover { player: away(0), stolen_by: Some(home(1)) });
        acc.record(&PossessionOutcome::Foul { zone: ShotZone::Long, shooter: away(1), made: 2, attempted: 3 });
        let snap = acc.snapshot();
        assert_eq!(snap.away.players[0].turnovers, 1);
        assert_eq!(snap.home.players[1].steals, 1);
        assert_eq!(snap.away.players[1].free_throws.attempts, 3);
        assert_eq!(snap.away.players[1].field_goals_total().attempts, 0);
        assert_eq!(snap.points(TeamSide::Away), 2);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut acc = accumulator();
        acc.record(&PossessionOutcome::MadeShot { zone: ShotZone::Mid, scorer: away(2), assist: None });
        acc.add_seconds(TeamSide::Away, &[0, 1, 2, 3, 4], 14);
        assert_eq!(acc.snapshot(), acc.snapshot());
        assert_eq!(acc.snapshot().away.players[2].seconds_played, 14);
        assert_eq!(acc.snapshot().away.players[5].seconds_played, 0);
    }
}
