use serde::{Deserialize, Serialize};

use super::events::ShotZone;
use super::player::Position;
use super::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotSplit {
    pub attempts: u32,
    pub makes: u32,
}

impl ShotSplit {
    pub fn pct(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.makes as f64 / self.attempts as f64)
    }

    fn add(&mut self, other: &ShotSplit) {
        self.attempts += other.attempts;
        self.makes += other.makes;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneSplits {
    pub close: ShotSplit,
    pub mid: ShotSplit,
    pub long: ShotSplit,
}

impl ZoneSplits {
    pub fn get(&self, zone: ShotZone) -> &ShotSplit {
        match zone {
            ShotZone::Close => &self.close,
            ShotZone::Mid => &self.mid,
            ShotZone::Long => &self.long,
        }
    }

    pub fn get_mut(&mut self, zone: ShotZone) -> &mut ShotSplit {
        match zone {
            ShotZone::Close => &mut self.close,
            ShotZone::Mid => &mut self.mid,
            ShotZone::Long => &mut self.long,
        }
    }

    pub fn total(&self) -> ShotSplit {
        let mut total = ShotSplit::default();
        for zone in ShotZone::ALL {
            total.add(self.get(zone));
        }
        total
    }
}

/// Per-player counters for one game (or a season when merged).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxScoreEntry {
    pub name: String,
    pub position: Option<Position>,
    pub points: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub field_goals: ZoneSplits,
    pub free_throws: ShotSplit,
    pub seconds_played: u32,
}

impl BoxScoreEntry {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self { name: name.into(), position: Some(position), ..Default::default() }
    }

    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    pub fn field_goals_total(&self) -> ShotSplit {
        self.field_goals.total()
    }

    pub fn three_pointers(&self) -> ShotSplit {
        self.field_goals.long
    }

    pub fn played(&self) -> bool {
        self.seconds_played > 0
    }

    /// Adds every counter of `other` into `self`. Identity fields are kept.
    pub fn merge(&mut self, other: &BoxScoreEntry) {
        self.points += other.points;
        self.offensive_rebounds += other.offensive_rebounds;
        self.defensive_rebounds += other.defensive_rebounds;
        self.assists += other.assists;
        self.steals += other.steals;
        self.blocks += other.blocks;
        self.turnovers += other.turnovers;
        for zone in ShotZone::ALL {
            self.field_goals.get_mut(zone).add(other.field_goals.get(zone));
        }
        self.free_throws.add(&other.free_throws);
        self.seconds_played += other.seconds_played;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamBoxScore {
    pub name: String,
    /// Indexed like the roster.
    pub players: Vec<BoxScoreEntry>,
    pub substitutions: u32,
    /// Checkpoints where a tired player stayed on because no bench player
    /// at the position was fresh enough.
    pub degenerate_substitutions: u32,
}

impl TeamBoxScore {
    pub fn points(&self) -> u32 {
        self.players.iter().map(|p| p.points).sum()
    }

    pub fn totals(&self) -> BoxScoreEntry {
        let mut totals = BoxScoreEntry { name: self.name.clone(), ..Default::default() };
        for player in &self.players {
            totals.merge(player);
        }
        totals
    }
}

/// Read-only copy of the accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxScoreSnapshot {
    pub home: TeamBoxScore,
    pub away: TeamBoxScore,
}

impl BoxScoreSnapshot {
    pub fn team(&self, side: TeamSide) -> &TeamBoxScore {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn points(&self, side: TeamSide) -> u32 {
        self.team(side).points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_totals_and_percentages() {
        let mut entry = BoxScoreEntry::new("Shooter", Position::SG);
        entry.field_goals.close = ShotSplit { attempts: 4, makes: 3 };
        entry.field_goals.long = ShotSplit { attempts: 6, makes: 2 };
        let total = entry.field_goals_total();
        assert_eq!(total, ShotSplit { attempts: 10, makes: 5 });
        assert_eq!(total.pct(), Some(0.5));
        assert_eq!(entry.field_goals.mid.pct(), None);
    }

    #[test]
    fn test_team_totals_sum_players() {
        let mut a = BoxScoreEntry::new("A", Position::PG);
        a.points = 10;
        a.offensive_rebounds = 1;
        a.seconds_played = 600;
        let mut b = BoxScoreEntry::new("B", Position::C);
        b.points = 7;
        b.defensive_rebounds = 9;
        let team = TeamBoxScore { name: "T".into(), players: vec![a, b], ..Default::default() };
        assert_eq!(team.points(), 17);
        let totals = team.totals();
        assert_eq!(totals.points, 17);
        assert_eq!(totals.rebounds(), 10);
        assert_eq!(totals.seconds_played, 600);
    }
}
