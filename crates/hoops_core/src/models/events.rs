use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotZone {
    Close,
    Mid,
    Long,
}

impl ShotZone {
    pub const ALL: [ShotZone; 3] = [ShotZone::Close, ShotZone::Mid, ShotZone::Long];

    pub fn points(self) -> u32 {
        match self {
            ShotZone::Close | ShotZone::Mid => 2,
            ShotZone::Long => 3,
        }
    }

    /// Free throws awarded for a shooting foul in this zone.
    pub fn free_throws(self) -> u8 {
        self.points() as u8
    }

    pub fn index(self) -> usize {
        match self {
            ShotZone::Close => 0,
            ShotZone::Mid => 1,
            ShotZone::Long => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotZone::Close => "layup",
            ShotZone::Mid => "jumper",
            ShotZone::Long => "three",
        }
    }
}

/// A player by team and roster index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub side: TeamSide,
    pub index: usize,
}

impl PlayerRef {
    pub fn new(side: TeamSide, index: usize) -> Self {
        Self { side, index }
    }
}

/// The result of one possession. Applied exactly once to the game state and
/// the box score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PossessionOutcome {
    MadeShot {
        zone: ShotZone,
        scorer: PlayerRef,
        assist: Option<PlayerRef>,
    },
    MissedShot {
        zone: ShotZone,
        shooter: PlayerRef,
        rebounder: PlayerRef,
        blocked_by: Option<PlayerRef>,
    },
    Turnover {
        player: PlayerRef,
        stolen_by: Option<PlayerRef>,
    },
    Foul {
        zone: ShotZone,
        shooter: PlayerRef,
        made: u8,
        attempted: u8,
    },
}

impl PossessionOutcome {
    /// Team that had the ball.
    pub fn offense(&self) -> TeamSide {
        match self {
            PossessionOutcome::MadeShot { scorer, .. } => scorer.side,
            PossessionOutcome::MissedShot { shooter, .. } => shooter.side,
            PossessionOutcome::Turnover { player, .. } => player.side,
            PossessionOutcome::Foul { shooter, .. } => shooter.side,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            PossessionOutcome::MadeShot { zone, .. } => zone.points(),
            PossessionOutcome::Foul { made, .. } => *made as u32,
            _ => 0,
        }
    }

    /// Team that owns the next possession: the rebounder's team after a miss,
    /// otherwise the defense.
    pub fn next_possession(&self) -> TeamSide {
        match self {
            PossessionOutcome::MissedShot { rebounder, .. } => rebounder.side,
            other => other.offense().opponent(),
        }
    }

    pub fn is_offensive_rebound(&self) -> bool {
        matches!(self, PossessionOutcome::MissedShot { shooter, rebounder, .. } if shooter.side == rebounder.side)
    }

    /// Steal turnovers lead to transition play.
    pub fn is_live_ball_turnover(&self) -> bool {
        matches!(self, PossessionOutcome::Turnover { stolen_by: Some(_), .. })
    }
}

/// One entry of the play-by-play log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub period: u8,
    /// Seconds left in the period once the possession ended.
    pub clock_remaining: u32,
    pub duration: u32,
    pub outcome: PossessionOutcome,
    pub score_home: u32,
    pub score_away: u32,
}

/// Clock formatted as `m:ss`.
pub struct GameClock(pub u32);

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

pub fn period_label(period: u8, regulation_periods: u8) -> String {
    if period <= regulation_periods {
        format!("Q{period}")
    } else if period == regulation_periods + 1 {
        "OT".to_string()
    } else {
        format!("{}OT", period - regulation_periods)
    }
}
