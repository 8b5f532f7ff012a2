pub mod box_score;
pub mod events;
pub mod game_result;
pub mod player;
pub mod season_stats;
pub mod team;

pub use box_score::{BoxScoreEntry, BoxScoreSnapshot, ShotSplit, TeamBoxScore, ZoneSplits};
pub use events::{period_label, GameClock, PlayEvent, PlayerRef, PossessionOutcome, ShotZone};
pub use game_result::{GameResult, PlayByPlay};
pub use player::{Player, Position, PositionTable, Ratings, RATING_MAX};
pub use season_stats::{PlayerSeasonLine, TeamSeasonStats};
pub use team::{Roster, TeamSide, LINEUP_SIZE};
