use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::box_score::BoxScoreSnapshot;
use super::events::{period_label, GameClock, PlayEvent, PlayerRef, PossessionOutcome};
use super::team::TeamSide;
use crate::error::Result;

/// Frozen state of a finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: u64,
    pub home_name: String,
    pub away_name: String,
    pub home_score: u32,
    pub away_score: u32,
    pub regulation_periods: u8,
    pub periods_played: u8,
    pub possessions: u32,
    pub box_score: BoxScoreSnapshot,
    #[serde(default)]
    play_by_play: Vec<PlayEvent>,
}

impl GameResult {
    pub(crate) fn new(
        seed: u64,
        regulation_periods: u8,
        periods_played: u8,
        box_score: BoxScoreSnapshot,
        play_by_play: Vec<PlayEvent>,
    ) -> Self {
        Self {
            seed,
            home_name: box_score.home.name.clone(),
            away_name: box_score.away.name.clone(),
            home_score: box_score.home.points(),
            away_score: box_score.away.points(),
            regulation_periods,
            periods_played,
            possessions: play_by_play.len() as u32,
            box_score,
            play_by_play,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    /// `None` never happens for a finished game; kept optional for
    /// deserialized results.
    pub fn winner(&self) -> Option<TeamSide> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn overtime_periods(&self) -> u8 {
        self.periods_played.saturating_sub(self.regulation_periods)
    }

    pub fn margin(&self) -> u32 {
        self.home_score.abs_diff(self.away_score)
    }

    /// Raw events still held by this result.
    pub fn events(&self) -> &[PlayEvent] {
        &self.play_by_play
    }

    /// SHA-256 over the serialized event log, hex encoded. Equal hashes mean
    /// byte-identical possession sequences. Covers nothing once the log was
    /// taken.
    pub fn event_hash(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.play_by_play)?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Moves the event log out as a formatted, single-pass sequence. The box
    /// score stays available; a second call yields nothing.
    pub fn take_play_by_play(&mut self) -> PlayByPlay {
        let names = [
            self.box_score.home.players.iter().map(|p| p.name.clone()).collect(),
            self.box_score.away.players.iter().map(|p| p.name.clone()).collect(),
        ];
        PlayByPlay {
            events: std::mem::take(&mut self.play_by_play).into_iter(),
            team_names: [self.home_name.clone(), self.away_name.clone()],
            names,
            regulation_periods: self.regulation_periods,
        }
    }
}

/// Lazily formatted possession descriptions.
pub struct PlayByPlay {
    events: std::vec::IntoIter<PlayEvent>,
    team_names: [String; 2],
    names: [Vec<String>; 2],
    regulation_periods: u8,
}

impl PlayByPlay {
    fn name(&self, player: PlayerRef) -> &str {
        self.names[player.side.index()]
            .get(player.index)
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    fn describe(&self, event: &PlayEvent) -> String {
        let action = match event.outcome {
            PossessionOutcome::MadeShot { zone, scorer, assist } => {
                let mut text = format!("{} makes {} ({} pts)", self.name(scorer), zone.label(), zone.points());
                if let Some(assist) = assist {
                    text.push_str(&format!(", assist {}", self.name(assist)));
                }
                text
            }
            PossessionOutcome::MissedShot { zone, shooter, rebounder, blocked_by } => {
                let mut text = match blocked_by {
                    Some(blocker) => format!("{} {} blocked by {}", self.name(shooter), zone.label(), self.name(blocker)),
                    None => format!("{} misses {}", self.name(shooter), zone.label()),
                };
                let kind = if event.outcome.is_offensive_rebound() { "offensive" } else { "defensive" };
                text.push_str(&format!(", {kind} rebound {}", self.name(rebounder)));
                text
            }
            PossessionOutcome::Turnover { player, stolen_by } => {
                let mut text = format!("{} turnover", self.name(player));
                if let Some(stealer) = stolen_by {
                    text.push_str(&format!(", stolen by {}", self.name(stealer)));
                }
                text
            }
            PossessionOutcome::Foul { shooter, made, attempted, .. } => {
                format!("{} fouled, {made}/{attempted} FT", self.name(shooter))
            }
        };
        format!(
            "{} {} {}: {action} [{}-{}]",
            period_label(event.period, self.regulation_periods),
            GameClock(event.clock_remaining),
            self.team_names[event.outcome.offense().index()],
            event.score_home,
            event.score_away
        )
    }
}

impl Iterator for PlayByPlay {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let event = self.events.next()?;
        Some(self.describe(&event))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

impl ExactSizeIterator for PlayByPlay {}
