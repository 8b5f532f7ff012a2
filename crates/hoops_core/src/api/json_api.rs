use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config_env::engine_config_from_env;
use crate::engine::config::EngineConfig;
use crate::engine::game_sim::simulate_game;
use crate::error::{Result, SimError};
use crate::models::box_score::BoxScoreSnapshot;
use crate::models::player::{Player, Position, Ratings};
use crate::models::season_stats::{PlayerSeasonLine, TeamSeasonStats};
use crate::models::team::Roster;
use crate::player::{position_profile, AttributeMapper};
use crate::prediction::{PredictorConfig, ScorePrediction, ScorePredictor};
use crate::season::{simulate_season, PlayerAverages, TeamRecord};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home: TeamData,
    pub away: TeamData,
    #[serde(default)]
    pub include_play_by_play: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SeasonRequest {
    pub schema_version: u8,
    pub base_seed: u64,
    pub games: u32,
    pub home: TeamData,
    pub away: TeamData,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PredictRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home: TeamSeasonStats,
    pub away: TeamSeasonStats,
    #[serde(default)]
    pub config: Option<PredictorConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TeamData {
    pub name: String,
    /// Starters first.
    pub players: Vec<PlayerData>,
}

/// A player with explicit ratings, a season line to map from, or neither.
/// Without both, the position defaults are used.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PlayerData {
    pub name: String,
    /// "PG", "Point Guard", "G-F", "5", ...
    pub position: String,
    #[serde(default)]
    pub ratings: Option<Ratings>,
    #[serde(default)]
    pub max_stamina: Option<u8>,
    #[serde(default)]
    pub season_line: Option<PlayerSeasonLine>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    /// SHA-256 of the possession sequence.
    pub event_hash: String,
    pub score_home: u32,
    pub score_away: u32,
    pub periods_played: u8,
    pub overtime_periods: u8,
    pub box_score: BoxScoreSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_by_play: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub schema_version: u8,
    pub games: u32,
    pub home_record: TeamRecord,
    pub away_record: TeamRecord,
    /// (home, away) per game, in game order.
    pub scores: Vec<(u32, u32)>,
    pub player_averages: Vec<PlayerAverages>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub schema_version: u8,
    pub prediction: ScorePrediction,
}

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(SimError::UnsupportedSchema { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

fn rejected<T>(kind: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        if err.is_input_error() {
            warn!(request = kind, error = %err, "request rejected");
        }
    }
    result
}

fn convert_player(team: &str, data: PlayerData) -> Result<Player> {
    let position: Position = data.position.parse().map_err(|reason| SimError::roster(team, reason))?;
    let player = match (data.ratings, data.season_line) {
        (Some(ratings), line) => {
            let stamina = data
                .max_stamina
                .unwrap_or_else(|| AttributeMapper::stamina(line.as_ref(), position));
            Player::new(data.name, position, ratings, stamina)
        }
        (None, Some(line)) => {
            let mut player = AttributeMapper::player(data.name, position, Some(&line));
            if let Some(stamina) = data.max_stamina {
                player = Player::new(player.name, position, player.ratings, stamina);
            }
            player
        }
        (None, None) => {
            let stamina = data.max_stamina.unwrap_or(position_profile(position).default_stamina);
            Player::new(data.name, position, Ratings::position_default(position), stamina)
        }
    };
    Ok(player)
}

pub fn convert_team(data: TeamData) -> Result<Roster> {
    let players = data
        .players
        .into_iter()
        .map(|p| convert_player(&data.name, p))
        .collect::<Result<Vec<_>>>()?;
    Roster::new(data.name, players)
}

fn game(request_json: &str, config: &EngineConfig) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let home = convert_team(request.home)?;
    let away = convert_team(request.away)?;
    let mut result = simulate_game(home, away, request.seed, config)?;

    let event_hash = result.event_hash()?;
    let play_by_play = request.include_play_by_play.then(|| result.take_play_by_play().collect());
    let response = GameResponse {
        schema_version: SCHEMA_VERSION,
        seed: result.seed,
        event_hash,
        score_home: result.home_score,
        score_away: result.away_score,
        periods_played: result.periods_played,
        overtime_periods: result.overtime_periods(),
        box_score: result.box_score,
        play_by_play,
    };
    Ok(serde_json::to_string(&response)?)
}

fn season(request_json: &str, config: &EngineConfig) -> Result<String> {
    let request: SeasonRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let home = convert_team(request.home)?;
    let away = convert_team(request.away)?;
    let summary = simulate_season(&home, &away, request.games, request.base_seed, config)?;

    let response = SeasonResponse {
        schema_version: SCHEMA_VERSION,
        games: request.games,
        home_record: summary.home_record,
        away_record: summary.away_record,
        scores: summary.results.iter().map(|r| (r.home_score, r.away_score)).collect(),
        player_averages: summary.player_averages,
    };
    Ok(serde_json::to_string(&response)?)
}

fn predict(request_json: &str) -> Result<String> {
    let request: PredictRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let mut predictor = ScorePredictor::with_config(request.seed, request.config.unwrap_or_default())?;
    let prediction = predictor.predict(&request.home, &request.away)?;
    Ok(serde_json::to_string(&PredictResponse { schema_version: SCHEMA_VERSION, prediction })?)
}

/// Simulates one game. Engine configuration comes from
/// `HOOPS_ENGINE_CONFIG` when set.
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    rejected("game", engine_config_from_env().and_then(|config| game(request_json, &config)))
}

pub fn simulate_game_json_with_config(request_json: &str, config: &EngineConfig) -> Result<String> {
    rejected("game", game(request_json, config))
}

pub fn simulate_season_json(request_json: &str) -> Result<String> {
    rejected("season", engine_config_from_env().and_then(|config| season(request_json, &config)))
}

pub fn predict_score_json(request_json: &str) -> Result<String> {
    rejected("predict", predict(request_json))
}

/// JSON Schemas of the three request types, keyed `game`, `season` and
/// `predict`.
pub fn request_schema_json() -> Result<String> {
    let schemas = serde_json::json!({
        "game": schema_for!(GameRequest),
        "season": schema_for!(SeasonRequest),
        "predict": schema_for!(PredictRequest),
    });
    Ok(serde_json::to_string_pretty(&schemas)?)
}
