pub mod config_env;
pub mod json_api;

pub use config_env::{engine_config_from_env, load_engine_config, ENGINE_CONFIG_PATH_ENV};
pub use json_api::{
    convert_team, predict_score_json, request_schema_json, simulate_game_json,
    simulate_game_json_with_config, simulate_season_json, GameRequest, GameResponse, PlayerData,
    PredictRequest, PredictResponse, SeasonRequest, SeasonResponse, TeamData, SCHEMA_VERSION,
};
