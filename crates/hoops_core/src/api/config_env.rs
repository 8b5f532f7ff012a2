use std::{env, fs};

use crate::engine::config::EngineConfig;
use crate::error::{Result, SimError};

pub const ENGINE_CONFIG_PATH_ENV: &str = "HOOPS_ENGINE_CONFIG";

/// Engine configuration from the JSON file named by `HOOPS_ENGINE_CONFIG`,
/// or the default when the variable is unset or empty. Missing fields in the
/// file keep their defaults.
pub fn engine_config_from_env() -> Result<EngineConfig> {
    let Ok(path) = env::var(ENGINE_CONFIG_PATH_ENV) else {
        return Ok(EngineConfig::default());
    };
    let path = path.trim();
    if path.is_empty() {
        return Ok(EngineConfig::default());
    }
    load_engine_config(path)
}

pub fn load_engine_config(path: &str) -> Result<EngineConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        SimError::InvalidConfig(format!("failed to read engine config from {ENGINE_CONFIG_PATH_ENV}='{path}': {e}"))
    })?;
    EngineConfig::from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_engine_config("/nonexistent/hoops-engine.json").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }
}
