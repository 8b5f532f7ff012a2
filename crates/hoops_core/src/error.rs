use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Fewer than five eligible players, an out-of-range rating, or a lineup
    /// change that would break the five-on-court invariant.
    #[error("Invalid roster for {team}: {reason}")]
    InvalidRoster { team: String, reason: String },

    #[error("Invalid season stats for {team}: {reason}")]
    InvalidSeasonStats { team: String, reason: String },

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn roster(team: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::InvalidRoster { team: team.into(), reason: reason.into() }
    }

    pub(crate) fn season_stats(team: impl Into<String>, reason: impl Into<String>) -> Self {
        SimError::InvalidSeasonStats { team: team.into(), reason: reason.into() }
    }

    /// True when the caller can fix the failure by changing its input.
    pub fn is_input_error(&self) -> bool {
        match self {
            SimError::InvalidRoster { .. } => true,
            SimError::InvalidSeasonStats { .. } => true,
            SimError::InvalidConfig(_) => true,
            SimError::UnsupportedSchema { .. } => true,
            SimError::Serialization(err) => err.is_data() || err.is_syntax(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
