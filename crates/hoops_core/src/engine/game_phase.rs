use serde::{Deserialize, Serialize};

/// Game lifecycle. Possessions only happen in `QuarterInProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    PreGame,
    QuarterInProgress,
    QuarterEnd,
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self == GamePhase::GameOver
    }
}

/// What follows the period that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodTransition {
    NextQuarter,
    Overtime,
    GameOver,
}

/// Regulation periods always continue; from the last regulation period on,
/// a tie forces another overtime.
pub fn after_period(period: u8, regulation_periods: u8, tied: bool) -> PeriodTransition {
    if period < regulation_periods {
        PeriodTransition::NextQuarter
    } else if tied {
        PeriodTransition::Overtime
    } else {
        PeriodTransition::GameOver
    }
}
