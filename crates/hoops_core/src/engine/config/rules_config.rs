use serde::{Deserialize, Serialize};

/// Upper bound on regulation periods. Leaves the `u8` period counter room
/// for overtimes.
pub const MAX_REGULATION_PERIODS: u8 = 8;

/// Game structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Regulation periods (default: 4)
    pub periods: u8,
    /// Regulation period length in seconds (default: 720)
    pub period_secs: u32,
    /// Overtime length in seconds (default: 300). Overtimes repeat until
    /// one team leads.
    pub overtime_secs: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { periods: 4, period_secs: 720, overtime_secs: 300 }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.periods == 0 || self.periods > MAX_REGULATION_PERIODS {
            return Err(format!(
                "rules.periods must be within 1..={MAX_REGULATION_PERIODS}, got {}",
                self.periods
            ));
        }
        if self.period_secs == 0 || self.overtime_secs == 0 {
            return Err("rules period lengths must be positive".to_string());
        }
        Ok(())
    }

    pub fn period_length(&self, period: u8) -> u32 {
        if period <= self.periods {
            self.period_secs
        } else {
            self.overtime_secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_count_bounds() {
        let rules = RulesConfig { periods: MAX_REGULATION_PERIODS, ..Default::default() };
        assert!(rules.validate().is_ok());

        let rules = RulesConfig { periods: 255, period_secs: 1, overtime_secs: 1 };
        assert!(rules.validate().is_err());

        let rules = RulesConfig { periods: 0, ..Default::default() };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_overtime_length_applies_after_regulation() {
        let rules = RulesConfig::default();
        assert_eq!(rules.period_length(4), 720);
        assert_eq!(rules.period_length(5), 300);
    }
}
