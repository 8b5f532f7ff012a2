//! Possession resolution parameters.
//!
//! Make probability is `sigmoid(zone_intercept + shooter_weight * shooter
//! - contest_weight * contest)` where both terms are ratings centered on 50.

use serde::{Deserialize, Serialize};

use crate::models::player::PositionTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    // === Clock ===
    /// Shortest half-court possession in seconds (default: 6)
    pub min_duration_secs: u32,
    /// Longest possession, the shot clock (default: 22)
    pub max_duration_secs: u32,
    /// Longest transition possession after a steal (default: 8)
    pub fast_break_max_secs: u32,

    // === Turnovers ===
    /// Base turnover rate (default: 0.13)
    pub turnover_base: f32,
    /// Turnover rate shift per centered point of (defense stealing - handler dribbling)
    pub turnover_skill_weight: f32,
    pub turnover_min: f32,
    pub turnover_max: f32,
    /// Share of turnovers credited to a defender as a steal (default: 0.55)
    pub steal_share: f32,

    // === Fouls ===
    /// Shooting foul rate on mid and long attempts (default: 0.07)
    pub foul_base: f32,
    /// Added on close attempts (default: 0.06)
    pub foul_close_bonus: f32,
    /// FT make = ft_floor + ft_scale * rating / 100
    pub ft_floor: f32,
    pub ft_scale: f32,

    // === Shot selection ===
    /// Shot usage weight per position
    pub usage: PositionTable<f32>,
    /// Zone tendency [close, mid, long] per position
    pub zone_tendency: PositionTable<[f32; 3]>,

    // === Make probability ===
    /// Logistic intercept per zone [close, mid, long]
    pub zone_intercept: [f32; 3],
    pub shooter_weight: f32,
    pub contest_weight: f32,

    // === Blocks, rebounds, assists ===
    /// Block rate per zone before scaling by defender blocking
    pub block_rate: [f32; 3],
    /// Offensive rebound rate for evenly matched rebounders (default: 0.25)
    pub offensive_rebound_base: f32,
    pub offensive_rebound_min: f32,
    pub offensive_rebound_max: f32,
    /// Share of made shots that are assisted (default: 0.60)
    pub assist_rate: f32,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: 6,
            max_duration_secs: 22,
            fast_break_max_secs: 8,

            turnover_base: 0.13,
            turnover_skill_weight: 0.05,
            turnover_min: 0.02,
            turnover_max: 0.35,
            steal_share: 0.55,

            foul_base: 0.07,
            foul_close_bonus: 0.06,
            ft_floor: 0.30,
            ft_scale: 0.60,

            usage: PositionTable::new(1.0, 1.15, 1.05, 0.95, 0.90),
            zone_tendency: PositionTable::new(
                [0.30, 0.30, 0.40],
                [0.28, 0.30, 0.42],
                [0.40, 0.30, 0.30],
                [0.55, 0.30, 0.15],
                [0.75, 0.20, 0.05],
            ),

            zone_intercept: [0.35, -0.35, -0.60],
            shooter_weight: 1.0,
            contest_weight: 0.6,

            block_rate: [0.12, 0.05, 0.02],
            offensive_rebound_base: 0.25,
            offensive_rebound_min: 0.10,
            offensive_rebound_max: 0.40,
            assist_rate: 0.60,
        }
    }
}

impl PossessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_duration_secs == 0 || self.min_duration_secs > self.max_duration_secs {
            return Err(format!(
                "possession durations need 0 < min <= max, got {}..{}",
                self.min_duration_secs, self.max_duration_secs
            ));
        }
        if self.fast_break_max_secs == 0 {
            return Err("possession.fast_break_max_secs must be positive".to_string());
        }
        let rates = [
            ("turnover_base", self.turnover_base),
            ("turnover_min", self.turnover_min),
            ("turnover_max", self.turnover_max),
            ("steal_share", self.steal_share),
            ("foul_base", self.foul_base),
            ("foul_close_bonus", self.foul_close_bonus),
            ("ft_floor", self.ft_floor),
            ("offensive_rebound_base", self.offensive_rebound_base),
            ("offensive_rebound_min", self.offensive_rebound_min),
            ("offensive_rebound_max", self.offensive_rebound_max),
            ("assist_rate", self.assist_rate),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("possession.{name} must be within 0..=1, got {value}"));
            }
        }
        if self.turnover_min > self.turnover_max {
            return Err("possession.turnover_min exceeds turnover_max".to_string());
        }
        if self.offensive_rebound_min > self.offensive_rebound_max {
            return Err("possession.offensive_rebound_min exceeds offensive_rebound_max".to_string());
        }
        // Offensive boards stay the minority share of every missed shot.
        if self.offensive_rebound_max >= 0.5 || self.offensive_rebound_base >= 0.5 {
            return Err(format!(
                "possession offensive rebound rates must stay below 0.5, got base {} max {}",
                self.offensive_rebound_base, self.offensive_rebound_max
            ));
        }
        if self.ft_floor + self.ft_scale > 1.0 || self.ft_scale < 0.0 {
            return Err("possession.ft_floor + ft_scale must stay within 0..=1".to_string());
        }
        if self.shooter_weight < 0.0 || self.contest_weight < 0.0 {
            return Err("possession shooter/contest weights must be non-negative".to_string());
        }
        let tendencies = [
            self.zone_tendency.pg,
            self.zone_tendency.sg,
            self.zone_tendency.sf,
            self.zone_tendency.pf,
            self.zone_tendency.c,
        ];
        if tendencies.iter().any(|t| t.iter().any(|w| *w < 0.0) || t.iter().sum::<f32>() <= 0.0) {
            return Err("possession.zone_tendency needs non-negative weights with a positive sum".to_string());
        }
        Ok(())
    }
}
