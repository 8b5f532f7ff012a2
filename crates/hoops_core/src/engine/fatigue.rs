//! Stamina drain, recovery and the fatigue multiplier on ratings.
//!
//! Stamina only changes through [`FatigueModel::tick`], [`FatigueModel::rest`]
//! and [`FatigueModel::period_break`]. All three go through
//! `Player::set_stamina`, which clamps to `0..=max_stamina`.

use crate::engine::config::StaminaConfig;
use crate::models::player::Player;

/// Kind of effort a possession demanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exertion {
    #[default]
    HalfCourt,
    /// Transition after a steal. Guards run the floor.
    FastBreak,
    /// A missed shot was fought for on the glass. Bigs battle inside.
    Rebounding,
}

#[derive(Debug, Clone)]
pub struct FatigueModel {
    config: StaminaConfig,
}

impl FatigueModel {
    pub fn new(config: StaminaConfig) -> Self {
        Self { config }
    }

    /// 1.0 at full stamina, `1 - max_penalty` at zero. Never above 1.
    pub fn multiplier(&self, player: &Player) -> f32 {
        (1.0 - self.config.max_penalty * (1.0 - player.stamina_ratio())).clamp(0.0, 1.0)
    }

    /// Base rating scaled by the fatigue multiplier. The player's stored
    /// ratings are not touched.
    pub fn effective(&self, player: &Player, rating: u8) -> f32 {
        rating as f32 * self.multiplier(player)
    }

    fn exertion_factor(&self, player: &Player, exertion: Exertion) -> f32 {
        match exertion {
            Exertion::FastBreak if player.position.is_guard() => self.config.fast_break_guard_factor,
            Exertion::Rebounding if player.position.is_big() => self.config.rebound_big_factor,
            _ => 1.0,
        }
    }

    /// Drains stamina for `possessions` played on court.
    pub fn tick(&self, player: &mut Player, possessions: u32, exertion: Exertion) {
        let drain = possessions as f32
            * self.config.drain_per_possession
            * self.config.position_drain.get(player.position)
            * self.exertion_factor(player, exertion);
        player.set_stamina(player.stamina() - drain);
    }

    /// Recovers stamina for `possessions` spent on the bench.
    pub fn rest(&self, player: &mut Player, possessions: u32) {
        let gain = possessions as f32 * self.config.recovery_per_possession;
        player.set_stamina(player.stamina() + gain);
    }

    pub fn period_break(&self, player: &mut Player) {
        player.set_stamina(player.stamina() + self.config.period_break_recovery);
    }
}
