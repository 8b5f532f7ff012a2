//! Resolves a single possession into a [`PossessionOutcome`].
//!
//! Order of checks: turnover, then shot selection, then shooting foul, then
//! make/miss. A miss is followed by an optional block and a rebound. Every
//! rating read goes through the fatigue multiplier.

use rand::Rng;

use super::config::PossessionConfig;
use super::fatigue::FatigueModel;
use super::lineup::Lineup;
use super::probability::{centered, chance, sigmoid, weighted_choice_index};
use crate::models::events::{PlayerRef, PossessionOutcome, ShotZone};
use crate::models::player::Player;
use crate::models::team::{TeamSide, LINEUP_SIZE};

/// One team as seen by the resolver.
#[derive(Clone, Copy)]
pub struct CourtView<'a> {
    pub side: TeamSide,
    pub roster: &'a [Player],
    pub lineup: &'a Lineup,
}

impl<'a> CourtView<'a> {
    fn on_court(&self) -> [(usize, &'a Player); LINEUP_SIZE] {
        let slots = self.lineup.slots();
        let roster = self.roster;
        std::array::from_fn(|i| (slots[i], &roster[slots[i]]))
    }

    fn player_ref(&self, index: usize) -> PlayerRef {
        PlayerRef::new(self.side, index)
    }
}

#[derive(Debug, Clone)]
pub struct PossessionResolver {
    config: PossessionConfig,
    fatigue: FatigueModel,
}

impl PossessionResolver {
    pub fn new(config: PossessionConfig, fatigue: FatigueModel) -> Self {
        Self { config, fatigue }
    }

    pub fn config(&self) -> &PossessionConfig {
        &self.config
    }

    /// Make probability for an effective zone rating against an effective
    /// contest rating. Increasing in `shooter`, decreasing in `contest`.
    pub fn make_probability(&self, zone: ShotZone, shooter: f32, contest: f32) -> f32 {
        sigmoid(
            self.config.zone_intercept[zone.index()] + self.config.shooter_weight * centered(shooter)
                - self.config.contest_weight * centered(contest),
        )
    }

    /// Turnover probability for a handler's effective dribbling against the
    /// defense's average effective stealing.
    pub fn turnover_probability(&self, handler_dribbling: f32, defense_stealing: f32) -> f32 {
        (self.config.turnover_base
            + self.config.turnover_skill_weight * (centered(defense_stealing) - centered(handler_dribbling)))
            .clamp(self.config.turnover_min, self.config.turnover_max)
    }

    pub fn free_throw_probability(&self, free_throw: f32) -> f32 {
        (self.config.ft_floor + self.config.ft_scale * free_throw / 100.0).clamp(0.0, 1.0)
    }

    /// Resolves one possession. The only side effect is advancing `rng`.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        offense: CourtView<'_>,
        defense: CourtView<'_>,
        rng: &mut R,
    ) -> PossessionOutcome {
        let attackers = offense.on_court();
        let defenders = defense.on_court();

        if let Some(outcome) = self.try_turnover(&offense, &defense, &attackers, &defenders, rng) {
            return outcome;
        }

        let shooter_slot = self.pick_shooter(&attackers, rng);
        let (shooter_index, shooter) = attackers[shooter_slot];
        let zone = self.pick_zone(shooter, rng);

        let foul_rate = self.config.foul_base
            + if zone == ShotZone::Close { self.config.foul_close_bonus } else { 0.0 };
        if chance(foul_rate, rng) {
            let attempted = zone.free_throws();
            let make = self.free_throw_probability(self.fatigue.effective(shooter, shooter.ratings.free_throw));
            let made = (0..attempted).filter(|_| chance(make, rng)).count() as u8;
            return PossessionOutcome::Foul { zone, shooter: offense.player_ref(shooter_index), made, attempted };
        }

        let shooting = self.fatigue.effective(shooter, zone_rating(shooter, zone));
        let contest = self.contest_rating(zone, &defenders);
        if chance(self.make_probability(zone, shooting, contest), rng) {
            let assist = self.pick_assist(&attackers, shooter_slot, rng).map(|i| offense.player_ref(i));
            return PossessionOutcome::MadeShot { zone, scorer: offense.player_ref(shooter_index), assist };
        }

        let blocked_by = self.try_block(zone, &defenders, rng).map(|i| defense.player_ref(i));
        let rebounder = self.pick_rebounder(&offense, &defense, &attackers, &defenders, rng);
        PossessionOutcome::MissedShot { zone, shooter: offense.player_ref(shooter_index), rebounder, blocked_by }
    }

    fn try_turnover<R: Rng + ?Sized>(
        &self,
        offense: &CourtView<'_>,
        defense: &CourtView<'_>,
        attackers: &[(usize, &Player); LINEUP_SIZE],
        defenders: &[(usize, &Player); LINEUP_SIZE],
        rng: &mut R,
    ) -> Option<PossessionOutcome> {
        // Ball handler: whoever has the ball most, weighted by passing.
        let handling: Vec<f32> =
            attackers.iter().map(|(_, p)| self.fatigue.effective(p, p.ratings.passing)).collect();
        let (handler_index, handler) = attackers[weighted_choice_index(&handling, rng)];

        let stealing: Vec<f32> =
            defenders.iter().map(|(_, p)| self.fatigue.effective(p, p.ratings.stealing)).collect();
        let defense_stealing = stealing.iter().sum::<f32>() / LINEUP_SIZE as f32;
        let dribbling = self.fatigue.effective(handler, handler.ratings.dribbling);

        if !chance(self.turnover_probability(dribbling, defense_stealing), rng) {
            return None;
        }

        let steal_rate = self.config.steal_share * (0.5 + defense_stealing / 100.0);
        let stolen_by = chance(steal_rate, rng).then(|| {
            let (index, _) = defenders[weighted_choice_index(&stealing, rng)];
            defense.player_ref(index)
        });
        Some(PossessionOutcome::Turnover { player: offense.player_ref(handler_index), stolen_by })
    }

    fn pick_shooter<R: Rng + ?Sized>(&self, attackers: &[(usize, &Player); LINEUP_SIZE], rng: &mut R) -> usize {
        let weights: Vec<f32> = attackers
            .iter()
            .map(|(_, p)| {
                self.config.usage.get(p.position) * p.ratings.shooting_average() * self.fatigue.multiplier(p)
            })
            .collect();
        weighted_choice_index(&weights, rng)
    }

    fn pick_zone<R: Rng + ?Sized>(&self, shooter: &Player, rng: &mut R) -> ShotZone {
        let tendency = self.config.zone_tendency.get(shooter.position);
        let weights: Vec<f32> = ShotZone::ALL
            .iter()
            .map(|zone| tendency[zone.index()] * (zone_rating(shooter, *zone) as f32 + 1.0))
            .collect();
        ShotZone::ALL[weighted_choice_index(&weights, rng)]
    }

    /// Average effective defense. Close shots are contested half by rim
    /// protection.
    fn contest_rating(&self, zone: ShotZone, defenders: &[(usize, &Player); LINEUP_SIZE]) -> f32 {
        let total: f32 = defenders
            .iter()
            .map(|(_, p)| {
                let defense = self.fatigue.effective(p, p.ratings.defense);
                match zone {
                    ShotZone::Close => 0.5 * defense + 0.5 * self.fatigue.effective(p, p.ratings.blocking),
                    ShotZone::Mid | ShotZone::Long => defense,
                }
            })
            .sum();
        total / LINEUP_SIZE as f32
    }

    fn pick_assist<R: Rng + ?Sized>(
        &self,
        attackers: &[(usize, &Player); LINEUP_SIZE],
        shooter_slot: usize,
        rng: &mut R,
    ) -> Option<usize> {
        if !chance(self.config.assist_rate, rng) {
            return None;
        }
        let weights: Vec<f32> = attackers
            .iter()
            .enumerate()
            .map(|(slot, (_, p))| {
                if slot == shooter_slot {
                    0.0
                } else {
                    self.fatigue.effective(p, p.ratings.passing) + 1.0
                }
            })
            .collect();
        Some(attackers[weighted_choice_index(&weights, rng)].0)
    }

    fn try_block<R: Rng + ?Sized>(
        &self,
        zone: ShotZone,
        defenders: &[(usize, &Player); LINEUP_SIZE],
        rng: &mut R,
    ) -> Option<usize> {
        let blocking: Vec<f32> =
            defenders.iter().map(|(_, p)| self.fatigue.effective(p, p.ratings.blocking)).collect();
        let best = blocking.iter().copied().fold(0.0_f32, f32::max);
        let rate = (self.config.block_rate[zone.index()] * best / 50.0).clamp(0.0, 0.5);
        if !chance(rate, rng) {
            return None;
        }
        Some(defenders[weighted_choice_index(&blocking, rng)].0)
    }

    fn pick_rebounder<R: Rng + ?Sized>(
        &self,
        offense: &CourtView<'_>,
        defense: &CourtView<'_>,
        attackers: &[(usize, &Player); LINEUP_SIZE],
        defenders: &[(usize, &Player); LINEUP_SIZE],
        rng: &mut R,
    ) -> PlayerRef {
        let rebounding = |players: &[(usize, &Player); LINEUP_SIZE]| -> Vec<f32> {
            players.iter().map(|(_, p)| self.fatigue.effective(p, p.ratings.rebounding) + 1.0).collect()
        };
        let offense_weights = rebounding(attackers);
        let defense_weights = rebounding(defenders);
        let offense_total: f32 = offense_weights.iter().sum();
        let defense_total: f32 = defense_weights.iter().sum();

        let offensive_rate = (self.config.offensive_rebound_base * offense_total / defense_total)
            .clamp(self.config.offensive_rebound_min, self.config.offensive_rebound_max);

        if chance(offensive_rate, rng) {
            offense.player_ref(attackers[weighted_choice_index(&offense_weights, rng)].0)
        } else {
            defense.player_ref(defenders[weighted_choice_index(&defense_weights, rng)].0)
        }
    }
}

fn zone_rating(player: &Player, zone: ShotZone) -> u8 {
    match zone {
        ShotZone::Close => player.ratings.close_range,
        ShotZone::Mid => player.ratings.mid_range,
        ShotZone::Long => player.ratings.long_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{EngineConfig, StaminaConfig};
    use crate::models::player::{Position, Ratings};
    use crate::models::team::Roster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn resolver() -> PossessionResolver {
        let config = EngineConfig::default();
        PossessionResolver::new(config.possession, FatigueModel::new(StaminaConfig::default()))
    }

    fn roster(name: &str) -> Roster {
        let players = Position::ALL
            .iter()
            .map(|pos| Player::with_position_defaults(format!("{name} {pos}"), *pos))
            .collect();
        Roster::new(name, players).unwrap()
    }

    fn uniform_roster(name: &str, value: u8) -> Roster {
        let ratings = Ratings {
            close_range: value,
            mid_range: value,
            long_range: value,
            free_throw: value,
            passing: value,
            rebounding: value,
            blocking: value,
            stealing: value,
            dribbling: value,
            defense: value,
        };
        let players =
            Position::ALL.iter().map(|pos| Player::new(format!("{name} {pos}"), *pos, ratings, 80)).collect();
        Roster::new(name, players).unwrap()
    }

    #[test]
    fn test_make_probability_monotonic() {
        let r = resolver();
        for zone in ShotZone::ALL {
            assert!(r.make_probability(zone, 80.0, 50.0) > r.make_probability(zone, 60.0, 50.0));
            assert!(r.make_probability(zone, 70.0, 80.0) < r.make_probability(zone, 70.0, 40.0));
        }
        assert!(r.make_probability(ShotZone::Close, 60.0, 60.0) > r.make_probability(ShotZone::Long, 60.0, 60.0));
    }

    #[test]
    fn test_turnover_probability_is_clamped() {
        let r = resolver();
        assert!(r.turnover_probability(100.0, 0.0) >= r.config().turnover_min);
        assert!(r.turnover_probability(0.0, 100.0) <= r.config().turnover_max);
        assert!(r.turnover_probability(40.0, 70.0) > r.turnover_probability(80.0, 70.0));
    }

    #[test]
    fn test_outcomes_reference_correct_sides() {
        let r = resolver();
        let home = roster("Home");
        let away = roster("Away");
        let home_lineup = Lineup::starting(&home).unwrap();
        let away_lineup = Lineup::starting(&away).unwrap();
        let offense = CourtView { side: TeamSide::Home, roster: home.players(), lineup: &home_lineup };
        let defense = CourtView { side: TeamSide::Away, roster: away.players(), lineup: &away_lineup };
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..500 {
            let outcome = r.resolve(offense, defense, &mut rng);
            assert_eq!(outcome.offense(), TeamSide::Home);
            match outcome {
                PossessionOutcome::MadeShot { scorer, assist, .. } => {
                    if let Some(assist) = assist {
                        assert_eq!(assist.side, TeamSide::Home);
                        assert_ne!(assist, scorer);
                    }
                }
                PossessionOutcome::MissedShot { blocked_by, .. } => {
                    if let Some(blocker) = blocked_by {
                        assert_eq!(blocker.side, TeamSide::Away);
                    }
                }
                PossessionOutcome::Turnover { stolen_by, .. } => {
                    if let Some(stealer) = stolen_by {
                        assert_eq!(stealer.side, TeamSide::Away);
                    }
                }
                PossessionOutcome::Foul { made, attempted, .. } => assert!(made <= attempted),
            }
        }
    }

    #[test]
    fn test_defensive_rebounds_outnumber_offensive() {
        let r = resolver();
        let home = uniform_roster("Home", 60);
        let away = uniform_roster("Away", 60);
        let home_lineup = Lineup::starting(&home).unwrap();
        let away_lineup = Lineup::starting(&away).unwrap();
        let offense = CourtView { side: TeamSide::Home, roster: home.players(), lineup: &home_lineup };
        let defense = CourtView { side: TeamSide::Away, roster: away.players(), lineup: &away_lineup };
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let (mut offensive, mut defensive) = (0, 0);
        for _ in 0..2_000 {
            let outcome = r.resolve(offense, defense, &mut rng);
            if let PossessionOutcome::MissedShot { .. } = outcome {
                if outcome.is_offensive_rebound() {
                    offensive += 1;
                } else {
                    defensive += 1;
                }
            }
        }
        assert!(offensive > 0);
        assert!(defensive > 2 * offensive, "off {offensive} def {defensive}");
    }

    #[test]
    fn test_better_shooters_score_more() {
        let r = resolver();
        let strong = uniform_roster("Strong", 90);
        let weak = uniform_roster("Weak", 30);
        let strong_lineup = Lineup::starting(&strong).unwrap();
        let weak_lineup = Lineup::starting(&weak).unwrap();
        let strong_view = CourtView { side: TeamSide::Home, roster: strong.players(), lineup: &strong_lineup };
        let weak_view = CourtView { side: TeamSide::Away, roster: weak.players(), lineup: &weak_lineup };
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let strong_points: u32 = (0..2_000).map(|_| r.resolve(strong_view, weak_view, &mut rng).points()).sum();
        let weak_points: u32 = (0..2_000).map(|_| r.resolve(weak_view, strong_view, &mut rng).points()).sum();
        assert!(strong_points > weak_points);
    }
}
