//! Fatigue-driven substitutions at fixed checkpoints.

use tracing::debug;

use super::config::SubstitutionConfig;
use super::lineup::Lineup;
use crate::error::Result;
use crate::models::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub out: usize,
    pub incoming: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointReport {
    pub substitutions: Vec<Substitution>,
    /// Tired players left on court for lack of a fresh same-position sub.
    pub degenerate: u32,
}

#[derive(Debug, Clone)]
pub struct SubstitutionScheduler {
    config: SubstitutionConfig,
}

impl SubstitutionScheduler {
    pub fn new(config: SubstitutionConfig) -> Self {
        Self { config }
    }

    /// Possession-block checkpoint. Period starts are handled by the caller.
    pub fn is_checkpoint(&self, possessions_in_period: u32) -> bool {
        possessions_in_period > 0 && possessions_in_period % self.config.checkpoint_interval == 0
    }

    pub fn threshold(&self, player: &Player) -> f32 {
        self.config.fatigue_threshold.get(player.position)
    }

    /// Swaps every on-court player below their position threshold for the
    /// freshest eligible bench player at the same position. A player with no
    /// eligible replacement stays on.
    pub fn run_checkpoint(&self, team: &str, roster: &[Player], lineup: &mut Lineup) -> Result<CheckpointReport> {
        let mut report = CheckpointReport::default();

        for slot in 0..lineup.slots().len() {
            let out = lineup.slots()[slot];
            let tired = &roster[out];
            let threshold = self.threshold(tired);
            if tired.stamina_ratio() >= threshold {
                continue;
            }

            let min_ratio = threshold.max(self.config.min_replacement_ratio);
            let replacement = lineup
                .bench()
                .filter(|&i| roster[i].position == tired.position && roster[i].stamina_ratio() >= min_ratio)
                .max_by(|&a, &b| {
                    roster[a]
                        .stamina()
                        .total_cmp(&roster[b].stamina())
                        .then_with(|| b.cmp(&a))
                });

            match replacement {
                Some(incoming) => {
                    lineup.swap(team, out, incoming)?;
                    debug!(
                        team,
                        out = %tired.name,
                        incoming = %roster[incoming].name,
                        stamina = tired.stamina(),
                        "substitution"
                    );
                    report.substitutions.push(Substitution { out, incoming });
                }
                None => {
                    debug!(
                        team,
                        player = %tired.name,
                        position = %tired.position,
                        stamina = tired.stamina(),
                        "no eligible bench player, staying on court"
                    );
                    report.degenerate += 1;
                }
            }
        }

        Ok(report)
    }
}
