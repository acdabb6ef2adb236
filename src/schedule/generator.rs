//! Multi-round schedule generation.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ledger::{Ledgers, PlayerIdx};
use super::planner::RoundPlanner;
use super::scorer::{MatchScorer, ScoringWeights};
use super::ScheduleError;
use crate::models::{Player, Schedule};

/// Minimum roster size for a doubles match.
pub const MIN_PLAYERS: usize = 4;

/// Requested shape of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub rounds: u32,
    pub courts: u32,
}

/// Accepted ranges for rounds and courts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBounds {
    pub min_rounds: u32,
    pub max_rounds: u32,
    pub min_courts: u32,
    pub max_courts: u32,
}

impl Default for GenerationBounds {
    fn default() -> Self {
        Self {
            min_rounds: 1,
            max_rounds: 12,
            min_courts: 1,
            max_courts: 8,
        }
    }
}

impl GenerationBounds {
    pub fn check(&self, params: GenerationParams) -> Result<(), ScheduleError> {
        if !(self.min_rounds..=self.max_rounds).contains(&params.rounds) {
            return Err(ScheduleError::Validation(format!(
                "rounds must be between {} and {}, got {}",
                self.min_rounds, self.max_rounds, params.rounds
            )));
        }
        if !(self.min_courts..=self.max_courts).contains(&params.courts) {
            return Err(ScheduleError::Validation(format!(
                "courts must be between {} and {}, got {}",
                self.min_courts, self.max_courts, params.courts
            )));
        }
        Ok(())
    }
}

/// Builds fair doubles schedules.
///
/// Each call owns fresh ledgers, so one generator can serve any number of
/// independent runs.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    weights: ScoringWeights,
    bounds: GenerationBounds,
}

impl ScheduleGenerator {
    pub fn new(weights: ScoringWeights, bounds: GenerationBounds) -> Self {
        Self { weights, bounds }
    }

    /// Generate a schedule using thread-local entropy.
    pub fn generate(
        &self,
        roster: &[Player],
        params: GenerationParams,
    ) -> Result<Schedule, ScheduleError> {
        self.generate_with_rng(roster, params, &mut rand::thread_rng())
    }

    /// Generate a schedule drawing all randomness from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        roster: &[Player],
        params: GenerationParams,
        rng: &mut R,
    ) -> Result<Schedule, ScheduleError> {
        if let Err(e) = self.validate(roster, params) {
            warn!("Refusing to generate schedule: {}", e);
            return Err(e);
        }

        let mut players = roster.to_vec();
        players.shuffle(rng);

        let mut ledgers = Ledgers::new(players.len());
        let scorer = MatchScorer::new(&self.weights, players.len());
        let planner = RoundPlanner::new(&players, scorer, params.courts);
        let mut schedule = Schedule::default();

        for number in 1..=params.rounds {
            let pool = priority_order(players.len(), &ledgers, rng);
            let round = planner.plan(number, pool, &mut ledgers, rng);
            if round.matches.is_empty() {
                debug!(round = number, "Round placed no matches, skipping");
                continue;
            }
            schedule.push(round);
        }

        log_partnerships(&players, &ledgers);
        info!(
            rounds = schedule.len(),
            matches = schedule.total_matches(),
            players = players.len(),
            "Generated schedule"
        );

        Ok(schedule)
    }

    /// Check roster and parameters without generating.
    pub fn validate(
        &self,
        roster: &[Player],
        params: GenerationParams,
    ) -> Result<(), ScheduleError> {
        self.bounds.check(params)?;

        let mut seen = HashSet::new();
        for player in roster {
            if player.as_str().trim().is_empty() {
                return Err(ScheduleError::Validation(
                    "player names must not be empty".to_string(),
                ));
            }
            if !seen.insert(player.as_str()) {
                return Err(ScheduleError::Validation(format!(
                    "duplicate player: {}",
                    player
                )));
            }
        }

        if roster.len() < MIN_PLAYERS {
            return Err(ScheduleError::Validation(format!(
                "need at least {} players to create matches, got {}",
                MIN_PLAYERS,
                roster.len()
            )));
        }
        Ok(())
    }
}

/// Roster indices ordered by ascending games played, ties in random order.
fn priority_order<R: Rng + ?Sized>(
    roster_size: usize,
    ledgers: &Ledgers,
    rng: &mut R,
) -> Vec<PlayerIdx> {
    let mut pool: Vec<PlayerIdx> = (0..roster_size).collect();
    pool.shuffle(rng);
    pool.sort_by_key(|&p| ledgers.workload.games_played(p));
    pool
}

fn log_partnerships(players: &[Player], ledgers: &Ledgers) {
    for (idx, player) in players.iter().enumerate() {
        let partners: Vec<String> = ledgers
            .partnerships
            .nonzero()
            .into_iter()
            .filter_map(|(pair, count)| {
                let [a, b] = pair.members();
                let other = if a == idx {
                    b
                } else if b == idx {
                    a
                } else {
                    return None;
                };
                Some(format!("{}:{}", players[other], count))
            })
            .collect();
        if !partners.is_empty() {
            debug!("{}: {}", player, partners.join(", "));
        }
    }
}
