//! Greedy placement of matches within one round.

use rand::Rng;
use tracing::debug;

use super::candidates::{enumerate, Candidate};
use super::ledger::{Ledgers, PairKey, PlayerIdx};
use super::scorer::MatchScorer;
use crate::models::{Match, Player, Round, Team};

/// Fills the courts of a round one match at a time, always taking the
/// best-scoring candidate from the players still unassigned.
#[derive(Debug, Clone)]
pub struct RoundPlanner<'a> {
    roster: &'a [Player],
    scorer: MatchScorer<'a>,
    courts: u32,
}

impl<'a> RoundPlanner<'a> {
    pub fn new(roster: &'a [Player], scorer: MatchScorer<'a>, courts: u32) -> Self {
        Self {
            roster,
            scorer,
            courts,
        }
    }

    /// Best candidate from `pool`, or `None` when fewer than four remain.
    ///
    /// Only a strictly higher score replaces the current best, so ties go to
    /// the earliest enumerated candidate.
    pub fn best_candidate<R: Rng + ?Sized>(
        &self,
        pool: &[PlayerIdx],
        ledgers: &Ledgers,
        rng: &mut R,
    ) -> Option<(Candidate, f64)> {
        let mut best: Option<(Candidate, f64)> = None;
        for candidate in enumerate(pool) {
            let score = self.scorer.score(&candidate, ledgers, rng);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best
    }

    /// Plan round `number` from `pool`, ordered by pick priority.
    ///
    /// Every committed match is booked into `ledgers` before the next one is
    /// chosen. The returned round may hold no matches; callers decide
    /// whether to keep it.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        number: u32,
        mut pool: Vec<PlayerIdx>,
        ledgers: &mut Ledgers,
        rng: &mut R,
    ) -> Round {
        let mut matches = Vec::new();

        while pool.len() >= 4 && (matches.len() as u32) < self.courts {
            let Some((candidate, score)) = self.best_candidate(&pool, ledgers, rng) else {
                debug!(round = number, "No valid matches found");
                break;
            };

            let court = matches.len() as u32 + 1;
            let placed = self.to_match(court, &candidate);
            debug!(
                round = number,
                court,
                score,
                "{} vs {}",
                placed.team1,
                placed.team2
            );

            let players = candidate.players();
            pool.retain(|p| !players.contains(p));
            ledgers.commit(candidate.team1, candidate.team2);
            matches.push(placed);
        }

        let sit_out: Vec<Player> = pool.iter().map(|&p| self.roster[p].clone()).collect();
        debug!(
            round = number,
            matches = matches.len(),
            sit_out = ?sit_out,
            "Round closed"
        );

        Round {
            round: number,
            matches,
            sit_out,
            game_count: self
                .roster
                .iter()
                .zip(ledgers.workload.as_slice())
                .map(|(player, &games)| (player.clone(), games))
                .collect(),
        }
    }

    fn team(&self, pair: PairKey) -> Team {
        let [a, b] = pair.members();
        Team::new(self.roster[a].clone(), self.roster[b].clone())
    }

    fn to_match(&self, court: u32, candidate: &Candidate) -> Match {
        Match::new(court, self.team(candidate.team1), self.team(candidate.team2))
    }
}
