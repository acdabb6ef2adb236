//! Fair doubles schedule generation.
//!
//! Rounds are filled greedily: for every free court the planner scores all
//! two-team splits of the unassigned players and commits the best one. The
//! objective, in order of weight:
//! - equal playing time (fewest games played first)
//! - no repeated partnerships (cubic penalty)
//! - no repeated team-vs-team matchups
//! - teams of similar workload
//!
//! A small jitter breaks ties so identical inputs give varied schedules.

pub mod candidates;
pub mod generator;
pub mod ledger;
pub mod planner;
pub mod scorer;

use thiserror::Error;

pub use candidates::Candidate;
pub use generator::{GenerationBounds, GenerationParams, ScheduleGenerator, MIN_PLAYERS};
pub use ledger::{Ledgers, MatchupHistory, PairKey, PartnershipLedger, PlayerIdx, WorkloadLedger};
pub use planner::RoundPlanner;
pub use scorer::{MatchScorer, ScoringWeights};

/// Errors that refuse schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid schedule request: {0}")]
    Validation(String),
}
