//! Rounds and the full schedule.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Match, Player};

/// One scheduling round: simultaneous matches plus the players sitting out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Round number, starting at 1
    pub round: u32,

    /// One match per court used, in court order
    pub matches: Vec<Match>,

    /// Players not assigned to any match this round
    pub sit_out: Vec<Player>,

    /// Cumulative games played per player through this round (inclusive)
    pub game_count: BTreeMap<Player, u32>,
}

impl Round {
    /// Every player in this round, match players first then sit-outs.
    pub fn participants(&self) -> impl Iterator<Item = &Player> {
        self.matches
            .iter()
            .flat_map(Match::players)
            .chain(self.sit_out.iter())
    }
}

/// An ordered sequence of rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    rounds: Vec<Round>,
}

impl Schedule {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn rounds_mut(&mut self) -> &mut [Round] {
        &mut self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub(crate) fn push(&mut self, round: Round) {
        self.rounds.push(round);
    }

    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }

    /// Every match across all rounds, in round then court order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// Workload snapshot of the last round, if any.
    pub fn final_game_count(&self) -> Option<&BTreeMap<Player, u32>> {
        self.rounds.last().map(|r| &r.game_count)
    }
}
