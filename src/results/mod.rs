//! Recording match winners into per-player win/loss counters.
//!
//! Every operation validates before it mutates: on error neither the
//! schedule nor the stats have changed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Match, Outcome, Schedule, Session, Side, Stats};

/// Rejected result operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("Round index {index} out of range (schedule has {len} rounds)")]
    RoundOutOfRange { index: usize, len: usize },

    #[error("Match index {index} out of range (round {round_index} has {len} matches)")]
    MatchOutOfRange {
        round_index: usize,
        index: usize,
        len: usize,
    },

    #[error("Match {match_index} of round {round_index} already has a winner; clear it first")]
    AlreadyDecided {
        round_index: usize,
        match_index: usize,
    },

    #[error("Stats for {0} do not contain the result being cleared")]
    InconsistentStats(String),
}

/// Addresses one match by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRef {
    pub round_index: usize,
    pub match_index: usize,
}

/// Request to record the winner of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerInput {
    pub round_index: usize,
    pub match_index: usize,
    pub winning_team: Side,
}

impl WinnerInput {
    pub fn target(&self) -> MatchRef {
        MatchRef {
            round_index: self.round_index,
            match_index: self.match_index,
        }
    }
}

fn locate(schedule: &mut Schedule, target: MatchRef) -> Result<&mut Match, ResultError> {
    let len = schedule.len();
    let round = schedule
        .rounds_mut()
        .get_mut(target.round_index)
        .ok_or(ResultError::RoundOutOfRange {
            index: target.round_index,
            len,
        })?;

    let len = round.matches.len();
    round
        .matches
        .get_mut(target.match_index)
        .ok_or(ResultError::MatchOutOfRange {
            round_index: target.round_index,
            index: target.match_index,
            len,
        })
}

/// Checks that every counter the cleared result incremented is still there.
fn check_reversible(stats: &Stats, m: &Match, winner: Side) -> Result<(), ResultError> {
    for side in [winner, winner.opponent()] {
        for player in m.team(side).players() {
            let stat = stats.get_or_default(player);
            let counted = if side == winner {
                stat.wins
            } else {
                stat.losses
            };
            if counted == 0 || stat.games == 0 {
                return Err(ResultError::InconsistentStats(player.to_string()));
            }
        }
    }
    Ok(())
}

impl Session {
    /// Record `winning_team` as the winner of a match that has no result yet.
    pub fn record_winner(&mut self, input: WinnerInput) -> Result<(), ResultError> {
        let target = input.target();
        let m = locate(&mut self.schedule, target)?;

        if let Outcome::Decided(_) = m.winner {
            warn!(?target, "Match already has a winner");
            return Err(ResultError::AlreadyDecided {
                round_index: target.round_index,
                match_index: target.match_index,
            });
        }

        let winner = input.winning_team;
        for player in m.team(winner).players() {
            let stat = self.stats.entry(player);
            stat.wins += 1;
            stat.games += 1;
        }
        for player in m.team(winner.opponent()).players() {
            let stat = self.stats.entry(player);
            stat.losses += 1;
            stat.games += 1;
        }
        m.winner = Outcome::Decided(winner);

        info!(
            round = target.round_index,
            court = m.court,
            "Recorded winner: team {} ({})",
            winner,
            m.team(winner)
        );
        Ok(())
    }

    /// Undo a recorded result. Returns `false` when the match had none.
    pub fn clear_result(&mut self, target: MatchRef) -> Result<bool, ResultError> {
        let m = locate(&mut self.schedule, target)?;

        let winner = match m.winner {
            Outcome::Unplayed => return Ok(false),
            Outcome::Decided(side) => side,
        };

        if let Err(e) = check_reversible(&self.stats, m, winner) {
            warn!(?target, "Cannot clear result: {}", e);
            return Err(e);
        }

        for side in [winner, winner.opponent()] {
            for player in m.team(side).players() {
                if let Some(stat) = self.stats.get_mut(player) {
                    if side == winner {
                        stat.wins -= 1;
                    } else {
                        stat.losses -= 1;
                    }
                    stat.games -= 1;
                }
            }
        }
        m.winner = Outcome::Unplayed;

        info!(round = target.round_index, court = m.court, "Cleared result");
        Ok(true)
    }

    /// Remove every recorded winner and empty the stats.
    pub fn reset_results(&mut self) {
        for round in self.schedule.rounds_mut() {
            for m in &mut round.matches {
                m.winner = Outcome::Unplayed;
            }
        }
        self.stats.clear();
        info!("Reset all results");
    }
}
