//! Per-run bookkeeping: workload, partnerships and matchup history.
//!
//! Players are addressed by their index into the roster slice the run was
//! started with. Indices outside the roster are a caller bug and panic.

use std::collections::{HashMap, HashSet};

/// A roster index.
pub type PlayerIdx = usize;

/// Two teammates as roster indices, stored low-high so `(a, b)` and
/// `(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(PlayerIdx, PlayerIdx);

impl PairKey {
    pub fn new(a: PlayerIdx, b: PlayerIdx) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn members(&self) -> [PlayerIdx; 2] {
        [self.0, self.1]
    }
}

impl From<[PlayerIdx; 2]> for PairKey {
    fn from([a, b]: [PlayerIdx; 2]) -> Self {
        Self::new(a, b)
    }
}

/// Games played per player during one generation run.
#[derive(Debug, Clone)]
pub struct WorkloadLedger {
    games: Vec<u32>,
}

impl WorkloadLedger {
    pub fn new(roster_size: usize) -> Self {
        Self {
            games: vec![0; roster_size],
        }
    }

    pub fn games_played(&self, player: PlayerIdx) -> u32 {
        self.games[player]
    }

    pub fn increment(&mut self, player: PlayerIdx) {
        self.games[player] += 1;
    }

    /// Combined games of both members of a team.
    pub fn team_games(&self, team: PairKey) -> u32 {
        team.members().iter().map(|&p| self.games_played(p)).sum()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.games
    }
}

/// How often each unordered pair has been teammates.
#[derive(Debug, Clone, Default)]
pub struct PartnershipLedger {
    counts: HashMap<PairKey, u32>,
}

impl PartnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, team: PairKey) -> u32 {
        self.counts.get(&team).copied().unwrap_or(0)
    }

    pub fn record(&mut self, team: PairKey) {
        *self.counts.entry(team).or_insert(0) += 1;
    }

    /// Non-zero partnerships, sorted by pair.
    pub fn nonzero(&self) -> Vec<(PairKey, u32)> {
        let mut pairs: Vec<_> = self
            .counts
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&k, &n)| (k, n))
            .collect();
        pairs.sort();
        pairs
    }
}

/// Every team-vs-team pairing scheduled so far, in order.
#[derive(Debug, Clone, Default)]
pub struct MatchupHistory {
    history: Vec<(PairKey, PairKey)>,
    seen: HashSet<(PairKey, PairKey)>,
}

impl MatchupHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: PairKey, b: PairKey) -> (PairKey, PairKey) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Whether these two teams have met, on either side.
    pub fn has_played(&self, team1: PairKey, team2: PairKey) -> bool {
        self.seen.contains(&Self::key(team1, team2))
    }

    pub fn record(&mut self, team1: PairKey, team2: PairKey) {
        self.history.push((team1, team2));
        self.seen.insert(Self::key(team1, team2));
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// All ledgers of one generation run.
#[derive(Debug, Clone)]
pub struct Ledgers {
    pub workload: WorkloadLedger,
    pub partnerships: PartnershipLedger,
    pub matchups: MatchupHistory,
}

impl Ledgers {
    pub fn new(roster_size: usize) -> Self {
        Self {
            workload: WorkloadLedger::new(roster_size),
            partnerships: PartnershipLedger::new(),
            matchups: MatchupHistory::new(),
        }
    }

    /// Book a committed match against every ledger.
    pub fn commit(&mut self, team1: PairKey, team2: PairKey) {
        for p in team1.members().into_iter().chain(team2.members()) {
            self.workload.increment(p);
        }
        self.partnerships.record(team1);
        self.partnerships.record(team2);
        self.matchups.record(team1, team2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_unordered() {
        assert_eq!(PairKey::new(3, 1), PairKey::new(1, 3));
        assert_eq!(PairKey::new(3, 1).members(), [1, 3]);
    }

    #[test]
    fn test_workload_starts_at_zero() {
        let mut workload = WorkloadLedger::new(4);
        assert_eq!(workload.as_slice(), &[0, 0, 0, 0]);

        workload.increment(2);
        workload.increment(2);
        assert_eq!(workload.games_played(2), 2);
        assert_eq!(workload.team_games(PairKey::new(2, 3)), 2);
    }

    #[test]
    #[should_panic]
    fn test_workload_out_of_roster_panics() {
        let workload = WorkloadLedger::new(4);
        workload.games_played(4);
    }

    #[test]
    fn test_partnership_symmetric() {
        let mut partnerships = PartnershipLedger::new();
        partnerships.record(PairKey::new(0, 1));
        partnerships.record(PairKey::new(1, 0));

        assert_eq!(partnerships.count(PairKey::new(0, 1)), 2);
        assert_eq!(partnerships.count(PairKey::new(0, 2)), 0);
        assert_eq!(partnerships.nonzero(), vec![(PairKey::new(0, 1), 2)]);
    }

    #[test]
    fn test_matchup_either_side() {
        let mut matchups = MatchupHistory::new();
        matchups.record(PairKey::new(0, 1), PairKey::new(2, 3));

        assert!(matchups.has_played(PairKey::new(0, 1), PairKey::new(2, 3)));
        assert!(matchups.has_played(PairKey::new(3, 2), PairKey::new(1, 0)));
        assert!(!matchups.has_played(PairKey::new(0, 2), PairKey::new(1, 3)));
        assert_eq!(matchups.len(), 1);
    }

    #[test]
    fn test_commit_updates_everything() {
        let mut ledgers = Ledgers::new(5);
        ledgers.commit(PairKey::new(0, 1), PairKey::new(2, 3));

        assert_eq!(ledgers.workload.as_slice(), &[1, 1, 1, 1, 0]);
        assert_eq!(ledgers.partnerships.count(PairKey::new(1, 0)), 1);
        assert_eq!(ledgers.partnerships.count(PairKey::new(2, 3)), 1);
        assert!(ledgers
            .matchups
            .has_played(PairKey::new(2, 3), PairKey::new(0, 1)));
    }
}
