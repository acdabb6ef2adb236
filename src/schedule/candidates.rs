//! Enumeration of every two-team split available from a pool.

use super::ledger::{PairKey, PlayerIdx};

/// One possible match: two disjoint teams drawn from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub team1: PairKey,
    pub team2: PairKey,
}

impl Candidate {
    pub fn players(&self) -> [PlayerIdx; 4] {
        let [a, b] = self.team1.members();
        let [c, d] = self.team2.members();
        [a, b, c, d]
    }
}

/// Every (team1, team2) pair of disjoint teams from `pool`.
///
/// team1 takes pool positions `i < j`, team2 positions `k < l` with neither
/// equal to `i` or `j`. Mirrored splits appear twice. Yields nothing when
/// fewer than four players remain.
pub fn enumerate(pool: &[PlayerIdx]) -> impl Iterator<Item = Candidate> + '_ {
    let n = if pool.len() >= 4 { pool.len() } else { 0 };

    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| {
            (0..n)
                .filter(move |&k| k != i && k != j)
                .flat_map(move |k| {
                    (k + 1..n)
                        .filter(move |&l| l != i && l != j)
                        .map(move |l| Candidate {
                            team1: PairKey::new(pool[i], pool[j]),
                            team2: PairKey::new(pool[k], pool[l]),
                        })
                })
        })
    })
}
