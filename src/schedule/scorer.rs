//! Match scoring. Higher is better.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::candidates::Candidate;
use super::ledger::Ledgers;

/// Tunable weights of the match objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Per roster member, the base of the workload bonus
    #[serde(default = "default_workload_base")]
    pub workload_base: f64,

    /// Subtracted per game already played by any of the four players
    #[serde(default = "default_workload_per_game")]
    pub workload_per_game: f64,

    /// Multiplier on the cube of a team's previous partnerships
    #[serde(default = "default_partnership_cubic")]
    pub partnership_cubic: f64,

    /// Flat penalty per team that has partnered before
    #[serde(default = "default_partnership_repeat")]
    pub partnership_repeat: f64,

    /// Bonus when the two teams have never met
    #[serde(default = "default_fresh_matchup_bonus")]
    pub fresh_matchup_bonus: f64,

    /// Penalty when the two teams have met before
    #[serde(default = "default_repeat_matchup_penalty")]
    pub repeat_matchup_penalty: f64,

    /// Multiplier on the games difference between the two teams
    #[serde(default = "default_balance")]
    pub balance: f64,

    /// Upper bound (exclusive) of the uniform tie-break jitter
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

fn default_workload_base() -> f64 {
    10.0
}

fn default_workload_per_game() -> f64 {
    5.0
}

fn default_partnership_cubic() -> f64 {
    50.0
}

fn default_partnership_repeat() -> f64 {
    25.0
}

fn default_fresh_matchup_bonus() -> f64 {
    30.0
}

fn default_repeat_matchup_penalty() -> f64 {
    15.0
}

fn default_balance() -> f64 {
    2.0
}

fn default_jitter() -> f64 {
    3.0
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            workload_base: default_workload_base(),
            workload_per_game: default_workload_per_game(),
            partnership_cubic: default_partnership_cubic(),
            partnership_repeat: default_partnership_repeat(),
            fresh_matchup_bonus: default_fresh_matchup_bonus(),
            repeat_matchup_penalty: default_repeat_matchup_penalty(),
            balance: default_balance(),
            jitter: default_jitter(),
        }
    }
}

impl ScoringWeights {
    /// Name of the first negative weight, if any.
    pub fn first_negative(&self) -> Option<&'static str> {
        [
            ("workload_base", self.workload_base),
            ("workload_per_game", self.workload_per_game),
            ("partnership_cubic", self.partnership_cubic),
            ("partnership_repeat", self.partnership_repeat),
            ("fresh_matchup_bonus", self.fresh_matchup_bonus),
            ("repeat_matchup_penalty", self.repeat_matchup_penalty),
            ("balance", self.balance),
            ("jitter", self.jitter),
        ]
        .into_iter()
        .find(|(_, w)| *w < 0.0 || w.is_nan())
        .map(|(name, _)| name)
    }
}

/// Scores candidates against the current ledgers of a run.
#[derive(Debug, Clone)]
pub struct MatchScorer<'w> {
    weights: &'w ScoringWeights,
    roster_size: usize,
}

impl<'w> MatchScorer<'w> {
    pub fn new(weights: &'w ScoringWeights, roster_size: usize) -> Self {
        Self {
            weights,
            roster_size,
        }
    }

    /// Deterministic part of the score.
    pub fn base_score(&self, candidate: &Candidate, ledgers: &Ledgers) -> f64 {
        let w = self.weights;
        let team1_games = f64::from(ledgers.workload.team_games(candidate.team1));
        let team2_games = f64::from(ledgers.workload.team_games(candidate.team2));

        let mut score = self.roster_size as f64 * w.workload_base
            - (team1_games + team2_games) * w.workload_per_game;

        for team in [candidate.team1, candidate.team2] {
            let partnered = ledgers.partnerships.count(team);
            score -= f64::from(partnered).powi(3) * w.partnership_cubic;
            if partnered > 0 {
                score -= w.partnership_repeat;
            }
        }

        if ledgers.matchups.has_played(candidate.team1, candidate.team2) {
            score -= w.repeat_matchup_penalty;
        } else {
            score += w.fresh_matchup_bonus;
        }

        score -= (team1_games - team2_games).abs() * w.balance;
        score
    }

    /// Full score including a uniform jitter in `[0, jitter)`.
    pub fn score<R: Rng + ?Sized>(
        &self,
        candidate: &Candidate,
        ledgers: &Ledgers,
        rng: &mut R,
    ) -> f64 {
        self.base_score(candidate, ledgers) + self.jitter(rng)
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.weights.jitter > 0.0 {
            rng.gen::<f64>() * self.weights.jitter
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ledger::PairKey;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(a: usize, b: usize, c: usize, d: usize) -> Candidate {
        Candidate {
            team1: PairKey::new(a, b),
            team2: PairKey::new(c, d),
        }
    }

    #[test]
    fn test_default_weights() {
        let w = ScoringWeights::default();
        assert_eq!(w.workload_base, 10.0);
        assert_eq!(w.workload_per_game, 5.0);
        assert_eq!(w.partnership_cubic, 50.0);
        assert_eq!(w.partnership_repeat, 25.0);
        assert_eq!(w.fresh_matchup_bonus, 30.0);
        assert_eq!(w.repeat_matchup_penalty, 15.0);
        assert_eq!(w.balance, 2.0);
        assert_eq!(w.jitter, 3.0);
        assert_eq!(w.first_negative(), None);
    }

    #[test]
    fn test_fresh_state_score() {
        let weights = ScoringWeights::default();
        let scorer = MatchScorer::new(&weights, 8);
        let ledgers = Ledgers::new(8);

        // 8 * 10 workload bonus + 30 fresh matchup
        assert_eq!(scorer.base_score(&candidate(0, 1, 2, 3), &ledgers), 110.0);
    }

    #[test]
    fn test_workload_and_balance_terms() {
        let weights = ScoringWeights::default();
        let scorer = MatchScorer::new(&weights, 8);
        let mut ledgers = Ledgers::new(8);
        ledgers.workload.increment(0);
        ledgers.workload.increment(0);
        ledgers.workload.increment(1);

        // 80 - 3 * 5 + 30 - |3 - 0| * 2
        assert_eq!(scorer.base_score(&candidate(0, 1, 2, 3), &ledgers), 89.0);
    }

    #[test]
    fn test_partnership_penalty_is_cubic() {
        let weights = ScoringWeights::default();
        let scorer = MatchScorer::new(&weights, 4);
        let mut ledgers = Ledgers::new(4);
        let fresh = scorer.base_score(&candidate(0, 1, 2, 3), &ledgers);

        ledgers.partnerships.record(PairKey::new(0, 1));
        let once = scorer.base_score(&candidate(0, 1, 2, 3), &ledgers);
        assert_eq!(fresh - once, 50.0 + 25.0);

        ledgers.partnerships.record(PairKey::new(0, 1));
        let twice = scorer.base_score(&candidate(0, 1, 2, 3), &ledgers);
        assert_eq!(fresh - twice, 8.0 * 50.0 + 25.0);
    }

    #[test]
    fn test_repeat_matchup_either_side() {
        let weights = ScoringWeights::default();
        let scorer = MatchScorer::new(&weights, 4);
        let mut ledgers = Ledgers::new(4);
        ledgers.matchups.record(PairKey::new(2, 3), PairKey::new(0, 1));

        // 40 - 15
        assert_eq!(scorer.base_score(&candidate(1, 0, 3, 2), &ledgers), 25.0);
    }

    #[test]
    fn test_jitter_bounded() {
        let weights = ScoringWeights::default();
        let scorer = MatchScorer::new(&weights, 4);
        let ledgers = Ledgers::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        let c = candidate(0, 1, 2, 3);
        let base = scorer.base_score(&c, &ledgers);

        for _ in 0..100 {
            let s = scorer.score(&c, &ledgers, &mut rng);
            assert!(s >= base && s < base + 3.0);
        }
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let weights = ScoringWeights {
            jitter: 0.0,
            ..ScoringWeights::default()
        };
        let scorer = MatchScorer::new(&weights, 4);
        let ledgers = Ledgers::new(4);
        let mut rng = StdRng::seed_from_u64(1);
        let c = candidate(0, 1, 2, 3);

        assert_eq!(
            scorer.score(&c, &ledgers, &mut rng),
            scorer.base_score(&c, &ledgers)
        );
    }

    #[test]
    fn test_first_negative_weight() {
        let weights = ScoringWeights {
            balance: -1.0,
            ..ScoringWeights::default()
        };
        assert_eq!(weights.first_negative(), Some("balance"));
    }
}
