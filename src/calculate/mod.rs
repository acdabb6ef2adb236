//! Derived views over a schedule and its results.
//!
//! - Per-player standings (scheduled games, wins, losses, win rate)
//! - Leaderboard of players who have recorded games
//! - Schedule summary totals
//! - Partnership report

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Player, PlayerStat, Schedule, Stats};
use crate::schedule::GenerationParams;

/// One player's line in the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub player: Player,
    /// Games assigned by the schedule
    pub scheduled: u32,
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
    /// Rounded win percentage, 0 with no games
    pub win_percent: u32,
}

/// Standings for every roster player, in roster order.
pub fn standings<'a>(
    roster: impl IntoIterator<Item = &'a Player>,
    schedule: &Schedule,
    stats: &Stats,
) -> Vec<Standing> {
    let final_count = schedule.final_game_count();

    roster
        .into_iter()
        .map(|player| {
            let stat = stats.get_or_default(player);
            Standing {
                player: player.clone(),
                scheduled: final_count
                    .and_then(|counts| counts.get(player))
                    .copied()
                    .unwrap_or(0),
                wins: stat.wins,
                losses: stat.losses,
                games: stat.games,
                win_percent: stat.win_percent(),
            }
        })
        .collect()
}

/// Players with at least one recorded game, best win rate first.
pub fn leaderboard(stats: &Stats) -> Vec<(&Player, PlayerStat)> {
    let mut rows: Vec<(&Player, PlayerStat)> = stats
        .iter()
        .filter(|(_, stat)| stat.games > 0)
        .map(|(player, stat)| (player, *stat))
        .collect();

    rows.sort_by(|a, b| b.1.win_percent().cmp(&a.1.win_percent()));
    rows
}

/// Headline numbers of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total_matches: usize,
    pub players: usize,
    pub rounds_requested: u32,
    pub rounds_produced: usize,
    pub courts: u32,
}

pub fn summarize(
    schedule: &Schedule,
    players: usize,
    params: GenerationParams,
) -> ScheduleSummary {
    ScheduleSummary {
        total_matches: schedule.total_matches(),
        players,
        rounds_requested: params.rounds,
        rounds_produced: schedule.len(),
        courts: params.courts,
    }
}

/// How often a pair of players were teammates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnershipEntry {
    pub players: [Player; 2],
    pub count: u32,
}

/// Every teammate pair in the schedule, most frequent first.
pub fn partnership_report(schedule: &Schedule) -> Vec<PartnershipEntry> {
    let mut counts: BTreeMap<[Player; 2], u32> = BTreeMap::new();

    for m in schedule.matches() {
        for team in [&m.team1, &m.team2] {
            let mut pair = team.players().clone();
            pair.sort();
            *counts.entry(pair).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<PartnershipEntry> = counts
        .into_iter()
        .map(|(players, count)| PartnershipEntry { players, count })
        .collect();
    // BTreeMap order already sorts by names; a stable sort keeps it on ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Match, Round, Team};
    use pretty_assertions::assert_eq;

    fn p(name: &str) -> Player {
        Player::from(name)
    }

    fn round(
        number: u32,
        teams: &[(&str, &str, &str, &str)],
        counts: &[(&str, u32)],
    ) -> Round {
        Round {
            round: number,
            matches: teams
                .iter()
                .enumerate()
                .map(|(i, &(a, b, c, d))| {
                    Match::new(i as u32 + 1, Team::new(p(a), p(b)), Team::new(p(c), p(d)))
                })
                .collect(),
            sit_out: vec![],
            game_count: counts.iter().map(|&(n, g)| (p(n), g)).collect(),
        }
    }

    fn stat(wins: u32, losses: u32) -> PlayerStat {
        PlayerStat {
            wins,
            losses,
            games: wins + losses,
        }
    }

    #[test]
    fn test_standings_uses_final_snapshot() {
        let schedule = Schedule::new(vec![
            round(1, &[("A", "B", "C", "D")], &[("A", 1), ("B", 1), ("C", 1), ("D", 1)]),
            round(2, &[("A", "C", "B", "E")], &[("A", 2), ("B", 2), ("C", 2), ("D", 1)]),
        ]);
        let stats: Stats = [(p("A"), stat(2, 1))].into_iter().collect();
        let roster = vec![p("A"), p("D"), p("Z")];

        let table = standings(&roster, &schedule, &stats);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].scheduled, 2);
        assert_eq!(table[0].win_percent, 67);
        assert_eq!(table[1].scheduled, 1);
        assert_eq!(table[1].games, 0);
        assert_eq!(table[2].scheduled, 0);
    }

    #[test]
    fn test_standings_empty_schedule() {
        let roster = vec![p("A")];
        let table = standings(&roster, &Schedule::default(), &Stats::new());
        assert_eq!(table[0].scheduled, 0);
        assert_eq!(table[0].win_percent, 0);
    }

    #[test]
    fn test_leaderboard_sorted_and_filtered() {
        let stats: Stats = [
            (p("Low"), stat(1, 3)),
            (p("High"), stat(3, 1)),
            (p("Idle"), PlayerStat::default()),
        ]
        .into_iter()
        .collect();

        let board = leaderboard(&stats);
        let names: Vec<&str> = board.iter().map(|(player, _)| player.as_str()).collect();
        assert_eq!(names, vec!["High", "Low"]);
        assert_eq!(board[0].1.win_percent(), 75);
    }

    #[test]
    fn test_summarize() {
        let schedule = Schedule::new(vec![round(
            1,
            &[("A", "B", "C", "D"), ("E", "F", "G", "H")],
            &[],
        )]);
        let summary = summarize(&schedule, 9, GenerationParams { rounds: 8, courts: 2 });

        assert_eq!(
            summary,
            ScheduleSummary {
                total_matches: 2,
                players: 9,
                rounds_requested: 8,
                rounds_produced: 1,
                courts: 2,
            }
        );
    }

    #[test]
    fn test_partnership_report_counts_unordered_pairs() {
        let schedule = Schedule::new(vec![
            round(1, &[("A", "B", "C", "D")], &[]),
            round(2, &[("B", "A", "C", "E")], &[]),
        ]);

        let report = partnership_report(&schedule);

        assert_eq!(report[0].players, [p("A"), p("B")]);
        assert_eq!(report[0].count, 2);
        assert_eq!(report.len(), 3);
        assert!(report[1..].iter().all(|e| e.count == 1));
    }
}
