//! Per-player result counters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Player;

/// Win/loss record for one player. `games == wins + losses` always holds
/// for values produced by the result ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
}

impl PlayerStat {
    pub fn is_consistent(&self) -> bool {
        self.games == self.wins + self.losses
    }

    /// Win percentage rounded to the nearest whole number; 0 with no games.
    pub fn win_percent(&self) -> u32 {
        if self.games == 0 {
            0
        } else {
            (f64::from(self.wins) * 100.0 / f64::from(self.games)).round() as u32
        }
    }
}

/// Statistics ledger keyed by player name.
///
/// Equality compares by value: a row of all zeros equals an absent row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<Player, PlayerStat>);

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: &Player) -> Option<&PlayerStat> {
        self.0.get(player)
    }

    /// Stats for a player, zero if never recorded.
    pub fn get_or_default(&self, player: &Player) -> PlayerStat {
        self.get(player).copied().unwrap_or_default()
    }

    pub(crate) fn entry(&mut self, player: &Player) -> &mut PlayerStat {
        self.0.entry(player.clone()).or_default()
    }

    pub(crate) fn get_mut(&mut self, player: &Player) -> Option<&mut PlayerStat> {
        self.0.get_mut(player)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Player, &PlayerStat)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn counted(&self) -> impl Iterator<Item = (&Player, &PlayerStat)> {
        self.0.iter().filter(|(_, stat)| **stat != PlayerStat::default())
    }

    /// True when every entry satisfies `games == wins + losses`.
    pub fn is_consistent(&self) -> bool {
        self.0.values().all(PlayerStat::is_consistent)
    }
}

impl PartialEq for Stats {
    fn eq(&self, other: &Self) -> bool {
        self.counted().eq(other.counted())
    }
}

impl Eq for Stats {}

impl FromIterator<(Player, PlayerStat)> for Stats {
    fn from_iter<I: IntoIterator<Item = (Player, PlayerStat)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
