//! Teams, match outcomes and matches on a court.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::Player;

/// An unordered pair of teammates.
///
/// Equality and hashing ignore the order the two players were listed in,
/// while serialization keeps it. Deserialization rejects a player partnered
/// with themselves.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Team([Player; 2]);

impl Team {
    pub fn new(first: Player, second: Player) -> Self {
        Self([first, second])
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.0
    }

    pub fn contains(&self, player: &Player) -> bool {
        self.0.contains(player)
    }

    fn sorted(&self) -> [&Player; 2] {
        let [a, b] = &self.0;
        if a <= b {
            [a, b]
        } else {
            [b, a]
        }
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<'de> Deserialize<'de> for Team {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [first, second] = <[Player; 2]>::deserialize(deserializer)?;
        if first == second {
            return Err(D::Error::custom(format!("team lists {} twice", first)));
        }
        Ok(Self([first, second]))
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} & {}", self.0[0], self.0[1])
    }
}

/// Which side of a match: serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        match side {
            Side::Team1 => 1,
            Side::Team2 => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Side::Team1),
            2 => Ok(Side::Team2),
            other => Err(format!("team must be 1 or 2, got {}", other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Result state of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Side>", into = "Option<Side>")]
pub enum Outcome {
    #[default]
    Unplayed,
    Decided(Side),
}

impl Outcome {
    pub fn is_unplayed(&self) -> bool {
        matches!(self, Outcome::Unplayed)
    }
}

impl From<Option<Side>> for Outcome {
    fn from(side: Option<Side>) -> Self {
        side.map_or(Outcome::Unplayed, Outcome::Decided)
    }
}

impl From<Outcome> for Option<Side> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unplayed => None,
            Outcome::Decided(side) => Some(side),
        }
    }
}

/// A doubles match on one court.
///
/// Deserialization rejects a player appearing on both teams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub team1: Team,
    pub team2: Team,
    pub court: u32,
    #[serde(default, skip_serializing_if = "Outcome::is_unplayed")]
    pub winner: Outcome,
}

impl<'de> Deserialize<'de> for Match {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            team1: Team,
            team2: Team,
            court: u32,
            #[serde(default)]
            winner: Outcome,
        }

        let fields = Fields::deserialize(deserializer)?;
        let m = Match {
            team1: fields.team1,
            team2: fields.team2,
            court: fields.court,
            winner: fields.winner,
        };

        let repeated = {
            let mut seen = HashSet::new();
            m.players().find(|p| !seen.insert(*p)).cloned()
        };
        if let Some(repeated) = repeated {
            return Err(D::Error::custom(format!(
                "{} plays on both teams of court {}",
                repeated, m.court
            )));
        }
        Ok(m)
    }
}

impl Match {
    pub fn new(court: u32, team1: Team, team2: Team) -> Self {
        Self {
            team1,
            team2,
            court,
            winner: Outcome::Unplayed,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    /// All four players, team1 first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team1.players().iter().chain(self.team2.players().iter())
    }

    pub fn involves(&self, player: &Player) -> bool {
        self.team1.contains(player) || self.team2.contains(player)
    }
}
