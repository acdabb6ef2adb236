//! Player identity and roster management.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised when editing a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Player already on roster: {0}")]
    Duplicate(String),
}

/// A player, identified by display name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player(String);

impl Player {
    /// Create a player from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

impl From<String> for Player {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Player {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Ordered list of unique players.
///
/// Order is only used for display and as the starting point of the
/// generation shuffle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from names, rejecting empties and duplicates.
    pub fn from_names<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(Player::new(name))?;
        }
        Ok(roster)
    }

    /// Add a single player.
    pub fn add(&mut self, player: Player) -> Result<(), RosterError> {
        let trimmed = player.as_str().trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(trimmed) {
            return Err(RosterError::Duplicate(trimmed.to_string()));
        }
        self.players.push(Player::from(trimmed));
        Ok(())
    }

    /// Add every name from a comma-separated list.
    ///
    /// Blank entries and names already present are skipped. Returns the
    /// players that were actually added, in input order.
    pub fn add_names(&mut self, input: &str) -> Vec<Player> {
        let mut added = Vec::new();
        for name in input.split(',').map(str::trim) {
            if name.is_empty() || self.contains(name) {
                continue;
            }
            let player = Player::from(name);
            self.players.push(player.clone());
            added.push(player);
        }
        added
    }

    /// Remove a player by name. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.as_str() != name);
        self.players.len() != before
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn as_slice(&self) -> &[Player] {
        &self.players
    }
}
