//! Filesystem persistence for the roster and the current session.
//!
//! Both live as pretty-printed JSON documents under the data directory:
//! - `roster.json`: array of player names
//! - `session.json`: the schedule, its stats and generation metadata

pub mod json;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{Roster, Session};
use crate::schedule::GenerationParams;

pub use json::JsonDocument;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join("roster.json")
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    pub fn roster_document(&self) -> JsonDocument<Roster> {
        JsonDocument::new(self.roster_path())
    }

    pub fn session_document(&self) -> JsonDocument<SessionDocument> {
        JsonDocument::new(self.session_path())
    }

    /// Empty the roster and discard the schedule and stats built from it.
    pub fn clear_players(&self) -> Result<(), StorageError> {
        self.roster_document().save(&Roster::new())?;
        let removed = self.session_document().remove()?;
        info!(session_removed = removed, "Cleared all players");
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// A saved session plus when and how its schedule was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    pub saved_at: DateTime<Utc>,

    /// Parameters of the generation that produced the schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<GenerationParams>,

    #[serde(flatten)]
    pub session: Session,
}

impl SessionDocument {
    pub fn new(session: Session, params: Option<GenerationParams>) -> Self {
        Self {
            saved_at: Utc::now(),
            params,
            session,
        }
    }
}

impl Default for SessionDocument {
    fn default() -> Self {
        Self::new(Session::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerStat, Schedule};
    use tempfile::tempdir;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.roster_path(), PathBuf::from("/data/roster.json"));
        assert_eq!(config.session_path(), PathBuf::from("/data/session.json"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_clear_players_drops_session() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path().to_path_buf());

        let roster = Roster::from_names(["A", "B", "C", "D"]).unwrap();
        config.roster_document().save(&roster).unwrap();
        let session = Session {
            schedule: Schedule::default(),
            stats: [(
                Player::from("A"),
                PlayerStat {
                    wins: 1,
                    losses: 0,
                    games: 1,
                },
            )]
            .into_iter()
            .collect(),
        };
        config
            .session_document()
            .save(&SessionDocument::new(session, None))
            .unwrap();

        config.clear_players().unwrap();

        assert!(config.roster_document().load().unwrap().unwrap().is_empty());
        assert!(config.session_document().load().unwrap().is_none());
    }

    #[test]
    fn test_clear_players_without_session() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("fresh"));

        config.clear_players().unwrap();

        assert!(config.roster_document().exists());
        assert!(!config.session_document().exists());
    }

    #[test]
    fn test_session_document_flattens_session() {
        let doc = SessionDocument::default();
        let value = serde_json::to_value(&doc).unwrap();

        assert!(value.get("saved_at").is_some());
        assert_eq!(value["schedule"], serde_json::json!([]));
        assert_eq!(value["stats"], serde_json::json!({}));
        assert!(value.get("params").is_none());
    }

    #[test]
    fn test_session_document_without_metadata() {
        let doc: SessionDocument = serde_json::from_str(
            r#"{"saved_at": "2024-03-01T10:00:00Z", "schedule": [], "stats": {}}"#,
        )
        .unwrap();

        assert!(doc.params.is_none());
        assert!(doc.session.schedule.is_empty());
    }
}
