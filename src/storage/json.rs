//! Whole-file JSON documents.
//!
//! Each document is rewritten in full on save. Writes go to a sibling
//! temporary file that is then renamed over the target.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::StorageError;

/// A JSON file holding a single value of type `T`.
pub struct JsonDocument<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonDocument<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the document. Returns `false` if there was nothing to delete.
    pub fn remove(&self) -> Result<bool, StorageError> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!("Removed {:?}", self.path);
        Ok(true)
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: DeserializeOwned> JsonDocument<T> {
    /// Read the document. `None` if the file does not exist.
    pub fn load(&self) -> Result<Option<T>, StorageError> {
        if !self.path.exists() {
            debug!("No document at {:?}", self.path);
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let value = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded document from {:?}", self.path);
        Ok(Some(value))
    }
}

impl<T: DeserializeOwned + Default> JsonDocument<T> {
    pub fn load_or_default(&self) -> Result<T, StorageError> {
        Ok(self.load()?.unwrap_or_default())
    }
}

impl<T: Serialize> JsonDocument<T> {
    /// Replace the document with `value`.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!("Saved {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Roster, Session};
    use crate::storage::{SessionDocument, StorageConfig};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_document() {
        let dir = tempdir().unwrap();
        let doc: JsonDocument<Roster> = JsonDocument::new(dir.path().join("roster.json"));

        assert!(!doc.exists());
        assert!(doc.load().unwrap().is_none());
        assert!(doc.load_or_default().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_roster() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("nested"));
        let doc: JsonDocument<Roster> = JsonDocument::new(config.roster_path());

        let roster = Roster::from_names(["Alice", "Bob", "Cara"]).unwrap();
        doc.save(&roster).unwrap();

        let raw = fs::read_to_string(doc.path()).unwrap();
        let names: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(names, vec!["Alice", "Bob", "Cara"]);

        let loaded = doc.load().unwrap().unwrap();
        assert_eq!(loaded, roster);
        assert!(!doc.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_replaces_document() {
        let dir = tempdir().unwrap();
        let doc: JsonDocument<SessionDocument> =
            JsonDocument::new(dir.path().join("session.json"));

        doc.save(&SessionDocument::default()).unwrap();

        let session = Session {
            stats: [(Player::from("A"), Default::default())].into_iter().collect(),
            ..Default::default()
        };
        let replacement = SessionDocument::new(session, None);
        doc.save(&replacement).unwrap();

        let loaded = doc.load().unwrap().unwrap();
        assert_eq!(loaded, replacement);
    }

    #[test]
    fn test_load_corrupt_document_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let doc: JsonDocument<SessionDocument> = JsonDocument::new(path);
        assert!(matches!(doc.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_remove_document() {
        let dir = tempdir().unwrap();
        let doc: JsonDocument<Roster> = JsonDocument::new(dir.path().join("roster.json"));

        assert!(!doc.remove().unwrap());
        doc.save(&Roster::new()).unwrap();
        assert!(doc.remove().unwrap());
        assert!(!doc.exists());
    }
}
