use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fleet_logging::{fleet_error, fleet_info, fleet_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const PREFS_FILENAME: &str = ".fleetsel_prefs.ron";

/// View preferences carried between runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Preferences {
    pub expression: String,
    pub fuzzy: bool,
    pub items_per_page: Option<usize>,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("preferences directory missing or not writable: {0}")]
    Dir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub(crate) fn load_preferences(dir: &Path) -> Preferences {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            fleet_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    match ron::from_str(&content) {
        Ok(prefs) => {
            fleet_info!("Loaded preferences from {:?}", path);
            prefs
        }
        Err(err) => {
            fleet_warn!("Failed to parse preferences from {:?}: {}", path, err);
            Preferences::default()
        }
    }
}

pub(crate) fn save_preferences(dir: &Path, prefs: &Preferences) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            fleet_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(PREFS_FILENAME, &content) {
        fleet_error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir).map_err(|e| PersistError::Dir(e.to_string()))?;
        }

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_preferences(temp.path()), Preferences::default());
    }

    #[test]
    fn saved_preferences_load_back() {
        let temp = TempDir::new().unwrap();
        let prefs = Preferences {
            expression: "oss[01-04,07],mds1".to_string(),
            fuzzy: true,
            items_per_page: Some(25),
        };

        save_preferences(temp.path(), &prefs);
        assert_eq!(load_preferences(temp.path()), prefs);

        let replaced = Preferences::default();
        save_preferences(temp.path(), &replaced);
        assert_eq!(load_preferences(temp.path()), replaced);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PREFS_FILENAME), "(expression: ").unwrap();
        assert_eq!(load_preferences(temp.path()), Preferences::default());
    }

    #[test]
    fn write_into_file_path_fails_cleanly() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("not_a_dir");
        fs::write(&file_path, "x").unwrap();

        let writer = AtomicFileWriter::new(file_path.clone());
        assert!(writer.write(PREFS_FILENAME, "data").is_err());
        assert!(!file_path.with_file_name(PREFS_FILENAME).exists());
    }
}
