// File: ./src/storage.rs
use crate::engine::LearningEngine;
use crate::history::History;
use crate::model::{ColorFormat, Palette};
use anyhow::Result;
use directories::ProjectDirs;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DATA_DIR_ENV: &str = "HUELOOM_DATA_DIR";
const LEARNING_FILE: &str = "learning.json";
const SESSION_FILE: &str = "session.json";

/// What the front end shows between runs.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub current_palette: Palette,
    pub history: History,
    pub color_format: ColorFormat,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HUELOOM_DATA_DIR` if set, otherwise the platform data directory.
    pub fn default_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("com", "hueloom", "hueloom").map(|proj| proj.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(self.dir.join(file))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on `<path>.lock`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        lock_file.lock_exclusive()?;
        let result = f();
        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn read_locked(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(path, || Ok(Some(fs::read_to_string(path)?)))
    }

    pub fn save_learning(&self, engine: &LearningEngine) -> Result<()> {
        let path = self.path(LEARNING_FILE)?;
        let json = engine.save_to_json()?;
        Self::with_lock(&path, || Self::atomic_write(&path, &json))?;
        debug!("Saved learning data to {}", path.display());
        Ok(())
    }

    /// Restores the engine from disk. A missing file leaves it untouched; a
    /// corrupt one resets it.
    pub fn load_learning(&self, engine: &mut LearningEngine) -> Result<()> {
        let path = self.path(LEARNING_FILE)?;
        if let Some(json) = Self::read_locked(&path)? {
            engine.load_from_json(&json);
        }
        Ok(())
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        let path = self.path(SESSION_FILE)?;
        let json = serde_json::to_string_pretty(session)?;
        Self::with_lock(&path, || Self::atomic_write(&path, &json))?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Missing or unreadable session data gives an empty session.
    pub fn load_session(&self) -> Result<Session> {
        let path = self.path(SESSION_FILE)?;
        if let Some(json) = Self::read_locked(&path)? {
            match serde_json::from_str::<Session>(&json) {
                Ok(session) => return Ok(session),
                Err(e) => warn!("Ignoring corrupt session file {}: {}", path.display(), e),
            }
        }
        Ok(Session::default())
    }
}
