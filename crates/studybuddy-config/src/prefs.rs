//! Persisted UI preferences.
//!
//! A best-effort key-value store for the few toggles the chat front end
//! remembers across runs. A missing or corrupt file yields defaults; a
//! failed save is reported but never fatal to the caller's session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studybuddy_common::StudyBuddyError;
use tracing::{debug, warn};

/// Color theme of the chat front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub schedule_expanded: bool,
    pub suggestions_hidden: bool,
}

/// JSON file holding [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data dir, e.g. `~/.local/share/studybuddy/`.
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::new(d.join("studybuddy").join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences, falling back to defaults on any problem.
    pub fn load(&self) -> Preferences {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Preferences::default(),
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read preferences: {e}");
                return Preferences::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "ignoring corrupt preferences: {e}");
            Preferences::default()
        })
    }

    /// Write preferences atomically (temp file, then rename).
    pub fn save(&self, prefs: &Preferences) -> Result<(), StudyBuddyError> {
        let json = serde_json::to_string_pretty(prefs)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(&self.path, &json)?;
        }

        debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    /// Load, apply `f`, save. Returns the updated preferences even when
    /// the save fails, since the in-memory value is still authoritative.
    pub fn update(&self, f: impl FnOnce(&mut Preferences)) -> Preferences {
        let mut prefs = self.load();
        f(&mut prefs);
        if let Err(e) = self.save(&prefs) {
            warn!("failed to save preferences: {e}");
        }
        prefs
    }
}
