//! # Preferences
//!
//! Small key/value store persisted to `~/.waview/preferences.json`.
//! Each value is stored JSON-encoded under a fixed key; today the only key is
//! the theme flag:
//!
//! ```json
//! { "darkMode": true }
//! ```
//!
//! Loaded once at startup, saved whenever the theme is toggled. Writes use
//! atomic rename (write `.tmp`, then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::core::config::app_dir;
use crate::core::state::Theme;

pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Default)]
pub struct Preferences {
    /// Where to save. `None` keeps preferences in memory only.
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        app_dir().map(|d| d.join("preferences.json"))
    }

    /// Loads from the default location.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                warn!("Could not determine home directory, preferences won't persist");
                Self::default()
            }
        }
    }

    /// Loads from `path`. A missing or unreadable file yields empty preferences.
    pub fn load_from(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Map<String, Value>>(&json) {
                Ok(values) => {
                    debug!("Loaded preferences from {}", path.display());
                    values
                }
                Err(e) => {
                    warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!("Failed to read preferences {}: {}", path.display(), e);
                Map::new()
            }
        };
        Self {
            path: Some(path),
            values,
        }
    }

    /// Dark mode unless a boolean `false` was saved.
    pub fn dark_mode(&self) -> bool {
        self.values
            .get(DARK_MODE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.values.insert(DARK_MODE_KEY.to_string(), Value::Bool(dark));
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set_dark_mode(theme.is_dark());
    }

    pub fn save(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(path, &self.values)?;
        info!("Saved preferences to {}", path.display());
        Ok(())
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json(path: &Path, data: &Map<String, Value>) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
