//! Durable language preference stored at `~/.config/pageling/prefs.toml`.
//!
//! The visitor's chosen language survives sessions; everything else the
//! coordinator holds (cache, health, page snapshot) is per-session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use translate::Lang;

/// Persisted language preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LanguagePrefs {
    /// The last language the visitor picked, if any.
    pub language: Option<Lang>,
}

impl LanguagePrefs {
    /// Load from the default path, returning defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path, returning defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Default path: `~/.config/pageling/prefs.toml`.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("pageling")
            .join("prefs.toml")
    }
}
