//! Configuration file support.
//!
//! ```toml
//! dir = "/home/me/notes"
//! editor = "code --wait"
//!
//! [session]
//! autosave_delay_ms = 2000
//! analysis_delay_ms = 1000
//! ```

use anyhow::{Context, Result};
use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;

use crate::session::{DEFAULT_ANALYSIS_DELAY_MS, DEFAULT_AUTOSAVE_DELAY_MS, SessionConfig};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NOTEKEEP_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default data directory
    pub dir: Option<PathBuf>,

    /// Editor command for editing notes
    pub editor: Option<String>,

    /// Debounce delays for editing sessions
    #[serde(default)]
    pub session: SessionSettings,
}

/// The `[session]` table. Delays are in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSettings {
    pub autosave_delay_ms: u32,
    pub analysis_delay_ms: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS as u32,
            analysis_delay_ms: DEFAULT_ANALYSIS_DELAY_MS as u32,
        }
    }
}

impl Config {
    /// Loads the config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// `$NOTEKEEP_CONFIG` if set, else `notekeep/config.toml` under the
    /// platform config directory.
    pub fn config_path() -> PathBuf {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(explicit);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notekeep")
            .join("config.toml")
    }

    /// Where the note database lives: `--dir`, then the config file, then
    /// the platform data directory, then the working directory.
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("notekeep")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Editor command: config, `$EDITOR`, `$VISUAL`, then `vi`.
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            autosave_delay: Duration::milliseconds(self.session.autosave_delay_ms.into()),
            analysis_delay: Duration::milliseconds(self.session.analysis_delay_ms.into()),
        }
    }
}
