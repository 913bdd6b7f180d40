use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardDefaults;
use crate::error::{Error, Result};
use crate::matching::MatchConfig;

/// Longest trend or recent window accepted from a config file (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Engine-wide tunables. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub matching: MatchConfig,
    pub dashboard: DashboardDefaults,
    /// Length of the daily trend charts.
    pub trend_days: u32,
    /// Window for "this week" figures.
    pub recent_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            dashboard: DashboardDefaults::default(),
            trend_days: 30,
            recent_days: 7,
        }
    }
}

impl AnalyticsConfig {
    /// Default config location (`~/.jobboard-analytics/config.json`).
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| Error::Config("cannot determine home directory".into()))?
            .join(".jobboard-analytics")
            .join("config.json"))
    }

    /// Load from `path`, which must exist. Without a path the default
    /// location is tried and defaults are used if nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = match Self::default_path() {
                    Ok(p) => p,
                    Err(e) => {
                        log::debug!("{e}; using default config");
                        return Ok(Self::default());
                    }
                };
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config at {}; using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config
            .validate()
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Both day windows must be between 1 and [`MAX_WINDOW_DAYS`].
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, days) in [("trend_days", self.trend_days), ("recent_days", self.recent_days)] {
            if days == 0 || days > MAX_WINDOW_DAYS {
                return Err(format!("{name} must be between 1 and {MAX_WINDOW_DAYS}, got {days}"));
            }
        }
        Ok(())
    }
}
