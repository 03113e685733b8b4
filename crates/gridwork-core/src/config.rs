use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GridworkError, Result};

/// Top-level configuration for a Gridwork host application.
///
/// Loaded from a TOML file. Each section corresponds to one workspace
/// concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridworkConfig {
    #[serde(default)]
    pub table: TablePresets,
    #[serde(default)]
    pub relay: RelayConfig,
}

impl GridworkConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GridworkConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GridworkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Context-wide defaults applied to table actions during expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePresets {
    /// Whether actions ask for confirmation when the descriptor leaves the
    /// policy unset.
    pub confirm_by_default: bool,
    /// Presentation attributes merged under every action's own attributes.
    pub default_attributes: serde_json::Map<String, serde_json::Value>,
}

impl Default for TablePresets {
    fn default() -> Self {
        Self {
            confirm_by_default: false,
            default_attributes: serde_json::Map::new(),
        }
    }
}

/// Event relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Broadcast channel capacity; slow subscribers past this lag are
    /// dropped by the bus.
    pub channel_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}
