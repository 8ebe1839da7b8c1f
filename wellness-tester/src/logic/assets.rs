use std::path::{Path, PathBuf};
use thiserror::Error;
use wellness_game::{ConfigError, JourneyConfig};

use super::Messages;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("could not read journey config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a scenario needs besides the seed.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub config: JourneyConfig,
    pub messages: Messages,
}

impl TesterAssets {
    /// The config bundled with the web assets.
    pub fn load_default() -> Self {
        Self {
            config: JourneyConfig::load_from_static(),
            messages: Messages::english(),
        }
    }

    /// Load `path` when given, otherwise the bundled config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid journey config.
    pub fn load(path: Option<&Path>) -> Result<Self, AssetError> {
        let Some(path) = path else {
            return Ok(Self::load_default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = JourneyConfig::from_json(&raw)?;
        log::info!("journey config loaded from {}", path.display());
        Ok(Self {
            config,
            messages: Messages::english(),
        })
    }
}
