use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ConfigError;

/// The largest `JUNK` chunk we'll read into memory by default (8 MiB).
///
/// The WG-1 writes a few dozen KiB, so anything near this is garbage.
pub const DEFAULT_MAX_JUNK_LEN: u32 = 8 * 1024 * 1024;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on the declared size of the auxiliary (`JUNK`) chunk.
    ///
    /// Chunks claiming more than this are rejected before allocating.
    pub max_junk_len: u32,

    /// Where extracted thumbnails should go.
    ///
    /// When unset, thumbnails are saved next to their movie file.
    pub thumbnail_dir: Option<Utf8PathBuf>,
}

impl Config {
    pub fn new(max_junk_len: u32, thumbnail_dir: Option<Utf8PathBuf>) -> Self {
        Self {
            max_junk_len,
            thumbnail_dir,
        }
    }

    /// Parses a `Config` from TOML text. Missing keys use their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s)
            .inspect_err(|e| tracing::warn!("Failed to parse config. err: {e}"))
            .map_err(ConfigError::ParseFailed)
    }

    /// Attempts to read a `Config` from a TOML file on disk.
    #[tracing::instrument]
    pub async fn from_disk(path: &Utf8Path) -> Result<Self, ConfigError> {
        let s = tokio::fs::read_to_string(path)
            .await
            .inspect_err(|e| tracing::warn!("Failed to read config file. err: {e}"))
            .map_err(ConfigError::ReadFailed)?;

        Self::from_toml_str(s.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_junk_len: DEFAULT_MAX_JUNK_LEN,
            thumbnail_dir: None,
        }
    }
}
