//! Access token configuration
//!
//! The token lives in `~/.todoist/config` as TOML (`access_token = "..."`).
//! The directory is created with mode 0700 and the file is written with
//! mode 0600, via a temp file and a rename so a reader never sees a partial
//! file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Environment variable consulted when the config file has no token
pub const TOKEN_ENV: &str = "TODOIST_ACCESS_TOKEN";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "TODOIST_API_BASE";

const HEADER: &str = "\
# Todoist CLI configuration
# Created by: todoist configure
#
# API token from https://todoist.com/app/settings/integrations/developer
";

/// Errors reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem failure
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// The file is not valid TOML
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Persisted CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Todoist API token
    #[serde(default)]
    pub access_token: String,
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn path() -> PathBuf {
        paths::config_file()
    }

    /// Whether the config file exists
    #[must_use]
    pub fn exists() -> bool {
        Self::path().exists()
    }

    /// Load config from disk. A missing file yields the default config.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(io_error(path)(e)),
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            create_private_dir(dir)?;
        }

        let content = format!("{HEADER}{}", toml::to_string(self)?);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content).map_err(io_error(&tmp))?;
        set_mode(&tmp, 0o600)?;
        fs::rename(&tmp, path).map_err(io_error(path))?;

        info!("wrote config to {}", path.display());
        Ok(())
    }

    /// Permission bits of the config file
    pub fn permissions() -> Result<u32, ConfigError> {
        mode_of(&Self::path())
    }
}

/// Resolve the access token: config file first, then [`TOKEN_ENV`].
/// Returns an empty string when neither is set. A config file that exists
/// but cannot be read or parsed is an error.
pub fn resolve_token() -> Result<String, ConfigError> {
    let config = Config::load()?;
    Ok(resolve_token_from(Some(&config), std::env::var(TOKEN_ENV).ok()))
}

/// Token precedence without touching the filesystem or environment
#[must_use]
pub fn resolve_token_from(config: Option<&Config>, env_token: Option<String>) -> String {
    config
        .map(|c| c.access_token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .or_else(|| env_token.map(|t| t.trim().to_string()))
        .unwrap_or_default()
}

/// Mask a token for display: first 4 and last 4 characters, or `****` for
/// short tokens.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(io_error(dir))
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(io_error(dir))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(io_error(path))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn mode_of(path: &Path) -> Result<u32, ConfigError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(io_error(path))?;
    Ok(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn mode_of(path: &Path) -> Result<u32, ConfigError> {
    fs::metadata(path).map_err(io_error(path))?;
    Ok(0o600)
}
