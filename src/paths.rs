//! Filesystem locations
//!
//! ```text
//! ~/.todoist/          # mode 0700
//! └── config           # mode 0600, TOML key/value
//! ```

use std::path::PathBuf;

/// Configuration directory name, relative to the home directory
pub const CONFIG_DIR: &str = ".todoist";

/// Configuration filename
pub const CONFIG_FILE: &str = "config";

/// Get the home directory, or `.` when it cannot be determined
#[must_use]
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Get path to `~/.todoist/`
#[must_use]
pub fn config_dir() -> PathBuf {
    home_dir().join(CONFIG_DIR)
}

/// Get path to `~/.todoist/config`
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}
