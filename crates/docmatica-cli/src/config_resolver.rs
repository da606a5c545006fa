//! Locating and loading `docmatica.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <file>`
//! 2. `docmatica.toml`, then `.docmatica.toml`, in the directory being linted
//! 3. `config.toml` in `$DOCMATICA_CONFIG_DIR`, else in `~/.docmatica/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use docmatica_core::Config;
use std::path::{Path, PathBuf};

/// File names looked up in the linted directory.
const LOCAL_NAMES: [&str; 2] = ["docmatica.toml", ".docmatica.toml"];

/// File name looked up in the user config directory.
const USER_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the user config directory.
pub const CONFIG_DIR_ENV: &str = "DOCMATICA_CONFIG_DIR";

/// Origin of the configuration used for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the docs.
    Local(PathBuf),
    /// Found in the user config directory.
    User(PathBuf),
    /// Nothing found.
    Builtin,
}

impl ConfigSource {
    /// Path of the config file, if one was found.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Local(p) | Self::User(p) => Some(p),
            Self::Builtin => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, including an
    /// explicit path that does not exist.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if let Self::User(p) = self {
            tracing::info!("Using user config: {}", p.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Finds the configuration for linting `docs_dir`.
#[must_use]
pub fn resolve(docs_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    find(docs_dir, explicit, user_config_dir())
}

fn find(docs_dir: &Path, explicit: Option<&Path>, user_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(local) = LOCAL_NAMES
        .iter()
        .map(|name| docs_dir.join(name))
        .find(|p| p.is_file())
    {
        tracing::debug!("Found local config: {}", local.display());
        return ConfigSource::Local(local);
    }

    user_dir
        .map(|dir| dir.join(USER_CONFIG_NAME))
        .filter(|p| p.is_file())
        .map_or(ConfigSource::Builtin, |p| {
            tracing::debug!("Found user config: {}", p.display());
            ConfigSource::User(p)
        })
}

/// Returns the user config directory: `$DOCMATICA_CONFIG_DIR`, else `~/.docmatica`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".docmatica"))
}
