//! User settings and vault root resolution.
//!
//! Settings live in `<config_dir>/vaultkit/config.toml`:
//!
//! ```toml
//! vault_path = "~/Notes"
//! extension = "md"
//! show_empty_folders = false
//! ```
//!
//! The vault root is resolved once at startup, in order of precedence:
//! an explicit path argument, the `VAULTKIT_VAULT` environment variable,
//! `vault_path` from the settings file, and finally the current directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{DEFAULT_EXTENSION, VaultConfig};
use crate::error::VaultError;

/// Environment variable that overrides the configured vault path.
pub const VAULT_ENV_VAR: &str = "VAULTKIT_VAULT";

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Persistent user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default vault root.
    pub vault_path: Option<PathBuf>,

    /// Document extension, without the leading dot.
    pub extension: Option<String>,

    /// Render directories with no documents.
    pub show_empty_folders: bool,
}

/// Where a resolved vault root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// Passed on the command line.
    Argument,
    /// Taken from `VAULTKIT_VAULT`.
    Environment,
    /// Taken from the settings file.
    Settings,
    /// Compiled default (current directory).
    Default,
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vaultkit").join(SETTINGS_FILE))
    }

    /// Load settings from the default location.
    ///
    /// A missing file yields default settings.
    pub fn load() -> Result<Self, VaultError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, VaultError> {
        let contents = std::fs::read_to_string(path).map_err(|e| VaultError::io(path, e))?;
        let settings = Self::parse(&contents).map_err(|message| VaultError::Settings {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Resolve the vault root and record where it came from.
    pub fn resolve_root(
        &self,
        explicit: Option<PathBuf>,
        env: Option<OsString>,
    ) -> (PathBuf, RootSource) {
        if let Some(path) = explicit {
            return (path, RootSource::Argument);
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return (PathBuf::from(value), RootSource::Environment);
        }
        if let Some(ref path) = self.vault_path {
            return (expand_home(path), RootSource::Settings);
        }
        (PathBuf::from("."), RootSource::Default)
    }

    /// Build a vault config for the given root using these settings.
    pub fn vault_config(&self, root: impl Into<PathBuf>) -> Result<VaultConfig, VaultError> {
        let root: PathBuf = root.into();
        VaultConfig::builder()
            .root(root)
            .extension(
                self.extension
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            )
            .show_empty_folders(self.show_empty_folders)
            .build()
            .map_err(|e| VaultError::InvalidConfig {
                message: e.to_string(),
            })
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::parse(
            r#"
            vault_path = "/notes"
            extension = "txt"
            show_empty_folders = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.vault_path, Some(PathBuf::from("/notes")));
        assert_eq!(settings.extension.as_deref(), Some("txt"));
        assert!(settings.show_empty_folders);
    }

    #[test]
    fn test_parse_empty_settings() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Settings::parse("vault = \"/notes\"").is_err());
    }

    #[test]
    fn test_resolve_root_precedence() {
        let settings = Settings {
            vault_path: Some(PathBuf::from("/from/settings")),
            ..Settings::default()
        };

        let (root, source) = settings.resolve_root(
            Some(PathBuf::from("/from/arg")),
            Some(OsString::from("/from/env")),
        );
        assert_eq!(root, PathBuf::from("/from/arg"));
        assert_eq!(source, RootSource::Argument);

        let (root, source) = settings.resolve_root(None, Some(OsString::from("/from/env")));
        assert_eq!(root, PathBuf::from("/from/env"));
        assert_eq!(source, RootSource::Environment);

        let (root, source) = settings.resolve_root(None, Some(OsString::new()));
        assert_eq!(root, PathBuf::from("/from/settings"));
        assert_eq!(source, RootSource::Settings);

        let (root, source) = Settings::default().resolve_root(None, None);
        assert_eq!(root, PathBuf::from("."));
        assert_eq!(source, RootSource::Default);
    }

    #[test]
    fn test_vault_config_from_settings() {
        let settings = Settings {
            extension: Some("markdown".to_string()),
            show_empty_folders: true,
            ..Settings::default()
        };

        let config = settings.vault_config("/vault").unwrap();
        assert_eq!(config.extension, "markdown");
        assert!(config.show_empty_folders);

        let config = Settings::default().vault_config("/vault").unwrap();
        assert_eq!(config.extension, "md");
    }
}
