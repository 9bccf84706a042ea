//! Vault configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default document extension (without the leading dot).
pub const DEFAULT_EXTENSION: &str = "md";

/// Names starting with this character are hidden.
pub const DEFAULT_HIDDEN_MARKER: char = '.';

/// Configuration for walking a vault.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct VaultConfig {
    /// Root directory of the vault.
    pub root: PathBuf,

    /// Document extension, without the leading dot.
    #[builder(default = "DEFAULT_EXTENSION.to_string()")]
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Marker character for hidden entries.
    #[builder(default = "DEFAULT_HIDDEN_MARKER")]
    #[serde(default = "default_hidden_marker")]
    pub hidden_marker: char,

    /// Render hidden entries. They are always walked and counted.
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Render directories that contain no documents.
    #[builder(default = "false")]
    #[serde(default)]
    pub show_empty_folders: bool,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_hidden_marker() -> char {
    DEFAULT_HIDDEN_MARKER
}

impl VaultConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(ref ext) = self.extension {
            if ext.is_empty() {
                return Err("Extension cannot be empty".to_string());
            }
            if ext.starts_with('.') || ext.contains(['/', '\\']) {
                return Err(format!("Invalid extension: {ext}"));
            }
        }
        Ok(())
    }
}

impl VaultConfig {
    /// Create a new vault config builder.
    pub fn builder() -> VaultConfigBuilder {
        VaultConfigBuilder::default()
    }

    /// Create a config with defaults for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: default_extension(),
            hidden_marker: DEFAULT_HIDDEN_MARKER,
            include_hidden: false,
            show_empty_folders: false,
        }
    }

    /// Set whether empty folders are rendered.
    pub fn with_show_empty_folders(mut self, show: bool) -> Self {
        self.show_empty_folders = show;
        self
    }

    /// Check if a name is hidden.
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with(self.hidden_marker)
    }

    /// Check if an entry is left out of the rendered tree for being hidden.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && self.is_hidden(name)
    }

    /// Check if a file name carries the document extension.
    ///
    /// The name must be longer than the suffix itself, so a bare `.md`
    /// does not count as a document.
    pub fn matches_extension(&self, name: &str) -> bool {
        name.strip_suffix(self.extension.as_str())
            .and_then(|stem| stem.strip_suffix('.'))
            .is_some_and(|stem| !stem.is_empty())
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
