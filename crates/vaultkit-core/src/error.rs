//! Error types for vault operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::ReadFailure;

/// Errors that abort a vault operation.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Vault root does not exist.
    #[error("Vault path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Vault root is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be parsed.
    #[error("Invalid settings in {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl VaultError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::PathNotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Check that a vault root exists and is a directory.
    pub fn check_root(path: &std::path::Path) -> Result<(), Self> {
        if !path.exists() {
            return Err(Self::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(Self::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Whether this error means the root itself is unusable.
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::PathNotFound { .. } | Self::NotADirectory { .. })
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory.
    ReadError,
}

/// Non-fatal warning encountered during a walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning for a directory whose contents could not be listed.
    pub fn unreadable(path: impl Into<PathBuf>, failure: &ReadFailure) -> Self {
        match failure.kind {
            WarningKind::PermissionDenied => Self::permission_denied(path),
            WarningKind::ReadError => {
                Self::new(path, format!("Read error: {}", failure.detail), WarningKind::ReadError)
            }
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }
}
