//! Core types for vaultkit.
//!
//! This crate provides the data structures shared by the vault scanner and
//! the rename engine: vault nodes and trees, configuration, settings
//! resolution and error types.

mod config;
mod error;
mod node;
mod settings;
mod tree;

pub use config::{DEFAULT_EXTENSION, DEFAULT_HIDDEN_MARKER, VaultConfig, VaultConfigBuilder};
pub use error::{ScanWarning, VaultError, WarningKind};
pub use node::{NodeKind, ReadFailure, VaultNode};
pub use settings::{RootSource, SETTINGS_FILE, Settings, VAULT_ENV_VAR};
pub use tree::{TreeStats, VaultTree};
