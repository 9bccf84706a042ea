//! Vault scanning and tree rendering for vaultkit.
//!
//! `vaultkit-scan` walks a vault once, keeping only directories and
//! documents, and builds a [`VaultTree`] whose directory nodes carry their
//! recursive document counts. [`TreeRenderer`] turns that tree into the
//! familiar `├──`/`└──` listing.
//!
//! # Example
//!
//! ```rust,no_run
//! use vaultkit_scan::{TreeRenderer, VaultConfig, VaultScanner};
//!
//! let config = VaultConfig::new("/path/to/vault");
//! let tree = VaultScanner::new().scan(&config).unwrap();
//!
//! println!("{} documents", tree.total_documents());
//! TreeRenderer::new(&tree)
//!     .write_all(&mut std::io::stdout().lock())
//!     .unwrap();
//! ```

mod render;
mod scanner;

pub use render::{
    BRANCH, LAST_BRANCH, PIPE_INDENT, SPACE_INDENT, TreeRenderer, print_vault_structure,
};
pub use scanner::VaultScanner;

// Re-export core types for convenience
pub use vaultkit_core::{
    NodeKind, ReadFailure, ScanWarning, TreeStats, VaultConfig, VaultError, VaultNode, VaultTree,
    WarningKind,
};
