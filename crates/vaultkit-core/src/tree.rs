//! Vault tree container and statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::VaultConfig;
use crate::error::ScanWarning;
use crate::node::VaultNode;

/// Summary statistics for a scanned vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of documents under the root.
    pub total_documents: u64,
    /// Total number of directories under the root (root excluded).
    pub total_dirs: u64,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document.
    pub fn record_document(&mut self) {
        self.total_documents += 1;
    }

    /// Record a directory.
    pub fn record_dir(&mut self) {
        self.total_dirs += 1;
    }
}

/// Complete scanned vault with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultTree {
    /// Root node of the tree.
    pub root: VaultNode,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Configuration used.
    pub config: VaultConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Warnings encountered during the scan.
    pub warnings: Vec<ScanWarning>,
}

impl VaultTree {
    /// Create a new vault tree.
    pub fn new(
        root: VaultNode,
        root_path: PathBuf,
        config: VaultConfig,
        stats: TreeStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Display name of the vault (last path component).
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Get the total number of documents.
    pub fn total_documents(&self) -> u64 {
        self.stats.total_documents
    }

    /// Get the total number of directories.
    pub fn total_dirs(&self) -> u64 {
        self.stats.total_dirs
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.total_dirs, 0);
    }

    #[test]
    fn test_tree_stats_record() {
        let mut stats = TreeStats::new();
        stats.record_dir();
        stats.record_document();
        stats.record_document();

        assert_eq!(stats.total_documents, 2);
        assert_eq!(stats.total_dirs, 1);
    }
}
