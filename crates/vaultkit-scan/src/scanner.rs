//! JWalk-based vault scanner.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};
use tracing::{debug, warn};

use vaultkit_core::{
    ReadFailure, ScanWarning, TreeStats, VaultConfig, VaultError, VaultNode, VaultTree,
};

/// Scanner that builds a [`VaultTree`] in a single walk.
///
/// Directory counts are aggregated bottom-up while the tree is assembled,
/// so every node carries its recursive document count without re-walking
/// its subtree.
#[derive(Debug, Default)]
pub struct VaultScanner;

impl VaultScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan the vault described by `config`.
    pub fn scan(&self, config: &VaultConfig) -> Result<VaultTree, VaultError> {
        let start = Instant::now();

        VaultError::check_root(&config.root)?;
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| VaultError::io(&config.root, e))?;

        let mut stats = TreeStats::new();
        let mut warnings = Vec::new();

        let collected = self.collect_entries(config, &root_path, &mut stats, &mut warnings);
        let root_node = self.build_tree(&root_path, collected);

        debug!(
            root = %root_path.display(),
            documents = stats.total_documents,
            dirs = stats.total_dirs,
            "vault scan finished"
        );

        Ok(VaultTree::new(
            root_node,
            root_path,
            config.clone(),
            stats,
            start.elapsed(),
            warnings,
        ))
    }

    /// Collect directories and documents grouped by parent.
    ///
    /// Hidden entries are walked and counted like any other; leaving them
    /// out of the output is up to the renderer.
    fn collect_entries(
        &self,
        config: &VaultConfig,
        root_path: &Path,
        stats: &mut TreeStats,
        warnings: &mut Vec<ScanWarning>,
    ) -> Collected {
        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(0);

        let mut collected = Collected::default();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    let failure = ReadFailure::classify(err.io_error(), &err);
                    warn!(path = %path.display(), "cannot read entry: {failure}");
                    warnings.push(ScanWarning::unreadable(path, &failure));
                    continue;
                }
            };

            let path = entry.path();

            // jwalk reports a failed listing on the directory entry itself
            if let Some(err) = &entry.read_children_error {
                let failure = ReadFailure::classify(err.io_error(), err);
                warn!(path = %path.display(), "cannot read directory: {failure}");
                warnings.push(ScanWarning::unreadable(&path, &failure));
                collected.unreadable.insert(path.clone(), failure);
            }

            if entry.depth() == 0 {
                continue;
            }

            let Some(parent) = path.parent().map(Path::to_path_buf) else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = entry.file_type();

            let is_dir = file_type.is_dir();
            if is_dir {
                stats.record_dir();
            } else {
                let is_document = if file_type.is_file() {
                    config.matches_extension(&name)
                } else if file_type.is_symlink() {
                    // Linked documents are listed; linked directories are not walked.
                    path.is_file() && config.matches_extension(&name)
                } else {
                    false
                };
                if !is_document {
                    continue;
                }
                stats.record_document();
            }

            collected
                .by_parent
                .entry(parent)
                .or_default()
                .push(EntryInfo {
                    name: name.into(),
                    path,
                    is_dir,
                });
        }

        collected
    }

    /// Build tree structure from collected entries.
    fn build_tree(&self, root_path: &Path, mut collected: Collected) -> VaultNode {
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root_path.to_string_lossy().to_string());
        let mut root = self.build_node(name.into(), root_path, &mut collected);
        root.sort_children();
        root
    }

    /// Recursively build a directory node; counts are summed post-order.
    fn build_node(&self, name: CompactString, path: &Path, collected: &mut Collected) -> VaultNode {
        let mut node = VaultNode::new_directory(name, path);

        if let Some(failure) = collected.unreadable.remove(path) {
            node.set_read_error(failure);
        }

        let children_entries = collected.by_parent.remove(path).unwrap_or_default();
        for entry in children_entries {
            if entry.is_dir {
                let child = self.build_node(entry.name, &entry.path, collected);
                node.children.push(child);
            } else {
                node.children
                    .push(VaultNode::new_document(entry.name, entry.path));
            }
        }

        node.update_counts();
        node
    }
}

/// Entries gathered during the walk.
#[derive(Default)]
struct Collected {
    by_parent: HashMap<PathBuf, Vec<EntryInfo>>,
    unreadable: HashMap<PathBuf, ReadFailure>,
}

/// Temporary struct for collecting entry information.
struct EntryInfo {
    name: CompactString,
    path: PathBuf,
    is_dir: bool,
}
