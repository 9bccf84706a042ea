//! Daily-note rename operation.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info, warn};

use vaultkit_core::{ReadFailure, ScanWarning, VaultConfig, VaultError};

use crate::date::DatePattern;
use crate::outcome::{RenameOutcome, RenameReport, SkipReason};

/// Renames `YYYY-MM-DD.<ext>` documents to `YYYYMMDD.<ext>` across a vault.
///
/// Hidden entries are walked like any other. Files that do not match the
/// pattern are ignored and never appear in the report.
#[derive(Debug, Clone)]
pub struct DateRenamer {
    config: VaultConfig,
    pattern: DatePattern,
    dry_run: bool,
}

impl DateRenamer {
    /// Create a renamer for a vault. Dry run is on by default.
    pub fn new(config: VaultConfig) -> Result<Self, VaultError> {
        let pattern = DatePattern::new(&config.extension).map_err(|e| VaultError::InvalidConfig {
            message: format!("cannot build date pattern: {e}"),
        })?;
        Ok(Self {
            config,
            pattern,
            dry_run: true,
        })
    }

    /// Set whether files are actually renamed.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether this renamer leaves the filesystem untouched.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Walk the vault and classify every dashed daily note.
    ///
    /// Fails only if the root is missing or not a directory; per-file
    /// failures are recorded as [`RenameOutcome::Errored`].
    pub fn run(&self) -> Result<RenameReport, VaultError> {
        let root = &self.config.root;
        VaultError::check_root(root)?;

        let mut report = RenameReport::new(self.dry_run);
        for path in self.documents(root, &mut report.warnings) {
            if let Some(outcome) = self.process(&path) {
                report.push(outcome);
            }
        }

        let counts = report.counts();
        debug!(
            root = %root.display(),
            dry_run = self.dry_run,
            renamed = counts.renamed,
            skipped = counts.skipped,
            errored = counts.errored,
            "rename run finished"
        );

        Ok(report)
    }

    /// Classify a single file, renaming it in live mode.
    ///
    /// Returns `None` when the file name is not a dashed date.
    pub fn process(&self, path: &Path) -> Option<RenameOutcome> {
        let file_name = path.file_name()?.to_str()?;
        let target_name = self.pattern.rename_target(file_name)?;
        let target = path
            .parent()
            .map(|parent| parent.join(&target_name))
            .unwrap_or_else(|| PathBuf::from(&target_name));

        // symlink_metadata so a dangling link still counts as occupying the name
        if fs::symlink_metadata(&target).is_ok() {
            debug!(path = %path.display(), "skipping, target exists");
            return Some(RenameOutcome::Skipped {
                original: path.to_path_buf(),
                target,
                reason: SkipReason::TargetExists,
            });
        }

        if self.dry_run {
            return Some(RenameOutcome::Renamed {
                original: path.to_path_buf(),
                new_path: target,
            });
        }

        match fs::rename(path, &target) {
            Ok(()) => {
                info!(from = %path.display(), to = %target.display(), "renamed");
                Some(RenameOutcome::Renamed {
                    original: path.to_path_buf(),
                    new_path: target,
                })
            }
            Err(e) => {
                warn!(path = %path.display(), "rename failed: {e}");
                Some(RenameOutcome::Errored {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Every entry with the document extension, in sorted traversal order.
    ///
    /// Directories named like documents are candidates too. They come after
    /// all files, deepest first, so renaming one never moves a path that is
    /// still waiting to be processed.
    fn documents(&self, root: &Path, warnings: &mut Vec<ScanWarning>) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(0);

        let mut documents = Vec::new();
        let mut directories = Vec::new();
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

            if let Some(err) = &entry.read_children_error {
                let path = entry.path();
                let failure = ReadFailure::classify(err.io_error(), err);
                warn!(path = %path.display(), "cannot read directory: {failure}");
                warnings.push(ScanWarning::unreadable(path, &failure));
            }

            if entry.depth() == 0
                || !self
                    .config
                    .matches_extension(&entry.file_name().to_string_lossy())
            {
                continue;
            }

            if entry.file_type().is_dir() {
                directories.push(entry.path());
            } else {
                documents.push(entry.path());
            }
        }

        documents.extend(directories.into_iter().rev());
        documents
    }
}

/// Rename every dashed daily note under `config.root`.
pub fn rename_daily_notes(config: &VaultConfig, dry_run: bool) -> Result<RenameReport, VaultError> {
    DateRenamer::new(config.clone())?.dry_run(dry_run).run()
}
