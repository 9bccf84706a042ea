//! Rename outcomes and the run report.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use vaultkit_core::ScanWarning;

const RULE_WIDTH: usize = 50;

/// Why a candidate was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Something already exists at the compact name.
    TargetExists,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetExists => write!(f, "target exists"),
        }
    }
}

/// What happened to one matching file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenameOutcome {
    /// Renamed, or would be renamed in a dry run.
    Renamed { original: PathBuf, new_path: PathBuf },
    /// Not attempted.
    Skipped {
        original: PathBuf,
        target: PathBuf,
        reason: SkipReason,
    },
    /// The rename was attempted and failed.
    Errored { path: PathBuf, message: String },
}

impl RenameOutcome {
    /// Path of the file this outcome is about.
    pub fn source(&self) -> &Path {
        match self {
            Self::Renamed { original, .. } | Self::Skipped { original, .. } => original.as_path(),
            Self::Errored { path, .. } => path.as_path(),
        }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }
}

/// Per-bucket totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameCounts {
    pub renamed: usize,
    pub skipped: usize,
    pub errored: usize,
}

/// Everything a rename run did, in traversal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameReport {
    /// Whether the run left the filesystem untouched.
    pub dry_run: bool,
    /// One entry per matching file.
    pub outcomes: Vec<RenameOutcome>,
    /// Directories that could not be walked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

impl RenameReport {
    /// Create an empty report.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Record an outcome.
    pub fn push(&mut self, outcome: RenameOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn renamed(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| o.is_renamed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| o.is_skipped())
    }

    pub fn errored(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| o.is_errored())
    }

    /// Count outcomes per bucket.
    pub fn counts(&self) -> RenameCounts {
        self.outcomes
            .iter()
            .fold(RenameCounts::default(), |mut counts, outcome| {
                match outcome {
                    RenameOutcome::Renamed { .. } => counts.renamed += 1,
                    RenameOutcome::Skipped { .. } => counts.skipped += 1,
                    RenameOutcome::Errored { .. } => counts.errored += 1,
                }
                counts
            })
    }

    /// Check if any rename failed.
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(RenameOutcome::is_errored)
    }
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

impl fmt::Display for RenameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts();
        let (title_prefix, would_be) = if self.dry_run {
            ("DRY RUN - ", "would be ")
        } else {
            ("", "")
        };

        writeln!(f, "{title_prefix}Daily Notes Renamer Summary")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Files {would_be}renamed: {}", counts.renamed)?;
        writeln!(f, "Files skipped: {}", counts.skipped)?;
        writeln!(f, "Errors: {}", counts.errored)?;
        writeln!(f)?;

        if counts.renamed > 0 {
            if self.dry_run {
                writeln!(f, "Files that would be renamed:")?;
            } else {
                writeln!(f, "Files renamed:")?;
            }
            for outcome in self.renamed() {
                if let RenameOutcome::Renamed { original, new_path } = outcome {
                    writeln!(f, "  {} → {}", file_name(original), file_name(new_path))?;
                }
            }
            writeln!(f)?;
        }

        if counts.skipped > 0 {
            writeln!(f, "Files skipped:")?;
            for outcome in self.skipped() {
                if let RenameOutcome::Skipped { original, reason, .. } = outcome {
                    writeln!(f, "  {} - {reason}", file_name(original))?;
                }
            }
            writeln!(f)?;
        }

        if counts.errored > 0 {
            writeln!(f, "Errors:")?;
            for outcome in self.errored() {
                if let RenameOutcome::Errored { path, message } = outcome {
                    writeln!(f, "  {} - {message}", file_name(path))?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
