//! Vault node types.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::WarningKind;

/// Why a directory's contents could not be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFailure {
    /// Classification of the failure.
    pub kind: WarningKind,
    /// Underlying OS message.
    pub detail: String,
}

impl ReadFailure {
    /// Create a new read failure.
    pub fn new(kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Classify an I/O error.
    pub fn from_io(error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            _ => WarningKind::ReadError,
        };
        Self::new(kind, error.to_string())
    }

    /// Classify a walk failure that may or may not wrap an I/O error.
    pub fn classify(error: Option<&std::io::Error>, fallback: impl fmt::Display) -> Self {
        match error {
            Some(io) => Self::from_io(io),
            None => Self::new(WarningKind::ReadError, fallback.to_string()),
        }
    }
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::PermissionDenied => write!(f, "Permission denied"),
            WarningKind::ReadError => write!(f, "Error reading directory: {}", self.detail),
        }
    }
}

/// Type of vault node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeKind {
    /// A document carrying the vault extension.
    Document,
    /// Directory.
    Directory {
        /// Total number of documents in this subtree.
        document_count: u64,
        /// Total number of directories in this subtree.
        dir_count: u64,
        /// Set when the directory could not be listed.
        read_error: Option<ReadFailure>,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a document.
    pub fn is_document(&self) -> bool {
        matches!(self, NodeKind::Document)
    }
}

/// A single directory or document in the vault tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultNode {
    /// Entry name (not full path).
    pub name: CompactString,

    /// Absolute path of the entry.
    pub path: PathBuf,

    /// Node type and associated metadata.
    pub kind: NodeKind,

    /// Children (directories only), directories first then by name.
    pub children: Vec<VaultNode>,
}

impl VaultNode {
    /// Create a new document node.
    pub fn new_document(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Document,
            children: Vec::new(),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory {
                document_count: 0,
                dir_count: 0,
                read_error: None,
            },
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a document.
    pub fn is_document(&self) -> bool {
        self.kind.is_document()
    }

    /// Get document count for directories, 1 for documents.
    pub fn document_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { document_count, .. } => *document_count,
            NodeKind::Document => 1,
        }
    }

    /// Get directory count for directories.
    pub fn dir_count(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory { dir_count, .. } => *dir_count,
            NodeKind::Document => 0,
        }
    }

    /// Get the read failure of a directory, if listing it failed.
    pub fn read_error(&self) -> Option<&ReadFailure> {
        match &self.kind {
            NodeKind::Directory { read_error, .. } => read_error.as_ref(),
            NodeKind::Document => None,
        }
    }

    /// Mark a directory as unreadable.
    pub fn set_read_error(&mut self, failure: ReadFailure) {
        if let NodeKind::Directory { read_error, .. } = &mut self.kind {
            *read_error = Some(failure);
        }
    }

    /// Ordering used for siblings: directories first, then by
    /// case-insensitive name.
    pub fn sibling_order(a: &VaultNode, b: &VaultNode) -> Ordering {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    }

    /// Sort children recursively in sibling order.
    pub fn sort_children(&mut self) {
        self.children.sort_by(Self::sibling_order);
        for child in &mut self.children {
            child.sort_children();
        }
    }

    /// Update directory counts based on children.
    ///
    /// Children must already carry their own counts.
    pub fn update_counts(&mut self) {
        if let NodeKind::Directory {
            ref mut document_count,
            ref mut dir_count,
            ..
        } = self.kind
        {
            *document_count = 0;
            *dir_count = 0;

            for child in &self.children {
                match &child.kind {
                    NodeKind::Document => *document_count += 1,
                    NodeKind::Directory {
                        document_count: docs,
                        dir_count: dirs,
                        ..
                    } => {
                        *document_count += docs;
                        *dir_count += dirs + 1;
                    }
                }
            }
        }
    }
}
