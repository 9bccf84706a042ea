//! Text rendering of a scanned vault.
//!
//! Output looks like:
//!
//! ```text
//! 📁 Obsidian Vault Structure: Notes
//! 📍 Path: /home/me/Notes
//! ============================================================
//! 📊 Summary: 3 markdown files in 2 folders
//!
//! └── 📁 Notes (3 files)
//!     ├── 📁 Daily (2 files)
//!     │   ├── 📄 20240105.md
//!     │   └── 📄 20240106.md
//!     └── 📄 Home.md
//! ```
//!
//! Counts cover every entry under a folder, hidden ones included, while
//! hidden entries themselves are never drawn.

use std::io::{self, Write};

use tracing::debug;

use vaultkit_core::{DEFAULT_EXTENSION, VaultConfig, VaultError, VaultNode, VaultTree};

use crate::scanner::VaultScanner;

/// Connector for every sibling but the last.
pub const BRANCH: &str = "├── ";
/// Connector for the last sibling.
pub const LAST_BRANCH: &str = "└── ";
/// Prefix continuation below a non-last sibling.
pub const PIPE_INDENT: &str = "│   ";
/// Prefix continuation below a last sibling.
pub const SPACE_INDENT: &str = "    ";

const FOLDER_ICON: &str = "📁";
const DOCUMENT_ICON: &str = "📄";
const ERROR_ICON: &str = "❌";
const RULE_WIDTH: usize = 60;

/// Renders a [`VaultTree`] as an indented text tree.
pub struct TreeRenderer<'a> {
    tree: &'a VaultTree,
    show_empty_folders: bool,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer using the tree's own configuration.
    pub fn new(tree: &'a VaultTree) -> Self {
        Self {
            tree,
            show_empty_folders: tree.config.show_empty_folders,
        }
    }

    /// Override whether empty folders are rendered.
    pub fn show_empty_folders(mut self, show: bool) -> Self {
        self.show_empty_folders = show;
        self
    }

    /// Write the header block: vault name, path and summary counts.
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{FOLDER_ICON} Obsidian Vault Structure: {}", self.tree.name())?;
        writeln!(out, "📍 Path: {}", self.tree.root_path.display())?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "📊 Summary: {} {} files in {} folders",
            self.tree.total_documents(),
            document_label(&self.tree.config.extension),
            self.tree.total_dirs()
        )?;
        writeln!(out)
    }

    /// Write the tree itself.
    ///
    /// The root is drawn as the single top-level entry, so its children
    /// start one indent level in.
    pub fn write_tree<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let root = &self.tree.root;
        if root.document_count() > 0 || self.show_empty_folders {
            self.write_entry(root, "", true, out)
        } else {
            self.write_contents(root, "", SPACE_INDENT, out)
        }
    }

    /// Write header and tree.
    pub fn write_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_header(out)?;
        self.write_tree(out)
    }

    fn write_entry<W: Write>(
        &self,
        node: &VaultNode,
        prefix: &str,
        is_last: bool,
        out: &mut W,
    ) -> io::Result<()> {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };

        if !node.is_dir() {
            return writeln!(out, "{prefix}{connector}{DOCUMENT_ICON} {}", node.name);
        }

        writeln!(
            out,
            "{prefix}{connector}{FOLDER_ICON} {} {}",
            node.name,
            count_label(node.document_count())
        )?;

        let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
        self.write_contents(node, prefix, &format!("{prefix}{indent}"), out)
    }

    /// Write a directory's children, or its read failure at the directory's
    /// own indentation.
    fn write_contents<W: Write>(
        &self,
        node: &VaultNode,
        prefix: &str,
        child_prefix: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if let Some(failure) = node.read_error() {
            return writeln!(out, "{prefix}{ERROR_ICON} {failure}");
        }

        let visible: Vec<&VaultNode> = node.children.iter().filter(|c| self.is_visible(c)).collect();
        let last = visible.len().saturating_sub(1);
        for (i, child) in visible.into_iter().enumerate() {
            self.write_entry(child, child_prefix, i == last, out)?;
        }
        Ok(())
    }

    fn is_visible(&self, node: &VaultNode) -> bool {
        if self.tree.config.should_skip_hidden(&node.name) {
            return false;
        }
        if node.is_dir() {
            node.document_count() > 0 || self.show_empty_folders
        } else {
            self.tree.config.matches_extension(&node.name)
        }
    }
}

/// `(N files)` or `(empty)`.
fn count_label(count: u64) -> String {
    if count == 0 {
        "(empty)".to_string()
    } else {
        format!("({count} files)")
    }
}

/// `markdown` for the default extension, `.<ext>` otherwise.
fn document_label(extension: &str) -> String {
    if extension == DEFAULT_EXTENSION {
        "markdown".to_string()
    } else {
        format!(".{extension}")
    }
}

/// Scan and print a vault in one step.
///
/// An invalid root is reported on `out` as a labeled error rather than
/// returned; the result is `None` in that case. Only write failures on
/// `out` are returned as errors.
pub fn print_vault_structure<W: Write>(
    config: &VaultConfig,
    out: &mut W,
) -> io::Result<Option<VaultTree>> {
    let tree = match VaultScanner::new().scan(config) {
        Ok(tree) => tree,
        Err(VaultError::PathNotFound { path }) => {
            writeln!(out, "{ERROR_ICON} Error: Vault path '{}' does not exist", path.display())?;
            return Ok(None);
        }
        Err(VaultError::NotADirectory { path }) => {
            writeln!(out, "{ERROR_ICON} Error: '{}' is not a directory", path.display())?;
            return Ok(None);
        }
        Err(err) => {
            writeln!(out, "{ERROR_ICON} Error: {err}")?;
            return Ok(None);
        }
    };

    debug!(warnings = tree.warnings.len(), "rendering vault tree");
    TreeRenderer::new(&tree).write_all(out)?;
    Ok(Some(tree))
}
