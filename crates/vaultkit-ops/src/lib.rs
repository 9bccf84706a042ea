//! Batch file operations for vaultkit.
//!
//! The one operation so far is daily-note renaming: every document named
//! `YYYY-MM-DD.<ext>` is renamed in place to `YYYYMMDD.<ext>`.
//!
//! ```rust,no_run
//! use vaultkit_core::VaultConfig;
//! use vaultkit_ops::DateRenamer;
//!
//! let renamer = DateRenamer::new(VaultConfig::new("/path/to/vault"))?.dry_run(true);
//! let report = renamer.run()?;
//! print!("{report}");
//! # Ok::<(), vaultkit_core::VaultError>(())
//! ```
//!
//! Each matching file lands in exactly one [`RenameOutcome`] bucket. An
//! existing target is never overwritten, and one failed rename does not stop
//! the batch.

mod date;
mod outcome;
mod rename;

pub use date::{DatePattern, DateToken};
pub use outcome::{RenameCounts, RenameOutcome, RenameReport, SkipReason};
pub use rename::{DateRenamer, rename_daily_notes};
