//! vaultkit - index and tidy a markdown vault.
//!
//! Usage:
//!   vk tree [PATH]             Print the vault as a tree of folders and notes
//!   vk rename [PATH]           Preview renaming YYYY-MM-DD notes to YYYYMMDD
//!   vk rename [PATH] --apply   Perform the renames
//!   vk --help                  Show help
//!
//! Without PATH the vault comes from `VAULTKIT_VAULT`, then `vault_path` in
//! the settings file, then the current directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vaultkit_core::{Settings, VAULT_ENV_VAR, VaultConfig};
use vaultkit_ops::DateRenamer;
use vaultkit_scan::print_vault_structure;

#[derive(Parser)]
#[command(
    name = "vaultkit",
    version,
    about = "Index and tidy a markdown vault",
    long_about = "vaultkit prints a markdown vault as a tree and normalizes \
                  daily-note file names.\n\n\
                  The vault is the PATH argument, else $VAULTKIT_VAULT, else \
                  `vault_path` from the settings file, else the current directory."
)]
struct Cli {
    /// Settings file (defaults to <config dir>/vaultkit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic log level (RUST_LOG takes precedence when set)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the vault as a tree of folders and documents
    Tree {
        /// Vault root
        path: Option<PathBuf>,

        /// Also show folders that contain no documents
        #[arg(short = 'e', long)]
        show_empty: bool,

        /// Document extension, without the dot (default: md)
        #[arg(short = 'x', long)]
        extension: Option<String>,
    },

    /// Rename YYYY-MM-DD documents to YYYYMMDD
    Rename {
        /// Vault root
        path: Option<PathBuf>,

        /// Perform the renames (default is a dry run)
        #[arg(short, long)]
        apply: bool,

        /// Document extension, without the dot (default: md)
        #[arg(short = 'x', long)]
        extension: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            Self::Off => None,
            Self::Error => Some(tracing::Level::ERROR),
            Self::Warn => Some(tracing::Level::WARN),
            Self::Info => Some(tracing::Level::INFO),
            Self::Debug => Some(tracing::Level::DEBUG),
            Self::Trace => Some(tracing::Level::TRACE),
        }
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_tracing(cli.log_level);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).context("Failed to load settings")?,
        None => Settings::load().context("Failed to load settings")?,
    };

    match cli.command {
        Command::Tree {
            path,
            show_empty,
            extension,
        } => run_tree(&settings, path, show_empty, extension),
        Command::Rename {
            path,
            apply,
            extension,
            format,
        } => run_rename(&settings, path, apply, extension, format),
    }
}

/// Log to stderr so stdout stays clean for the tree and JSON output.
fn setup_tracing(level: LogLevel) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match level.to_tracing_level() {
            Some(level) => EnvFilter::new(level.as_str().to_lowercase()),
            None => return,
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

/// Resolve the vault root and build its config.
fn vault_config(
    settings: &Settings,
    path: Option<PathBuf>,
    extension: Option<String>,
) -> Result<VaultConfig> {
    let (root, source) = settings.resolve_root(path, std::env::var_os(VAULT_ENV_VAR));
    debug!(root = %root.display(), ?source, "resolved vault root");

    let mut settings = settings.clone();
    if extension.is_some() {
        settings.extension = extension;
    }
    settings
        .vault_config(root)
        .context("Invalid vault configuration")
}

/// Print the vault tree.
fn run_tree(
    settings: &Settings,
    path: Option<PathBuf>,
    show_empty: bool,
    extension: Option<String>,
) -> Result<ExitCode> {
    let config = vault_config(settings, path, extension)?;
    let config = if show_empty {
        config.with_show_empty_folders(true)
    } else {
        config
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let rule = "=".repeat(60);

    writeln!(out, "{rule}")?;
    let Some(tree) = print_vault_structure(&config, &mut out)? else {
        return Ok(ExitCode::FAILURE);
    };
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "✅ Index generation complete!")?;

    debug!(
        documents = tree.total_documents(),
        dirs = tree.total_dirs(),
        warnings = tree.warnings.len(),
        elapsed_ms = tree.scan_duration.as_millis() as u64,
        "tree printed"
    );

    Ok(ExitCode::SUCCESS)
}

/// Rename dashed daily notes and print the summary.
fn run_rename(
    settings: &Settings,
    path: Option<PathBuf>,
    apply: bool,
    extension: Option<String>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let config = vault_config(settings, path, extension)?;
    let root = config.root.clone();

    let report = DateRenamer::new(config)?
        .dry_run(!apply)
        .run()
        .with_context(|| format!("Cannot rename notes in {}", display_root(&root)))?;

    match format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(ExitCode::SUCCESS)
}

fn display_root(root: &Path) -> String {
    root.canonicalize()
        .unwrap_or_else(|_| root.to_path_buf())
        .display()
        .to_string()
}
